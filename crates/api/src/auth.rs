//! Shared admin secret.
//!
//! A single configured password guards every admin action. The value is
//! captured once at startup and handed to handlers through
//! [`AppState`](crate::state::AppState); when no secret is configured every
//! admin action is rejected.

use dishduty_core::error::{CoreError, CoreResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const VERIFY_MESSAGE: &[u8] = b"dishduty-admin";

/// Only an HMAC tag keyed by the configured password is kept in memory.
pub struct AdminSecret {
    tag: Option<Vec<u8>>,
}

impl AdminSecret {
    /// An empty string counts as unset.
    pub fn new(expected: Option<String>) -> Self {
        let tag = expected
            .filter(|s| !s.is_empty())
            .and_then(|s| keyed_mac(&s))
            .map(|mac| mac.finalize().into_bytes().to_vec());
        Self { tag }
    }

    pub fn is_configured(&self) -> bool {
        self.tag.is_some()
    }

    /// Check a caller-supplied password. The tag comparison is constant-time.
    pub fn verify(&self, provided: Option<&str>) -> CoreResult<()> {
        let Some(tag) = self.tag.as_deref() else {
            tracing::warn!("Admin action rejected: ADMIN_PASS is not configured");
            return Err(CoreError::Unauthorized(
                "Admin actions are disabled".into(),
            ));
        };
        match provided.and_then(keyed_mac) {
            Some(mac) if mac.clone().verify_slice(tag).is_ok() => Ok(()),
            _ => Err(CoreError::Unauthorized("Invalid admin password".into())),
        }
    }
}

fn keyed_mac(password: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(password.as_bytes()).ok()?;
    mac.update(VERIFY_MESSAGE);
    Some(mac)
}
