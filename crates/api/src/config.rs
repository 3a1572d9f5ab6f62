use std::fmt;

/// Roster seeded at boot when `SEED_WORKERS` is not set.
pub const DEFAULT_SEED_WORKERS: &str = "keromag,megatorg,baby-ch";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared admin secret. `None` rejects every admin action.
    pub admin_password: Option<String>,
    /// Worker names ensured to exist at boot.
    pub seed_workers: Vec<String>,
    /// Delay before the one-shot startup resolve (default: `5`).
    pub startup_resolve_delay_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `HOST`                       | `0.0.0.0`                  |
    /// | `PORT`                       | `3000`                     |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                       |
    /// | `ADMIN_PASS`                 | unset                      |
    /// | `SEED_WORKERS`               | `keromag,megatorg,baby-ch` |
    /// | `STARTUP_RESOLVE_DELAY_SECS` | `5`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_password = std::env::var("ADMIN_PASS")
            .ok()
            .filter(|s| !s.is_empty());

        let seed_workers = split_list(
            &std::env::var("SEED_WORKERS").unwrap_or_else(|_| DEFAULT_SEED_WORKERS.into()),
        );

        let startup_resolve_delay_secs: u64 = std::env::var("STARTUP_RESOLVE_DELAY_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("STARTUP_RESOLVE_DELAY_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_password,
            seed_workers,
            startup_resolve_delay_secs,
        }
    }
}

// Keeps the admin secret out of logs.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .field("seed_workers", &self.seed_workers)
            .field("startup_resolve_delay_secs", &self.startup_resolve_delay_secs)
            .finish()
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(
            split_list(" keromag, megatorg ,,baby-ch "),
            vec!["keromag", "megatorg", "baby-ch"]
        );
    }

    #[test]
    fn debug_redacts_admin_password() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            admin_password: Some("hunter2".into()),
            seed_workers: vec![],
            startup_resolve_delay_secs: 0,
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
