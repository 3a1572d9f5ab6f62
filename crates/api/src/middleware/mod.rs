//! Request extractors for authorization.
//!
//! - [`admin::RequireAdmin`] -- Requires the shared admin secret in the
//!   `X-Admin-Password` header.

pub mod admin;
