use std::sync::Arc;

use dishduty_core::clock::Clock;
use dishduty_core::store::DutyStore;

use crate::auth::AdminSecret;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store (Postgres in production, in-memory in tests).
    pub store: Arc<dyn DutyStore>,
    /// Source of "today" for every scheduling operation.
    pub clock: Arc<dyn Clock>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared admin secret check, built once from config.
    pub admin: Arc<AdminSecret>,
}
