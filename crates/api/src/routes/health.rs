//! Liveness check, mounted at the root rather than under the API prefix.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use dishduty_core::types::Day;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the record store does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// False when no admin password is configured and admin actions are off.
    pub admin_enabled: bool,
    /// The day the scheduler currently resolves.
    pub today: Day,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.store.ping().await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        admin_enabled: state.admin.is_configured(),
        today: state.clock.today(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
