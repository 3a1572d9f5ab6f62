use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Assignment routes mounted at `/assignments`.
///
/// ```text
/// GET    /                -> list_assignments
/// PATCH  /{id}/status     -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assignments::list_assignments))
        .route("/{id}/status", patch(assignments::update_status))
}
