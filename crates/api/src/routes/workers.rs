use axum::routing::get;
use axum::Router;

use crate::handlers::workers;
use crate::state::AppState;

/// Roster routes mounted at `/workers`.
///
/// ```text
/// GET    /     -> list_workers
/// POST   /     -> create_worker (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(workers::list_workers).post(workers::create_worker))
}
