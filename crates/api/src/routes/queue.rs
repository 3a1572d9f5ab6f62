use axum::routing::post;
use axum::Router;

use crate::handlers::queue;
use crate::state::AppState;

/// Queue routes mounted at `/queue`.
///
/// ```text
/// POST   /add  -> add_to_queue (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/add", post(queue::add_to_queue))
}
