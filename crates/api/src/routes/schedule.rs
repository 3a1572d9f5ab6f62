//! Top-level schedule routes: daily resolution, reassignment and the
//! read-only views built on them.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{action_log, calendar, duty};
use crate::state::AppState;

/// Schedule routes merged directly into the API root.
///
/// ```text
/// GET    /current-assignee            -> current_assignee
/// POST   /trigger-daily-assignment    -> trigger_daily_assignment
/// POST   /mark-not-done               -> mark_not_done (admin)
/// GET    /calendar                    -> get_calendar
/// GET    /action-log                  -> list_action_log (admin header)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current-assignee", get(duty::current_assignee))
        .route(
            "/trigger-daily-assignment",
            post(duty::trigger_daily_assignment),
        )
        .route("/mark-not-done", post(duty::mark_not_done))
        .route("/calendar", get(calendar::get_calendar))
        .route("/action-log", get(action_log::list_action_log))
}
