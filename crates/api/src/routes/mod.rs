pub mod assignments;
pub mod health;
pub mod queue;
pub mod schedule;
pub mod workers;

use axum::Router;

use crate::state::AppState;

/// Path prefix under which [`api_routes`] is mounted.
pub const API_PREFIX: &str = "/api/dishduty";

/// Build the `/api/dishduty` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workers                          list (public), create (admin)
///
/// /queue/add                        enqueue a worker (admin)
///
/// /assignments                      list in date range (public)
/// /assignments/{id}/status          update status (admin, PATCH)
///
/// /current-assignee                 resolve and return today's worker
/// /trigger-daily-assignment         run the daily resolution (POST)
/// /mark-not-done                    reassign and cascade (admin, POST)
/// /calendar                         assignments + projected queue days
/// /action-log                       recent audit entries (admin header)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Roster.
        .nest("/workers", workers::router())
        // Manual queue.
        .nest("/queue", queue::router())
        // Assignment listing and status updates.
        .nest("/assignments", assignments::router())
        // Daily resolution, reassignment and read views.
        .merge(schedule::router())
}
