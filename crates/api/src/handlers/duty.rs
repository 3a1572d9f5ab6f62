//! Handlers that resolve today's duty or reassign it.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use dishduty_core::action_log::{self, action_types};
use dishduty_core::dates::parse_day;
use dishduty_core::entities::AssignmentStatus;
use dishduty_core::resolver::{self, ResolutionSource};
use dishduty_core::types::{Day, DbId};
use dishduty_core::undone;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Who is on duty today.
#[derive(Debug, Serialize)]
pub struct CurrentAssignee {
    pub date: Day,
    pub worker_id: DbId,
    pub worker_name: String,
    pub status: AssignmentStatus,
    pub source: ResolutionSource,
}

/// Body of `POST /mark-not-done`.
#[derive(Debug, Deserialize)]
pub struct MarkNotDoneRequest {
    pub date: String,
    pub admin_password: Option<String>,
}

/// GET /api/dishduty/current-assignee
///
/// Resolves today if nobody holds it yet.
pub async fn current_assignee(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();
    let resolution = resolver::resolve_day(state.store.as_ref(), today).await?;

    Ok(Json(DataResponse {
        data: CurrentAssignee {
            date: today,
            worker_id: resolution.worker.id,
            worker_name: resolution.worker.name,
            status: resolution.assignment.status,
            source: resolution.source,
        },
    }))
}

/// POST /api/dishduty/trigger-daily-assignment
///
/// Run the daily resolution explicitly and return its outcome.
pub async fn trigger_daily_assignment(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();
    let store = state.store.as_ref();

    match resolver::resolve_day(store, today).await {
        Ok(resolution) => Ok(Json(DataResponse { data: resolution })),
        Err(e) => {
            tracing::error!(date = %today, error = %e, "Daily assignment failed");
            action_log::record(
                store,
                action_types::DAILY_ASSIGNMENT_ERROR,
                json!({ "date": today, "error": e.to_string() }),
            )
            .await;
            Err(e.into())
        }
    }
}

/// POST /api/dishduty/mark-not-done
///
/// Reopen `date` as failed, hand today to the same worker and shift the
/// rest of the schedule forward one day. Admin only.
pub async fn mark_not_done(
    State(state): State<AppState>,
    Json(input): Json<MarkNotDoneRequest>,
) -> AppResult<impl IntoResponse> {
    state.admin.verify(input.admin_password.as_deref())?;
    let target = parse_day(&input.date)?;

    let report = undone::mark_not_done(state.store.as_ref(), target, state.clock.today()).await?;

    Ok(Json(DataResponse { data: report }))
}
