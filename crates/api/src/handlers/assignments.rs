//! Handlers for assignment listing and admin status updates.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use dishduty_core::entities::Assignment;
use dishduty_core::status;
use dishduty_core::store::DutyStore;
use dishduty_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// An assignment together with its worker's name.
#[derive(Debug, Serialize)]
pub struct AssignmentView {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub worker_name: Option<String>,
}

/// Body of `PATCH /assignments/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub admin_password: Option<String>,
}

/// GET /api/dishduty/assignments?start_date=&end_date=
///
/// Assignments in the inclusive range, ordered by date.
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    let (start, end) = params.parse()?;

    let store = state.store.as_ref();
    let names: HashMap<DbId, String> = store
        .list_workers()
        .await?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();
    let data: Vec<AssignmentView> = store
        .list_assignments_between(start, end)
        .await?
        .into_iter()
        .map(|assignment| AssignmentView {
            worker_name: names.get(&assignment.worker_id).cloned(),
            assignment,
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// PATCH /api/dishduty/assignments/{id}/status
///
/// Set an assignment's status. Admin only. Never cascades; see
/// `POST /mark-not-done` for reassignment.
pub async fn update_status(
    State(state): State<AppState>,
    Path(assignment_id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    state.admin.verify(input.admin_password.as_deref())?;

    let assignment = status::set_status(state.store.as_ref(), assignment_id, &input.status).await?;

    Ok(Json(DataResponse { data: assignment }))
}
