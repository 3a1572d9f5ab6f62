use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use dishduty_core::store::DutyStore;

use crate::error::AppResult;
use crate::middleware::admin::RequireAdmin;
use crate::query::ActionLogParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/dishduty/action-log?limit=
///
/// Most recent audit entries, newest first. Admin only (header).
pub async fn list_action_log(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ActionLogParams>,
) -> AppResult<impl IntoResponse> {
    let entries = state.store.recent_actions(params.limit()).await?;

    Ok(Json(DataResponse { data: entries }))
}
