//! Handlers for the worker roster.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dishduty_core::roster;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /workers`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkerRequest {
    #[validate(length(min = 1, max = 64, message = "name must be 1-64 characters"))]
    pub name: String,
    pub admin_password: Option<String>,
}

/// GET /api/dishduty/workers
///
/// Roster sorted by name.
pub async fn list_workers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workers = roster::list_by_name(state.store.as_ref()).await?;

    Ok(Json(DataResponse { data: workers }))
}

/// POST /api/dishduty/workers
///
/// Add a worker to the roster. Admin only.
pub async fn create_worker(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkerRequest>,
) -> AppResult<impl IntoResponse> {
    state.admin.verify(input.admin_password.as_deref())?;
    input.validate()?;

    let worker = roster::create_worker(state.store.as_ref(), &input.name).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: worker })))
}
