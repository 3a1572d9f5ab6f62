//! Handlers for the manual assignment queue.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use dishduty_core::entities::QueueEntry;
use dishduty_core::queue;
use dishduty_core::roster;
use dishduty_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /queue/add`. One of `worker_id` / `worker_name` is required.
#[derive(Debug, Deserialize)]
pub struct AddToQueueRequest {
    pub worker_id: Option<DbId>,
    pub worker_name: Option<String>,
    pub duration_days: i64,
    pub admin_password: Option<String>,
}

/// A queue entry together with its worker's name.
#[derive(Debug, Serialize)]
pub struct QueuedItem {
    #[serde(flatten)]
    pub entry: QueueEntry,
    pub worker_name: String,
}

/// POST /api/dishduty/queue/add
///
/// Queue a worker for `duration_days` consecutive days after everything
/// already scheduled. Admin only.
pub async fn add_to_queue(
    State(state): State<AppState>,
    Json(input): Json<AddToQueueRequest>,
) -> AppResult<impl IntoResponse> {
    state.admin.verify(input.admin_password.as_deref())?;
    queue::validate_duration(input.duration_days)?;

    let store = state.store.as_ref();
    let worker =
        roster::resolve_worker(store, input.worker_id, input.worker_name.as_deref()).await?;
    let entry = queue::enqueue(store, &worker, input.duration_days, state.clock.today()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: QueuedItem {
                entry,
                worker_name: worker.name,
            },
        }),
    ))
}
