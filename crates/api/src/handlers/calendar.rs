use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use dishduty_core::calendar;

use crate::error::AppResult;
use crate::query::DateRangeParams;
use crate::state::AppState;

/// GET /api/dishduty/calendar?start_date=&end_date=
///
/// Assignments plus projected queue days, one event per day. Returned as a
/// bare array, the shape a FullCalendar JSON event feed consumes.
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    let (start, end) = params.parse()?;

    let events =
        calendar::build_calendar(state.store.as_ref(), start, end, state.clock.today()).await?;

    Ok(Json(events))
}
