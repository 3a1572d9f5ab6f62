//! Admin status updates on a single assignment.
//!
//! Any status may move to any other. Marking a day `not_done` here does not
//! reassign or shift anything; that is [`crate::undone::mark_not_done`].

use serde_json::json;

use crate::action_log::{self, action_types};
use crate::dates::format_day;
use crate::entities::{Assignment, AssignmentStatus};
use crate::error::{CoreError, CoreResult};
use crate::store::DutyStore;
use crate::types::DbId;

/// Set the status of assignment `id` from its wire name.
pub async fn set_status(
    store: &dyn DutyStore,
    id: DbId,
    new_status: &str,
) -> CoreResult<Assignment> {
    let status = AssignmentStatus::parse(new_status)?;

    let previous = store
        .get_assignment(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Assignment", id))?;
    let updated = store
        .update_assignment_status(id, status)
        .await?
        .ok_or_else(|| CoreError::not_found("Assignment", id))?;

    tracing::info!(
        assignment_id = id,
        from = %previous.status,
        to = %status,
        "Assignment status updated"
    );

    let action_type = if status == AssignmentStatus::NotDone {
        action_types::MARKED_NOT_DONE
    } else {
        action_types::STATUS_UPDATED
    };
    action_log::record(
        store,
        action_type,
        json!({
            "assignment_id": id,
            "worker_id": updated.worker_id,
            "date": format_day(updated.date),
            "previous_status": previous.status,
            "status": status,
            "cascade": false,
        }),
    )
    .await;

    Ok(updated)
}
