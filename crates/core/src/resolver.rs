//! Daily assignment resolution.
//!
//! [`resolve_day`] decides who is on duty for a day and persists it. It is
//! idempotent: once a day holds an `assigned` or `done` assignment every
//! further call returns that record unchanged. Precedence is:
//!
//! 1. an existing resolved assignment for the day;
//! 2. the lowest-order due queue entry, which claims its whole span;
//! 3. the rotation policy over the full roster.

use serde::Serialize;
use serde_json::json;

use crate::action_log::{self, action_types};
use crate::dates::{add_days, format_day};
use crate::entities::{Assignment, AssignmentStatus, QueueEntry, Worker};
use crate::error::{CoreError, CoreResult};
use crate::queue;
use crate::rotation;
use crate::store::DutyStore;
use crate::types::{Day, DbId};

/// Which rule produced the day's assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The day was already resolved before this call.
    Existing,
    /// A due queue entry was consumed.
    Queue,
    /// The rotation policy picked the least recently assigned worker.
    Rotation,
}

/// Result of resolving one day.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub assignment: Assignment,
    pub worker: Worker,
    pub source: ResolutionSource,
    /// Number of consecutive days written by this call (0 for `Existing`).
    pub days_assigned: i32,
}

/// Resolve `today`, creating its assignment if needed.
pub async fn resolve_day(store: &dyn DutyStore, today: Day) -> CoreResult<Resolution> {
    if let Some(existing) = store.find_assignment_by_date(today).await? {
        if existing.status.is_resolved() {
            return existing_resolution(store, existing).await;
        }
        tracing::info!(
            date = %today,
            assignment_id = existing.id,
            "Today's assignment is not_done; reassigning"
        );
        store.delete_assignment(existing.id).await?;
    }

    if let Some(entry) = queue::next_due(store, today).await? {
        return assign_from_queue(store, entry, today).await;
    }

    assign_by_rotation(store, today).await
}

async fn existing_resolution(
    store: &dyn DutyStore,
    assignment: Assignment,
) -> CoreResult<Resolution> {
    let worker = load_worker(store, assignment.worker_id).await?;
    Ok(Resolution {
        assignment,
        worker,
        source: ResolutionSource::Existing,
        days_assigned: 0,
    })
}

async fn load_worker(store: &dyn DutyStore, id: DbId) -> CoreResult<Worker> {
    store
        .get_worker(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Worker", id))
}

/// Claim the entry's whole span starting no earlier than `today`.
///
/// Days are upserted from the end of the span back to `today`, so a failure
/// part-way through leaves `today` unresolved and the entry unconsumed. The
/// next call for the same day claims the same span again and finishes it.
async fn assign_from_queue(
    store: &dyn DutyStore,
    entry: QueueEntry,
    today: Day,
) -> CoreResult<Resolution> {
    let worker = load_worker(store, entry.worker_id).await?;
    let start = entry.start_date.max(today);

    let mut today_assignment = None;
    for offset in (0..entry.duration_days).rev() {
        let day = add_days(start, i64::from(offset));
        let assignment = store.upsert_assignment(worker.id, day).await?;
        if day == today {
            today_assignment = Some(assignment);
        }
    }
    let assignment = today_assignment.ok_or_else(|| {
        CoreError::Internal(format!("queue entry {} did not cover {today}", entry.id))
    })?;

    let last_day = add_days(start, i64::from(entry.duration_days) - 1);
    let worker = match store.set_worker_last_assigned(worker.id, last_day).await {
        Ok(Some(updated)) => updated,
        Ok(None) => worker,
        Err(e) => {
            tracing::error!(worker_id = worker.id, error = %e, "Failed to update last_assigned_date");
            worker
        }
    };
    if let Err(e) = queue::consume(store, &entry).await {
        tracing::error!(entry_id = entry.id, error = %e, "Failed to delete processed queue entry");
    }

    tracing::info!(
        worker = %worker.name,
        start = %start,
        duration_days = entry.duration_days,
        "Assigned worker from queue"
    );
    action_log::record(
        store,
        action_types::QUEUE_PROCESSED,
        json!({
            "worker_id": worker.id,
            "worker_name": worker.name,
            "duration_days": entry.duration_days,
            "start_date": format_day(start),
            "queue_entry_id": entry.id,
            "order": entry.order,
        }),
    )
    .await;

    Ok(Resolution {
        assignment,
        worker,
        source: ResolutionSource::Queue,
        days_assigned: entry.duration_days,
    })
}

async fn assign_by_rotation(store: &dyn DutyStore, today: Day) -> CoreResult<Resolution> {
    let workers = store.list_workers().await?;
    let chosen = match rotation::select_next(&workers) {
        Ok(worker) => worker.clone(),
        Err(e) => {
            tracing::warn!(date = %today, "No workers available for rotation");
            action_log::record(
                store,
                action_types::RANDOM_ASSIGNMENT_FAILED,
                json!({ "date": format_day(today), "reason": "No workers in the system." }),
            )
            .await;
            return Err(e);
        }
    };

    let assignment = match store
        .create_assignment(chosen.id, today, AssignmentStatus::Assigned)
        .await
    {
        Ok(assignment) => assignment,
        // Another caller resolved the day first.
        Err(CoreError::Conflict(_)) => {
            let winner = store
                .find_assignment_by_date(today)
                .await?
                .ok_or_else(|| CoreError::Conflict(format!("assignment for {today} vanished")))?;
            tracing::debug!(date = %today, "Lost resolution race; using existing assignment");
            return existing_resolution(store, winner).await;
        }
        Err(e) => return Err(e),
    };

    let worker = match store.set_worker_last_assigned(chosen.id, today).await {
        Ok(Some(updated)) => updated,
        Ok(None) => chosen,
        Err(e) => {
            tracing::error!(worker_id = chosen.id, error = %e, "Failed to update last_assigned_date");
            chosen
        }
    };

    tracing::info!(worker = %worker.name, date = %today, "Assigned worker by rotation");
    action_log::record(
        store,
        action_types::RANDOMLY_ASSIGNED,
        json!({
            "worker_id": worker.id,
            "worker_name": worker.name,
            "date": format_day(today),
        }),
    )
    .await;

    Ok(Resolution {
        assignment,
        worker,
        source: ResolutionSource::Rotation,
        days_assigned: 1,
    })
}
