//! Queue manager: FIFO list of pending multi-day assignments.
//!
//! New entries are placed back to back after whatever is already planned,
//! so an admin can queue several workers without tracking calendar gaps.
//! Nothing is ever scheduled before today.

use serde_json::json;

use crate::action_log::{self, action_types};
use crate::dates::{add_days, format_day};
use crate::entities::{
    NewQueueEntry, QueueEntry, Worker, MAX_QUEUE_DURATION_DAYS, MIN_QUEUE_DURATION_DAYS,
};
use crate::error::{CoreError, CoreResult};
use crate::store::DutyStore;
use crate::types::Day;

/// Check that a requested duration lies within 1..=7 days.
pub fn validate_duration(duration_days: i64) -> CoreResult<i32> {
    i32::try_from(duration_days)
        .ok()
        .filter(|d| (MIN_QUEUE_DURATION_DAYS..=MAX_QUEUE_DURATION_DAYS).contains(d))
        .ok_or(CoreError::InvalidDuration(duration_days))
}

/// Compute where a new entry starts.
///
/// 1. Directly after the last queued entry, if there is one.
/// 2. Otherwise directly after the latest assignment, if that assignment
///    is today or later.
/// 3. Otherwise today.
///
/// The result is never earlier than `today`.
pub fn plan_start_date(
    last_entry: Option<&QueueEntry>,
    latest_assignment: Option<Day>,
    today: Day,
) -> Day {
    let planned = match (last_entry, latest_assignment) {
        (Some(entry), _) => add_days(entry.end_date(), 1),
        (None, Some(latest)) if latest >= today => add_days(latest, 1),
        _ => today,
    };
    planned.max(today)
}

/// Position for the next entry: one past the highest existing order.
pub fn next_order(last_entry: Option<&QueueEntry>) -> i32 {
    last_entry.map_or(1, |entry| entry.order + 1)
}

/// Append `worker` to the queue for `duration_days` consecutive days.
pub async fn enqueue(
    store: &dyn DutyStore,
    worker: &Worker,
    duration_days: i64,
    today: Day,
) -> CoreResult<QueueEntry> {
    let duration_days = validate_duration(duration_days)?;

    let last_entry = store.last_queue_entry().await?;
    let latest_assignment = store.latest_assignment().await?.map(|a| a.date);

    let input = NewQueueEntry {
        worker_id: worker.id,
        start_date: plan_start_date(last_entry.as_ref(), latest_assignment, today),
        duration_days,
        order: next_order(last_entry.as_ref()),
    };
    let entry = store.create_queue_entry(&input).await?;

    tracing::info!(
        worker = %worker.name,
        start_date = %entry.start_date,
        duration_days,
        order = entry.order,
        "Worker added to queue"
    );
    action_log::record(
        store,
        action_types::ADDED_TO_QUEUE,
        json!({
            "worker_id": worker.id,
            "worker_name": worker.name,
            "duration_days": duration_days,
            "start_date": format_day(entry.start_date),
            "order": entry.order,
        }),
    )
    .await;

    Ok(entry)
}

/// The earliest-order entry due on `today`, if any.
pub async fn next_due(store: &dyn DutyStore, today: Day) -> CoreResult<Option<QueueEntry>> {
    store.next_due_queue_entry(today).await
}

/// Remove a processed entry.
pub async fn consume(store: &dyn DutyStore, entry: &QueueEntry) -> CoreResult<()> {
    if !store.delete_queue_entry(entry.id).await? {
        tracing::warn!(entry_id = entry.id, "Queue entry already consumed");
    }
    Ok(())
}
