//! Undone handling: reopen a past day as failed and give the failed worker
//! today's duty.
//!
//! Marking a day `not_done` inserts one extra day of the same worker at the
//! front of the timeline, so every later assignment and queue entry slides
//! forward by one day. Queue `order` is untouched.
//!
//! The reassignment of today is required to succeed; the forward shift is
//! best-effort. A failed shift of one record is logged and counted in the
//! report, and the remaining records are still processed. Future
//! assignments are shifted from the furthest date backwards so the
//! one-assignment-per-day rule holds after every single update. A worker's
//! `last_assigned_date` only ever moves forward here.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::json;

use crate::action_log::{self, action_types};
use crate::dates::{add_days, format_day};
use crate::entities::AssignmentStatus;
use crate::error::{CoreError, CoreResult};
use crate::store::DutyStore;
use crate::types::{Day, DbId};

/// What [`mark_not_done`] changed.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeReport {
    pub date: Day,
    pub original_status: AssignmentStatus,
    pub failed_worker_id: DbId,
    pub failed_worker_name: String,
    /// Whether a new assignment for today was created for the failed worker.
    pub reassigned_today: bool,
    /// Worker whose assignment for today was superseded and moved to tomorrow.
    pub displaced_worker_id: Option<DbId>,
    pub shifted_assignments: usize,
    pub shifted_queue_entries: usize,
    /// Individual updates that failed during the best-effort shift.
    pub failed_updates: usize,
}

/// Mark the assignment on `target` as `not_done` and cascade.
pub async fn mark_not_done(
    store: &dyn DutyStore,
    target: Day,
    today: Day,
) -> CoreResult<CascadeReport> {
    // 1. Reopen the failed day.
    let failed = store
        .find_assignment_by_date(target)
        .await?
        .ok_or_else(|| CoreError::not_found("Assignment for date", format_day(target)))?;
    let original_status = failed.status;
    store
        .update_assignment_status(failed.id, AssignmentStatus::NotDone)
        .await?
        .ok_or_else(|| CoreError::not_found("Assignment", failed.id))?;
    let failed_worker = store
        .get_worker(failed.worker_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Worker", failed.worker_id))?;

    // 2. Supersede somebody else's duty today.
    let existing_today = store.find_assignment_by_date(today).await?;
    let mut displaced_worker_id = None;
    if let Some(current) = existing_today
        .as_ref()
        .filter(|a| a.worker_id != failed_worker.id)
    {
        store.delete_assignment(current.id).await?;
        displaced_worker_id = Some(current.worker_id);
        tracing::info!(
            date = %today,
            cancelled_worker_id = current.worker_id,
            reassigned_to = %failed_worker.name,
            "Cancelled today's assignment for reassignment"
        );
        action_log::record(
            store,
            action_types::ASSIGNMENT_CANCELLED_FOR_REASSIGNMENT,
            json!({
                "date": format_day(today),
                "cancelled_worker_id": current.worker_id,
                "reassigned_to_worker_id": failed_worker.id,
            }),
        )
        .await;
    }

    // 3. Give today to the failed worker.
    let failed_worker_has_today = existing_today
        .as_ref()
        .is_some_and(|a| a.worker_id == failed_worker.id);
    let reassigned_today = !failed_worker_has_today;
    if reassigned_today {
        store
            .create_assignment(failed_worker.id, today, AssignmentStatus::Assigned)
            .await?;
        advance_last_assigned(store, failed_worker.id, today).await;
    }

    // 4. Slide everything after today forward by one day.
    let mut failed_updates = 0;
    let shifted_assignments = shift_assignments(store, today, &mut failed_updates).await?;
    let shifted_queue_entries = shift_queue(store, today, &mut failed_updates).await?;

    if let Some(worker_id) = displaced_worker_id {
        reinstate_displaced(store, worker_id, add_days(today, 1), &mut failed_updates).await;
    }

    let report = CascadeReport {
        date: target,
        original_status,
        failed_worker_id: failed_worker.id,
        failed_worker_name: failed_worker.name.clone(),
        reassigned_today,
        displaced_worker_id,
        shifted_assignments,
        shifted_queue_entries,
        failed_updates,
    };

    // 5. Record the whole operation.
    tracing::info!(
        date = %target,
        worker = %failed_worker.name,
        reassigned_today,
        shifted_assignments,
        shifted_queue_entries,
        failed_updates,
        "Marked assignment not done"
    );
    action_log::record(
        store,
        action_types::MARKED_NOT_DONE,
        json!({
            "date": format_day(target),
            "original_status": original_status,
            "failed_worker_id": failed_worker.id,
            "failed_worker_name": failed_worker.name,
            "reassigned_today": reassigned_today,
            "today_reassigned_to": reassigned_today.then_some(failed_worker.id),
            "displaced_worker_id": displaced_worker_id,
            "shifted_assignments": shifted_assignments,
            "shifted_queue_entries": shifted_queue_entries,
            "failed_updates": failed_updates,
            "cascade": true,
        }),
    )
    .await;

    Ok(report)
}

/// Raise a worker's `last_assigned_date` to `day` unless it is already later.
async fn advance_last_assigned(store: &dyn DutyStore, worker_id: DbId, day: Day) {
    let result = match store.get_worker(worker_id).await {
        Ok(Some(worker)) if worker.last_assigned_date.is_some_and(|last| last >= day) => Ok(()),
        Ok(Some(_)) => store.set_worker_last_assigned(worker_id, day).await.map(|_| ()),
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::error!(worker_id, error = %e, "Failed to update last_assigned_date");
    }
}

/// Move every assignment dated after `today` one day later, furthest first.
async fn shift_assignments(
    store: &dyn DutyStore,
    today: Day,
    failed_updates: &mut usize,
) -> CoreResult<usize> {
    let future = store.list_assignments_after(today).await?;
    let mut shifted = 0;
    let mut latest: HashMap<DbId, Day> = HashMap::new();
    for assignment in future.iter().rev() {
        let new_date = add_days(assignment.date, 1);
        match store.update_assignment_date(assignment.id, new_date).await {
            Ok(Some(_)) => {
                shifted += 1;
                latest.entry(assignment.worker_id).or_insert(new_date);
            }
            Ok(None) => {
                tracing::warn!(assignment_id = assignment.id, "Assignment vanished during shift");
            }
            Err(e) => {
                *failed_updates += 1;
                tracing::error!(
                    assignment_id = assignment.id,
                    from = %assignment.date,
                    to = %new_date,
                    error = %e,
                    "Failed to shift assignment date"
                );
            }
        }
    }
    for (worker_id, day) in latest {
        advance_last_assigned(store, worker_id, day).await;
    }
    Ok(shifted)
}

/// Move every queue entry starting today or later one day later.
async fn shift_queue(
    store: &dyn DutyStore,
    today: Day,
    failed_updates: &mut usize,
) -> CoreResult<usize> {
    let entries = store.list_queue().await?;
    let mut shifted = 0;
    for entry in entries.iter().filter(|e| e.start_date >= today) {
        let new_start = add_days(entry.start_date, 1);
        match store.update_queue_start_date(entry.id, new_start).await {
            Ok(Some(_)) => shifted += 1,
            Ok(None) => {
                tracing::warn!(entry_id = entry.id, "Queue entry vanished during shift");
            }
            Err(e) => {
                *failed_updates += 1;
                tracing::error!(
                    entry_id = entry.id,
                    to = %new_start,
                    error = %e,
                    "Failed to shift queue entry start date"
                );
            }
        }
    }
    Ok(shifted)
}

/// The worker pushed out of today keeps their turn on the following day.
async fn reinstate_displaced(
    store: &dyn DutyStore,
    worker_id: DbId,
    day: Day,
    failed_updates: &mut usize,
) {
    match store
        .create_assignment(worker_id, day, AssignmentStatus::Assigned)
        .await
    {
        Ok(_) => {
            advance_last_assigned(store, worker_id, day).await;
            action_log::record(
                store,
                action_types::ASSIGNED,
                json!({
                    "worker_id": worker_id,
                    "date": format_day(day),
                    "reason": "displaced_by_reassignment",
                }),
            )
            .await;
        }
        Err(e) => {
            *failed_updates += 1;
            tracing::error!(worker_id, date = %day, error = %e, "Failed to reinstate displaced worker");
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::entities::NewQueueEntry;
    use crate::memory_store::MemoryStore;
    use crate::queue;
    use crate::resolver::resolve_day;

    fn day(d: u32) -> Day {
        Day::from_ymd_opt(2024, 2, d).unwrap()
    }

    async fn worker_on(store: &MemoryStore, d: u32) -> Option<(DbId, AssignmentStatus)> {
        store
            .find_assignment_by_date(day(d))
            .await
            .unwrap()
            .map(|a| (a.worker_id, a.status))
    }

    #[tokio::test]
    async fn missing_day_is_not_found() {
        let store = MemoryStore::new();
        assert_matches!(
            mark_not_done(&store, day(1), day(2)).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn failed_worker_takes_today_and_others_slide() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        let b = store.create_worker("b").await.unwrap();
        let original = store
            .create_assignment(a.id, day(1), AssignmentStatus::Assigned)
            .await
            .unwrap();
        let b_today = store
            .create_assignment(b.id, day(2), AssignmentStatus::Assigned)
            .await
            .unwrap();

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();

        let reopened = store.get_assignment(original.id).await.unwrap().unwrap();
        assert_eq!(reopened.status, AssignmentStatus::NotDone);
        assert_eq!(worker_on(&store, 2).await, Some((a.id, AssignmentStatus::Assigned)));
        assert_eq!(worker_on(&store, 3).await, Some((b.id, AssignmentStatus::Assigned)));
        assert!(store.get_assignment(b_today.id).await.unwrap().is_none());

        assert!(report.reassigned_today);
        assert_eq!(report.original_status, AssignmentStatus::Assigned);
        assert_eq!(report.displaced_worker_id, Some(b.id));
        assert_eq!(report.failed_updates, 0);

        let a_now = store.get_worker(a.id).await.unwrap().unwrap();
        assert_eq!(a_now.last_assigned_date, Some(day(2)));

        let log = store.recent_actions(10).await.unwrap();
        let types: Vec<_> = log.iter().map(|e| e.action_type.as_str()).collect();
        assert!(types.contains(&action_types::ASSIGNMENT_CANCELLED_FOR_REASSIGNMENT));
        assert_eq!(log[0].action_type, action_types::MARKED_NOT_DONE);
        assert_eq!(log[0].details["failed_worker_name"], "a");
        assert_eq!(log[0].details["today_reassigned_to"], a.id);
    }

    #[tokio::test]
    async fn future_assignments_shift_without_collisions() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        let b = store.create_worker("b").await.unwrap();
        let c = store.create_worker("c").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Done)
            .await
            .unwrap();
        for (worker, d) in [(b.id, 3), (c.id, 4), (b.id, 5)] {
            store
                .create_assignment(worker, day(d), AssignmentStatus::Assigned)
                .await
                .unwrap();
        }

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();

        assert_eq!(report.shifted_assignments, 3);
        assert_eq!(report.failed_updates, 0);
        assert_eq!(report.displaced_worker_id, None);
        assert_eq!(worker_on(&store, 2).await.unwrap().0, a.id);
        assert_eq!(worker_on(&store, 3).await, None);
        assert_eq!(worker_on(&store, 4).await.unwrap().0, b.id);
        assert_eq!(worker_on(&store, 5).await.unwrap().0, c.id);
        assert_eq!(worker_on(&store, 6).await.unwrap().0, b.id);
    }

    #[tokio::test]
    async fn queue_entries_from_today_onward_shift() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Assigned)
            .await
            .unwrap();
        for (order, start) in [(1, 1), (2, 2), (3, 5)] {
            store
                .create_queue_entry(&NewQueueEntry {
                    worker_id: a.id,
                    start_date: day(start),
                    duration_days: 1,
                    order,
                })
                .await
                .unwrap();
        }

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();
        assert_eq!(report.shifted_queue_entries, 2);

        let starts: Vec<_> = store
            .list_queue()
            .await
            .unwrap()
            .into_iter()
            .map(|q| (q.order, q.start_date))
            .collect();
        assert_eq!(starts, vec![(1, day(1)), (2, day(3)), (3, day(6))]);
    }

    #[tokio::test]
    async fn failed_worker_already_on_today_is_kept() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Assigned)
            .await
            .unwrap();
        let today = store
            .create_assignment(a.id, day(2), AssignmentStatus::Assigned)
            .await
            .unwrap();

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();

        assert!(!report.reassigned_today);
        let still = store.find_assignment_by_date(day(2)).await.unwrap().unwrap();
        assert_eq!(still.id, today.id);
        let log = store.recent_actions(10).await.unwrap();
        assert!(log
            .iter()
            .all(|e| e.action_type != action_types::ASSIGNMENT_CANCELLED_FOR_REASSIGNMENT));
    }

    #[tokio::test]
    async fn no_assignment_today_creates_one() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Done)
            .await
            .unwrap();

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();
        assert!(report.reassigned_today);
        assert_eq!(report.original_status, AssignmentStatus::Done);
        assert_eq!(worker_on(&store, 2).await, Some((a.id, AssignmentStatus::Assigned)));
    }

    #[tokio::test]
    async fn succeeds_when_action_log_fails() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Assigned)
            .await
            .unwrap();
        store.fail_action_log(true);

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();
        assert!(report.reassigned_today);
    }

    #[tokio::test]
    async fn shifted_worker_keeps_latest_last_assigned_date() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        let b = store.create_worker("b").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Assigned)
            .await
            .unwrap();
        queue::enqueue(&store, &b, 3, day(2)).await.unwrap();
        resolve_day(&store, day(2)).await.unwrap();
        let b_before = store.get_worker(b.id).await.unwrap().unwrap();
        assert_eq!(b_before.last_assigned_date, Some(day(4)));

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();
        assert_eq!(report.displaced_worker_id, Some(b.id));

        let b_days: Vec<_> = store
            .list_assignments_after(day(2))
            .await
            .unwrap()
            .into_iter()
            .filter(|x| x.worker_id == b.id)
            .map(|x| x.date)
            .collect();
        assert_eq!(b_days, vec![day(3), day(4), day(5)]);
        let b_after = store.get_worker(b.id).await.unwrap().unwrap();
        assert_eq!(b_after.last_assigned_date, Some(day(5)));
    }

    #[tokio::test]
    async fn failed_worker_with_later_days_keeps_last_assigned_date() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Assigned)
            .await
            .unwrap();
        store
            .create_assignment(a.id, day(4), AssignmentStatus::Assigned)
            .await
            .unwrap();
        store.set_worker_last_assigned(a.id, day(4)).await.unwrap();

        mark_not_done(&store, day(1), day(2)).await.unwrap();

        let a_now = store.get_worker(a.id).await.unwrap().unwrap();
        assert_eq!(a_now.last_assigned_date, Some(day(5)));
    }

    #[tokio::test]
    async fn one_failed_shift_is_counted_and_the_rest_still_move() {
        let store = MemoryStore::new();
        let a = store.create_worker("a").await.unwrap();
        let b = store.create_worker("b").await.unwrap();
        store
            .create_assignment(a.id, day(1), AssignmentStatus::Assigned)
            .await
            .unwrap();
        let mut future = Vec::new();
        for d in [3, 4, 5] {
            future.push(
                store
                    .create_assignment(b.id, day(d), AssignmentStatus::Assigned)
                    .await
                    .unwrap(),
            );
        }
        store
            .create_queue_entry(&NewQueueEntry {
                worker_id: b.id,
                start_date: day(7),
                duration_days: 1,
                order: 1,
            })
            .await
            .unwrap();
        store.fail_date_update_for(Some(future[0].id)).await;

        let report = mark_not_done(&store, day(1), day(2)).await.unwrap();

        assert_eq!(report.failed_updates, 1);
        assert_eq!(report.shifted_assignments, 2);
        assert_eq!(report.shifted_queue_entries, 1);
        assert_eq!(worker_on(&store, 2).await.unwrap().0, a.id);

        let stuck = store.get_assignment(future[0].id).await.unwrap().unwrap();
        assert_eq!(stuck.date, day(3));
        for (original, expected) in future[1..].iter().zip([day(5), day(6)]) {
            let current = store.get_assignment(original.id).await.unwrap().unwrap();
            assert_eq!(current.date, expected);
        }
        assert_eq!(store.list_queue().await.unwrap()[0].start_date, day(8));

        let log = store.recent_actions(10).await.unwrap();
        assert_eq!(log[0].action_type, action_types::MARKED_NOT_DONE);
        assert_eq!(log[0].details["failed_updates"], 1);
    }
}
