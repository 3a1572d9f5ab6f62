//! Integration tests running the scheduling operations against
//! [`PgDutyStore`].
//!
//! Requires `DATABASE_URL`; run with `cargo test -- --ignored`.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use dishduty_core::entities::AssignmentStatus;
use dishduty_core::error::CoreError;
use dishduty_core::resolver::{resolve_day, ResolutionSource};
use dishduty_core::store::DutyStore;
use dishduty_core::{queue, roster, undone};
use dishduty_db::PgDutyStore;
use sqlx::PgPool;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Test: Error mapping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_date_maps_to_conflict(pool: PgPool) {
    let store = PgDutyStore::new(pool);
    let worker = store.create_worker("a").await.unwrap();
    store
        .create_assignment(worker.id, day(1, 10), AssignmentStatus::Assigned)
        .await
        .unwrap();

    let err = store
        .create_assignment(worker.id, day(1, 10), AssignmentStatus::Assigned)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Conflict(_));
}

// ---------------------------------------------------------------------------
// Test: Resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_resolve_is_idempotent(pool: PgPool) {
    let store = PgDutyStore::new(pool);
    roster::seed_roster(&store, &names(&["keromag", "megatorg", "baby-ch"]))
        .await
        .unwrap();

    let first = resolve_day(&store, day(1, 10)).await.unwrap();
    assert_eq!(first.source, ResolutionSource::Rotation);

    let second = resolve_day(&store, day(1, 10)).await.unwrap();
    assert_eq!(second.source, ResolutionSource::Existing);
    assert_eq!(second.assignment.id, first.assignment.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_resolves_converge(pool: PgPool) {
    let store = Arc::new(PgDutyStore::new(pool));
    roster::seed_roster(store.as_ref(), &names(&["a", "b", "c"]))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            resolve_day(store.as_ref(), day(1, 10)).await
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().assignment.id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_queue_then_mark_not_done(pool: PgPool) {
    let store = PgDutyStore::new(pool);
    let created = roster::seed_roster(&store, &names(&["a", "b"])).await.unwrap();
    let a = &created[0];

    let entry = queue::enqueue(&store, a, 2, day(1, 10)).await.unwrap();
    assert_eq!(entry.start_date, day(1, 10));

    let resolution = resolve_day(&store, day(1, 10)).await.unwrap();
    assert_eq!(resolution.source, ResolutionSource::Queue);
    assert_eq!(resolution.worker.id, a.id);
    assert!(store.list_queue().await.unwrap().is_empty());

    let covered = store
        .find_assignment_by_date(day(1, 11))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(covered.worker_id, a.id);

    let report = undone::mark_not_done(&store, day(1, 10), day(1, 12))
        .await
        .unwrap();
    assert!(report.reassigned_today);
    assert_eq!(report.failed_worker_id, a.id);

    let failed = store
        .find_assignment_by_date(day(1, 10))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failed.status, AssignmentStatus::NotDone);

    let today = store
        .find_assignment_by_date(day(1, 12))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(today.worker_id, a.id);
}
