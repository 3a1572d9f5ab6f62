//! Integration tests for the repository layer.
//!
//! Exercises the SQL against a real database:
//! - Unique constraints on worker names, assignment dates and queue order
//! - Assignment upsert semantics
//! - Queue due-entry selection
//! - Action log ordering
//!
//! Requires `DATABASE_URL`; run with `cargo test -- --ignored`.

use chrono::NaiveDate;
use dishduty_core::entities::NewQueueEntry;
use dishduty_db::repositories::{ActionLogRepo, AssignmentRepo, QueueRepo, WorkerRepo};
use serde_json::json;
use sqlx::PgPool;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Test: Workers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_worker_names_are_unique_ignoring_case(pool: PgPool) {
    WorkerRepo::create(&pool, "keromag").await.unwrap();
    let err = WorkerRepo::create(&pool, "KeroMag").await.unwrap_err();
    assert!(is_unique_violation(&err));

    let found = WorkerRepo::find_by_name(&pool, "KEROMAG").await.unwrap();
    assert_eq!(found.unwrap().name, "keromag");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_set_last_assigned(pool: PgPool) {
    let worker = WorkerRepo::create(&pool, "megatorg").await.unwrap();
    assert_eq!(worker.last_assigned_date, None);

    let updated = WorkerRepo::set_last_assigned(&pool, worker.id, day(3, 4))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.last_assigned_date, Some(day(3, 4)));

    let missing = WorkerRepo::set_last_assigned(&pool, worker.id + 1000, day(3, 4))
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: Assignments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_one_assignment_per_date(pool: PgPool) {
    let a = WorkerRepo::create(&pool, "a").await.unwrap();
    let b = WorkerRepo::create(&pool, "b").await.unwrap();

    AssignmentRepo::create(&pool, a.id, day(1, 10), "assigned")
        .await
        .unwrap();
    let err = AssignmentRepo::create(&pool, b.id, day(1, 10), "assigned")
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_upsert_overwrites_worker_and_status(pool: PgPool) {
    let a = WorkerRepo::create(&pool, "a").await.unwrap();
    let b = WorkerRepo::create(&pool, "b").await.unwrap();

    let first = AssignmentRepo::create(&pool, a.id, day(1, 10), "done")
        .await
        .unwrap();
    let second = AssignmentRepo::upsert(&pool, b.id, day(1, 10)).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.worker_id, b.id);
    assert_eq!(second.status, "assigned");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_status_check_constraint(pool: PgPool) {
    let a = WorkerRepo::create(&pool, "a").await.unwrap();
    let result = AssignmentRepo::create(&pool, a.id, day(1, 10), "skipped").await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_range_and_after_queries_are_date_ordered(pool: PgPool) {
    let a = WorkerRepo::create(&pool, "a").await.unwrap();
    for d in [12, 10, 11, 14] {
        AssignmentRepo::create(&pool, a.id, day(1, d), "assigned")
            .await
            .unwrap();
    }

    let between = AssignmentRepo::list_between(&pool, day(1, 10), day(1, 12))
        .await
        .unwrap();
    let dates: Vec<_> = between.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(1, 10), day(1, 11), day(1, 12)]);

    let after = AssignmentRepo::list_after(&pool, day(1, 11)).await.unwrap();
    let dates: Vec<_> = after.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day(1, 12), day(1, 14)]);

    let latest = AssignmentRepo::find_latest(&pool).await.unwrap().unwrap();
    assert_eq!(latest.date, day(1, 14));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_assignment(pool: PgPool) {
    let a = WorkerRepo::create(&pool, "a").await.unwrap();
    let row = AssignmentRepo::create(&pool, a.id, day(1, 10), "assigned")
        .await
        .unwrap();

    assert!(AssignmentRepo::delete(&pool, row.id).await.unwrap());
    assert!(!AssignmentRepo::delete(&pool, row.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Queue
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_next_due_picks_lowest_order(pool: PgPool) {
    let a = WorkerRepo::create(&pool, "a").await.unwrap();
    let b = WorkerRepo::create(&pool, "b").await.unwrap();

    let entry = |worker_id, start_date, order| NewQueueEntry {
        worker_id,
        start_date,
        duration_days: 2,
        order,
    };
    QueueRepo::create(&pool, &entry(b.id, day(1, 8), 2)).await.unwrap();
    QueueRepo::create(&pool, &entry(a.id, day(1, 9), 1)).await.unwrap();
    QueueRepo::create(&pool, &entry(a.id, day(1, 20), 3)).await.unwrap();

    let due = QueueRepo::find_next_due(&pool, day(1, 10))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(due.queue_order, 1);
    assert_eq!(due.worker_id, a.id);

    let none = QueueRepo::find_next_due(&pool, day(1, 7)).await.unwrap();
    assert!(none.is_none());

    let last = QueueRepo::find_last(&pool).await.unwrap().unwrap();
    assert_eq!(last.queue_order, 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_queue_order_and_duration_constraints(pool: PgPool) {
    let a = WorkerRepo::create(&pool, "a").await.unwrap();
    let base = NewQueueEntry {
        worker_id: a.id,
        start_date: day(1, 10),
        duration_days: 3,
        order: 1,
    };
    QueueRepo::create(&pool, &base).await.unwrap();

    let err = QueueRepo::create(&pool, &base).await.unwrap_err();
    assert!(is_unique_violation(&err));

    let too_long = NewQueueEntry {
        duration_days: 8,
        order: 2,
        ..base
    };
    assert!(QueueRepo::create(&pool, &too_long).await.is_err());
}

// ---------------------------------------------------------------------------
// Test: Action log
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_action_log_newest_first(pool: PgPool) {
    for i in 0..5 {
        ActionLogRepo::insert(&pool, "assigned", &json!({ "n": i }))
            .await
            .unwrap();
    }

    let recent = ActionLogRepo::list_recent(&pool, 3).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].details["n"], 4);
    assert_eq!(recent[2].details["n"], 2);
}
