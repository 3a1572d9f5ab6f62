//! Repository for the `assignment_queue` table.

use dishduty_core::entities::NewQueueEntry;
use dishduty_core::types::{Day, DbId};
use sqlx::PgPool;

use crate::models::queue_entry::QueueEntryRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, worker_id, start_date, duration_days, queue_order, created_at";

/// Provides CRUD operations for queue entries.
pub struct QueueRepo;

impl QueueRepo {
    /// Insert a new queue entry. A duplicate `queue_order` violates
    /// `uq_assignment_queue_order`.
    pub async fn create(pool: &PgPool, input: &NewQueueEntry) -> Result<QueueEntryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignment_queue (worker_id, start_date, duration_days, queue_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QueueEntryRow>(&query)
            .bind(input.worker_id)
            .bind(input.start_date)
            .bind(input.duration_days)
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    /// List every entry in queue order.
    pub async fn list(pool: &PgPool) -> Result<Vec<QueueEntryRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignment_queue ORDER BY queue_order");
        sqlx::query_as::<_, QueueEntryRow>(&query).fetch_all(pool).await
    }

    /// The entry with the highest `queue_order`.
    pub async fn find_last(pool: &PgPool) -> Result<Option<QueueEntryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignment_queue ORDER BY queue_order DESC LIMIT 1"
        );
        sqlx::query_as::<_, QueueEntryRow>(&query)
            .fetch_optional(pool)
            .await
    }

    /// The lowest-order entry whose `start_date` is on or before `day`.
    pub async fn find_next_due(pool: &PgPool, day: Day) -> Result<Option<QueueEntryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignment_queue \
             WHERE start_date <= $1 \
             ORDER BY queue_order ASC LIMIT 1"
        );
        sqlx::query_as::<_, QueueEntryRow>(&query)
            .bind(day)
            .fetch_optional(pool)
            .await
    }

    /// Move an entry's start date.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_start_date(
        pool: &PgPool,
        id: DbId,
        day: Day,
    ) -> Result<Option<QueueEntryRow>, sqlx::Error> {
        let query = format!(
            "UPDATE assignment_queue SET start_date = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QueueEntryRow>(&query)
            .bind(id)
            .bind(day)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assignment_queue WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
