//! Repository for the `assignments` table.

use dishduty_core::types::{Day, DbId};
use sqlx::PgPool;

use crate::models::assignment::AssignmentRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, worker_id, date, status, created_at, updated_at";

/// Provides CRUD operations for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert a new assignment. A second row for the same date violates
    /// `uq_assignments_date`.
    pub async fn create(
        pool: &PgPool,
        worker_id: DbId,
        day: Day,
        status: &str,
    ) -> Result<AssignmentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (worker_id, date, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(worker_id)
            .bind(day)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Create the assignment for `day`, or hand the existing one to
    /// `worker_id` with status `assigned`.
    ///
    /// Uses `ON CONFLICT (date) DO UPDATE` so concurrent callers converge on
    /// one row.
    pub async fn upsert(
        pool: &PgPool,
        worker_id: DbId,
        day: Day,
    ) -> Result<AssignmentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (worker_id, date, status) \
             VALUES ($1, $2, 'assigned') \
             ON CONFLICT (date) DO UPDATE \
             SET worker_id = EXCLUDED.worker_id, \
                 status = 'assigned', \
                 updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(worker_id)
            .bind(day)
            .fetch_one(pool)
            .await
    }

    /// Find an assignment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the assignment for a calendar day.
    pub async fn find_by_date(pool: &PgPool, day: Day) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE date = $1");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(day)
            .fetch_optional(pool)
            .await
    }

    /// The assignment with the greatest date.
    pub async fn find_latest(pool: &PgPool) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments ORDER BY date DESC LIMIT 1");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List assignments in an inclusive date range, ordered by date.
    pub async fn list_between(
        pool: &PgPool,
        start: Day,
        end: Day,
    ) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments \
             WHERE date >= $1 AND date <= $2 \
             ORDER BY date"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// List assignments strictly after `day`, ordered by date.
    pub async fn list_after(pool: &PgPool, day: Day) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE date > $1 ORDER BY date");
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(day)
            .fetch_all(pool)
            .await
    }

    /// Set the status of an assignment.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Move an assignment to another day.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_date(
        pool: &PgPool,
        id: DbId,
        day: Day,
    ) -> Result<Option<AssignmentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments SET date = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(id)
            .bind(day)
            .fetch_optional(pool)
            .await
    }

    /// Delete an assignment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
