//! Repository for the `workers` table.

use dishduty_core::types::{Day, DbId};
use sqlx::PgPool;

use crate::models::worker::WorkerRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, last_assigned_date, created_at, updated_at";

/// Provides CRUD operations for workers.
pub struct WorkerRepo;

impl WorkerRepo {
    /// Insert a new worker. A case-insensitive duplicate name violates
    /// `uq_workers_name_lower`.
    pub async fn create(pool: &PgPool, name: &str) -> Result<WorkerRow, sqlx::Error> {
        let query = format!("INSERT INTO workers (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, WorkerRow>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a worker by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers WHERE id = $1");
        sqlx::query_as::<_, WorkerRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a worker by name, ignoring case.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<WorkerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers WHERE lower(name) = lower($1)");
        sqlx::query_as::<_, WorkerRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all workers in roster (creation) order.
    pub async fn list(pool: &PgPool) -> Result<Vec<WorkerRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers ORDER BY created_at, id");
        sqlx::query_as::<_, WorkerRow>(&query).fetch_all(pool).await
    }

    /// Record the most recent day this worker was put on duty.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_last_assigned(
        pool: &PgPool,
        id: DbId,
        day: Day,
    ) -> Result<Option<WorkerRow>, sqlx::Error> {
        let query = format!(
            "UPDATE workers SET last_assigned_date = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkerRow>(&query)
            .bind(id)
            .bind(day)
            .fetch_optional(pool)
            .await
    }
}
