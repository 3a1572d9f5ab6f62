//! Repository for the append-only `action_log` table.

use sqlx::PgPool;

use crate::models::action_log::ActionLogRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, timestamp, action_type, details";

/// Insert and read action log entries. There is no update or delete.
pub struct ActionLogRepo;

impl ActionLogRepo {
    /// Append an entry stamped with the current time.
    pub async fn insert(
        pool: &PgPool,
        action_type: &str,
        details: &serde_json::Value,
    ) -> Result<ActionLogRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_log (action_type, details) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionLogRow>(&query)
            .bind(action_type)
            .bind(details)
            .fetch_one(pool)
            .await
    }

    /// Most recent entries first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ActionLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_log ORDER BY timestamp DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, ActionLogRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
