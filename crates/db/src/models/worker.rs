//! Worker row model.

use dishduty_core::entities::Worker;
use dishduty_core::types::{Day, DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `workers` table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkerRow {
    pub id: DbId,
    pub name: String,
    pub last_assigned_date: Option<Day>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WorkerRow> for Worker {
    fn from(row: WorkerRow) -> Self {
        Worker {
            id: row.id,
            name: row.name,
            last_assigned_date: row.last_assigned_date,
            created_at: row.created_at,
        }
    }
}
