//! Assignment row model.

use dishduty_core::entities::{Assignment, AssignmentStatus};
use dishduty_core::error::CoreError;
use dishduty_core::types::{Day, DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `assignments` table. `status` is constrained by a CHECK
/// to the three known values.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub id: DbId,
    pub worker_id: DbId,
    pub date: Day,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = CoreError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Assignment {
            id: row.id,
            worker_id: row.worker_id,
            date: row.date,
            status: AssignmentStatus::parse(&row.status)
                .map_err(|e| CoreError::Internal(format!("assignment {}: {e}", row.id)))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
