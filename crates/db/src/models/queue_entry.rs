//! Assignment queue row model.

use dishduty_core::entities::QueueEntry;
use dishduty_core::types::{Day, DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `assignment_queue` table. `order` is a reserved word in
/// SQL, so the column is `queue_order`.
#[derive(Debug, Clone, FromRow)]
pub struct QueueEntryRow {
    pub id: DbId,
    pub worker_id: DbId,
    pub start_date: Day,
    pub duration_days: i32,
    pub queue_order: i32,
    pub created_at: Timestamp,
}

impl From<QueueEntryRow> for QueueEntry {
    fn from(row: QueueEntryRow) -> Self {
        QueueEntry {
            id: row.id,
            worker_id: row.worker_id,
            start_date: row.start_date,
            duration_days: row.duration_days,
            order: row.queue_order,
            created_at: row.created_at,
        }
    }
}
