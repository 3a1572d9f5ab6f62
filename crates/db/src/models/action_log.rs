//! Action log row model. Immutable once written (no updated_at).

use dishduty_core::entities::ActionLogEntry;
use dishduty_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `action_log` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActionLogRow {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub action_type: String,
    pub details: serde_json::Value,
}

impl From<ActionLogRow> for ActionLogEntry {
    fn from(row: ActionLogRow) -> Self {
        ActionLogEntry {
            id: row.id,
            timestamp: row.timestamp,
            action_type: row.action_type,
            details: row.details,
        }
    }
}
