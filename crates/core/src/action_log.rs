//! Audit trail constants and the best-effort writer.

use crate::store::DutyStore;

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for action log entries.
pub mod action_types {
    pub const ASSIGNED: &str = "assigned";
    pub const ADDED_TO_QUEUE: &str = "added_to_queue";
    pub const MARKED_NOT_DONE: &str = "marked_not_done";
    pub const RANDOMLY_ASSIGNED: &str = "randomly_assigned";
    pub const QUEUE_PROCESSED: &str = "queue_processed";
    pub const STATUS_UPDATED: &str = "status_updated";
    pub const WORKER_CREATED: &str = "worker_created";
    pub const ASSIGNMENT_CANCELLED_FOR_REASSIGNMENT: &str =
        "assignment_cancelled_for_reassignment";
    pub const RANDOM_ASSIGNMENT_FAILED: &str = "random_assignment_failed";
    pub const DAILY_ASSIGNMENT_ERROR: &str = "daily_assignment_error";
}

/// Append an entry to the action log.
///
/// A failed write is reported through `tracing` and otherwise swallowed:
/// the audit trail never decides whether the operation that produced it
/// succeeds.
pub async fn record(store: &dyn DutyStore, action_type: &str, details: serde_json::Value) {
    if let Err(e) = store.append_action(action_type, &details).await {
        tracing::warn!(action_type, error = %e, "Failed to write action log entry");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory_store::MemoryStore;

    #[tokio::test]
    async fn record_appends_entry() {
        let store = MemoryStore::new();
        record(&store, action_types::ASSIGNED, json!({ "worker_id": 1 })).await;

        let entries = store.recent_actions(10).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action_type, "assigned");
        assert_eq!(entries[0].details["worker_id"], 1);
    }

    #[tokio::test]
    async fn record_swallows_write_failure() {
        let store = MemoryStore::new();
        store.fail_action_log(true);
        record(&store, action_types::ASSIGNED, json!({})).await;

        store.fail_action_log(false);
        assert!(store.recent_actions(10).await.unwrap().is_empty());
    }
}
