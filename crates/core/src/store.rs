//! The record store seam.
//!
//! Scheduling logic only ever touches persistence through [`DutyStore`].
//! Each method is a single-record (or single-query) operation; no method
//! spans several records transactionally. Implementations map a uniqueness
//! violation to [`CoreError::Conflict`](crate::error::CoreError::Conflict)
//! and any other storage failure to
//! [`CoreError::Dependency`](crate::error::CoreError::Dependency).

use async_trait::async_trait;

use crate::entities::{
    ActionLogEntry, Assignment, AssignmentStatus, NewQueueEntry, QueueEntry, Worker,
};
use crate::error::CoreResult;
use crate::types::{Day, DbId};

#[async_trait]
pub trait DutyStore: Send + Sync {
    /// Cheap round trip used by health checks.
    async fn ping(&self) -> CoreResult<()>;

    // --- Workers -----------------------------------------------------------

    /// All workers in roster (creation) order.
    async fn list_workers(&self) -> CoreResult<Vec<Worker>>;

    async fn get_worker(&self, id: DbId) -> CoreResult<Option<Worker>>;

    /// Case-insensitive lookup.
    async fn find_worker_by_name(&self, name: &str) -> CoreResult<Option<Worker>>;

    async fn create_worker(&self, name: &str) -> CoreResult<Worker>;

    async fn set_worker_last_assigned(&self, id: DbId, day: Day) -> CoreResult<Option<Worker>>;

    // --- Assignments -------------------------------------------------------

    async fn get_assignment(&self, id: DbId) -> CoreResult<Option<Assignment>>;

    async fn find_assignment_by_date(&self, day: Day) -> CoreResult<Option<Assignment>>;

    /// The assignment with the greatest date, if any.
    async fn latest_assignment(&self) -> CoreResult<Option<Assignment>>;

    /// Assignments with `start <= date <= end`, ascending by date.
    async fn list_assignments_between(&self, start: Day, end: Day)
        -> CoreResult<Vec<Assignment>>;

    /// Assignments with `date > day`, ascending by date.
    async fn list_assignments_after(&self, day: Day) -> CoreResult<Vec<Assignment>>;

    /// Insert a new assignment. A second assignment on the same date fails
    /// with `Conflict`.
    async fn create_assignment(
        &self,
        worker_id: DbId,
        day: Day,
        status: AssignmentStatus,
    ) -> CoreResult<Assignment>;

    /// Create the assignment for `day`, or overwrite the existing one so it
    /// belongs to `worker_id` with status `assigned`.
    async fn upsert_assignment(&self, worker_id: DbId, day: Day) -> CoreResult<Assignment>;

    async fn update_assignment_status(
        &self,
        id: DbId,
        status: AssignmentStatus,
    ) -> CoreResult<Option<Assignment>>;

    async fn update_assignment_date(&self, id: DbId, day: Day) -> CoreResult<Option<Assignment>>;

    async fn delete_assignment(&self, id: DbId) -> CoreResult<bool>;

    // --- Queue -------------------------------------------------------------

    /// All entries ascending by `order`.
    async fn list_queue(&self) -> CoreResult<Vec<QueueEntry>>;

    /// Entry with the highest `order`.
    async fn last_queue_entry(&self) -> CoreResult<Option<QueueEntry>>;

    /// Lowest-`order` entry with `start_date <= day`.
    async fn next_due_queue_entry(&self, day: Day) -> CoreResult<Option<QueueEntry>>;

    async fn create_queue_entry(&self, input: &NewQueueEntry) -> CoreResult<QueueEntry>;

    async fn update_queue_start_date(&self, id: DbId, day: Day)
        -> CoreResult<Option<QueueEntry>>;

    async fn delete_queue_entry(&self, id: DbId) -> CoreResult<bool>;

    // --- Action log --------------------------------------------------------

    async fn append_action(
        &self,
        action_type: &str,
        details: &serde_json::Value,
    ) -> CoreResult<ActionLogEntry>;

    /// Newest first.
    async fn recent_actions(&self, limit: i64) -> CoreResult<Vec<ActionLogEntry>>;
}
