//! Domain entities shared by every record store implementation.

use serde::{Deserialize, Serialize};

use crate::dates::add_days;
use crate::error::CoreError;
use crate::types::{Day, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// A member of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: DbId,
    pub name: String,
    pub last_assigned_date: Option<Day>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Outcome of a day's duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    Done,
    NotDone,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 3] = [
        AssignmentStatus::Assigned,
        AssignmentStatus::Done,
        AssignmentStatus::NotDone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Done => "done",
            AssignmentStatus::NotDone => "not_done",
        }
    }

    /// Parse a wire value. Anything but the three known names is rejected
    /// with [`CoreError::InvalidStatus`].
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| CoreError::InvalidStatus(value.to_string()))
    }

    /// Whether a day carrying this status counts as resolved.
    pub fn is_resolved(self) -> bool {
        matches!(self, AssignmentStatus::Assigned | AssignmentStatus::Done)
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Worker `worker_id` is on duty on `date`." At most one per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub worker_id: DbId,
    pub date: Day,
    pub status: AssignmentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// Inclusive bounds on `duration_days`.
pub const MIN_QUEUE_DURATION_DAYS: i32 = 1;
pub const MAX_QUEUE_DURATION_DAYS: i32 = 7;

/// A pending multi-day assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueEntry {
    pub id: DbId,
    pub worker_id: DbId,
    pub start_date: Day,
    pub duration_days: i32,
    pub order: i32,
    pub created_at: Timestamp,
}

impl QueueEntry {
    /// Last day covered by this entry (inclusive).
    pub fn end_date(&self) -> Day {
        add_days(self.start_date, i64::from(self.duration_days) - 1)
    }

    /// Whether the entry should be consumed on `day`.
    pub fn is_due(&self, day: Day) -> bool {
        self.start_date <= day
    }
}

/// Input for inserting a queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQueueEntry {
    pub worker_id: DbId,
    pub start_date: Day,
    pub duration_days: i32,
    pub order: i32,
}

// ---------------------------------------------------------------------------
// Action log
// ---------------------------------------------------------------------------

/// Immutable audit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionLogEntry {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub action_type: String,
    pub details: serde_json::Value,
}
