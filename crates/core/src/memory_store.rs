//! In-process [`DutyStore`] backed by plain collections.
//!
//! Enforces the same uniqueness rules as the Postgres schema (one
//! assignment per date, case-insensitive worker names, unique queue order)
//! so scheduling logic behaves identically against either store. Used by
//! the unit and HTTP test suites.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::entities::{
    ActionLogEntry, Assignment, AssignmentStatus, NewQueueEntry, QueueEntry, Worker,
};
use crate::error::{CoreError, CoreResult};
use crate::store::DutyStore;
use crate::types::{Day, DbId};

#[derive(Default)]
struct Inner {
    next_id: DbId,
    workers: Vec<Worker>,
    assignments: Vec<Assignment>,
    queue: Vec<QueueEntry>,
    actions: Vec<ActionLogEntry>,
    fail_upsert_on: Option<Day>,
    fail_date_update_for: Option<DbId>,
}

impl Inner {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn date_taken(&self, day: Day, except: Option<DbId>) -> bool {
        self.assignments
            .iter()
            .any(|a| a.date == day && Some(a.id) != except)
    }
}

/// Thread-safe in-memory record store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_action_log: AtomicBool,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `append_action` fail.
    pub fn fail_action_log(&self, fail: bool) {
        self.fail_action_log.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent operation fail with `Dependency`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make `upsert_assignment` fail for one date.
    pub async fn fail_upsert_on(&self, day: Option<Day>) {
        self.inner.lock().await.fail_upsert_on = day;
    }

    /// Make `update_assignment_date` fail for one assignment.
    pub async fn fail_date_update_for(&self, id: Option<DbId>) {
        self.inner.lock().await.fail_date_update_for = id;
    }

    fn check_available(&self) -> CoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::Dependency("memory store marked unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DutyStore for MemoryStore {
    async fn ping(&self) -> CoreResult<()> {
        self.check_available()
    }

    // --- Workers -----------------------------------------------------------

    async fn list_workers(&self) -> CoreResult<Vec<Worker>> {
        self.check_available()?;
        Ok(self.inner.lock().await.workers.clone())
    }

    async fn get_worker(&self, id: DbId) -> CoreResult<Option<Worker>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(inner.workers.iter().find(|w| w.id == id).cloned())
    }

    async fn find_worker_by_name(&self, name: &str) -> CoreResult<Option<Worker>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        let wanted = name.to_lowercase();
        Ok(inner
            .workers
            .iter()
            .find(|w| w.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn create_worker(&self, name: &str) -> CoreResult<Worker> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let wanted = name.to_lowercase();
        if inner.workers.iter().any(|w| w.name.to_lowercase() == wanted) {
            return Err(CoreError::Conflict(format!("worker '{name}' already exists")));
        }
        let worker = Worker {
            id: inner.next_id(),
            name: name.to_string(),
            last_assigned_date: None,
            created_at: Utc::now(),
        };
        inner.workers.push(worker.clone());
        Ok(worker)
    }

    async fn set_worker_last_assigned(&self, id: DbId, day: Day) -> CoreResult<Option<Worker>> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        Ok(inner.workers.iter_mut().find(|w| w.id == id).map(|w| {
            w.last_assigned_date = Some(day);
            w.clone()
        }))
    }

    // --- Assignments -------------------------------------------------------

    async fn get_assignment(&self, id: DbId) -> CoreResult<Option<Assignment>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(inner.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_assignment_by_date(&self, day: Day) -> CoreResult<Option<Assignment>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(inner.assignments.iter().find(|a| a.date == day).cloned())
    }

    async fn latest_assignment(&self) -> CoreResult<Option<Assignment>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(inner.assignments.iter().max_by_key(|a| a.date).cloned())
    }

    async fn list_assignments_between(
        &self,
        start: Day,
        end: Day,
    ) -> CoreResult<Vec<Assignment>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        let mut rows: Vec<_> = inner
            .assignments
            .iter()
            .filter(|a| a.date >= start && a.date <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.date);
        Ok(rows)
    }

    async fn list_assignments_after(&self, day: Day) -> CoreResult<Vec<Assignment>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        let mut rows: Vec<_> = inner
            .assignments
            .iter()
            .filter(|a| a.date > day)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.date);
        Ok(rows)
    }

    async fn create_assignment(
        &self,
        worker_id: DbId,
        day: Day,
        status: AssignmentStatus,
    ) -> CoreResult<Assignment> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        if inner.date_taken(day, None) {
            return Err(CoreError::Conflict(format!("assignment for {day} already exists")));
        }
        let now = Utc::now();
        let assignment = Assignment {
            id: inner.next_id(),
            worker_id,
            date: day,
            status,
            created_at: now,
            updated_at: now,
        };
        inner.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn upsert_assignment(&self, worker_id: DbId, day: Day) -> CoreResult<Assignment> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        if inner.fail_upsert_on == Some(day) {
            return Err(CoreError::Dependency(format!("injected upsert failure on {day}")));
        }
        if let Some(existing) = inner.assignments.iter_mut().find(|a| a.date == day) {
            existing.worker_id = worker_id;
            existing.status = AssignmentStatus::Assigned;
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }
        let now = Utc::now();
        let assignment = Assignment {
            id: inner.next_id(),
            worker_id,
            date: day,
            status: AssignmentStatus::Assigned,
            created_at: now,
            updated_at: now,
        };
        inner.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment_status(
        &self,
        id: DbId,
        status: AssignmentStatus,
    ) -> CoreResult<Option<Assignment>> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        Ok(inner.assignments.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = status;
            a.updated_at = Utc::now();
            a.clone()
        }))
    }

    async fn update_assignment_date(&self, id: DbId, day: Day) -> CoreResult<Option<Assignment>> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        if inner.fail_date_update_for == Some(id) {
            return Err(CoreError::Dependency(format!("injected date update failure for {id}")));
        }
        if inner.date_taken(day, Some(id)) {
            return Err(CoreError::Conflict(format!("assignment for {day} already exists")));
        }
        Ok(inner.assignments.iter_mut().find(|a| a.id == id).map(|a| {
            a.date = day;
            a.updated_at = Utc::now();
            a.clone()
        }))
    }

    async fn delete_assignment(&self, id: DbId) -> CoreResult<bool> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let before = inner.assignments.len();
        inner.assignments.retain(|a| a.id != id);
        Ok(inner.assignments.len() < before)
    }

    // --- Queue -------------------------------------------------------------

    async fn list_queue(&self) -> CoreResult<Vec<QueueEntry>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        let mut rows = inner.queue.clone();
        rows.sort_by_key(|q| q.order);
        Ok(rows)
    }

    async fn last_queue_entry(&self) -> CoreResult<Option<QueueEntry>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(inner.queue.iter().max_by_key(|q| q.order).cloned())
    }

    async fn next_due_queue_entry(&self, day: Day) -> CoreResult<Option<QueueEntry>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        Ok(inner
            .queue
            .iter()
            .filter(|q| q.is_due(day))
            .min_by_key(|q| q.order)
            .cloned())
    }

    async fn create_queue_entry(&self, input: &NewQueueEntry) -> CoreResult<QueueEntry> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        if inner.queue.iter().any(|q| q.order == input.order) {
            return Err(CoreError::Conflict(format!(
                "queue order {} already taken",
                input.order
            )));
        }
        let entry = QueueEntry {
            id: inner.next_id(),
            worker_id: input.worker_id,
            start_date: input.start_date,
            duration_days: input.duration_days,
            order: input.order,
            created_at: Utc::now(),
        };
        inner.queue.push(entry.clone());
        Ok(entry)
    }

    async fn update_queue_start_date(
        &self,
        id: DbId,
        day: Day,
    ) -> CoreResult<Option<QueueEntry>> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        Ok(inner.queue.iter_mut().find(|q| q.id == id).map(|q| {
            q.start_date = day;
            q.clone()
        }))
    }

    async fn delete_queue_entry(&self, id: DbId) -> CoreResult<bool> {
        self.check_available()?;
        let mut inner = self.inner.lock().await;
        let before = inner.queue.len();
        inner.queue.retain(|q| q.id != id);
        Ok(inner.queue.len() < before)
    }

    // --- Action log --------------------------------------------------------

    async fn append_action(
        &self,
        action_type: &str,
        details: &serde_json::Value,
    ) -> CoreResult<ActionLogEntry> {
        self.check_available()?;
        if self.fail_action_log.load(Ordering::SeqCst) {
            return Err(CoreError::Dependency("action log write rejected".into()));
        }
        let mut inner = self.inner.lock().await;
        let entry = ActionLogEntry {
            id: inner.next_id(),
            timestamp: Utc::now(),
            action_type: action_type.to_string(),
            details: details.clone(),
        };
        inner.actions.push(entry.clone());
        Ok(entry)
    }

    async fn recent_actions(&self, limit: i64) -> CoreResult<Vec<ActionLogEntry>> {
        self.check_available()?;
        let inner = self.inner.lock().await;
        let limit = usize::try_from(limit.max(0)).unwrap_or(0);
        Ok(inner.actions.iter().rev().take(limit).cloned().collect())
    }
}
