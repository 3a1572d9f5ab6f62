//! [`DutyStore`] backed by PostgreSQL.

use async_trait::async_trait;
use dishduty_core::entities::{
    ActionLogEntry, Assignment, AssignmentStatus, NewQueueEntry, QueueEntry, Worker,
};
use dishduty_core::error::CoreResult;
use dishduty_core::store::DutyStore;
use dishduty_core::types::{Day, DbId};

use crate::error::map_sqlx_error;
use crate::repositories::{ActionLogRepo, AssignmentRepo, QueueRepo, WorkerRepo};
use crate::{health_check, DbPool};

/// Postgres implementation of the record store. Cheap to clone.
#[derive(Clone)]
pub struct PgDutyStore {
    pool: DbPool,
}

impl PgDutyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DutyStore for PgDutyStore {
    async fn ping(&self) -> CoreResult<()> {
        health_check(&self.pool).await.map_err(map_sqlx_error)
    }

    // --- Workers -----------------------------------------------------------

    async fn list_workers(&self) -> CoreResult<Vec<Worker>> {
        let rows = WorkerRepo::list(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Worker::from).collect())
    }

    async fn get_worker(&self, id: DbId) -> CoreResult<Option<Worker>> {
        let row = WorkerRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Worker::from))
    }

    async fn find_worker_by_name(&self, name: &str) -> CoreResult<Option<Worker>> {
        let row = WorkerRepo::find_by_name(&self.pool, name)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Worker::from))
    }

    async fn create_worker(&self, name: &str) -> CoreResult<Worker> {
        let row = WorkerRepo::create(&self.pool, name)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn set_worker_last_assigned(&self, id: DbId, day: Day) -> CoreResult<Option<Worker>> {
        let row = WorkerRepo::set_last_assigned(&self.pool, id, day)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(Worker::from))
    }

    // --- Assignments -------------------------------------------------------

    async fn get_assignment(&self, id: DbId) -> CoreResult<Option<Assignment>> {
        AssignmentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn find_assignment_by_date(&self, day: Day) -> CoreResult<Option<Assignment>> {
        AssignmentRepo::find_by_date(&self.pool, day)
            .await
            .map_err(map_sqlx_error)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn latest_assignment(&self) -> CoreResult<Option<Assignment>> {
        AssignmentRepo::find_latest(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn list_assignments_between(
        &self,
        start: Day,
        end: Day,
    ) -> CoreResult<Vec<Assignment>> {
        AssignmentRepo::list_between(&self.pool, start, end)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(Assignment::try_from)
            .collect()
    }

    async fn list_assignments_after(&self, day: Day) -> CoreResult<Vec<Assignment>> {
        AssignmentRepo::list_after(&self.pool, day)
            .await
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(Assignment::try_from)
            .collect()
    }

    async fn create_assignment(
        &self,
        worker_id: DbId,
        day: Day,
        status: AssignmentStatus,
    ) -> CoreResult<Assignment> {
        let row = AssignmentRepo::create(&self.pool, worker_id, day, status.as_str())
            .await
            .map_err(map_sqlx_error)?;
        Assignment::try_from(row)
    }

    async fn upsert_assignment(&self, worker_id: DbId, day: Day) -> CoreResult<Assignment> {
        let row = AssignmentRepo::upsert(&self.pool, worker_id, day)
            .await
            .map_err(map_sqlx_error)?;
        Assignment::try_from(row)
    }

    async fn update_assignment_status(
        &self,
        id: DbId,
        status: AssignmentStatus,
    ) -> CoreResult<Option<Assignment>> {
        AssignmentRepo::update_status(&self.pool, id, status.as_str())
            .await
            .map_err(map_sqlx_error)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn update_assignment_date(&self, id: DbId, day: Day) -> CoreResult<Option<Assignment>> {
        AssignmentRepo::update_date(&self.pool, id, day)
            .await
            .map_err(map_sqlx_error)?
            .map(Assignment::try_from)
            .transpose()
    }

    async fn delete_assignment(&self, id: DbId) -> CoreResult<bool> {
        AssignmentRepo::delete(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    // --- Queue -------------------------------------------------------------

    async fn list_queue(&self) -> CoreResult<Vec<QueueEntry>> {
        let rows = QueueRepo::list(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(QueueEntry::from).collect())
    }

    async fn last_queue_entry(&self) -> CoreResult<Option<QueueEntry>> {
        let row = QueueRepo::find_last(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(QueueEntry::from))
    }

    async fn next_due_queue_entry(&self, day: Day) -> CoreResult<Option<QueueEntry>> {
        let row = QueueRepo::find_next_due(&self.pool, day)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(QueueEntry::from))
    }

    async fn create_queue_entry(&self, input: &NewQueueEntry) -> CoreResult<QueueEntry> {
        let row = QueueRepo::create(&self.pool, input)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn update_queue_start_date(
        &self,
        id: DbId,
        day: Day,
    ) -> CoreResult<Option<QueueEntry>> {
        let row = QueueRepo::update_start_date(&self.pool, id, day)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(QueueEntry::from))
    }

    async fn delete_queue_entry(&self, id: DbId) -> CoreResult<bool> {
        QueueRepo::delete(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    // --- Action log --------------------------------------------------------

    async fn append_action(
        &self,
        action_type: &str,
        details: &serde_json::Value,
    ) -> CoreResult<ActionLogEntry> {
        let row = ActionLogRepo::insert(&self.pool, action_type, details)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.into())
    }

    async fn recent_actions(&self, limit: i64) -> CoreResult<Vec<ActionLogEntry>> {
        let rows = ActionLogRepo::list_recent(&self.pool, limit)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(ActionLogEntry::from).collect())
    }
}
