//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod action_log_repo;
pub mod assignment_repo;
pub mod queue_repo;
pub mod worker_repo;

pub use action_log_repo::ActionLogRepo;
pub use assignment_repo::AssignmentRepo;
pub use queue_repo::QueueRepo;
pub use worker_repo::WorkerRepo;
