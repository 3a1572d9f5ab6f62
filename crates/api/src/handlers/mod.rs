pub mod action_log;
pub mod assignments;
pub mod calendar;
pub mod duty;
pub mod queue;
pub mod workers;
