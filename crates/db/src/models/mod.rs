//! Row types for each table.
//!
//! Rows mirror the columns exactly and convert into the domain entities
//! from `dishduty_core::entities`.

pub mod action_log;
pub mod assignment;
pub mod queue_entry;
pub mod worker;
