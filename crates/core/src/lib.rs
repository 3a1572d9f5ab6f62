//! Domain core for the dish duty service.
//!
//! Holds the scheduling rules (rotation, queue, daily resolution, cascade)
//! and the [`store::DutyStore`] seam they run against. This crate has no
//! internal dependencies so the API server, the Postgres store and tests
//! can all share it.

pub mod action_log;
pub mod calendar;
pub mod clock;
pub mod dates;
pub mod entities;
pub mod error;
pub mod memory_store;
pub mod queue;
pub mod resolver;
pub mod roster;
pub mod rotation;
pub mod status;
pub mod store;
pub mod types;
pub mod undone;
