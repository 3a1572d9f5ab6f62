//! Background tasks.
//!
//! Each submodule provides an async function intended to be spawned via
//! `tokio::spawn`. All tasks accept a [`CancellationToken`] for graceful
//! shutdown.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod startup_resolve;
