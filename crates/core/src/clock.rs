//! Source of "today".
//!
//! Every scheduling operation asks an injected [`Clock`] for the current
//! calendar day instead of reading the wall clock, so tests can pin the date.

use crate::dates::today_utc;
use crate::types::Day;

/// Provides the current calendar day in the reference time zone (UTC).
pub trait Clock: Send + Sync {
    fn today(&self) -> Day;
}

/// Wall-clock UTC date, time of day discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Day {
        today_utc()
    }
}

/// A clock frozen on one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Day);

impl Clock for FixedClock {
    fn today(&self) -> Day {
        self.0
    }
}
