//! Calendar-day helpers.
//!
//! Days travel through the system as `YYYY-MM-DD` strings at the edges and
//! as [`Day`] values everywhere else. Comparisons are only ever made between
//! `Day` values, never between timestamps, so sub-day precision and time
//! zones cannot shift a date by one.

use std::sync::LazyLock;

use chrono::{Duration, Utc};
use regex::Regex;

use crate::error::{CoreError, CoreResult};
use crate::types::{Day, Timestamp};

/// Canonical day layout.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Shape check applied before parsing; rejects e.g. `2024-1-5`, which
/// chrono would otherwise accept.
pub const DAY_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

static DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DAY_PATTERN).expect("valid regex"));

/// Format a day as `YYYY-MM-DD`.
pub fn format_day(day: Day) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string.
///
/// Fails with [`CoreError::InvalidDate`] if the input does not have the
/// exact shape or names a day that does not exist (e.g. `2023-02-29`).
pub fn parse_day(input: &str) -> CoreResult<Day> {
    if !DAY_RE.is_match(input) {
        return Err(CoreError::InvalidDate(input.to_string()));
    }
    Day::parse_from_str(input, DAY_FORMAT).map_err(|_| CoreError::InvalidDate(input.to_string()))
}

/// Offset a day by `days` (may be negative).
pub fn add_days(day: Day, days: i64) -> Day {
    day + Duration::days(days)
}

/// Offset a `YYYY-MM-DD` string by `days`, returning a new `YYYY-MM-DD` string.
pub fn add_days_str(input: &str, days: i64) -> CoreResult<String> {
    parse_day(input).map(|day| format_day(add_days(day, days)))
}

/// Strip the time component from a UTC instant.
pub fn normalize(instant: Timestamp) -> Day {
    instant.date_naive()
}

/// Today in UTC, normalized to midnight.
pub fn today_utc() -> Day {
    normalize(Utc::now())
}
