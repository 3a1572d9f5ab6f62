//! Shared query parameter types for API handlers.

use dishduty_core::dates::parse_day;
use dishduty_core::error::{CoreError, CoreResult};
use dishduty_core::types::Day;
use serde::Deserialize;

/// Default number of action log entries returned.
pub const DEFAULT_ACTION_LOG_LIMIT: i64 = 50;

/// Upper bound on `?limit=` for the action log.
pub const MAX_ACTION_LOG_LIMIT: i64 = 200;

/// Inclusive date range (`?start_date=&end_date=`), both `YYYY-MM-DD`.
///
/// Fields stay raw strings so a missing or malformed value produces the
/// same `VALIDATION_ERROR` body as every other input error.
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeParams {
    /// Parse both bounds. Does not touch storage.
    pub fn parse(&self) -> CoreResult<(Day, Day)> {
        let start = required_day("start_date", self.start_date.as_deref())?;
        let end = required_day("end_date", self.end_date.as_deref())?;
        if start > end {
            return Err(CoreError::Validation(
                "start_date must not be after end_date".into(),
            ));
        }
        Ok((start, end))
    }
}

fn required_day(field: &str, value: Option<&str>) -> CoreResult<Day> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))?;
    parse_day(value)
}

/// `?limit=` for the action log.
#[derive(Debug, Deserialize)]
pub struct ActionLogParams {
    pub limit: Option<i64>,
}

impl ActionLogParams {
    /// Requested limit, defaulted and clamped to `1..=200`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_ACTION_LOG_LIMIT)
            .clamp(1, MAX_ACTION_LOG_LIMIT)
    }
}
