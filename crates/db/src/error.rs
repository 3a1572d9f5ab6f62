//! Translation of `sqlx` failures into [`CoreError`].

use dishduty_core::error::CoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a sqlx error.
///
/// - Unique constraint violations (constraint name starting with `uq_`)
///   become [`CoreError::Conflict`].
/// - Everything else becomes [`CoreError::Dependency`]; the store is
///   unreachable or misbehaving and the caller cannot fix the request.
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Dependency(err.to_string())
}
