#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid date format: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid duration: {0} (must be between 1 and 7 days)")]
    InvalidDuration(i64),

    #[error("Invalid status: '{0}' (expected assigned, done or not_done)")]
    InvalidStatus(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No workers available for assignment")]
    NoWorkersAvailable,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Record store unavailable: {0}")]
    Dependency(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by anything displayable.
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether this error belongs to the "invalid input" category: the
    /// request itself was malformed and nothing was written.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidDate(_)
                | CoreError::InvalidDuration(_)
                | CoreError::InvalidStatus(_)
                | CoreError::Validation(_)
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
