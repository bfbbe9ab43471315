//! Engine-boundary error types.
//!
//! Only `NotFound` and `Validation` represent request failures; everything
//! else the engine recovers from internally (stale mapping data, cache
//! misses, capped fetches) and reports through flags or logs instead.

use thiserror::Error;

/// Result type alias using `EngineError`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that cross the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested scope entity (task, client group) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed window or resolution parameters.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unexpected internal failure (data-layer errors the engine cannot
    /// degrade around).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
