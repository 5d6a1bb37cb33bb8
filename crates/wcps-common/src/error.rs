//! Error types for WCPS query construction and result handling.

use thiserror::Error;

/// Result type alias using WcpsError.
pub type WcpsResult<T> = Result<T, WcpsError>;

/// Primary error type for query building and decoding.
///
/// Transport faults are deliberately absent: they travel as structured
/// results so callers can inspect status codes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WcpsError {
    /// Malformed or missing operand, subset or format. Raised when the bad
    /// value is introduced, never deferred to serialization.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation, shape or return kind that the builder does not support.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Decoding attempted on a failed or empty result.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl WcpsError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        WcpsError::InvalidArgument(msg.into())
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        WcpsError::NotImplemented(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        WcpsError::InvalidState(msg.into())
    }

    /// Stable code for this error class.
    pub fn kind(&self) -> &'static str {
        match self {
            WcpsError::InvalidArgument(_) => "InvalidArgument",
            WcpsError::NotImplemented(_) => "NotImplemented",
            WcpsError::InvalidState(_) => "InvalidState",
        }
    }
}
