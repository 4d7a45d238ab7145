//! Domain error model.

use thiserror::Error;

/// Rule violations raised by domain constructors and state transitions.
///
/// Storage and transport failures never appear here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input that no listing, user or message may carry.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A transition the item lifecycle does not allow.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Zero, negative or non-numeric identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The record is no longer in the state the caller expected.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
