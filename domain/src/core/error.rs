//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Validation failures reject input before any state mutation. Invariant
/// violations are fatal for the current cycle only; callers resolve them to
/// a maximally conservative outcome instead of propagating a crash.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("engine invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn invariant(reason: impl Into<String>) -> Self {
        DomainError::Invariant(reason.into())
    }

    /// Check whether this error must be resolved conservatively
    pub fn is_invariant(&self) -> bool {
        matches!(self, DomainError::Invariant(_))
    }
}
