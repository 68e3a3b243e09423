//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid score: {0} (expected 1-10)")]
    InvalidScore(i64),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Structured output did not validate: {0}")]
    ParseFailure(String),

    #[error("Invalid debate transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl DomainError {
    /// Check if this error is a structured-output parse failure
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, DomainError::ParseFailure(_))
    }
}
