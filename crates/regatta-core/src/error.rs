//! Error types for the regatta optimizer

use thiserror::Error;

/// Main error type for regatta operations
#[derive(Debug, Error)]
pub enum RegattaError {
    /// Error in the schedule or optimization configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A pairing list does not fit its schedule configuration
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// The optimization was stopped by request before completion
    #[error("Optimization was cancelled")]
    Cancelled,

    /// Invalid operation for current optimizer state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegattaError {
    /// Returns true for the "stopped by request" condition.
    ///
    /// Cancellation is an expected outcome, not a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RegattaError::Cancelled)
    }
}

/// Result type alias for regatta operations
pub type Result<T> = std::result::Result<T, RegattaError>;
