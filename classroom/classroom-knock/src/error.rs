//! Error types for knock detection.

use thiserror::Error;

/// Errors that can occur while configuring or running knock detection.
///
/// A missing motion sensor is not an error: [`KnockMonitor::start`] reports
/// it as [`StartOutcome::SensorUnavailable`].
///
/// [`KnockMonitor::start`]: crate::KnockMonitor::start
/// [`StartOutcome::SensorUnavailable`]: crate::StartOutcome::SensorUnavailable
#[derive(Debug, Error)]
pub enum KnockError {
    /// Invalid parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker thread could not be spawned.
    #[error("failed to spawn detector thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker thread panicked.
    #[error("detector thread panicked")]
    WorkerPanicked,
}

impl KnockError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

/// Result type for knock detection operations.
pub type Result<T> = std::result::Result<T, KnockError>;
