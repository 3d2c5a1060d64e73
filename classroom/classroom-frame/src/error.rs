//! Error types for frame derivation.

use classroom_types::{ReferenceRole, SampleError};
use thiserror::Error;

/// Errors that can occur while deriving or querying a room frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    /// The reference points do not span two independent directions.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A marker required for the frame has not been detected yet.
    ///
    /// Not a failure as such: callers defer until the marker arrives.
    #[error("missing reference point: {0}")]
    MissingReferencePoint(ReferenceRole),

    /// Host-supplied data failed validation.
    #[error(transparent)]
    Sample(#[from] SampleError),
}

impl FrameError {
    /// Creates a degenerate geometry error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry(reason.into())
    }

    /// Whether the error only means "not yet available".
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::MissingReferencePoint(_))
    }
}

/// Result type for frame operations.
pub type Result<T> = std::result::Result<T, FrameError>;
