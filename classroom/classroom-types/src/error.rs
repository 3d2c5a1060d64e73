//! Error types for classroom data.

use thiserror::Error;

/// Errors raised while validating host-supplied data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// A coordinate or acceleration component is `NaN` or infinite.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl SampleError {
    /// Creates an invalid coordinate error naming the offending value.
    #[must_use]
    pub fn invalid_coordinate(what: &str, value: [f64; 3]) -> Self {
        Self::InvalidCoordinate(format!(
            "{what} [{}, {}, {}] is not finite",
            value[0], value[1], value[2]
        ))
    }
}
