//! Device motion samples.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{SampleError, Timestamp};

/// A user-acceleration reading from the device motion sensor.
///
/// The acceleration is gravity-compensated: a device at rest reads
/// approximately `[0, 0, 0]`. Units follow the host platform (g on iOS).
/// Samples arrive at a fixed nominal interval, typically 1 ms or 10 ms.
///
/// # Example
///
/// ```
/// use classroom_types::{MotionSample, Timestamp};
///
/// let at_rest = MotionSample::new(Timestamp::zero(), [0.0, 0.0, 0.0]);
/// assert_eq!(at_rest.magnitude(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionSample {
    /// When the sample was taken.
    pub timestamp: Timestamp,

    /// Gravity-compensated acceleration: `[x, y, z]`.
    pub user_acceleration: [f64; 3],
}

impl MotionSample {
    /// Creates a new motion sample.
    #[must_use]
    pub const fn new(timestamp: Timestamp, user_acceleration: [f64; 3]) -> Self {
        Self {
            timestamp,
            user_acceleration,
        }
    }

    /// Euclidean norm of the user acceleration.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        let [x, y, z] = self.user_acceleration;
        x.hypot(y).hypot(z)
    }

    /// Checks that every acceleration component is finite.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::InvalidCoordinate`] when a component is `NaN`
    /// or infinite. Detectors skip such samples rather than propagate.
    pub fn validate(&self) -> Result<(), SampleError> {
        if self.user_acceleration.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(SampleError::invalid_coordinate(
                "user acceleration",
                self.user_acceleration,
            ))
        }
    }
}
