//! Wall reference markers.

use std::fmt;

use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SampleError;

/// The role a detected wall marker plays in the classroom layout.
///
/// Wall 1 carries two markers so its direction can be measured; every other
/// wall carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReferenceRole {
    /// First marker on wall 1.
    Wall1Point1,
    /// Second marker on wall 1.
    Wall1Point2,
    /// Marker on wall 2, adjacent to wall 1.
    Wall2Point1,
    /// Marker on wall 3.
    Wall3Point1,
    /// Marker on wall 4.
    Wall4Point1,
}

impl ReferenceRole {
    /// Every role, in the order markers are assigned as they are detected.
    pub const ALL: [Self; 5] = [
        Self::Wall1Point1,
        Self::Wall1Point2,
        Self::Wall2Point1,
        Self::Wall3Point1,
        Self::Wall4Point1,
    ];

    /// The roles needed to derive a room frame.
    pub const FRAME_ROLES: [Self; 3] = [Self::Wall1Point1, Self::Wall1Point2, Self::Wall2Point1];

    /// Short name for logs and display.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wall1Point1 => "wall1point1",
            Self::Wall1Point2 => "wall1point2",
            Self::Wall2Point1 => "wall2point1",
            Self::Wall3Point1 => "wall3point1",
            Self::Wall4Point1 => "wall4point1",
        }
    }
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A wall marker that has been located and is considered stable.
///
/// # Example
///
/// ```
/// use classroom_types::{ReferenceRole, ReferenceSample};
///
/// let sample = ReferenceSample::new(ReferenceRole::Wall2Point1, [1.0, 0.0, 3.0]).unwrap();
/// assert_eq!(sample.role.name(), "wall2point1");
///
/// assert!(ReferenceSample::new(ReferenceRole::Wall2Point1, [f64::NAN, 0.0, 0.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceSample {
    /// Which wall point this marker stands for.
    pub role: ReferenceRole,
    /// Position in meters: `[x, y, z]`.
    pub position: [f64; 3],
}

impl ReferenceSample {
    /// Creates a reference sample.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::InvalidCoordinate`] if any coordinate is not
    /// finite.
    pub fn new(role: ReferenceRole, position: [f64; 3]) -> Result<Self, SampleError> {
        if !position.iter().all(|c| c.is_finite()) {
            return Err(SampleError::invalid_coordinate(role.name(), position));
        }
        Ok(Self { role, position })
    }

    /// Creates a reference sample from a vector position.
    ///
    /// # Errors
    ///
    /// Same as [`ReferenceSample::new`].
    pub fn from_point(role: ReferenceRole, point: DVec3) -> Result<Self, SampleError> {
        Self::new(role, point.to_array())
    }

    /// Position as a vector.
    #[must_use]
    pub fn point(&self) -> DVec3 {
        DVec3::from_array(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_ordered_for_assignment() {
        assert_eq!(ReferenceRole::ALL[0], ReferenceRole::Wall1Point1);
        assert_eq!(ReferenceRole::ALL[4], ReferenceRole::Wall4Point1);
        assert!(
            ReferenceRole::FRAME_ROLES
                .iter()
                .all(|r| ReferenceRole::ALL.contains(r))
        );
    }

    #[test]
    fn role_names() {
        assert_eq!(ReferenceRole::Wall1Point2.to_string(), "wall1point2");
        assert_eq!(ReferenceRole::Wall4Point1.name(), "wall4point1");
    }

    #[test]
    #[allow(clippy::float_cmp)] // Exact values copied through
    fn sample_point_round_trip() {
        let point = DVec3::new(1.0, 2.0, 3.0);
        let sample = ReferenceSample::from_point(ReferenceRole::Wall3Point1, point);
        assert_eq!(sample.map(|s| s.point()), Ok(point));
    }

    #[test]
    fn sample_rejects_infinite() {
        let err = ReferenceSample::new(ReferenceRole::Wall1Point1, [0.0, f64::INFINITY, 0.0]);
        assert!(matches!(err, Err(SampleError::InvalidCoordinate(msg)) if msg.contains("wall1point1")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&ReferenceRole::Wall2Point1).unwrap_or_default();
        assert_eq!(json, "\"wall2_point1\"");
    }
}
