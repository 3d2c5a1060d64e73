//! Detected floor plane.

use glam::{DMat3, DVec2, DVec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest plane area (m²) accepted as the classroom floor.
pub const DEFAULT_MIN_FLOOR_AREA: f64 = 1.0;

/// A horizontal plane reported by the host's plane detection.
///
/// The plane is level at `center[1]` and spans `extent[0]` meters along its
/// local x axis and `extent[1]` meters along its local z axis. The local
/// axes are the world axes turned by `yaw` radians about +Y, the way plane
/// anchors report their orientation. Hosts resend the plane as tracking
/// refines it; each update replaces the previous value.
///
/// # Example
///
/// ```
/// use classroom_types::{DEFAULT_MIN_FLOOR_AREA, FloorPlane};
///
/// let small = FloorPlane::new([0.0, -1.4, 0.0], [0.5, 0.5]);
/// let large = FloorPlane::new([0.0, -1.4, 0.0], [2.0, 1.5]);
/// assert!(!small.is_floor(DEFAULT_MIN_FLOOR_AREA));
/// assert!(large.is_floor(DEFAULT_MIN_FLOOR_AREA));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloorPlane {
    /// Plane center in meters: `[x, y, z]`. `y` is the floor height.
    pub center: [f64; 3],
    /// Plane size in meters: `[x_extent, z_extent]`, along the local axes.
    pub extent: [f64; 2],
    /// Rotation of the plane's local axes about +Y (radians).
    #[cfg_attr(feature = "serde", serde(default))]
    pub yaw: f64,
}

impl FloorPlane {
    /// Creates a floor plane aligned with the world axes.
    #[must_use]
    pub const fn new(center: [f64; 3], extent: [f64; 2]) -> Self {
        Self {
            center,
            extent,
            yaw: 0.0,
        }
    }

    /// Set the plane's rotation about +Y.
    #[must_use]
    pub const fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// Plane center as a vector.
    #[must_use]
    pub fn center_point(&self) -> DVec3 {
        DVec3::from_array(self.center)
    }

    /// Plane size as a vector (`x` along local x, `y` along local z).
    #[must_use]
    pub fn extent_vec(&self) -> DVec2 {
        DVec2::from_array(self.extent)
    }

    /// Expresses a world point in the plane's local frame: relative to the
    /// center, with x and z along the plane's own axes.
    #[must_use]
    pub fn to_local(&self, point: DVec3) -> DVec3 {
        DMat3::from_rotation_y(self.yaw).transpose() * (point - self.center_point())
    }

    /// Floor height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.center[1]
    }

    /// Area covered by the plane.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.extent[0] * self.extent[1]
    }

    /// Whether the plane is large enough to be taken as the floor.
    #[must_use]
    pub fn is_floor(&self, min_area: f64) -> bool {
        self.area() >= min_area
    }
}
