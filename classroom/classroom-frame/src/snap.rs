//! Settling marker positions onto the floor plane.
//!
//! Image detection places wall markers slightly above or below the floor the
//! plane detector reports. Markers that fall inside the plane footprint and
//! close to its height are moved onto it so the frame is computed in one
//! consistent horizontal plane.

use classroom_types::FloorPlane;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Parameters for floor snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapParams {
    /// Fraction of the plane extent added on each side when testing whether
    /// a marker lies over the plane. Default: 0.1
    pub extent_tolerance: f64,

    /// Largest vertical distance (meters) that is still snapped. Default: 0.20
    pub vertical_allowance: f64,

    /// Vertical distances at or below this (meters) are left alone.
    /// Default: 0.001
    pub epsilon: f64,
}

impl Default for SnapParams {
    fn default() -> Self {
        Self {
            extent_tolerance: 0.1,
            vertical_allowance: 0.20,
            epsilon: 0.001,
        }
    }
}

impl SnapParams {
    /// Set the vertical allowance.
    #[must_use]
    pub const fn with_vertical_allowance(mut self, allowance: f64) -> Self {
        self.vertical_allowance = allowance;
        self
    }

    /// Set the extent tolerance.
    #[must_use]
    pub const fn with_extent_tolerance(mut self, tolerance: f64) -> Self {
        self.extent_tolerance = tolerance;
        self
    }
}

/// What [`snap_to_floor`] did with a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapOutcome {
    /// The point was moved to the floor height.
    Snapped(DVec3),
    /// The point already lies exactly on the floor.
    AlreadyOnPlane,
    /// The point is not above or below the plane footprint.
    OutOfBounds,
    /// The point is over the plane but too close or too far to move.
    Unchanged {
        /// Vertical distance to the floor in meters.
        distance: f64,
    },
}

impl SnapOutcome {
    /// The resulting position for an input `point`.
    #[must_use]
    pub fn resolve(self, point: DVec3) -> DVec3 {
        match self {
            Self::Snapped(snapped) => snapped,
            Self::AlreadyOnPlane | Self::OutOfBounds | Self::Unchanged { .. } => point,
        }
    }
}

/// Moves `point` onto `plane` when it hovers just above or below it.
///
/// The footprint test runs in the plane's local frame, so a floor turned by
/// its yaw is bounded along its own axes.
///
/// # Example
///
/// ```
/// use classroom_frame::{SnapOutcome, SnapParams, snap_to_floor};
/// use classroom_types::FloorPlane;
/// use glam::DVec3;
///
/// let floor = FloorPlane::new([0.0, -1.5, 0.0], [4.0, 4.0]);
/// let marker = DVec3::new(1.0, -1.42, 1.0);
///
/// let outcome = snap_to_floor(marker, &floor, &SnapParams::default());
/// assert_eq!(outcome, SnapOutcome::Snapped(DVec3::new(1.0, -1.5, 1.0)));
/// ```
#[must_use]
#[allow(clippy::float_cmp)] // Exactly-on-plane is an exact test
pub fn snap_to_floor(point: DVec3, plane: &FloorPlane, params: &SnapParams) -> SnapOutcome {
    let local = plane.to_local(point);

    if local.y == 0.0 {
        return SnapOutcome::AlreadyOnPlane;
    }

    let extent = plane.extent_vec();
    let half_x = extent.x / 2.0 + extent.x * params.extent_tolerance;
    let half_z = extent.y / 2.0 + extent.y * params.extent_tolerance;
    if !((-half_x..=half_x).contains(&local.x) && (-half_z..=half_z).contains(&local.z)) {
        return SnapOutcome::OutOfBounds;
    }

    let distance = local.y.abs();
    if distance > params.epsilon && distance < params.vertical_allowance {
        SnapOutcome::Snapped(DVec3::new(point.x, plane.height(), point.z))
    } else {
        SnapOutcome::Unchanged { distance }
    }
}
