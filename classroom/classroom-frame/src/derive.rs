//! Frame derivation from wall reference points.

use glam::DVec3;

use crate::error::{FrameError, Result};
use crate::frame::RoomFrame;

/// Distances at or below this (meters) count as zero.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Projects `v` onto the line spanned by `onto`.
///
/// Returns `None` when `onto` has no usable length or the result would not
/// be finite.
///
/// # Example
///
/// ```
/// use classroom_frame::project;
/// use glam::DVec3;
///
/// let p = project(DVec3::new(0.5, 0.0, 1.0), DVec3::new(2.0, 0.0, 0.0)).unwrap();
/// assert_eq!(p, DVec3::new(0.5, 0.0, 0.0));
/// assert!(project(DVec3::X, DVec3::ZERO).is_none());
/// ```
#[must_use]
pub fn project(v: DVec3, onto: DVec3) -> Option<DVec3> {
    let len_sq = onto.length_squared();
    if !len_sq.is_finite() || len_sq <= GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return None;
    }
    let projected = onto * (v.dot(onto) / len_sq);
    projected.is_finite().then_some(projected)
}

/// Derives the room frame from three wall markers.
///
/// `p1` and `p2` lie on wall 1, `p3` on the adjacent wall 2. The origin is
/// the point on the wall-1 line closest to `p3`; the yaw turns room +X onto
/// the direction from that origin toward `p1`.
///
/// The result depends only on the inputs: calling again with the same
/// points yields a bit-identical frame, so recompute whenever a marker moves
/// rather than patching an old frame.
///
/// # Errors
///
/// Returns [`FrameError::DegenerateGeometry`] if any coordinate is not
/// finite, if `p1` and `p2` coincide, if `p3` lies on the wall-1 line, or if
/// `p1` sits on the corner itself. Coordinates so large that the
/// intermediate products overflow are rejected the same way.
///
/// # Example
///
/// ```
/// use classroom_frame::{FrameError, derive_frame};
/// use glam::DVec3;
///
/// let p = DVec3::new(1.0, 0.0, 1.0);
/// let err = derive_frame(p, p, DVec3::ZERO).unwrap_err();
/// assert!(matches!(err, FrameError::DegenerateGeometry(_)));
/// ```
pub fn derive_frame(p1: DVec3, p2: DVec3, p3: DVec3) -> Result<RoomFrame> {
    if !(p1.is_finite() && p2.is_finite() && p3.is_finite()) {
        return Err(FrameError::degenerate("reference point is not finite"));
    }

    let v1 = p2 - p1;
    let v2 = p3 - p1;

    if !(v1.is_finite() && v2.is_finite()) {
        return Err(FrameError::degenerate("reference points are too far apart"));
    }

    let origin = project(v2, v1)
        .ok_or_else(|| FrameError::degenerate("wall 1 reference points coincide or overflow"))?
        + p1;
    if !origin.is_finite() {
        return Err(FrameError::degenerate("corner is out of range"));
    }

    if (p3 - origin).length() <= GEOMETRY_EPSILON {
        return Err(FrameError::degenerate("wall 2 reference lies on the wall 1 line"));
    }

    let x_axis = p1 - origin;
    if x_axis.length() <= GEOMETRY_EPSILON {
        return Err(FrameError::degenerate("wall 1 reference sits on the corner"));
    }

    let yaw = yaw_toward(x_axis);
    if !(x_axis.is_finite() && yaw.is_finite()) {
        return Err(FrameError::degenerate("wall 1 direction is out of range"));
    }

    Ok(RoomFrame::new(origin, yaw))
}

/// Rotation about +Y that carries +X onto the horizontal part of `dir`.
fn yaw_toward(dir: DVec3) -> f64 {
    (-dir.z).atan2(dir.x)
}
