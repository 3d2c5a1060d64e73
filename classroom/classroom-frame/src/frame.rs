//! The derived classroom frame.

use std::f64::consts::{PI, TAU};

use glam::{DAffine3, DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// A room-local coordinate frame: an origin plus a yaw about +Y.
///
/// Maps points from the frame they were measured in (the floor frame) to
/// room coordinates and back. Room +X runs along wall 1, +Y is up.
///
/// # Example
///
/// ```
/// use classroom_frame::RoomFrame;
/// use glam::DVec3;
/// use std::f64::consts::FRAC_PI_2;
///
/// let frame = RoomFrame::new(DVec3::new(2.0, 0.0, 0.0), FRAC_PI_2);
/// let world = DVec3::new(2.0, 0.0, -1.0);
///
/// // One meter down room +X.
/// let room = frame.to_room(world);
/// assert!((room - DVec3::X).length() < 1e-12);
/// assert!((frame.to_world(room) - world).length() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomFrame {
    /// Room origin (the wall corner) in the measurement frame.
    #[serde(with = "dvec3_serde")]
    pub origin: DVec3,

    /// Rotation about +Y in radians, within `(-π, π]`.
    pub yaw: f64,
}

mod dvec3_serde {
    use glam::DVec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct DVec3Data {
        x: f64,
        y: f64,
        z: f64,
    }

    pub fn serialize<S: Serializer>(v: &DVec3, s: S) -> std::result::Result<S::Ok, S::Error> {
        DVec3Data {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<DVec3, D::Error> {
        let data = DVec3Data::deserialize(d)?;
        Ok(DVec3::new(data.x, data.y, data.z))
    }
}

impl RoomFrame {
    /// Creates a frame, wrapping `yaw` into `(-π, π]`.
    #[must_use]
    pub fn new(origin: DVec3, yaw: f64) -> Self {
        Self {
            origin,
            yaw: wrap_angle(yaw),
        }
    }

    /// Orthonormal basis whose columns are the room axes.
    #[must_use]
    pub fn basis(&self) -> DMat3 {
        DMat3::from_rotation_y(self.yaw)
    }

    /// Room +X axis in the measurement frame.
    #[must_use]
    pub fn x_axis(&self) -> DVec3 {
        self.basis().x_axis
    }

    /// Room +Z axis in the measurement frame.
    #[must_use]
    pub fn z_axis(&self) -> DVec3 {
        self.basis().z_axis
    }

    /// Affine transform from room coordinates to the measurement frame.
    #[must_use]
    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_mat3_translation(self.basis(), self.origin)
    }

    /// Expresses a measured point in room coordinates.
    #[must_use]
    pub fn to_room(&self, point: DVec3) -> DVec3 {
        self.basis().transpose() * (point - self.origin)
    }

    /// Maps a room-coordinate point back into the measurement frame.
    #[must_use]
    pub fn to_world(&self, point: DVec3) -> DVec3 {
        self.basis() * point + self.origin
    }
}

fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
