//! Room-local coordinate frames for classroom mapping.
//!
//! Markers on two adjacent walls pin down a classroom coordinate system:
//!
//! - [`derive_frame`] - origin and yaw from three wall points
//! - [`RoomFrame`] - the derived frame, mapping points between the floor
//!   frame and room coordinates
//! - [`snap_to_floor`] - settles a marker position onto the floor plane
//! - [`ReferenceRegistry`] - owns detected markers and pushes a fresh frame
//!   to listeners whenever the required markers are known
//!
//! # Geometry
//!
//! Wall 1 carries two markers `p1`, `p2`; wall 2 carries `p3`. The room
//! origin is the foot of the perpendicular from `p3` onto the wall-1 line,
//! i.e. the corner where the walls meet. The room's +X axis runs from the
//! corner toward `p1`; the frame is rotated about +Y only.
//!
//! # Example
//!
//! ```
//! use classroom_frame::derive_frame;
//! use glam::DVec3;
//!
//! let frame = derive_frame(
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.5, 0.0, 1.0),
//! )
//! .unwrap();
//!
//! assert!((frame.origin - DVec3::new(0.5, 0.0, 0.0)).length() < 1e-12);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod derive;
mod error;
mod frame;
mod registry;
mod snap;

pub use derive::{GEOMETRY_EPSILON, derive_frame, project};
pub use error::{FrameError, Result};
pub use frame::RoomFrame;
pub use registry::ReferenceRegistry;
pub use snap::{SnapOutcome, SnapParams, snap_to_floor};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        FrameError, ReferenceRegistry, RoomFrame, SnapOutcome, SnapParams, derive_frame,
        snap_to_floor,
    };
}
