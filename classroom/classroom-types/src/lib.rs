//! Data types for classroom mapping.
//!
//! This crate holds the plain records the host AR application hands to the
//! rest of the workspace:
//! - [`ReferenceSample`] - a located wall marker tagged with its [`ReferenceRole`]
//! - [`FloorPlane`] - the detected horizontal floor
//! - [`MotionSample`] - a gravity-compensated acceleration reading
//! - [`Timestamp`] - nanosecond-precision sample time
//!
//! # Layer 0 Crate
//!
//! Nothing here renders, tracks or schedules. Frame derivation lives in
//! `classroom-frame`, knock detection in `classroom-knock`; both consume
//! these types and never each other.
//!
//! # Coordinates
//!
//! Positions are meters in a right-handed frame with +Y up, matching the
//! floor-plane convention of the host platform.
//!
//! # Example
//!
//! ```
//! use classroom_types::{MotionSample, ReferenceRole, ReferenceSample, Timestamp};
//!
//! let marker = ReferenceSample::new(ReferenceRole::Wall1Point1, [0.5, 0.0, -2.0]).unwrap();
//! assert_eq!(marker.point().z, -2.0);
//!
//! let sample = MotionSample::new(Timestamp::from_secs_f64(0.001), [0.0, 0.3, 0.4]);
//! assert!((sample.magnitude() - 0.5).abs() < 1e-12);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod motion;
mod plane;
mod reference;
mod time;

pub use error::SampleError;
pub use motion::MotionSample;
pub use plane::{DEFAULT_MIN_FLOOR_AREA, FloorPlane};
pub use reference::{ReferenceRole, ReferenceSample};
pub use time::Timestamp;
