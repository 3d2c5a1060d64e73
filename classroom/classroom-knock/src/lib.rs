//! Knock detection for classroom mapping.
//!
//! A knock on the device shows up as a short acceleration transient. This
//! crate turns a stream of [`MotionSample`]s into payload-free
//! [`ImpactEvent`]s:
//!
//! - [`ImpactDetector`] - the per-sample filter, with a selectable
//!   [`DetectionPolicy`] (absolute magnitude or jerk)
//! - [`KnockParams`] - policy, thresholds and sampling interval
//! - [`ImpactBus`] - fan-out of events to any number of subscribers
//! - [`MotionSource`] - where samples come from; [`ChannelSource`] is fed by
//!   the host's motion callback
//! - [`KnockMonitor`] - runs one detector on a dedicated worker thread
//!
//! # Threading
//!
//! Detector state is owned by the worker thread and never shared. Events
//! cross to subscribers over unbounded channels: fire-and-forget, no
//! acknowledgement, no backpressure.
//!
//! # Example
//!
//! ```
//! use classroom_knock::{DetectionPolicy, ImpactDetector};
//! use classroom_types::{MotionSample, Timestamp};
//!
//! let mut detector = ImpactDetector::new(DetectionPolicy::magnitude());
//! let knock = MotionSample::new(Timestamp::zero(), [0.0, 0.71, 0.0]);
//! assert!(detector.process(&knock).is_some());
//! ```
//!
//! [`MotionSample`]: classroom_types::MotionSample

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bus;
mod detector;
mod error;
mod monitor;
mod params;
mod source;

pub use bus::ImpactBus;
pub use detector::{ImpactDetector, ImpactEvent};
pub use error::{KnockError, Result};
pub use monitor::{KnockHandle, KnockMonitor, KnockStats, StartOutcome};
pub use params::{
    DEFAULT_JERK_THRESHOLD, DEFAULT_MAGNITUDE_THRESHOLD, DetectionPolicy, INTERVAL_1KHZ,
    INTERVAL_100HZ, KnockParams, MAX_SAMPLE_INTERVAL,
};
pub use source::{ChannelSource, MotionSource, MotionUpdate};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ChannelSource, DetectionPolicy, ImpactBus, ImpactDetector, ImpactEvent, KnockError,
        KnockHandle, KnockMonitor, KnockParams, KnockStats, MotionSource, MotionUpdate,
        StartOutcome,
    };
}
