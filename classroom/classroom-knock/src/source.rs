//! Sources of motion samples.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use classroom_types::MotionSample;

use crate::params::INTERVAL_1KHZ;

/// One delivery from a motion source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionUpdate {
    /// A sample arrived.
    Sample(MotionSample),
    /// The callback fired without data, or nothing arrived in time.
    Missing,
}

/// A device motion sensor, as seen by the knock monitor.
///
/// Implementations wrap the host's motion API. The monitor moves the source
/// onto its worker thread, so it must be `Send`.
pub trait MotionSource: Send {
    /// Whether the device can deliver motion samples at all.
    fn is_available(&self) -> bool;

    /// Requests a delivery interval. Sources may treat this as a hint.
    fn set_update_interval(&mut self, interval: Duration);

    /// Waits for the next delivery.
    ///
    /// Returns `None` once the source has stopped for good. Implementations
    /// should return [`MotionUpdate::Missing`] rather than block much longer
    /// than the update interval, so the worker can notice stop requests.
    fn next_update(&mut self) -> Option<MotionUpdate>;
}

/// A motion source fed by the host through a channel.
///
/// The host's sensor callback forwards each reading into the paired
/// [`Sender`]; dropping every sender ends the stream.
///
/// # Example
///
/// ```
/// use classroom_knock::{ChannelSource, MotionSource, MotionUpdate};
/// use classroom_types::{MotionSample, Timestamp};
///
/// let (mut source, tx) = ChannelSource::new(true);
/// let sample = MotionSample::new(Timestamp::zero(), [0.0, 0.0, 0.1]);
/// tx.send(MotionUpdate::Sample(sample)).unwrap();
/// drop(tx);
///
/// assert_eq!(source.next_update(), Some(MotionUpdate::Sample(sample)));
/// assert_eq!(source.next_update(), None);
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    available: bool,
    interval: Duration,
    rx: Receiver<MotionUpdate>,
}

impl ChannelSource {
    /// Polling waits this many update intervals before reporting a gap.
    const GAP_FACTOR: u32 = 50;

    /// Creates a source and the sender the host feeds it through.
    ///
    /// `available` is the host's motion capability flag.
    #[must_use]
    pub fn new(available: bool) -> (Self, Sender<MotionUpdate>) {
        let (tx, rx) = mpsc::channel();
        let source = Self {
            available,
            interval: INTERVAL_1KHZ,
            rx,
        };
        (source, tx)
    }

    /// The interval most recently requested.
    #[must_use]
    pub const fn update_interval(&self) -> Duration {
        self.interval
    }

    /// How long to wait before reporting a gap. Saturates for huge intervals.
    fn gap_timeout(&self) -> Duration {
        self.interval.saturating_mul(Self::GAP_FACTOR)
    }
}

impl MotionSource for ChannelSource {
    fn is_available(&self) -> bool {
        self.available
    }

    fn set_update_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn next_update(&mut self) -> Option<MotionUpdate> {
        match self.rx.recv_timeout(self.gap_timeout()) {
            Ok(update) => Some(update),
            Err(RecvTimeoutError::Timeout) => Some(MotionUpdate::Missing),
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
