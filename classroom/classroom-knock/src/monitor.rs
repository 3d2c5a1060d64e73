//! Knock detection on a dedicated worker thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, trace, warn};

use crate::bus::ImpactBus;
use crate::detector::{ImpactDetector, ImpactEvent};
use crate::error::{KnockError, Result};
use crate::params::KnockParams;
use crate::source::{MotionSource, MotionUpdate};

const WORKER_NAME: &str = "knock-detector";

/// Counters reported when a worker stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnockStats {
    /// Valid samples run through the detector.
    pub processed: u64,
    /// Samples dropped for non-finite components.
    pub skipped: u64,
    /// Deliveries without a sample.
    pub gaps: u64,
    /// Knocks detected and published.
    pub impacts: u64,
}

/// Result of [`KnockMonitor::start`].
#[derive(Debug)]
pub enum StartOutcome {
    /// Detection is running.
    Running(KnockHandle),
    /// The device has no motion sensor; nothing was started.
    SensorUnavailable,
}

impl StartOutcome {
    /// Whether detection started.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// The running handle, if detection started.
    #[must_use]
    pub fn into_handle(self) -> Option<KnockHandle> {
        match self {
            Self::Running(handle) => Some(handle),
            Self::SensorUnavailable => None,
        }
    }
}

/// Starts knock detection and publishes knocks on an [`ImpactBus`].
///
/// Each [`KnockMonitor::start`] consumes a motion source and spawns one
/// worker thread that owns a fresh [`ImpactDetector`]; nothing else touches
/// the detector. Starting the same source twice is impossible because the
/// source moves into the worker.
///
/// # Example
///
/// ```
/// use classroom_knock::{ChannelSource, ImpactBus, KnockMonitor, KnockParams, MotionUpdate};
/// use classroom_types::{MotionSample, Timestamp};
///
/// let bus = ImpactBus::new();
/// let knocks = bus.subscribe();
/// let monitor = KnockMonitor::new(KnockParams::default(), bus).unwrap();
///
/// let (source, tx) = ChannelSource::new(true);
/// let handle = monitor.start(source).unwrap().into_handle().unwrap();
///
/// tx.send(MotionUpdate::Sample(MotionSample::new(Timestamp::zero(), [0.0, 0.9, 0.0]))).unwrap();
/// drop(tx);
///
/// let stats = handle.join().unwrap();
/// assert_eq!(stats.impacts, 1);
/// assert_eq!(knocks.try_iter().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct KnockMonitor {
    params: KnockParams,
    bus: ImpactBus,
}

impl KnockMonitor {
    /// Creates a monitor publishing on `bus`.
    ///
    /// # Errors
    ///
    /// Returns [`KnockError::InvalidConfig`] if `params` fail validation.
    pub fn new(params: KnockParams, bus: ImpactBus) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, bus })
    }

    /// The monitor's parameters.
    #[must_use]
    pub const fn params(&self) -> &KnockParams {
        &self.params
    }

    /// The bus knocks are published on.
    #[must_use]
    pub const fn bus(&self) -> &ImpactBus {
        &self.bus
    }

    /// Starts detection on `source`.
    ///
    /// Returns [`StartOutcome::SensorUnavailable`] without spawning anything
    /// when the source reports no motion capability.
    ///
    /// # Errors
    ///
    /// Returns [`KnockError::Spawn`] if the worker thread cannot be created.
    pub fn start<S>(&self, mut source: S) -> Result<StartOutcome>
    where
        S: MotionSource + 'static,
    {
        if !source.is_available() {
            warn!("device motion unavailable; knock detection not started");
            return Ok(StartOutcome::SensorUnavailable);
        }

        source.set_update_interval(self.params.sample_interval);

        let stop = Arc::new(AtomicBool::new(false));
        let worker = Worker {
            detector: ImpactDetector::new(self.params.policy),
            bus: self.bus.clone(),
            stop: Arc::clone(&stop),
            stats: KnockStats::default(),
        };

        let join = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || worker.run(source))?;

        info!(
            policy = self.params.policy.name(),
            threshold = self.params.policy.threshold(),
            interval_us = u64::try_from(self.params.sample_interval.as_micros()).unwrap_or(u64::MAX),
            "knock detection started"
        );

        Ok(StartOutcome::Running(KnockHandle {
            stop,
            worker: Some(join),
        }))
    }
}

/// Handle to a running knock worker.
///
/// Dropping the handle asks the worker to stop without waiting for it.
#[derive(Debug)]
pub struct KnockHandle {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<KnockStats>>,
}

impl KnockHandle {
    /// Whether the worker has exited (its source ended or it was stopped).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops the worker and waits for it.
    ///
    /// Samples already delivered to the source may or may not be processed.
    ///
    /// # Errors
    ///
    /// Returns [`KnockError::WorkerPanicked`] if the worker panicked.
    pub fn stop(self) -> Result<KnockStats> {
        self.stop.store(true, Ordering::Release);
        self.join()
    }

    /// Waits for the worker to finish on its own, which happens when the
    /// source ends.
    ///
    /// # Errors
    ///
    /// Returns [`KnockError::WorkerPanicked`] if the worker panicked.
    pub fn join(mut self) -> Result<KnockStats> {
        let stats = match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| KnockError::WorkerPanicked)?,
            None => KnockStats::default(),
        };
        info!(
            processed = stats.processed,
            skipped = stats.skipped,
            gaps = stats.gaps,
            impacts = stats.impacts,
            "knock detection stopped"
        );
        Ok(stats)
    }
}

impl Drop for KnockHandle {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop.store(true, Ordering::Release);
        }
    }
}

struct Worker {
    detector: ImpactDetector,
    bus: ImpactBus,
    stop: Arc<AtomicBool>,
    stats: KnockStats,
}

impl Worker {
    fn run(mut self, mut source: impl MotionSource) -> KnockStats {
        while !self.stop.load(Ordering::Acquire) {
            match source.next_update() {
                None => break,
                Some(MotionUpdate::Missing) => self.stats.gaps += 1,
                Some(MotionUpdate::Sample(sample)) => match self.detector.try_process(&sample) {
                    Ok(event) => {
                        self.stats.processed += 1;
                        if let Some(event) = event {
                            self.publish(event, sample.magnitude());
                        }
                    }
                    Err(err) => {
                        trace!(error = %err, "skipping malformed motion sample");
                        self.stats.skipped += 1;
                    }
                },
            }
        }
        self.stats
    }

    fn publish(&mut self, event: ImpactEvent, magnitude: f64) {
        self.stats.impacts += 1;
        let delivered = self.bus.publish(event);
        debug!(
            magnitude,
            count = self.stats.impacts,
            subscribers = delivered,
            "knock detected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DetectionPolicy;
    use crate::source::ChannelSource;
    use classroom_types::{MotionSample, Timestamp};
    use std::time::Duration;

    fn sample(magnitude: f64) -> MotionUpdate {
        MotionUpdate::Sample(MotionSample::new(Timestamp::zero(), [0.0, magnitude, 0.0]))
    }

    #[test]
    fn invalid_params_rejected_up_front() {
        let params = KnockParams::default().with_sample_interval(Duration::ZERO);
        let monitor = KnockMonitor::new(params, ImpactBus::new());
        assert!(matches!(monitor, Err(KnockError::InvalidConfig(_))));

        let params = KnockParams::default().with_sample_interval(Duration::from_secs(u64::MAX / 10));
        let monitor = KnockMonitor::new(params, ImpactBus::new());
        assert!(matches!(monitor, Err(KnockError::InvalidConfig(_))));
    }

    #[test]
    fn unavailable_sensor_starts_nothing() {
        let monitor = KnockMonitor::new(KnockParams::default(), ImpactBus::new());
        let monitor = monitor.unwrap_or_else(|e| panic!("{e}"));
        let (source, _tx) = ChannelSource::new(false);
        let outcome = monitor.start(source).unwrap_or_else(|e| panic!("{e}"));
        assert!(!outcome.is_running());
        assert!(outcome.into_handle().is_none());
    }

    #[test]
    fn worker_counts_and_publishes() {
        let bus = ImpactBus::new();
        let rx = bus.subscribe();
        let monitor = KnockMonitor::new(KnockParams::jerk(), bus).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(monitor.params().policy, DetectionPolicy::jerk());

        let (source, tx) = ChannelSource::new(true);
        let handle = monitor
            .start(source)
            .ok()
            .and_then(StartOutcome::into_handle)
            .unwrap_or_else(|| panic!("worker did not start"));

        let updates = [
            sample(0.2),
            sample(0.9),
            MotionUpdate::Missing,
            sample(f64::NAN),
            sample(0.2),
        ];
        for update in updates {
            assert!(tx.send(update).is_ok());
        }
        drop(tx);

        let stats = handle.join().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(stats.processed, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.impacts, 1);
        assert!(stats.gaps >= 1);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn stop_ends_worker_with_live_sender() {
        let monitor =
            KnockMonitor::new(KnockParams::default(), ImpactBus::new()).unwrap_or_else(|e| panic!("{e}"));
        let (source, tx) = ChannelSource::new(true);
        let handle = monitor
            .start(source)
            .ok()
            .and_then(StartOutcome::into_handle)
            .unwrap_or_else(|| panic!("worker did not start"));

        assert!(tx.send(sample(0.1)).is_ok());
        let stats = handle.stop();
        assert!(stats.is_ok());
        // The host may keep feeding; nobody is listening any more.
        drop(tx);
    }
}
