//! Per-sample knock detection.

use classroom_types::{MotionSample, SampleError};
use tracing::trace;

use crate::params::DetectionPolicy;

/// Signal that a knock occurred. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImpactEvent;

/// Stateful threshold filter over motion samples.
///
/// The only state is the magnitude of the previous valid sample, starting
/// at zero; it is updated on every valid sample whatever the policy.
/// Samples with non-finite components are skipped and leave the state
/// untouched.
///
/// # Example
///
/// ```
/// use classroom_knock::{DetectionPolicy, ImpactDetector};
/// use classroom_types::{MotionSample, Timestamp};
///
/// let mut detector = ImpactDetector::new(DetectionPolicy::jerk());
/// let hits: Vec<_> = [0.2, 0.9, 0.2]
///     .into_iter()
///     .map(|m| detector.process(&MotionSample::new(Timestamp::zero(), [m, 0.0, 0.0])))
///     .collect();
///
/// assert!(hits[0].is_none() && hits[1].is_none() && hits[2].is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ImpactDetector {
    policy: DetectionPolicy,
    last_magnitude: f64,
}

impl ImpactDetector {
    /// Creates a detector with the given policy.
    #[must_use]
    pub const fn new(policy: DetectionPolicy) -> Self {
        Self {
            policy,
            last_magnitude: 0.0,
        }
    }

    /// The detector's policy.
    #[must_use]
    pub const fn policy(&self) -> DetectionPolicy {
        self.policy
    }

    /// Magnitude of the last valid sample processed (0 before any).
    #[must_use]
    pub const fn last_magnitude(&self) -> f64 {
        self.last_magnitude
    }

    /// Clears the remembered magnitude.
    pub fn reset(&mut self) {
        self.last_magnitude = 0.0;
    }

    /// Processes one sample, returning an event if it is a knock.
    ///
    /// Malformed samples are logged and yield `None`; use
    /// [`try_process`](Self::try_process) to tell them apart.
    pub fn process(&mut self, sample: &MotionSample) -> Option<ImpactEvent> {
        self.try_process(sample).unwrap_or_else(|err| {
            trace!(error = %err, "skipping malformed motion sample");
            None
        })
    }

    /// Processes one sample, reporting malformed input.
    ///
    /// # Errors
    ///
    /// Returns the [`SampleError`] of a sample with non-finite components;
    /// the detector state is left untouched.
    pub fn try_process(
        &mut self,
        sample: &MotionSample,
    ) -> Result<Option<ImpactEvent>, SampleError> {
        sample.validate()?;

        let magnitude = sample.magnitude();
        let jerk = magnitude - self.last_magnitude;
        self.last_magnitude = magnitude;

        let hit = match self.policy {
            DetectionPolicy::Magnitude { threshold } => magnitude > threshold,
            DetectionPolicy::Jerk { threshold } => jerk < threshold,
        };
        Ok(hit.then_some(ImpactEvent))
    }
}

impl Default for ImpactDetector {
    fn default() -> Self {
        Self::new(DetectionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use classroom_types::Timestamp;

    fn along_x(magnitude: f64) -> MotionSample {
        MotionSample::new(Timestamp::zero(), [magnitude, 0.0, 0.0])
    }

    fn count(detector: &mut ImpactDetector, magnitudes: &[f64]) -> Vec<usize> {
        magnitudes
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| detector.process(&along_x(m)).map(|_| i))
            .collect()
    }

    #[test]
    fn magnitude_zero_stream_is_silent() {
        let mut detector = ImpactDetector::new(DetectionPolicy::magnitude());
        assert!(count(&mut detector, &[0.0; 500]).is_empty());
    }

    #[test]
    fn magnitude_threshold_is_strict() {
        let mut detector = ImpactDetector::new(DetectionPolicy::magnitude());
        assert_eq!(count(&mut detector, &[0.71]), vec![0]);

        let mut detector = ImpactDetector::new(DetectionPolicy::magnitude());
        assert!(count(&mut detector, &[0.7]).is_empty());
    }

    #[test]
    fn magnitude_uses_euclidean_norm() {
        let mut detector = ImpactDetector::new(DetectionPolicy::magnitude());
        // Each component below threshold, norm above it.
        let sample = MotionSample::new(Timestamp::zero(), [0.5, 0.5, 0.0]);
        assert!(detector.process(&sample).is_some());
    }

    #[test]
    fn jerk_fires_on_sharp_drop() {
        let mut detector = ImpactDetector::new(DetectionPolicy::jerk());
        assert_eq!(count(&mut detector, &[0.2, 0.9, 0.2]), vec![2]);
    }

    #[test]
    fn jerk_ignores_small_drop() {
        let mut detector = ImpactDetector::new(DetectionPolicy::jerk());
        assert!(count(&mut detector, &[0.2, 0.6, 0.2]).is_empty());
    }

    #[test]
    fn jerk_equal_magnitudes_are_silent() {
        let mut detector = ImpactDetector::new(DetectionPolicy::jerk());
        let a = MotionSample::new(Timestamp::zero(), [0.0, 0.8, 0.0]);
        let b = MotionSample::new(Timestamp::from_nanos(1_000_000), [0.8, 0.0, 0.0]);
        detector.process(&a);
        assert!(detector.process(&b).is_none());
    }

    #[test]
    fn jerk_ignores_sustained_shaking() {
        let mut detector = ImpactDetector::new(DetectionPolicy::jerk());
        assert!(count(&mut detector, &[1.5; 100]).is_empty());

        let mut magnitude = ImpactDetector::new(DetectionPolicy::magnitude());
        assert_eq!(count(&mut magnitude, &[1.5; 100]).len(), 100);
    }

    #[test]
    fn state_updates_even_without_event() {
        let mut detector = ImpactDetector::new(DetectionPolicy::magnitude());
        detector.process(&along_x(0.3));
        assert_relative_eq!(detector.last_magnitude(), 0.3);
        detector.reset();
        assert_relative_eq!(detector.last_magnitude(), 0.0);
    }

    #[test]
    fn malformed_samples_are_skipped() {
        let mut detector = ImpactDetector::new(DetectionPolicy::jerk());
        detector.process(&along_x(0.9));
        assert!(detector.process(&along_x(f64::NAN)).is_none());
        assert_relative_eq!(detector.last_magnitude(), 0.9);
        // The drop is measured against the last valid sample.
        assert!(detector.process(&along_x(0.2)).is_some());
    }

    #[test]
    fn try_process_reports_malformed_sample() {
        let mut detector = ImpactDetector::new(DetectionPolicy::magnitude());
        let bad = MotionSample::new(Timestamp::zero(), [f64::INFINITY, 0.0, 0.0]);
        assert!(matches!(detector.try_process(&bad), Err(SampleError::InvalidCoordinate(_))));
        assert_relative_eq!(detector.last_magnitude(), 0.0);
        assert_eq!(detector.try_process(&along_x(0.8)), Ok(Some(ImpactEvent)));
        assert_eq!(detector.try_process(&along_x(0.1)), Ok(None));
    }

    #[test]
    fn custom_thresholds() {
        let mut detector = ImpactDetector::new(DetectionPolicy::Magnitude { threshold: 2.0 });
        assert!(count(&mut detector, &[1.9, 2.1]) == vec![1]);

        let mut detector = ImpactDetector::new(DetectionPolicy::Jerk { threshold: -0.1 });
        assert_eq!(count(&mut detector, &[0.5, 0.35]), vec![1]);
    }
}
