//! Parameters for knock detection.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KnockError, Result};

/// Magnitude above which a single sample counts as a knock.
pub const DEFAULT_MAGNITUDE_THRESHOLD: f64 = 0.7;

/// Drop in magnitude between consecutive samples below which a knock is
/// reported. Negative: a knock is a sudden stop.
pub const DEFAULT_JERK_THRESHOLD: f64 = -0.5;

/// 1 kHz sampling.
pub const INTERVAL_1KHZ: Duration = Duration::from_millis(1);

/// 100 Hz sampling.
pub const INTERVAL_100HZ: Duration = Duration::from_millis(10);

/// Longest accepted sample interval. Motion sensors deliver far faster;
/// anything slower cannot catch a knock.
pub const MAX_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// How a sample stream is turned into knocks.
///
/// The two policies are alternatives, not stages: pick one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// Knock when `|acceleration| > threshold`.
    Magnitude {
        /// Strict lower bound on the magnitude.
        threshold: f64,
    },

    /// Knock when `|acceleration| - previous |acceleration| < threshold`.
    ///
    /// Keys off the rate of change, so sustained shaking at a high level
    /// does not trigger.
    Jerk {
        /// Strict upper bound on the magnitude change (negative).
        threshold: f64,
    },
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        Self::magnitude()
    }
}

impl DetectionPolicy {
    /// Magnitude policy with the default threshold.
    #[must_use]
    pub const fn magnitude() -> Self {
        Self::Magnitude {
            threshold: DEFAULT_MAGNITUDE_THRESHOLD,
        }
    }

    /// Jerk policy with the default threshold.
    #[must_use]
    pub const fn jerk() -> Self {
        Self::Jerk {
            threshold: DEFAULT_JERK_THRESHOLD,
        }
    }

    /// The policy's threshold.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Magnitude { threshold } | Self::Jerk { threshold } => threshold,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Magnitude { .. } => "magnitude",
            Self::Jerk { .. } => "jerk",
        }
    }

    /// Checks the threshold is usable for this policy.
    ///
    /// # Errors
    ///
    /// Returns [`KnockError::InvalidConfig`] for non-finite thresholds, a
    /// negative magnitude threshold, or a non-negative jerk threshold.
    pub fn validate(self) -> Result<()> {
        let threshold = self.threshold();
        if !threshold.is_finite() {
            return Err(KnockError::invalid_config(format!(
                "{} threshold {threshold} is not finite",
                self.name()
            )));
        }
        match self {
            Self::Magnitude { .. } if threshold < 0.0 => Err(KnockError::invalid_config(
                format!("magnitude threshold {threshold} is negative"),
            )),
            Self::Jerk { .. } if threshold >= 0.0 => Err(KnockError::invalid_config(format!(
                "jerk threshold {threshold} must be negative"
            ))),
            _ => Ok(()),
        }
    }
}

/// Parameters for a knock monitor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnockParams {
    /// Detection policy and threshold. Default: magnitude, 0.7
    pub policy: DetectionPolicy,

    /// Requested interval between motion samples. Default: 1 ms
    pub sample_interval: Duration,
}

impl Default for KnockParams {
    fn default() -> Self {
        Self {
            policy: DetectionPolicy::default(),
            sample_interval: INTERVAL_1KHZ,
        }
    }
}

impl KnockParams {
    /// Magnitude policy sampled at 1 kHz.
    #[must_use]
    pub fn magnitude() -> Self {
        Self::default()
    }

    /// Jerk policy sampled at 100 Hz.
    #[must_use]
    pub fn jerk() -> Self {
        Self {
            policy: DetectionPolicy::jerk(),
            sample_interval: INTERVAL_100HZ,
        }
    }

    /// Set the detection policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: DetectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the sample interval.
    #[must_use]
    pub const fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`KnockError::InvalidConfig`] for a zero sample interval, one
    /// longer than [`MAX_SAMPLE_INTERVAL`], or an unusable policy threshold.
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval.is_zero() {
            return Err(KnockError::invalid_config("sample interval must be positive"));
        }
        if self.sample_interval > MAX_SAMPLE_INTERVAL {
            return Err(KnockError::invalid_config(format!(
                "sample interval {:?} exceeds {MAX_SAMPLE_INTERVAL:?}",
                self.sample_interval
            )));
        }
        self.policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let params = KnockParams::default();
        assert_eq!(params.policy, DetectionPolicy::magnitude());
        assert_eq!(params.sample_interval, INTERVAL_1KHZ);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_jerk_params() {
        let params = KnockParams::jerk();
        assert_relative_eq!(params.policy.threshold(), -0.5);
        assert_eq!(params.sample_interval, Duration::from_millis(10));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let params = KnockParams::magnitude()
            .with_policy(DetectionPolicy::Magnitude { threshold: 1.2 })
            .with_sample_interval(INTERVAL_100HZ);
        assert_relative_eq!(params.policy.threshold(), 1.2);
        assert_eq!(params.sample_interval, INTERVAL_100HZ);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let params = KnockParams::default().with_sample_interval(Duration::ZERO);
        assert!(matches!(params.validate(), Err(KnockError::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_interval_rejected() {
        let params = KnockParams::default().with_sample_interval(Duration::from_secs(u64::MAX / 10));
        assert!(matches!(params.validate(), Err(KnockError::InvalidConfig(_))));

        let json = r#"{
            "policy": { "kind": "magnitude", "threshold": 0.7 },
            "sample_interval": { "secs": 1844674407370955161, "nanos": 0 }
        }"#;
        let params: KnockParams = serde_json::from_str(json).unwrap_or_default();
        assert!(params.validate().is_err());

        let edge = KnockParams::default().with_sample_interval(MAX_SAMPLE_INTERVAL);
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_threshold_sign_checked() {
        assert!(DetectionPolicy::Magnitude { threshold: -0.1 }.validate().is_err());
        assert!(DetectionPolicy::Jerk { threshold: 0.5 }.validate().is_err());
        assert!(DetectionPolicy::Jerk { threshold: f64::NAN }.validate().is_err());
        assert!(DetectionPolicy::Magnitude { threshold: 0.0 }.validate().is_ok());
    }

    #[test]
    fn test_params_from_json() {
        let json = r#"{
            "policy": { "kind": "jerk", "threshold": -0.8 },
            "sample_interval": { "secs": 0, "nanos": 10000000 }
        }"#;
        let params: KnockParams = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(params.policy, DetectionPolicy::Jerk { threshold: -0.8 });
        assert_eq!(params.sample_interval, INTERVAL_100HZ);
    }
}
