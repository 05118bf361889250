//! Configuration for the virtual manifold and the configuration sampler.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GraspError, Result};
use crate::limits::JOINT0_CEILING;
use crate::range::ReferenceRange;

/// Calibration of the virtual hand manifold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManifoldConfig {
    /// Weight of positional residuals relative to angular residuals.
    pub alpha: f64,
    /// Range of the finger distance, mapped onto joint 0.
    pub finger_range: ReferenceRange,
    /// Range of the palm distance, mapped onto joint 1.
    pub palm_range: ReferenceRange,
    /// Upper bound forced onto joint 0.
    pub joint0_ceiling: f64,
}

impl Default for ManifoldConfig {
    fn default() -> Self {
        Self::robotiq()
    }
}

impl ManifoldConfig {
    /// Calibration for the Robotiq-S hand.
    #[must_use]
    pub const fn robotiq() -> Self {
        Self {
            alpha: 10.0,
            finger_range: ReferenceRange::FINGER_SPAN,
            palm_range: ReferenceRange::PALM_REACH,
            joint0_ceiling: JOINT0_CEILING,
        }
    }

    /// Set the positional residual weight.
    #[must_use]
    pub const fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the finger distance range.
    #[must_use]
    pub const fn finger_range(mut self, range: ReferenceRange) -> Self {
        self.finger_range = range;
        self
    }

    /// Set the palm distance range.
    #[must_use]
    pub const fn palm_range(mut self, range: ReferenceRange) -> Self {
        self.palm_range = range;
        self
    }

    /// Set the joint 0 ceiling.
    #[must_use]
    pub const fn joint0_ceiling(mut self, ceiling: f64) -> Self {
        self.joint0_ceiling = ceiling;
        self
    }

    /// Both reference ranges, indexed by joint.
    #[must_use]
    pub const fn ranges(&self) -> [ReferenceRange; 2] {
        [self.finger_range, self.palm_range]
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`] for a negative or non-finite
    /// weight, a degenerate range, or a non-finite ceiling.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(GraspError::invalid_config(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        self.finger_range.validate()?;
        self.palm_range.validate()?;
        if !self.joint0_ceiling.is_finite() {
            return Err(GraspError::invalid_config(format!(
                "joint 0 ceiling must be finite, got {}",
                self.joint0_ceiling
            )));
        }
        Ok(())
    }
}

/// Settings for rejection sampling of hand configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplerConfig {
    /// Give up after this many rejected samples (None retries forever).
    pub max_attempts: Option<usize>,
}

impl SamplerConfig {
    /// Retry until a collision-free sample is found.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Give up after `attempts` samples.
    #[must_use]
    pub const fn bounded(attempts: usize) -> Self {
        Self {
            max_attempts: Some(attempts),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`] for a zero attempt cap.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == Some(0) {
            return Err(GraspError::invalid_config(
                "max_attempts must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robotiq_defaults() {
        let config = ManifoldConfig::default();
        assert_eq!(config.alpha, 10.0);
        assert_eq!(config.finger_range, ReferenceRange::new(0.026, 0.122));
        assert_eq!(config.palm_range, ReferenceRange::new(0.0, 0.165));
        assert_eq!(config.joint0_ceiling, 0.931_247_47);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder() {
        let config = ManifoldConfig::robotiq()
            .alpha(2.0)
            .palm_range(ReferenceRange::new(0.01, 0.2))
            .joint0_ceiling(1.0);
        assert_eq!(config.alpha, 2.0);
        assert_eq!(config.ranges()[1], ReferenceRange::new(0.01, 0.2));
        assert_eq!(config.joint0_ceiling, 1.0);
    }

    #[test]
    fn invalid_configs() {
        assert!(ManifoldConfig::robotiq().alpha(-1.0).validate().is_err());
        assert!(
            ManifoldConfig::robotiq()
                .finger_range(ReferenceRange::new(0.2, 0.1))
                .validate()
                .is_err()
        );
        assert!(
            ManifoldConfig::robotiq()
                .joint0_ceiling(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn sampler_config() {
        assert_eq!(SamplerConfig::default(), SamplerConfig::unbounded());
        assert!(SamplerConfig::bounded(10).validate().is_ok());
        assert!(SamplerConfig::bounded(0).validate().is_err());
    }
}
