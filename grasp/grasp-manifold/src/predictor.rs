//! Configuration prediction from grasp descriptors.
//!
//! A coarse stand-in for a learned reachability manifold: each descriptor
//! distance is compared against a calibrated [`ReferenceRange`] and linearly
//! mapped onto one actuated joint, clamping to the joint limits outside the
//! range. The residual score measures how far the descriptor sits from what
//! the hand can reach:
//!
//! ```text
//! score = alpha * (r_finger + r_palm) + finger_angle + palm_angle
//! ```
//!
//! where `r_*` is the distance of each descriptor distance outside its range.
//!
//! # Joint mapping
//!
//! | Value      | Joint 0 (finger span)            | Joint 1 (palm reach)             |
//! |------------|----------------------------------|----------------------------------|
//! | below `lo` | `lower0`                         | `lower1`                         |
//! | in range   | `lower0 + (hi0 - d0) * res0`     | `lower1 + (lo1 + d1) * res1`     |
//! | above `hi` | `upper0`                         | `upper1`                         |
//!
//! with `res_i = (upper_i - lower_i) / (hi_i - lo_i)`. Joint 0 closes as the
//! fingers spread; joint 1 offsets from `lo1` rather than subtracting it. The
//! two in-range formulas are kept exactly as calibrated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ManifoldConfig;
use crate::encoder::GraspDescriptor;
use crate::error::{GraspError, Result};
use crate::limits::{HandJointLimits, JOINT_COUNT};
use crate::observer::{JointEvent, PredictionObserver, TracingObserver};
use crate::range::{RangePosition, ReferenceRange};

/// Predicted hand configuration and its residual score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictionResult {
    /// Residual score; lower is a better fit.
    pub score: f64,
    /// Predicted value of each actuated joint.
    pub joints: [f64; JOINT_COUNT],
}

/// Maps grasp descriptors to hand configurations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfigurationPredictor {
    config: ManifoldConfig,
}

impl ConfigurationPredictor {
    /// Create a predictor with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: ManifoldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Predictor calibrated for the Robotiq-S hand.
    #[must_use]
    pub const fn robotiq() -> Self {
        Self {
            config: ManifoldConfig::robotiq(),
        }
    }

    /// The calibration in use.
    #[must_use]
    pub const fn config(&self) -> &ManifoldConfig {
        &self.config
    }

    /// Positional residual of each descriptor distance.
    #[must_use]
    pub fn residuals(&self, q: &GraspDescriptor) -> [f64; JOINT_COUNT] {
        let [d0, d1] = q.distances();
        [
            self.config.finger_range.distance_outside(d0),
            self.config.palm_range.distance_outside(d1),
        ]
    }

    /// Residual score of a descriptor.
    ///
    /// # Example
    ///
    /// ```
    /// use grasp_manifold::{ConfigurationPredictor, GraspDescriptor};
    ///
    /// let predictor = ConfigurationPredictor::robotiq();
    /// // Both distances in range: only the angles count.
    /// let q = GraspDescriptor::new(0.05, 0.05, 0.1, 0.2);
    /// assert!((predictor.score(&q) - 0.3).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn score(&self, q: &GraspDescriptor) -> f64 {
        let [r0, r1] = self.residuals(q);
        (r0 + r1) * self.config.alpha + (q.finger_angle + q.palm_angle)
    }

    /// Predict a configuration, reporting decisions through `tracing`.
    ///
    /// # Errors
    ///
    /// See [`predict_with`](Self::predict_with).
    pub fn predict(&self, q: &GraspDescriptor, limits: &HandJointLimits) -> Result<PredictionResult> {
        self.predict_with(q, limits, &mut TracingObserver)
    }

    /// Predict a configuration, reporting decisions to `observer`.
    ///
    /// Joint 0's upper limit is replaced by the configured ceiling before
    /// mapping.
    ///
    /// # Errors
    ///
    /// - [`GraspError::NonFinite`] if a descriptor component is `NaN` or infinite.
    /// - [`GraspError::InvalidConfig`] if the effective limits are non-finite,
    ///   span a non-finite range, or are inverted. This includes a supplied
    ///   joint 0 lower limit above the ceiling, since the ceiling replaces the
    ///   upper limit before the check.
    /// - [`GraspError::LogicError`] if a joint falls through every branch.
    pub fn predict_with<O: PredictionObserver + ?Sized>(
        &self,
        q: &GraspDescriptor,
        limits: &HandJointLimits,
        observer: &mut O,
    ) -> Result<PredictionResult> {
        q.validate()?;
        let limits = limits.with_ceiling(self.config.joint0_ceiling);
        limits.validate()?;

        observer.descriptor(q);

        let [d0, d1] = q.distances();
        let [r0, r1] = self.residuals(q);
        let ranges = self.config.ranges();

        let (joint0, position0) = map_joint(0, d0, r0, &ranges[0], &limits, |lower, res| {
            lower + (ranges[0].hi - d0) * res
        })?;
        observer.joint(&JointEvent {
            joint: 0,
            value: d0,
            position: position0,
            residual: r0,
            predicted: joint0,
        });

        let (joint1, position1) = map_joint(1, d1, r1, &ranges[1], &limits, |lower, res| {
            lower + (ranges[1].lo + d1) * res
        })?;
        observer.joint(&JointEvent {
            joint: 1,
            value: d1,
            position: position1,
            residual: r1,
            predicted: joint1,
        });

        let score = self.score(q);
        observer.score(score);

        Ok(PredictionResult {
            score,
            joints: [joint0, joint1],
        })
    }
}

/// Choose a joint value from the residual branch split.
///
/// `in_range` receives the joint's lower limit and its limits-per-unit-range
/// resolution.
fn map_joint(
    joint: usize,
    d: f64,
    residual: f64,
    range: &ReferenceRange,
    limits: &HandJointLimits,
    in_range: impl FnOnce(f64, f64) -> f64,
) -> Result<(f64, RangePosition)> {
    let lower = limits.lower[joint];
    let upper = limits.upper[joint];
    let res = limits.range(joint) / range.width();

    if residual == 0.0 {
        Ok((in_range(lower, res), RangePosition::Inside))
    } else if residual > 0.0 && d < range.lo {
        Ok((lower, RangePosition::Below))
    } else if residual > 0.0 && d > range.hi {
        Ok((upper, RangePosition::Above))
    } else {
        Err(GraspError::LogicError { joint, value: d })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::JOINT0_CEILING;
    use crate::observer::RecordingObserver;
    use approx::assert_relative_eq;

    fn limits() -> HandJointLimits {
        HandJointLimits::new([0.0, 0.0], [1.5, 1.2])
    }

    #[test]
    fn in_range_score_is_angle_sum() {
        let p = ConfigurationPredictor::robotiq();
        let q = GraspDescriptor::new(0.05, 0.1, 0.3, 0.4);
        let result = p.predict(&q, &limits()).unwrap();
        assert_eq!(p.residuals(&q), [0.0, 0.0]);
        assert_relative_eq!(result.score, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn below_range_clamps_to_lower() {
        let p = ConfigurationPredictor::robotiq();
        let q = GraspDescriptor::new(0.01, 0.05, 0.0, 0.0);
        let result = p.predict(&q, &HandJointLimits::new([0.1, 0.0], [1.5, 1.2])).unwrap();
        assert_eq!(result.joints[0], 0.1);
        assert_relative_eq!(p.residuals(&q)[0], 0.016, epsilon = 1e-12);
        assert_relative_eq!(result.score, 0.16, epsilon = 1e-12);
    }

    #[test]
    fn above_range_clamps_to_ceiling() {
        let p = ConfigurationPredictor::robotiq();
        let q = GraspDescriptor::new(0.2, 0.05, 0.0, 0.0);
        for upper0 in [0.1, 0.93, 3.0] {
            let result = p
                .predict(&q, &HandJointLimits::new([0.0, 0.0], [upper0, 1.2]))
                .unwrap();
            assert_eq!(result.joints[0], JOINT0_CEILING);
        }
    }

    #[test]
    fn joint0_descends_across_range() {
        let p = ConfigurationPredictor::robotiq();
        let at_lo = p
            .predict(&GraspDescriptor::new(0.026, 0.05, 0.0, 0.0), &limits())
            .unwrap();
        let at_hi = p
            .predict(&GraspDescriptor::new(0.122, 0.05, 0.0, 0.0), &limits())
            .unwrap();
        assert_relative_eq!(at_lo.joints[0], JOINT0_CEILING, epsilon = 1e-12);
        assert_relative_eq!(at_hi.joints[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn joint1_ascends_from_lower() {
        let p = ConfigurationPredictor::robotiq();
        let lim = HandJointLimits::new([0.0, 0.2], [1.5, 1.2]);
        let near = p
            .predict(&GraspDescriptor::new(0.05, 0.0, 0.0, 0.0), &lim)
            .unwrap();
        let far = p
            .predict(&GraspDescriptor::new(0.05, 0.165, 0.0, 0.0), &lim)
            .unwrap();
        assert_relative_eq!(near.joints[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(far.joints[1], 1.2, epsilon = 1e-12);
    }

    #[test]
    fn joint1_offsets_by_range_lo() {
        let config = ManifoldConfig::robotiq().palm_range(ReferenceRange::new(0.1, 0.2));
        let p = ConfigurationPredictor::new(config).unwrap();
        let lim = HandJointLimits::new([0.0, 0.0], [1.0, 1.0]);
        let result = p
            .predict(&GraspDescriptor::new(0.05, 0.15, 0.0, 0.0), &lim)
            .unwrap();
        // (lo + d) * res = (0.1 + 0.15) * 10
        assert_relative_eq!(result.joints[1], 2.5, epsilon = 1e-9);
    }

    #[test]
    fn palm_above_range_clamps_to_upper() {
        let p = ConfigurationPredictor::robotiq();
        let q = GraspDescriptor::new(0.05, 0.3, 0.0, 0.0);
        let result = p.predict(&q, &limits()).unwrap();
        assert_eq!(result.joints[1], 1.2);
        assert_relative_eq!(result.score, 1.35, epsilon = 1e-12);
    }

    #[test]
    fn nan_descriptor_is_invalid_input() {
        let p = ConfigurationPredictor::robotiq();
        let err = p
            .predict(&GraspDescriptor::new(f64::NAN, 0.05, 0.0, 0.0), &limits())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn nan_falls_through_branch_split() {
        let r = ReferenceRange::FINGER_SPAN;
        let err = map_joint(0, f64::NAN, f64::NAN, &r, &limits(), |l, _| l).unwrap_err();
        assert!(err.is_logic_error());
    }

    #[test]
    fn observer_sees_each_joint() {
        let p = ConfigurationPredictor::robotiq();
        let mut recorder = RecordingObserver::new();
        let q = GraspDescriptor::new(0.01, 0.3, 0.0, 0.0);
        let result = p.predict_with(&q, &limits(), &mut recorder).unwrap();

        assert_eq!(recorder.descriptors, vec![q]);
        assert_eq!(recorder.joints.len(), 2);
        assert_eq!(recorder.joints[0].position, RangePosition::Below);
        assert_eq!(recorder.joints[1].position, RangePosition::Above);
        assert_eq!(recorder.joints[1].predicted, result.joints[1]);
        assert_eq!(recorder.scores, vec![result.score]);
    }

    #[test]
    fn inverted_limits_rejected() {
        let p = ConfigurationPredictor::robotiq();
        let err = p
            .predict(
                &GraspDescriptor::new(0.05, 0.05, 0.0, 0.0),
                &HandJointLimits::new([0.0, 1.0], [1.0, 0.5]),
            )
            .unwrap_err();
        assert!(matches!(err, GraspError::InvalidConfig { .. }));
    }

    #[test]
    fn lower0_above_ceiling_rejected() {
        let p = ConfigurationPredictor::robotiq();
        let err = p
            .predict(
                &GraspDescriptor::new(0.05, 0.05, 0.0, 0.0),
                &HandJointLimits::new([1.0, 0.0], [2.0, 1.0]),
            )
            .unwrap_err();
        assert!(format!("{err}").contains("joint 0"));
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(ConfigurationPredictor::new(ManifoldConfig::robotiq().alpha(f64::NAN)).is_err());
    }
}
