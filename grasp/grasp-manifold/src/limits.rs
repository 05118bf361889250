//! Joint limits of the two actuated hand joints.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GraspError, Result};

/// Number of actuated joints.
pub const JOINT_COUNT: usize = 2;

/// Kinematic ceiling on joint 0 of the Robotiq-S hand (radians).
///
/// Replaces whatever upper bound the robot model reports for joint 0.
pub const JOINT0_CEILING: f64 = 0.931_247_47;

/// Position limits for the two actuated joints.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandJointLimits {
    /// Lower bound per joint.
    pub lower: [f64; JOINT_COUNT],
    /// Upper bound per joint.
    pub upper: [f64; JOINT_COUNT],
}

impl HandJointLimits {
    /// Create limits from per-joint lower and upper bounds.
    #[must_use]
    pub const fn new(lower: [f64; JOINT_COUNT], upper: [f64; JOINT_COUNT]) -> Self {
        Self { lower, upper }
    }

    /// Copy of these limits with joint 0's upper bound replaced by `ceiling`.
    ///
    /// The replacement is unconditional: a supplied bound below the ceiling is
    /// raised to it just as one above it is lowered.
    ///
    /// # Example
    ///
    /// ```
    /// use grasp_manifold::{HandJointLimits, JOINT0_CEILING};
    ///
    /// let limits = HandJointLimits::new([0.0, 0.0], [1.2, 1.0]).with_ceiling(JOINT0_CEILING);
    /// assert_eq!(limits.upper, [JOINT0_CEILING, 1.0]);
    /// ```
    #[must_use]
    pub const fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.upper[0] = ceiling;
        self
    }

    /// Range of motion of `joint`.
    pub(crate) fn range(&self, joint: usize) -> f64 {
        self.upper[joint] - self.lower[joint]
    }

    /// Check whether a configuration lies within the limits.
    #[must_use]
    pub fn contains(&self, config: &[f64; JOINT_COUNT]) -> bool {
        config
            .iter()
            .enumerate()
            .all(|(i, q)| *q >= self.lower[i] && *q <= self.upper[i])
    }

    /// Check that bounds and the span between them are finite, and that the
    /// bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`] naming the offending joint.
    pub fn validate(&self) -> Result<()> {
        for i in 0..JOINT_COUNT {
            let (lo, hi) = (self.lower[i], self.upper[i]);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(GraspError::invalid_config(format!(
                    "joint {i} limits [{lo}, {hi}] must be finite"
                )));
            }
            if lo > hi {
                return Err(GraspError::invalid_config(format!(
                    "joint {i} lower limit {lo} exceeds upper limit {hi}"
                )));
            }
            if !(hi - lo).is_finite() {
                return Err(GraspError::invalid_config(format!(
                    "joint {i} range [{lo}, {hi}] overflows"
                )));
            }
        }
        Ok(())
    }
}
