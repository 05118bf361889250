//! Reference ranges and the distance-outside-interval residual.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GraspError, Result};

/// A closed calibration interval `[lo, hi]`.
///
/// Descriptor distances inside the interval are considered reachable by the
/// hand; the residual grows linearly with the distance outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceRange {
    /// Lower bound.
    pub lo: f64,
    /// Upper bound.
    pub hi: f64,
}

/// Where a value sits relative to a [`ReferenceRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangePosition {
    /// Strictly below `lo`.
    Below,
    /// Inside `[lo, hi]`.
    Inside,
    /// Strictly above `hi`.
    Above,
}

impl std::fmt::Display for RangePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Below => write!(f, "below range"),
            Self::Inside => write!(f, "in range"),
            Self::Above => write!(f, "above range"),
        }
    }
}

impl ReferenceRange {
    /// Finger separation range of the Robotiq-S hand (joint 0).
    pub const FINGER_SPAN: Self = Self::new(0.026, 0.122);

    /// Palm-to-finger distance range of the Robotiq-S hand (joint 1).
    pub const PALM_REACH: Self = Self::new(0.0, 0.165);

    /// Create a range.
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Width of the range.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Check that the range is finite with non-zero width.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`] for non-finite or empty ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.lo.is_finite() || !self.hi.is_finite() {
            return Err(GraspError::invalid_config(format!(
                "reference range [{}, {}] must be finite",
                self.lo, self.hi
            )));
        }
        if self.hi <= self.lo {
            return Err(GraspError::invalid_config(format!(
                "reference range [{}, {}] must have hi > lo",
                self.lo, self.hi
            )));
        }
        Ok(())
    }

    /// Distance from `d` to the interval; zero inside it.
    ///
    /// # Example
    ///
    /// ```
    /// use grasp_manifold::ReferenceRange;
    ///
    /// let r = ReferenceRange::new(1.0, 2.0);
    /// assert_eq!(r.distance_outside(1.5), 0.0);
    /// assert_eq!(r.distance_outside(0.5), 0.5);
    /// assert_eq!(r.distance_outside(3.0), 1.0);
    /// ```
    #[must_use]
    pub fn distance_outside(&self, d: f64) -> f64 {
        if d < self.lo {
            self.lo - d
        } else if d > self.hi {
            d - self.hi
        } else {
            0.0
        }
    }
}
