//! Error types for grasp encoding and configuration prediction.

use thiserror::Error;

/// Result type for grasp manifold operations.
pub type Result<T> = std::result::Result<T, GraspError>;

/// Errors that can occur when encoding grasps or predicting hand configurations.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GraspError {
    /// A grasp must consist of exactly three contacts.
    #[error("invalid input: expected {expected} contacts, got {actual}")]
    WrongContactCount {
        /// Required number of contacts.
        expected: usize,
        /// Number of contacts supplied.
        actual: usize,
    },

    /// An approach normal has (near) zero length, so its direction is undefined.
    #[error("invalid input: degenerate normal ({context})")]
    DegenerateNormal {
        /// Which normal was degenerate.
        context: String,
    },

    /// A value that must be finite was `NaN` or infinite.
    #[error("invalid input: non-finite {what}: {value}")]
    NonFinite {
        /// Name of the offending quantity.
        what: String,
        /// The offending value.
        value: f64,
    },

    /// The predictor reached a branch its residual computation rules out.
    #[error("logic error: grasp encoding is incorrect (joint {joint}, value {value})")]
    LogicError {
        /// Joint whose branch split failed.
        joint: usize,
        /// Descriptor component that was being mapped.
        value: f64,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// The rejection sampler hit its attempt cap without a collision-free sample.
    #[error("no collision-free configuration found after {attempts} attempts")]
    SamplingExhausted {
        /// Number of samples drawn.
        attempts: usize,
    },
}

impl GraspError {
    /// Create a wrong contact count error.
    #[must_use]
    pub const fn wrong_count(expected: usize, actual: usize) -> Self {
        Self::WrongContactCount { expected, actual }
    }

    /// Create a degenerate normal error.
    #[must_use]
    pub fn degenerate_normal(context: impl Into<String>) -> Self {
        Self::DegenerateNormal {
            context: context.into(),
        }
    }

    /// Create a non-finite value error.
    #[must_use]
    pub fn non_finite(what: impl Into<String>, value: f64) -> Self {
        Self::NonFinite {
            what: what.into(),
            value,
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by malformed input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::WrongContactCount { .. } | Self::DegenerateNormal { .. } | Self::NonFinite { .. }
        )
    }

    /// Check if this is a predictor logic error.
    #[must_use]
    pub fn is_logic_error(&self) -> bool {
        matches!(self, Self::LogicError { .. })
    }
}
