//! Rejection sampling of collision-free hand configurations.

use rand::Rng;
use tracing::{debug, trace};

use crate::config::SamplerConfig;
use crate::error::{GraspError, Result};
use crate::limits::{HandJointLimits, JOINT_COUNT};

/// Draws uniform configurations until one passes a collision predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigurationSampler {
    config: SamplerConfig,
    joint0_ceiling: f64,
}

impl ConfigurationSampler {
    /// Create a sampler that forces joint 0's upper limit to `joint0_ceiling`.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: SamplerConfig, joint0_ceiling: f64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            joint0_ceiling,
        })
    }

    /// Sampler settings.
    #[must_use]
    pub const fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Draw configurations until `is_colliding` returns `false` for one.
    ///
    /// Each joint is drawn uniformly from `[lower, upper]` after the joint 0
    /// ceiling is applied. Without an attempt cap this blocks until a
    /// collision-free sample turns up.
    ///
    /// # Errors
    ///
    /// - [`GraspError::InvalidConfig`] if the effective limits are invalid.
    /// - [`GraspError::SamplingExhausted`] if the attempt cap is reached.
    pub fn sample<R, F>(
        &self,
        limits: &HandJointLimits,
        rng: &mut R,
        mut is_colliding: F,
    ) -> Result<[f64; JOINT_COUNT]>
    where
        R: Rng + ?Sized,
        F: FnMut(&[f64; JOINT_COUNT]) -> bool,
    {
        let limits = limits.with_ceiling(self.joint0_ceiling);
        limits.validate()?;

        let mut attempts = 0usize;
        loop {
            if let Some(max) = self.config.max_attempts {
                if attempts >= max {
                    debug!(attempts, "Configuration sampling exhausted");
                    return Err(GraspError::SamplingExhausted { attempts });
                }
            }
            attempts += 1;

            let candidate: [f64; JOINT_COUNT] =
                std::array::from_fn(|i| rng.gen_range(limits.lower[i]..=limits.upper[i]));

            if is_colliding(&candidate) {
                trace!(?candidate, "Rejected colliding configuration");
                continue;
            }

            debug!(attempts, ?candidate, "Sampled collision-free configuration");
            return Ok(candidate);
        }
    }
}

impl Default for ConfigurationSampler {
    fn default() -> Self {
        Self {
            config: SamplerConfig::unbounded(),
            joint0_ceiling: crate::limits::JOINT0_CEILING,
        }
    }
}

/// Sample a collision-free configuration with the Robotiq-S joint 0 ceiling,
/// retrying without bound.
///
/// # Errors
///
/// Returns [`GraspError::InvalidConfig`] if the effective limits are invalid.
///
/// # Example
///
/// ```
/// use grasp_manifold::{HandJointLimits, sample_valid_configuration};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let limits = HandJointLimits::new([0.0, 0.0], [1.2, 1.0]);
/// let q = sample_valid_configuration(&limits, &mut rng, |q| q[1] > 0.5).unwrap();
/// assert!(q[1] <= 0.5);
/// ```
pub fn sample_valid_configuration<R, F>(
    limits: &HandJointLimits,
    rng: &mut R,
    is_colliding: F,
) -> Result<[f64; JOINT_COUNT]>
where
    R: Rng + ?Sized,
    F: FnMut(&[f64; JOINT_COUNT]) -> bool,
{
    ConfigurationSampler::default().sample(limits, rng, is_colliding)
}
