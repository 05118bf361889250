//! Simulated hand interface and the hand-bound virtual manifold.
//!
//! [`HandModel`] is the full capability set the manifold needs from a
//! simulator: joint limits, fingertip poses, self-collision checks, and
//! commanding joint values. [`VirtualManifold`] binds a hand to a predictor
//! and sampler.

use nalgebra::Isometry3;
use rand::Rng;

use crate::config::{ManifoldConfig, SamplerConfig};
use crate::contact::{ContactPose, Grasp, TipFrameConfig, tip_contact_from_frame};
use crate::encoder::{GraspDescriptor, encode};
use crate::error::Result;
use crate::limits::{HandJointLimits, JOINT_COUNT};
use crate::observer::PredictionObserver;
use crate::predictor::{ConfigurationPredictor, PredictionResult};
use crate::sampler::ConfigurationSampler;

/// A simulated two-finger-plus-palm hand.
pub trait HandModel {
    /// Limits of the two actuated joints, as reported by the robot model.
    fn joint_limits(&self) -> HandJointLimits;

    /// Current fingertip contacts, ordered finger A, finger B, palm tip.
    fn fingertip_poses(&self) -> Vec<ContactPose>;

    /// Whether the hand currently collides with itself.
    fn check_self_collision(&self) -> bool;

    /// Command the actuated joints.
    fn set_joint_values(&mut self, values: [f64; JOINT_COUNT]);
}

/// Convert fingertip link frames to contacts with the given tip geometry.
#[must_use]
pub fn fingertip_contacts(frames: &[Isometry3<f64>], config: &TipFrameConfig) -> Vec<ContactPose> {
    frames
        .iter()
        .map(|frame| tip_contact_from_frame(frame, config))
        .collect()
}

/// A hand together with its virtual manifold.
#[derive(Debug, Clone)]
pub struct VirtualManifold<H> {
    hand: H,
    predictor: ConfigurationPredictor,
    sampler: ConfigurationSampler,
}

impl<H: HandModel> VirtualManifold<H> {
    /// Bind a hand using the Robotiq-S calibration and unbounded sampling.
    #[must_use]
    pub fn new(hand: H) -> Self {
        Self {
            hand,
            predictor: ConfigurationPredictor::robotiq(),
            sampler: ConfigurationSampler::default(),
        }
    }

    /// Bind a hand with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::InvalidConfig`](crate::GraspError::InvalidConfig)
    /// if either configuration is invalid.
    pub fn with_config(hand: H, manifold: ManifoldConfig, sampler: SamplerConfig) -> Result<Self> {
        Ok(Self {
            hand,
            predictor: ConfigurationPredictor::new(manifold)?,
            sampler: ConfigurationSampler::new(sampler, manifold.joint0_ceiling)?,
        })
    }

    /// The bound hand.
    #[must_use]
    pub const fn hand(&self) -> &H {
        &self.hand
    }

    /// Release the hand.
    #[must_use]
    pub fn into_hand(self) -> H {
        self.hand
    }

    /// The predictor.
    #[must_use]
    pub const fn predictor(&self) -> &ConfigurationPredictor {
        &self.predictor
    }

    /// The grasp formed by the hand's current fingertips.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error unless the hand reports exactly three
    /// fingertips.
    pub fn current_grasp(&self) -> Result<Grasp> {
        Grasp::from_contacts(&self.hand.fingertip_poses())
    }

    /// Encode the hand's current fingertip geometry.
    ///
    /// # Errors
    ///
    /// Propagates [`Grasp::from_contacts`] and [`encode`] errors.
    pub fn encode_current_grasp(&self) -> Result<GraspDescriptor> {
        encode(&self.current_grasp()?)
    }

    /// Predict a configuration using the hand's joint limits.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationPredictor::predict_with`].
    pub fn predict(&self, q: &GraspDescriptor) -> Result<PredictionResult> {
        self.predictor.predict(q, &self.hand.joint_limits())
    }

    /// Predict a configuration, reporting to `observer`.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationPredictor::predict_with`].
    pub fn predict_with<O: PredictionObserver + ?Sized>(
        &self,
        q: &GraspDescriptor,
        observer: &mut O,
    ) -> Result<PredictionResult> {
        self.predictor
            .predict_with(q, &self.hand.joint_limits(), observer)
    }

    /// Move the hand to a random collision-free configuration.
    ///
    /// Each candidate is applied to the hand before its self-collision check,
    /// so on success the hand is left in the returned configuration.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationSampler::sample`].
    pub fn set_random_configuration<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<[f64; JOINT_COUNT]> {
        let limits = self.hand.joint_limits();
        let hand = &mut self.hand;
        self.sampler.sample(&limits, rng, |q| {
            hand.set_joint_values(*q);
            hand.check_self_collision()
        })
    }
}
