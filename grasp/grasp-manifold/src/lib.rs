//! Virtual hand manifold for a two-finger-plus-palm gripper.
//!
//! This crate provides a coarse, calibration-based stand-in for a learned
//! reachability manifold of the Robotiq-S hand:
//!
//! - [`encode`] - Compress a three-point [`Grasp`] into a [`GraspDescriptor`]
//! - [`ConfigurationPredictor`] - Map a descriptor onto a 2-DOF joint
//!   configuration with a residual quality score
//! - [`ConfigurationSampler`] - Rejection-sample collision-free configurations
//! - [`HandModel`] and [`VirtualManifold`] - Bind the above to a simulated hand
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. The simulator is
//! reached only through the [`HandModel`] trait, so the crate works with any
//! physics backend or with recorded fingertip data.
//!
//! # Grasp Descriptor
//!
//! | Component         | Meaning                                           | Unit |
//! |-------------------|---------------------------------------------------|------|
//! | `finger_distance` | distance between fingers A and B                  | m    |
//! | `palm_distance`   | palm tip to the midpoint of A and B               | m    |
//! | `finger_angle`    | angle between the finger normals                  | rad  |
//! | `palm_angle`      | palm normal vs. negated mean finger normal        | rad  |
//!
//! # Example
//!
//! ```
//! use grasp_manifold::{ConfigurationPredictor, ContactPose, Grasp, HandJointLimits, encode};
//!
//! let grasp = Grasp::new(
//!     ContactPose::from_array([0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
//!     ContactPose::from_array([0.05, 0.0, 0.0, 0.0, 0.0, 1.0]),
//!     ContactPose::from_array([0.025, 0.05, 0.0, 0.0, 0.0, -1.0]),
//! );
//! let q = encode(&grasp).unwrap();
//!
//! let limits = HandJointLimits::new([0.0, 0.0], [1.2, 1.0]);
//! let result = ConfigurationPredictor::robotiq().predict(&q, &limits).unwrap();
//!
//! // Both distances are in range and the normals line up: a perfect fit.
//! assert!(result.score.abs() < 1e-12);
//! assert!(result.joints[0] > 0.0 && result.joints[1] > 0.0);
//! ```
//!
//! # Diagnostics
//!
//! Prediction emits no global log output of its own. Pass a
//! [`PredictionObserver`] to [`ConfigurationPredictor::predict_with`];
//! [`ConfigurationPredictor::predict`] uses [`TracingObserver`], which
//! forwards to `tracing`.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::float_cmp,             // residuals are exactly 0.0 by construction
    clippy::suboptimal_flops,      // mul_add style changes aren't always clearer
    clippy::missing_const_for_fn,  // Many methods can't be const due to nalgebra
)]

mod config;
mod contact;
mod encoder;
mod error;
mod hand;
mod limits;
mod observer;
mod predictor;
mod range;
mod sampler;

pub use config::{ManifoldConfig, SamplerConfig};
pub use contact::{CONTACT_COUNT, ContactPose, Grasp, TipFrameConfig, tip_contact_from_frame};
pub use encoder::{GraspDescriptor, angle_between, encode};
pub use error::{GraspError, Result};
pub use hand::{HandModel, VirtualManifold, fingertip_contacts};
pub use limits::{HandJointLimits, JOINT_COUNT, JOINT0_CEILING};
pub use observer::{JointEvent, NoopObserver, PredictionObserver, RecordingObserver, TracingObserver};
pub use predictor::{ConfigurationPredictor, PredictionResult};
pub use range::{RangePosition, ReferenceRange};
pub use sampler::{ConfigurationSampler, sample_valid_configuration};

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Vector3};
