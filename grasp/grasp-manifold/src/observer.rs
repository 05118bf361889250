//! Prediction diagnostics.
//!
//! The predictor never logs on its own. Callers pass a [`PredictionObserver`]
//! that receives each per-joint branch decision and the final score:
//!
//! - [`TracingObserver`] forwards events to `tracing`
//! - [`NoopObserver`] drops them
//! - [`RecordingObserver`] stores them for inspection

use tracing::{debug, warn};

use crate::encoder::GraspDescriptor;
use crate::range::RangePosition;

/// One per-joint decision made by the predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointEvent {
    /// Joint index (0 or 1).
    pub joint: usize,
    /// Descriptor distance mapped onto this joint.
    pub value: f64,
    /// Where the value fell relative to its reference range.
    pub position: RangePosition,
    /// Distance outside the reference range.
    pub residual: f64,
    /// Predicted joint value.
    pub predicted: f64,
}

/// Receives diagnostics from [`ConfigurationPredictor`](crate::ConfigurationPredictor).
pub trait PredictionObserver {
    /// Called with the descriptor at the start of a prediction.
    fn descriptor(&mut self, _descriptor: &GraspDescriptor) {}

    /// Called once per joint after its value has been chosen.
    fn joint(&mut self, _event: &JointEvent) {}

    /// Called with the final residual score.
    fn score(&mut self, _score: f64) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PredictionObserver for NoopObserver {}

/// Observer that emits `tracing` events.
///
/// In-range joints are reported at `debug`, clamped joints at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PredictionObserver for TracingObserver {
    fn descriptor(&mut self, q: &GraspDescriptor) {
        debug!(
            finger_distance = q.finger_distance,
            palm_distance = q.palm_distance,
            finger_angle = q.finger_angle,
            palm_angle = q.palm_angle,
            "Predicting hand configuration"
        );
    }

    fn joint(&mut self, e: &JointEvent) {
        match e.position {
            RangePosition::Inside => debug!(
                joint = e.joint,
                value = e.value,
                predicted = e.predicted,
                "Descriptor distance in range"
            ),
            RangePosition::Below | RangePosition::Above => warn!(
                joint = e.joint,
                value = e.value,
                residual = e.residual,
                predicted = e.predicted,
                position = %e.position,
                "Descriptor distance not in range, clamping joint"
            ),
        }
    }

    fn score(&mut self, score: f64) {
        debug!(score, "Prediction residual");
    }
}

/// Observer that records every event.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Descriptors seen, in call order.
    pub descriptors: Vec<GraspDescriptor>,
    /// Joint decisions, in call order.
    pub joints: Vec<JointEvent>,
    /// Scores, in call order.
    pub scores: Vec<f64>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PredictionObserver for RecordingObserver {
    fn descriptor(&mut self, descriptor: &GraspDescriptor) {
        self.descriptors.push(*descriptor);
    }

    fn joint(&mut self, event: &JointEvent) {
        self.joints.push(*event);
    }

    fn score(&mut self, score: f64) {
        self.scores.push(score);
    }
}

impl<O: PredictionObserver + ?Sized> PredictionObserver for &mut O {
    fn descriptor(&mut self, descriptor: &GraspDescriptor) {
        (**self).descriptor(descriptor);
    }

    fn joint(&mut self, event: &JointEvent) {
        (**self).joint(event);
    }

    fn score(&mut self, score: f64) {
        (**self).score(score);
    }
}
