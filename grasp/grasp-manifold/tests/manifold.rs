//! End-to-end tests: contacts through encoding to predicted configuration.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use approx::assert_relative_eq;
use grasp_manifold::{
    ConfigurationPredictor, ContactPose, Grasp, GraspDescriptor, GraspError, HandJointLimits,
    JOINT0_CEILING, ManifoldConfig, NoopObserver, RangePosition, RecordingObserver, encode,
};
use nalgebra::{Point3, Vector3};

fn pose(p: [f64; 3], n: [f64; 3]) -> ContactPose {
    ContactPose::new(Point3::from(p), Vector3::from(n))
}

fn reference_grasp() -> Grasp {
    Grasp::new(
        pose([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        pose([0.05, 0.0, 0.0], [0.0, 0.0, 1.0]),
        pose([0.025, 0.05, 0.0], [0.0, 0.0, -1.0]),
    )
}

#[test]
fn reference_grasp_encodes_and_predicts() {
    let q = encode(&reference_grasp()).unwrap();
    assert_relative_eq!(q.finger_distance, 0.05, epsilon = 1e-12);
    assert_relative_eq!(q.palm_distance, 0.05, epsilon = 1e-12);
    assert_eq!(q.angles(), [0.0, 0.0]);

    let limits = HandJointLimits::new([0.0, 0.0], [1.0, 1.0]);
    let result = ConfigurationPredictor::robotiq().predict(&q, &limits).unwrap();

    assert_relative_eq!(result.score, 0.0, epsilon = 1e-12);
    // Joint 0: (0.122 - 0.05) * 0.93124747 / 0.096
    assert_relative_eq!(
        result.joints[0],
        0.072 * JOINT0_CEILING / 0.096,
        epsilon = 1e-9
    );
    // Joint 1: (0 + 0.05) * 1.0 / 0.165
    assert_relative_eq!(result.joints[1], 0.05 / 0.165, epsilon = 1e-9);
}

#[test]
fn tilted_palm_adds_angular_residual() {
    let grasp = Grasp::new(
        pose([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        pose([0.05, 0.0, 0.0], [0.0, 0.0, 1.0]),
        pose([0.025, 0.05, 0.0], [0.0, -1.0, 0.0]),
    );
    let q = encode(&grasp).unwrap();
    assert_relative_eq!(q.palm_angle, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);

    let result = ConfigurationPredictor::robotiq()
        .predict(&q, &HandJointLimits::new([0.0, 0.0], [1.0, 1.0]))
        .unwrap();
    assert_relative_eq!(result.score, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn wide_grasp_clamps_both_joints() {
    let grasp = Grasp::new(
        pose([-0.1, 0.0, 0.0], [1.0, 0.0, 0.0]),
        pose([0.1, 0.0, 0.0], [-1.0, 0.0, 0.0]),
        pose([0.0, 0.0, 0.3], [0.0, 0.0, -1.0]),
    );
    // Opposing finger normals average to zero: no direction to oppose.
    assert!(encode(&grasp).unwrap_err().is_invalid_input());

    let q = GraspDescriptor::new(0.2, 0.3, 0.0, 0.0);
    let mut recorder = RecordingObserver::new();
    let result = ConfigurationPredictor::robotiq()
        .predict_with(
            &q,
            &HandJointLimits::new([0.1, 0.2], [2.0, 0.9]),
            &mut recorder,
        )
        .unwrap();

    assert_eq!(result.joints, [JOINT0_CEILING, 0.9]);
    assert!(
        recorder
            .joints
            .iter()
            .all(|e| e.position == RangePosition::Above)
    );
    // (0.078 + 0.135) * 10
    assert_relative_eq!(result.score, 2.13, epsilon = 1e-9);
}

#[test]
fn narrow_grasp_clamps_joint0_low() {
    let q = GraspDescriptor::new(0.01, 0.05, 0.0, 0.0);
    let predictor = ConfigurationPredictor::robotiq();
    let result = predictor
        .predict_with(
            &q,
            &HandJointLimits::new([0.05, 0.0], [0.5, 1.0]),
            &mut NoopObserver,
        )
        .unwrap();
    assert_eq!(result.joints[0], 0.05);
    assert_relative_eq!(predictor.residuals(&q)[0], 0.016, epsilon = 1e-12);
}

#[test]
fn custom_alpha_reweights_positional_residual() {
    let q = GraspDescriptor::new(0.01, 0.05, 0.25, 0.0);
    let predictor = ConfigurationPredictor::new(ManifoldConfig::robotiq().alpha(1.0)).unwrap();
    assert_relative_eq!(predictor.score(&q), 0.016 + 0.25, epsilon = 1e-12);
}

#[test]
fn grasp_requires_three_contacts() {
    let contacts = reference_grasp().contacts().to_vec();
    assert!(Grasp::from_contacts(&contacts).is_ok());
    assert_eq!(
        Grasp::from_contacts(&contacts[..1]).unwrap_err(),
        GraspError::wrong_count(3, 1)
    );
}
