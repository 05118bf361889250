//! Grasp encoding.
//!
//! Compresses a three-point [`Grasp`] into a four-scalar [`GraspDescriptor`]:
//!
//! 1. `finger_distance` - distance between fingers A and B
//! 2. `palm_distance` - distance from the palm tip to the midpoint of A and B
//! 3. `finger_angle` - angle between the normals of A and B
//! 4. `palm_angle` - angle between the palm normal and the negated average
//!    finger normal
//!
//! A well-formed pinch has opposing finger normals pointing at each other and a
//! palm normal opposing their mean, so `palm_angle` near zero means the palm
//! pushes against the fingers.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::contact::Grasp;
use crate::error::{GraspError, Result};

/// Four-scalar summary of a grasp's geometry.
///
/// Distances are non-negative (meters); angles lie in `[0, π]` (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraspDescriptor {
    /// Distance between finger A and finger B.
    pub finger_distance: f64,
    /// Distance from the palm tip to the finger midpoint.
    pub palm_distance: f64,
    /// Angle between the finger normals.
    pub finger_angle: f64,
    /// Angle between the palm normal and the negated mean finger normal.
    pub palm_angle: f64,
}

impl GraspDescriptor {
    /// Create a descriptor from its four components.
    #[must_use]
    pub const fn new(
        finger_distance: f64,
        palm_distance: f64,
        finger_angle: f64,
        palm_angle: f64,
    ) -> Self {
        Self {
            finger_distance,
            palm_distance,
            finger_angle,
            palm_angle,
        }
    }

    /// Components in canonical order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [
            self.finger_distance,
            self.palm_distance,
            self.finger_angle,
            self.palm_angle,
        ]
    }

    /// The two positional components, one per actuated joint.
    #[must_use]
    pub const fn distances(&self) -> [f64; 2] {
        [self.finger_distance, self.palm_distance]
    }

    /// The two angular components.
    #[must_use]
    pub const fn angles(&self) -> [f64; 2] {
        [self.finger_angle, self.palm_angle]
    }

    /// Reject `NaN` and infinite components.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::NonFinite`] naming the first bad component.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("finger distance", self.finger_distance),
            ("palm distance", self.palm_distance),
            ("finger angle", self.finger_angle),
            ("palm angle", self.palm_angle),
        ];
        for (what, value) in named {
            if !value.is_finite() {
                return Err(GraspError::non_finite(what, value));
            }
        }
        Ok(())
    }
}

impl From<[f64; 4]> for GraspDescriptor {
    fn from(q: [f64; 4]) -> Self {
        Self::new(q[0], q[1], q[2], q[3])
    }
}

/// Unsigned angle between two vectors, in `[0, π]`.
///
/// The cosine is clamped to `[-1, 1]` before `acos` so floating-point
/// overshoot on (anti)parallel vectors cannot produce `NaN`.
///
/// Returns `None` if either vector has (near) zero length.
///
/// # Example
///
/// ```
/// use grasp_manifold::angle_between;
/// use nalgebra::Vector3;
///
/// let u = Vector3::new(0.3, -1.2, 0.5);
/// assert!(angle_between(&u, &u).unwrap() < 1e-7);
/// let opposite = angle_between(&u, &-u).unwrap();
/// assert!((opposite - std::f64::consts::PI).abs() < 1e-7);
/// assert_eq!(angle_between(&u, &Vector3::zeros()), None);
/// ```
#[must_use]
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> Option<f64> {
    let denom = u.norm() * v.norm();
    if denom < f64::EPSILON {
        return None;
    }
    let cos = (u.dot(v) / denom).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Encode a grasp into its descriptor.
///
/// # Errors
///
/// - [`GraspError::NonFinite`] if any contact component is `NaN` or infinite.
/// - [`GraspError::DegenerateNormal`] if a contact normal has zero length, or
///   if the finger normals cancel so their mean has no direction.
///
/// # Example
///
/// ```
/// use grasp_manifold::{ContactPose, Grasp, encode};
///
/// let grasp = Grasp::new(
///     ContactPose::from_array([0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
///     ContactPose::from_array([0.05, 0.0, 0.0, 0.0, 0.0, 1.0]),
///     ContactPose::from_array([0.025, 0.05, 0.0, 0.0, 0.0, -1.0]),
/// );
/// let q = encode(&grasp).unwrap();
/// assert!((q.finger_distance - 0.05).abs() < 1e-12);
/// assert!((q.palm_distance - 0.05).abs() < 1e-12);
/// assert_eq!(q.finger_angle, 0.0);
/// assert_eq!(q.palm_angle, 0.0);
/// ```
pub fn encode(grasp: &Grasp) -> Result<GraspDescriptor> {
    for (i, contact) in grasp.contacts().iter().enumerate() {
        if let Some(value) = contact.to_array().into_iter().find(|v| !v.is_finite()) {
            return Err(GraspError::non_finite(format!("contact {i} component"), value));
        }
    }

    let a = grasp.finger_a();
    let b = grasp.finger_b();
    let palm = grasp.palm();

    let finger_distance = (a.position - b.position).norm();
    let midpoint = a.position.coords.lerp(&b.position.coords, 0.5);
    let palm_distance = (palm.position.coords - midpoint).norm();

    let finger_angle = angle_between(&a.normal, &b.normal)
        .ok_or_else(|| GraspError::degenerate_normal("finger normals"))?;

    let mean_normal = (a.normal + b.normal) / 2.0;
    let palm_angle = angle_between(&palm.normal, &-mean_normal)
        .ok_or_else(|| GraspError::degenerate_normal("palm normal or mean finger normal"))?;

    Ok(GraspDescriptor::new(
        finger_distance,
        palm_distance,
        finger_angle,
        palm_angle,
    ))
}
