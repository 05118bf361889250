//! Contact poses and three-point grasps.
//!
//! A [`Grasp`] is an ordered triple of [`ContactPose`]s sampled from the
//! fingertips of a two-finger-plus-palm hand. The order carries meaning:
//!
//! | Index | Contact  | Role                                      |
//! |-------|----------|-------------------------------------------|
//! | 0     | finger A | opposes finger B                          |
//! | 1     | finger B | opposes finger A                          |
//! | 2     | palm tip | opposes the average of fingers A and B    |

use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GraspError, Result};

/// Number of contacts in a grasp.
pub const CONTACT_COUNT: usize = 3;

/// A single fingertip contact: position and approach normal.
///
/// The normal is expected to be unit length but is not normalized on
/// construction; the encoder only requires it to be non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPose {
    /// Contact position in world coordinates (meters).
    pub position: Point3<f64>,
    /// Approach direction at the contact.
    pub normal: Vector3<f64>,
}

impl ContactPose {
    /// Create a contact pose from a position and approach normal.
    #[must_use]
    pub const fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    /// Create a contact pose from a packed `[px, py, pz, nx, ny, nz]` row.
    ///
    /// # Example
    ///
    /// ```
    /// use grasp_manifold::ContactPose;
    ///
    /// let c = ContactPose::from_array([0.1, 0.0, 0.0, 0.0, 0.0, 1.0]);
    /// assert_eq!(c.position.x, 0.1);
    /// assert_eq!(c.normal.z, 1.0);
    /// ```
    #[must_use]
    pub fn from_array(row: [f64; 6]) -> Self {
        Self {
            position: Point3::new(row[0], row[1], row[2]),
            normal: Vector3::new(row[3], row[4], row[5]),
        }
    }

    /// Pack into a `[px, py, pz, nx, ny, nz]` row.
    #[must_use]
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.normal.x,
            self.normal.y,
            self.normal.z,
        ]
    }

    /// Check that every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

/// An ordered three-point grasp: finger A, finger B, palm tip.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grasp {
    contacts: [ContactPose; CONTACT_COUNT],
}

impl Grasp {
    /// Create a grasp from its three contacts.
    #[must_use]
    pub const fn new(finger_a: ContactPose, finger_b: ContactPose, palm: ContactPose) -> Self {
        Self {
            contacts: [finger_a, finger_b, palm],
        }
    }

    /// Create a grasp from a slice of contacts.
    ///
    /// # Errors
    ///
    /// Returns [`GraspError::WrongContactCount`] unless the slice holds exactly
    /// three contacts. Extra contacts are never silently dropped.
    pub fn from_contacts(contacts: &[ContactPose]) -> Result<Self> {
        match contacts {
            [a, b, palm] => Ok(Self::new(*a, *b, *palm)),
            _ => Err(GraspError::wrong_count(CONTACT_COUNT, contacts.len())),
        }
    }

    /// Finger A contact (index 0).
    #[must_use]
    pub const fn finger_a(&self) -> &ContactPose {
        &self.contacts[0]
    }

    /// Finger B contact (index 1).
    #[must_use]
    pub const fn finger_b(&self) -> &ContactPose {
        &self.contacts[1]
    }

    /// Palm tip contact (index 2).
    #[must_use]
    pub const fn palm(&self) -> &ContactPose {
        &self.contacts[2]
    }

    /// All contacts in grasp order.
    #[must_use]
    pub const fn contacts(&self) -> &[ContactPose; CONTACT_COUNT] {
        &self.contacts
    }
}

impl TryFrom<&[ContactPose]> for Grasp {
    type Error = GraspError;

    fn try_from(contacts: &[ContactPose]) -> Result<Self> {
        Self::from_contacts(contacts)
    }
}

impl TryFrom<Vec<ContactPose>> for Grasp {
    type Error = GraspError;

    fn try_from(contacts: Vec<ContactPose>) -> Result<Self> {
        Self::from_contacts(&contacts)
    }
}

/// How a fingertip link frame maps to a contact pose.
///
/// The tip link's mass frame is rotated about its local Z axis, then the
/// contact point is pushed out along the rotated frame by `offset`. The
/// approach normal is the rotated frame's Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TipFrameConfig {
    /// Rotation about the link's local Z axis (radians).
    pub local_rotation_z: f64,
    /// Contact offset expressed in the rotated link frame (meters).
    pub offset: Vector3<f64>,
}

impl Default for TipFrameConfig {
    fn default() -> Self {
        Self::robotiq()
    }
}

impl TipFrameConfig {
    /// Fingertip geometry of the Robotiq-S hand.
    #[must_use]
    pub fn robotiq() -> Self {
        Self {
            local_rotation_z: std::f64::consts::FRAC_PI_6,
            offset: Vector3::new(0.025, 0.006, 0.0),
        }
    }
}

/// Convert a fingertip link frame into a contact pose.
///
/// # Example
///
/// ```
/// use grasp_manifold::{TipFrameConfig, tip_contact_from_frame};
/// use nalgebra::{Isometry3, Vector3};
///
/// let config = TipFrameConfig {
///     local_rotation_z: 0.0,
///     offset: Vector3::new(0.01, 0.0, 0.0),
/// };
/// let contact = tip_contact_from_frame(&Isometry3::identity(), &config);
/// assert!((contact.position.x - 0.01).abs() < 1e-12);
/// assert!((contact.normal - Vector3::y()).norm() < 1e-12);
/// ```
#[must_use]
pub fn tip_contact_from_frame(frame: &Isometry3<f64>, config: &TipFrameConfig) -> ContactPose {
    let rotation =
        frame.rotation * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), config.local_rotation_z);
    let position = Point3::from(frame.translation.vector + rotation * config.offset);
    let normal = rotation * Vector3::y();
    ContactPose::new(position, normal)
}
