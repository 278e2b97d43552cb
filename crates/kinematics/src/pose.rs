//! Rigid transforms for frame poses
//!
//! A [`Pose`] is a rotation followed by a translation, stored as a glam
//! `DQuat` and `DVec3`. Composition follows the usual convention: `a * b`
//! maps points from frame `b` into the frame `a` is expressed in.

use std::ops::Mul;

use glam::{DQuat, DVec3, EulerRot};

/// Position and orientation of a frame relative to another frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub rotation: DQuat,
    pub translation: DVec3,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        rotation: DQuat::IDENTITY,
        translation: DVec3::ZERO,
    };

    #[must_use]
    pub fn new(rotation: DQuat, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    #[must_use]
    pub fn from_translation(translation: DVec3) -> Self {
        Self::new(DQuat::IDENTITY, translation)
    }

    #[must_use]
    pub fn from_rotation(rotation: DQuat) -> Self {
        Self::new(rotation, DVec3::ZERO)
    }

    /// Build a pose from a translation and fixed-axis roll/pitch/yaw angles.
    ///
    /// The rotation is `Rz(yaw) * Ry(pitch) * Rx(roll)`, the convention used
    /// by URDF origins.
    #[must_use]
    pub fn from_xyz_rpy(xyz: [f64; 3], rpy: [f64; 3]) -> Self {
        let rotation = DQuat::from_euler(EulerRot::ZYX, rpy[2], rpy[1], rpy[0]);
        Self::new(rotation, DVec3::from_array(xyz))
    }

    /// Map a point expressed in this pose's frame into the parent frame.
    #[must_use]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    /// Rotate a direction expressed in this pose's frame into the parent frame.
    #[must_use]
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.rotation * vector
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self::new(rotation, -(rotation * self.translation))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        Pose {
            rotation: (self.rotation * rhs.rotation).normalize(),
            translation: self.transform_point(rhs.translation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_composition() {
        let pose = Pose::from_xyz_rpy([1.0, 2.0, 3.0], [0.1, 0.2, 0.3]);
        let composed = Pose::IDENTITY * pose;
        assert!((composed.translation.x - 1.0).abs() < 1e-12);
        assert!((composed.translation.y - 2.0).abs() < 1e-12);
        assert!((composed.translation.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_yaw_rotates_x_into_y() {
        let pose = Pose::from_xyz_rpy([0.0, 0.0, 0.0], [0.0, 0.0, FRAC_PI_2]);
        let p = pose.transform_point(DVec3::X);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_roll_rotates_y_into_z() {
        let pose = Pose::from_xyz_rpy([0.0, 0.0, 0.0], [FRAC_PI_2, 0.0, 0.0]);
        let p = pose.transform_vector(DVec3::Y);
        assert!((p.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_cancels() {
        let pose = Pose::from_xyz_rpy([0.4, -0.2, 1.5], [0.3, -0.7, 1.1]);
        let round = pose * pose.inverse();
        assert!(round.translation.length() < 1e-12);
        assert!((round.rotation.w.abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_translation_is_applied_in_parent_frame() {
        let parent = Pose::new(DQuat::from_rotation_z(FRAC_PI_2), DVec3::new(1.0, 0.0, 0.0));
        let child = Pose::from_translation(DVec3::new(1.0, 0.0, 0.0));
        let abs = parent * child;
        assert!((abs.translation.x - 1.0).abs() < 1e-12);
        assert!((abs.translation.y - 1.0).abs() < 1e-12);
    }
}
