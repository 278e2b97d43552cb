//! Built-in mechanisms

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::DVec3;

use crate::error::KinematicsError;
use crate::pose::Pose;
use crate::scene::SceneGraph;

/// Joints of the 7-DOF arm, base to wrist.
pub const ARM_JOINTS: [&str; 7] = [
    "right_s0", "right_s1", "right_e0", "right_e1", "right_w0", "right_w1", "right_w2",
];

/// End-effector frame of the 7-DOF arm.
pub const ARM_TIP: &str = "right_hand";

/// A reference pose with the elbow bent and the wrist away from alignment.
pub const ARM_READY: [f64; 7] = [-FRAC_PI_4, -0.3, PI, FRAC_PI_2, 0.2, 0.4, 0.0];

/// Elbow bent, every other joint at its offset except the shoulder yaw.
pub const ARM_REFERENCE: [f64; 7] = [-FRAC_PI_4, 0.0, PI, FRAC_PI_2, 0.0, 0.0, 0.0];

/// Seven revolute joints in a shoulder/elbow/wrist layout, mounted on a fixed
/// torso. Every joint turns about the local Z axis of its frame; the link
/// geometry is carried by the fixed offsets.
///
/// # Errors
///
/// Never fails in practice; the error is the builder's validation result.
pub fn seven_dof_arm() -> Result<SceneGraph, KinematicsError> {
    let z = DVec3::Z;
    SceneGraph::builder()
        .fixed("torso", None, Pose::IDENTITY)
        .fixed(
            "right_arm_mount",
            Some("torso"),
            Pose::from_xyz_rpy([0.024_645, -0.219_645, 0.118_588], [0.0, 0.0, -FRAC_PI_4]),
        )
        .revolute(
            "right_s0",
            Some("right_arm_mount"),
            Pose::from_xyz_rpy([0.055_695, 0.0, 0.011_038], [0.0, 0.0, 0.0]),
            z,
        )
        .revolute(
            "right_s1",
            Some("right_s0"),
            Pose::from_xyz_rpy([0.069, 0.0, 0.270_35], [-FRAC_PI_2, 0.0, 0.0]),
            z,
        )
        .revolute(
            "right_e0",
            Some("right_s1"),
            Pose::from_xyz_rpy([0.102, 0.0, 0.0], [FRAC_PI_2, 0.0, FRAC_PI_2]),
            z,
        )
        .revolute(
            "right_e1",
            Some("right_e0"),
            Pose::from_xyz_rpy([0.069, 0.0, 0.262_42], [-FRAC_PI_2, -FRAC_PI_2, 0.0]),
            z,
        )
        .revolute(
            "right_w0",
            Some("right_e1"),
            Pose::from_xyz_rpy([0.103_59, 0.0, 0.0], [FRAC_PI_2, 0.0, FRAC_PI_2]),
            z,
        )
        .revolute(
            "right_w1",
            Some("right_w0"),
            Pose::from_xyz_rpy([0.01, 0.0, 0.2707], [-FRAC_PI_2, -FRAC_PI_2, 0.0]),
            z,
        )
        .revolute(
            "right_w2",
            Some("right_w1"),
            Pose::from_xyz_rpy([0.115_975, 0.0, 0.0], [FRAC_PI_2, 0.0, FRAC_PI_2]),
            z,
        )
        .fixed(
            ARM_TIP,
            Some("right_w2"),
            Pose::from_translation(DVec3::new(0.0, 0.0, 0.113_55)),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::KinematicProvider;

    #[test]
    fn test_arm_has_seven_joints() {
        let arm = seven_dof_arm().unwrap();
        assert_eq!(arm.config_count(), 7);
        let tip = arm.frame_id(ARM_TIP).unwrap();
        let chain = arm.chain(None, tip).unwrap();
        assert_eq!(chain.configs(), &arm.config_ids(&ARM_JOINTS).unwrap()[..]);
    }
}
