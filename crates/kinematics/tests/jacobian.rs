use glam::DVec3;
use kinematics::{presets, KinematicProvider, KinematicsError, Pose, SceneGraph};

const STEP: f64 = 1e-6;

fn finite_difference_columns(arm: &SceneGraph, q: &[f64]) -> Vec<[f64; 6]> {
    let tip = arm.frame_id(presets::ARM_TIP).unwrap();
    let ids = arm.config_ids(&presets::ARM_JOINTS).unwrap();
    let base = arm.forward_kinematics(q).unwrap();
    let p0 = base.absolute_of(tip).unwrap();

    ids.iter()
        .map(|&id| {
            let mut nudged = q.to_vec();
            nudged[id] += STEP;
            let tf = arm.forward_kinematics(&nudged).unwrap();
            let p1 = tf.absolute_of(tip).unwrap();

            let linear = (p1.translation - p0.translation) / STEP;
            let mut dr = p1.rotation * p0.rotation.inverse();
            if dr.w < 0.0 {
                dr = -dr;
            }
            let angular = 2.0 * dr.xyz() / STEP;
            [linear.x, linear.y, linear.z, angular.x, angular.y, angular.z]
        })
        .collect()
}

#[test]
fn test_arm_jacobian_matches_finite_differences() {
    let arm = presets::seven_dof_arm().unwrap();
    let tip = arm.frame_id(presets::ARM_TIP).unwrap();
    let chain = arm.chain(None, tip).unwrap();

    let mut q = vec![0.0; arm.config_count()];
    let ids = arm.config_ids(&presets::ARM_JOINTS).unwrap();
    arm.config_set(&ids, &presets::ARM_READY, &mut q).unwrap();

    let tf = arm.forward_kinematics(&q).unwrap();
    let jacobian = arm.jacobian(&chain, tf.absolute()).unwrap();
    assert_eq!(jacobian.shape(), (6, 7));

    for (col, expected) in finite_difference_columns(&arm, &q).iter().enumerate() {
        for (row, value) in expected.iter().enumerate() {
            assert!((jacobian[(row, col)] - *value).abs() < 1e-4);
        }
    }
}

#[test]
fn test_forward_kinematics_rejects_wrong_length() {
    let arm = presets::seven_dof_arm().unwrap();
    let err = arm.forward_kinematics(&[0.0; 3]).unwrap_err();
    assert_eq!(
        err,
        KinematicsError::Dimension {
            what: "configuration vector",
            expected: 7,
            actual: 3
        }
    );
}

#[test]
fn test_jacobian_rejects_partial_transform_set() {
    let arm = presets::seven_dof_arm().unwrap();
    let tip = arm.frame_id(presets::ARM_TIP).unwrap();
    let chain = arm.chain(None, tip).unwrap();
    let err = arm.jacobian(&chain, &[Pose::IDENTITY; 2]).unwrap_err();
    assert!(matches!(err, KinematicsError::Dimension { .. }));
}

#[test]
fn test_relative_and_absolute_agree() {
    let arm = presets::seven_dof_arm().unwrap();
    let q = presets::ARM_READY.to_vec();
    let tf = arm.forward_kinematics(&q).unwrap();

    for i in 0..arm.frame_count() {
        let id = kinematics::FrameId(i);
        let expected = match arm.parent(id) {
            Some(parent) => tf.absolute()[parent.index()] * tf.relative()[i],
            None => tf.relative()[i],
        };
        let actual = tf.absolute()[i];
        assert!((expected.translation - actual.translation).length() < 1e-12);
    }
}

#[test]
fn test_unknown_tip_is_not_found() {
    let arm = presets::seven_dof_arm().unwrap();
    assert!(matches!(
        arm.frame_id("left_hand"),
        Err(KinematicsError::NotFound { kind: "frame", .. })
    ));
}

#[test]
fn test_config_set_touches_only_named_entries() {
    let graph = SceneGraph::builder()
        .revolute("a", None, Pose::IDENTITY, DVec3::Z)
        .revolute("b", Some("a"), Pose::IDENTITY, DVec3::X)
        .prismatic("c", Some("b"), Pose::IDENTITY, DVec3::Y)
        .build()
        .unwrap();
    let mut q = vec![0.1, 0.2, 0.3];
    let ids = graph.config_ids(&["c", "a"]).unwrap();
    graph.config_set(&ids, &[3.0, 1.0], &mut q).unwrap();
    assert_eq!(q, vec![1.0, 0.2, 3.0]);
    assert_eq!(graph.config_get(&ids, &q).unwrap(), vec![3.0, 1.0]);
}
