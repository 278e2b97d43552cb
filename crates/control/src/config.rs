use serde::{Deserialize, Serialize};

use kinematics::presets::{ARM_JOINTS, ARM_READY, ARM_TIP};

use crate::twist::{CommandSpec, TaskSpace};

/// Initial value of one named joint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointSeed {
    pub joint: String,
    pub position: f64,
}

impl JointSeed {
    /// Pair joint names with positions, stopping at the shorter list.
    #[must_use]
    pub fn list(joints: &[&str], positions: &[f64]) -> Vec<Self> {
        joints
            .iter()
            .zip(positions)
            .map(|(joint, &position)| Self {
                joint: (*joint).to_owned(),
                position,
            })
            .collect()
    }
}

/// Settings for a [`crate::ControlLoop`].
///
/// The defaults drive the built-in 7-DOF arm from its ready pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// DLS damping λ. Must be finite and positive.
    pub damping: f64,
    pub task: TaskSpace,
    /// Frame the chain starts below. `None` means the world.
    pub root_frame: Option<String>,
    pub tip_frame: String,
    /// Starting joint values by name. Joints not listed start at zero.
    pub seed: Vec<JointSeed>,
    pub command: CommandSpec,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            damping: 1e-6,
            task: TaskSpace::Full,
            root_frame: None,
            tip_frame: ARM_TIP.to_owned(),
            seed: JointSeed::list(&ARM_JOINTS, &ARM_READY),
            command: CommandSpec::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_overrides_selected_fields() {
        let config: ControlConfig = serde_json::from_str(
            r#"{
                "damping": 0.01,
                "task": "position",
                "seed": [{ "joint": "right_e1", "position": 1.0 }]
            }"#,
        )
        .unwrap();
        assert_eq!(config.damping, 0.01);
        assert_eq!(config.task, TaskSpace::Position);
        assert_eq!(config.tip_frame, ARM_TIP);
        assert_eq!(config.seed.len(), 1);
        assert_eq!(config.command, CommandSpec::default());
    }

    #[test]
    fn test_default_seeds_every_arm_joint() {
        let config = ControlConfig::default();
        let names: Vec<&str> = config.seed.iter().map(|s| s.joint.as_str()).collect();
        assert_eq!(names, ARM_JOINTS);
    }
}
