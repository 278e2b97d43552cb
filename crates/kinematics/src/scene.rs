//! # Scene Graph Provider
//!
//! A tree of named frames. Each frame has an optional parent, a fixed offset
//! from the parent and a joint that moves it relative to that offset.
//! Revolute and prismatic frames each own one configuration entry, named
//! after the frame.
//!
//! Frames are stored parent-first after [`SceneGraphBuilder::build`], so
//! forward kinematics is a single pass.

use std::collections::HashMap;

use glam::{DQuat, DVec3};
use nalgebra::DMatrix;
use tracing::debug;

use crate::error::KinematicsError;
use crate::pose::Pose;
use crate::provider::{ConfigId, FrameId, KinematicProvider, SubChain, TransformSet, TWIST_DIM};

/// How a frame moves relative to its offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointKind {
    Fixed,
    /// Rotation about `axis`, expressed in the offset frame.
    Revolute { axis: DVec3 },
    /// Translation along `axis`, expressed in the offset frame.
    Prismatic { axis: DVec3 },
}

impl JointKind {
    fn motion(self, value: f64) -> Pose {
        match self {
            JointKind::Fixed => Pose::IDENTITY,
            JointKind::Revolute { axis } => Pose::from_rotation(DQuat::from_axis_angle(axis, value)),
            JointKind::Prismatic { axis } => Pose::from_translation(axis * value),
        }
    }

    fn is_actuated(self) -> bool {
        !matches!(self, JointKind::Fixed)
    }
}

#[derive(Clone, Debug)]
struct Frame {
    name: String,
    parent: Option<FrameId>,
    offset: Pose,
    joint: JointKind,
    config: Option<ConfigId>,
}

#[derive(Clone, Debug)]
struct PendingFrame {
    name: String,
    parent: Option<String>,
    offset: Pose,
    joint: JointKind,
}

/// Collects frame definitions in any order and validates them into a [`SceneGraph`].
#[derive(Clone, Debug, Default)]
pub struct SceneGraphBuilder {
    frames: Vec<PendingFrame>,
}

impl SceneGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frame(mut self, name: &str, parent: Option<&str>, offset: Pose, joint: JointKind) -> Self {
        self.frames.push(PendingFrame {
            name: name.to_owned(),
            parent: parent.map(str::to_owned),
            offset,
            joint,
        });
        self
    }

    #[must_use]
    pub fn fixed(self, name: &str, parent: Option<&str>, offset: Pose) -> Self {
        self.frame(name, parent, offset, JointKind::Fixed)
    }

    #[must_use]
    pub fn revolute(self, name: &str, parent: Option<&str>, offset: Pose, axis: DVec3) -> Self {
        self.frame(name, parent, offset, JointKind::Revolute { axis })
    }

    #[must_use]
    pub fn prismatic(self, name: &str, parent: Option<&str>, offset: Pose, axis: DVec3) -> Self {
        self.frame(name, parent, offset, JointKind::Prismatic { axis })
    }

    /// Validate names and parents, normalize axes and order frames parent-first.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::Duplicate`] for a repeated frame name
    /// - [`KinematicsError::NotFound`] for an unknown parent
    /// - [`KinematicsError::InvalidAxis`] for a zero joint axis
    /// - [`KinematicsError::Cycle`] when parents loop
    pub fn build(self) -> Result<SceneGraph, KinematicsError> {
        let mut declared: HashMap<&str, usize> = HashMap::with_capacity(self.frames.len());
        for (i, frame) in self.frames.iter().enumerate() {
            if declared.insert(frame.name.as_str(), i).is_some() {
                return Err(KinematicsError::Duplicate(frame.name.clone()));
            }
        }

        let mut parents = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            let parent = match frame.parent.as_deref() {
                Some(name) => Some(
                    *declared
                        .get(name)
                        .ok_or_else(|| KinematicsError::not_found("frame", name))?,
                ),
                None => None,
            };
            parents.push(parent);
        }

        // Parent-first order; anything left unplaced after a full sweep is on a cycle.
        let mut order = Vec::with_capacity(self.frames.len());
        let mut placed = vec![false; self.frames.len()];
        while order.len() < self.frames.len() {
            let before = order.len();
            for (i, parent) in parents.iter().enumerate() {
                if !placed[i] && parent.map_or(true, |p| placed[p]) {
                    placed[i] = true;
                    order.push(i);
                }
            }
            if order.len() == before {
                let stuck = placed.iter().position(|done| !done).unwrap_or_default();
                return Err(KinematicsError::Cycle(self.frames[stuck].name.clone()));
            }
        }

        let mut new_index = vec![0; self.frames.len()];
        for (position, &old) in order.iter().enumerate() {
            new_index[old] = position;
        }

        let mut frames = Vec::with_capacity(order.len());
        let mut config_names = Vec::new();
        for &old in &order {
            let pending = &self.frames[old];
            let joint = normalize_joint(&pending.name, pending.joint)?;
            let config = if joint.is_actuated() {
                config_names.push(pending.name.clone());
                Some(config_names.len() - 1)
            } else {
                None
            };
            frames.push(Frame {
                name: pending.name.clone(),
                parent: parents[old].map(|p| FrameId(new_index[p])),
                offset: pending.offset,
                joint,
                config,
            });
        }

        let frame_index = frames
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), FrameId(i)))
            .collect();
        let config_index = config_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        debug!(
            frames = frames.len(),
            configs = config_names.len(),
            "scene graph indexed"
        );

        Ok(SceneGraph {
            frames,
            frame_index,
            config_names,
            config_index,
        })
    }
}

fn normalize_joint(name: &str, joint: JointKind) -> Result<JointKind, KinematicsError> {
    let normalize = |axis: DVec3| {
        let unit = axis.normalize_or_zero();
        if unit == DVec3::ZERO {
            Err(KinematicsError::InvalidAxis(name.to_owned()))
        } else {
            Ok(unit)
        }
    };
    Ok(match joint {
        JointKind::Fixed => JointKind::Fixed,
        JointKind::Revolute { axis } => JointKind::Revolute {
            axis: normalize(axis)?,
        },
        JointKind::Prismatic { axis } => JointKind::Prismatic {
            axis: normalize(axis)?,
        },
    })
}

/// Reference [`KinematicProvider`] over a tree of frames.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    frames: Vec<Frame>,
    frame_index: HashMap<String, FrameId>,
    config_names: Vec<String>,
    config_index: HashMap<String, ConfigId>,
}

impl SceneGraph {
    #[must_use]
    pub fn builder() -> SceneGraphBuilder {
        SceneGraphBuilder::new()
    }

    #[must_use]
    pub fn frame_name(&self, frame: FrameId) -> Option<&str> {
        self.frames.get(frame.index()).map(|f| f.name.as_str())
    }

    #[must_use]
    pub fn config_name(&self, id: ConfigId) -> Option<&str> {
        self.config_names.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn parent(&self, frame: FrameId) -> Option<FrameId> {
        self.frames.get(frame.index()).and_then(|f| f.parent)
    }
}

impl KinematicProvider for SceneGraph {
    fn config_count(&self) -> usize {
        self.config_names.len()
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame_id(&self, name: &str) -> Result<FrameId, KinematicsError> {
        self.frame_index
            .get(name)
            .copied()
            .ok_or_else(|| KinematicsError::not_found("frame", name))
    }

    fn config_ids(&self, names: &[&str]) -> Result<Vec<ConfigId>, KinematicsError> {
        names
            .iter()
            .map(|&name| {
                self.config_index
                    .get(name)
                    .copied()
                    .ok_or_else(|| KinematicsError::not_found("joint", name))
            })
            .collect()
    }

    fn forward_kinematics(&self, q: &[f64]) -> Result<TransformSet, KinematicsError> {
        KinematicsError::check_len("configuration vector", self.config_count(), q.len())?;

        let mut relative = Vec::with_capacity(self.frames.len());
        let mut absolute: Vec<Pose> = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            let value = frame.config.map_or(0.0, |c| q[c]);
            let rel = frame.offset * frame.joint.motion(value);
            // Parents always precede children, so the parent's absolute pose is ready.
            let abs = match frame.parent {
                Some(parent) => absolute[parent.index()] * rel,
                None => rel,
            };
            relative.push(rel);
            absolute.push(abs);
        }
        Ok(TransformSet::new(relative, absolute))
    }

    fn chain(&self, root: Option<FrameId>, tip: FrameId) -> Result<SubChain, KinematicsError> {
        let name_of = |id: FrameId| {
            self.frame_name(id)
                .map_or_else(|| format!("#{}", id.index()), str::to_owned)
        };
        if tip.index() >= self.frames.len() {
            return Err(KinematicsError::not_found("frame", name_of(tip)));
        }

        let mut frames = Vec::new();
        let mut cursor = Some(tip);
        while cursor != root {
            let Some(frame) = cursor else {
                return Err(KinematicsError::Disconnected {
                    root: root.map_or_else(|| "world".to_owned(), name_of),
                    tip: name_of(tip),
                });
            };
            frames.push(frame);
            cursor = self.frames[frame.index()].parent;
        }
        frames.reverse();

        let configs = frames
            .iter()
            .filter_map(|f| self.frames[f.index()].config)
            .collect();
        Ok(SubChain::new(frames, configs, tip))
    }

    fn jacobian(&self, chain: &SubChain, absolute: &[Pose]) -> Result<DMatrix<f64>, KinematicsError> {
        KinematicsError::check_len("absolute transforms", self.frames.len(), absolute.len())?;

        let frame_at = |id: FrameId| {
            self.frames.get(id.index()).ok_or(KinematicsError::IndexOutOfRange {
                index: id.index(),
                len: self.frames.len(),
            })
        };
        frame_at(chain.end_frame())?;
        let actuated = chain
            .frames()
            .iter()
            .map(|&id| frame_at(id).map(|frame| frame.joint != JointKind::Fixed))
            .collect::<Result<Vec<_>, _>>()?;
        KinematicsError::check_len(
            "actuated frames in chain",
            chain.config_count(),
            actuated.into_iter().filter(|&a| a).count(),
        )?;

        let end = absolute[chain.end_frame().index()].translation;
        let mut jacobian = DMatrix::zeros(TWIST_DIM, chain.config_count());
        let mut column = 0;
        for &frame_id in chain.frames() {
            let frame = &self.frames[frame_id.index()];
            let pose = &absolute[frame_id.index()];
            let (linear, angular) = match frame.joint {
                JointKind::Fixed => continue,
                JointKind::Revolute { axis } => {
                    // Rotation about the joint axis leaves both the axis and the origin in place.
                    let axis = pose.transform_vector(axis);
                    (axis.cross(end - pose.translation), axis)
                }
                JointKind::Prismatic { axis } => (pose.transform_vector(axis), DVec3::ZERO),
            };
            for (row, value) in linear.to_array().into_iter().chain(angular.to_array()).enumerate() {
                jacobian[(row, column)] = value;
            }
            column += 1;
        }
        Ok(jacobian)
    }
}
