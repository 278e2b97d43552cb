//! The kinematic capability consumed by the control loop
//!
//! A [`KinematicProvider`] owns the mechanism description. The controller
//! only ever reads topology through it and writes configuration values
//! through [`KinematicProvider::config_set`].

use nalgebra::DMatrix;

use crate::config;
use crate::error::KinematicsError;
use crate::pose::Pose;

/// Number of rows in a full spatial Jacobian: linear (x, y, z) then angular (x, y, z).
pub const TWIST_DIM: usize = 6;

/// Index of an entry in the configuration vector.
pub type ConfigId = usize;

/// Identifier of a frame in a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl FrameId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Relative and absolute poses for every frame, indexed by [`FrameId`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransformSet {
    relative: Vec<Pose>,
    absolute: Vec<Pose>,
}

impl TransformSet {
    #[must_use]
    pub fn new(relative: Vec<Pose>, absolute: Vec<Pose>) -> Self {
        debug_assert_eq!(relative.len(), absolute.len());
        Self { relative, absolute }
    }

    /// Pose of each frame relative to its parent.
    #[must_use]
    pub fn relative(&self) -> &[Pose] {
        &self.relative
    }

    /// Pose of each frame relative to the world.
    #[must_use]
    pub fn absolute(&self) -> &[Pose] {
        &self.absolute
    }

    #[must_use]
    pub fn absolute_of(&self, frame: FrameId) -> Option<&Pose> {
        self.absolute.get(frame.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.absolute.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.absolute.is_empty()
    }
}

/// An ordered run of frames from a root down to an end frame, together with
/// the configuration entries that move them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubChain {
    frames: Vec<FrameId>,
    configs: Vec<ConfigId>,
    end: FrameId,
}

impl SubChain {
    #[must_use]
    pub fn new(frames: Vec<FrameId>, configs: Vec<ConfigId>, end: FrameId) -> Self {
        Self {
            frames,
            configs,
            end,
        }
    }

    /// Frames below the root, ordered root to tip.
    #[must_use]
    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    /// Active configuration entries, ordered root to tip. Jacobian column `i`
    /// corresponds to `configs()[i]`.
    #[must_use]
    pub fn configs(&self) -> &[ConfigId] {
        &self.configs
    }

    #[must_use]
    pub fn config_count(&self) -> usize {
        self.configs.len()
    }

    #[must_use]
    pub fn end_frame(&self) -> FrameId {
        self.end
    }
}

pub trait KinematicProvider {
    /// Total number of configuration values.
    fn config_count(&self) -> usize;

    fn frame_count(&self) -> usize;

    /// Resolve a frame by name.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::NotFound`] when no frame has this name.
    fn frame_id(&self, name: &str) -> Result<FrameId, KinematicsError>;

    /// Resolve configuration entries by joint name, preserving order.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::NotFound`] for the first unknown name.
    fn config_ids(&self, names: &[&str]) -> Result<Vec<ConfigId>, KinematicsError>;

    /// Compute relative and absolute poses of every frame for configuration `q`.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::Dimension`] when `q.len() != config_count()`.
    fn forward_kinematics(&self, q: &[f64]) -> Result<TransformSet, KinematicsError>;

    /// Select the chain from `root` (the world when `None`) down to `tip`.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::Disconnected`] when `tip` is not below `root`.
    fn chain(&self, root: Option<FrameId>, tip: FrameId) -> Result<SubChain, KinematicsError>;

    /// Spatial Jacobian of the chain's end frame, `TWIST_DIM x chain.config_count()`,
    /// evaluated at the absolute poses `absolute`.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::Dimension`] when `absolute` does not hold one pose per frame.
    fn jacobian(&self, chain: &SubChain, absolute: &[Pose]) -> Result<DMatrix<f64>, KinematicsError>;

    /// Read the entries `ids` of the full configuration `q`.
    ///
    /// # Errors
    ///
    /// Dimension or range errors when `q` or `ids` do not fit this provider.
    fn config_get(&self, ids: &[ConfigId], q: &[f64]) -> Result<Vec<f64>, KinematicsError> {
        KinematicsError::check_len("configuration vector", self.config_count(), q.len())?;
        config::gather(ids, q)
    }

    /// Write `values` into the entries `ids` of the full configuration `q`.
    ///
    /// # Errors
    ///
    /// Dimension or range errors when `q`, `ids` or `values` do not fit.
    fn config_set(&self, ids: &[ConfigId], values: &[f64], q: &mut [f64]) -> Result<(), KinematicsError> {
        KinematicsError::check_len("configuration vector", self.config_count(), q.len())?;
        config::scatter(ids, values, q)
    }
}
