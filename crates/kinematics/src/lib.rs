#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # VELO Kinematics
//!
//! The mechanism side of the velocity control loop.
//!
//! The control core never looks inside a mechanism. Everything it needs is
//! expressed by the [`KinematicProvider`] trait: configuration and frame
//! counts, forward kinematics, sub-chain selection, Jacobians and
//! configuration get/set restricted to a subset of degrees of freedom.
//!
//! ## Key Components
//!
//! -   **[`Pose`]:** rigid transform (unit quaternion + translation) used for
//!     every relative and absolute frame pose.
//! -   **[`KinematicProvider`]:** the capability consumed by the controller,
//!     together with [`SubChain`] and [`TransformSet`].
//! -   **[`SceneGraph`]:** a reference provider built from a tree of fixed,
//!     revolute and prismatic frames.
//! -   **[`presets`]:** ready-made mechanisms, including a 7-DOF arm.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kinematics::{presets, KinematicProvider};
//!
//! let arm = presets::seven_dof_arm()?;
//! let tip = arm.frame_id(presets::ARM_TIP)?;
//! let chain = arm.chain(None, tip)?;
//! let q = vec![0.0; arm.config_count()];
//! let tf = arm.forward_kinematics(&q)?;
//! let jacobian = arm.jacobian(&chain, tf.absolute())?;
//! ```

pub mod config;
pub mod error;
pub mod pose;
pub mod presets;
pub mod provider;
pub mod scene;

pub use config::{gather, scatter};
pub use error::KinematicsError;
pub use pose::Pose;
pub use provider::{ConfigId, FrameId, KinematicProvider, SubChain, TransformSet, TWIST_DIM};
pub use scene::{JointKind, SceneGraph, SceneGraphBuilder};
