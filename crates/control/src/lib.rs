#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # VELO Control
//!
//! Velocity-level inverse kinematics driven by measured frame time.
//!
//! Each step maps a commanded task-space [`Twist`] to joint velocities with a
//! damped least squares solve ([`DlsSolver`]) over the chain's Jacobian, then
//! integrates those velocities over the time since the previous step and
//! writes the result back into the configuration vector.
//!
//! ## Key Components
//!
//! -   **[`solver`]:** damped least squares, the damped pseudo-inverse and
//!     null-space projection.
//! -   **[`integrator`]:** explicit Euler on a configuration subset.
//! -   **[`ControlLoop`]:** setup validation and the per-frame step, with an
//!     adapter for the dispatch crate's display callback.
//! -   **[`twist`]:** twists, task-space row selection and velocity commands.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use control::{ControlConfig, ControlLoop, OscillatingTwist};
//! use kinematics::presets;
//!
//! let arm = presets::seven_dof_arm()?;
//! let mut control = ControlLoop::new(arm, &ControlConfig::default(), Box::new(OscillatingTwist::vertical()))?;
//! let report = control.step(0.0, 0.01)?;
//! println!("residual {}", report.residual);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod integrator;
pub mod solver;
pub mod twist;

pub use config::{ControlConfig, JointSeed};
pub use driver::{ControlLoop, StepReport};
pub use error::ControlError;
pub use integrator::{advance, integrate};
pub use solver::{damped_pseudo_inverse, solve_with_nullspace, DlsSolver, SolveOutput};
pub use twist::{CommandSpec, ConstantTwist, OscillatingTwist, TaskSpace, Twist, VelocityCommand};
