//! # VELO: velocity-level IK on a cooperative display loop
//!
//! ## Overview
//!
//! VELO drives an articulated mechanism toward a commanded task-space
//! velocity. Every display frame it computes the end-effector Jacobian,
//! solves for joint velocities with damped least squares, and integrates them
//! over the measured frame time. A single-threaded event dispatcher runs the
//! frames and routes keyboard and window input to handlers.
//!
//! ## The Crates
//!
//! -   **`velo`:** this crate. Configuration loading, key bindings and the
//!     executable, with headless and windowed modes.
//! -   **[`control`]:** the DLS solver, the integrator and the per-frame
//!     control loop.
//! -   **[`dispatch`]:** the event dispatcher, handler registry, clocks and
//!     event sources.
//! -   **[`kinematics`]:** the kinematic provider interface, a scene-graph
//!     implementation and the built-in 7-DOF arm.
//! -   **`window`:** a winit window as an event source (feature `window`).
//!
//! ## Getting Started
//!
//! Run `velo --headless --frames 200` for a windowless run with a fixed
//! 10 ms clock, or `velo` to open a window. `RUST_LOG=debug` shows setup
//! detail; `RUST_LOG=trace` logs every solve.

pub mod app;
pub mod config;

pub use control;
pub use dispatch;
pub use kinematics;
#[cfg(feature = "window")]
pub use window;
