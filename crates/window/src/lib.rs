#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # VELO Window
//!
//! A winit window exposed as a [`dispatch::EventSource`].
//!
//! The dispatcher owns the loop; this crate never calls `EventLoop::run`.
//! Each poll pumps the platform event loop once with the dispatcher's bounded
//! timeout and translates window events into [`dispatch::InputEvent`]s.

pub mod error;
pub mod source;
pub mod translate;

pub use error::WindowError;
pub use source::{WindowConfig, WinitSource};
