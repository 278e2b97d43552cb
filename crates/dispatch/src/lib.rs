#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # VELO Event Dispatch
//!
//! A single-threaded, cooperative display loop.
//!
//! Every iteration of [`EventDispatcher::run`] polls the [`EventSource`] for
//! input (waiting a bounded time when nothing needs redrawing), routes each
//! event through the handler [`Registry`], and then calls the display
//! callback exactly once with a [`FrameParams`] describing the iteration.
//! Setting the quit flag from any handler or from the callback ends the loop
//! once the current iteration is complete.
//!
//! ## Dispatch order
//!
//! For each event, handlers bound to the pressed key run first, then handlers
//! bound to the event kind. Within one trigger, handlers run in the order they
//! were bound. The first handler returning [`Propagation::Handled`] stops
//! dispatch for that event; if none does, default processing applies
//! (closing the window quits, view changes request a redraw).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dispatch::{DispatchConfig, EventDispatcher, Key, Propagation, ScriptedSource};
//!
//! let mut dispatcher = EventDispatcher::new(DispatchConfig::default());
//! dispatcher.bind_key(Key::Escape, |_: &mut u32, params| {
//!     params.set_quit();
//!     Propagation::Handled
//! });
//! let mut frames = 0_u32;
//! let mut source = ScriptedSource::idle(10);
//! dispatcher.run(&mut source, &(), &mut frames, |frames, _, _| {
//!     *frames += 1;
//!     true
//! });
//! ```

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod params;
pub mod registry;
pub mod source;

pub use clock::{Clock, StepClock, SystemClock};
pub use config::DispatchConfig;
pub use dispatcher::{EventDispatcher, LoopSummary};
pub use event::{EventKind, InputEvent, Key, MouseButton, Trigger};
pub use params::FrameParams;
pub use registry::{Propagation, Registry};
pub use source::{EventSource, ScriptedSource};
