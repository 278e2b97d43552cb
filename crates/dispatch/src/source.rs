//! Where input events come from
//!
//! The dispatcher treats its [`EventSource`] as an opaque window handle: it
//! asks for pending events, bounded by a timeout, and signals when a frame
//! has been drawn.

use std::collections::VecDeque;
use std::time::Duration;

use crate::event::InputEvent;

pub trait EventSource {
    /// Append pending events to `events`.
    ///
    /// Returns as soon as events are available, otherwise waits at most
    /// `timeout`. A zero timeout never blocks.
    fn poll(&mut self, timeout: Duration, events: &mut Vec<InputEvent>);

    /// Called after a display callback that asked for redraws.
    fn present(&mut self) {}
}

/// Replays a fixed script of event batches, one batch per poll.
///
/// Once the script is exhausted every poll yields
/// [`InputEvent::CloseRequested`], so a loop with default processing enabled
/// always terminates. Timeouts are recorded rather than slept.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<InputEvent>>,
    waits: Vec<Duration>,
    presented: usize,
}

impl ScriptedSource {
    #[must_use]
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<InputEvent>>,
    {
        Self {
            frames: frames.into_iter().collect(),
            waits: Vec::new(),
            presented: 0,
        }
    }

    /// `frames` polls without events, then close.
    #[must_use]
    pub fn idle(frames: usize) -> Self {
        Self::new(std::iter::repeat_with(Vec::new).take(frames))
    }

    /// Timeouts passed to each poll so far.
    #[must_use]
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Batches not yet delivered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedSource {
    fn poll(&mut self, timeout: Duration, events: &mut Vec<InputEvent>) {
        self.waits.push(timeout);
        match self.frames.pop_front() {
            Some(batch) => events.extend(batch),
            None => events.push(InputEvent::CloseRequested),
        }
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
