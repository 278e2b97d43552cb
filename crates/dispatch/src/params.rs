//! Per-iteration parameters
//!
//! A [`FrameParams`] lives for one loop iteration. It borrows the event being
//! dispatched, so nothing handed to a handler or to the display callback can
//! outlive the iteration it describes.

use std::time::{Duration, Instant};

use crate::event::InputEvent;

#[derive(Debug)]
pub struct FrameParams<'a> {
    first: bool,
    initial: Instant,
    last: Instant,
    now: Instant,
    update: bool,
    quit: bool,
    event: Option<&'a InputEvent>,
}

impl<'a> FrameParams<'a> {
    #[must_use]
    pub fn new(first: bool, initial: Instant, last: Instant, now: Instant, update: bool) -> Self {
        Self {
            first,
            initial,
            last,
            now,
            update,
            quit: false,
            event: None,
        }
    }

    /// Whether this is the loop's first iteration.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.first
    }

    /// The time sampled for this iteration.
    #[must_use]
    pub fn time_now(&self) -> Instant {
        self.now
    }

    /// The time sampled for the previous iteration; equal to [`Self::time_now`]
    /// on the first iteration.
    #[must_use]
    pub fn time_last(&self) -> Instant {
        self.last
    }

    /// The time sampled for the first iteration.
    #[must_use]
    pub fn time_initial(&self) -> Instant {
        self.initial
    }

    /// Time since the first iteration.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now.saturating_duration_since(self.initial)
    }

    /// Time since the previous iteration. Never negative.
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.now.saturating_duration_since(self.last)
    }

    #[must_use]
    pub fn update_requested(&self) -> bool {
        self.update
    }

    pub fn request_update(&mut self) {
        self.update = true;
    }

    /// Stop the loop after this iteration completes.
    pub fn set_quit(&mut self) {
        self.quit = true;
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The event being dispatched; `None` inside the display callback.
    #[must_use]
    pub fn event(&self) -> Option<&'a InputEvent> {
        self.event
    }

    pub(crate) fn set_event(&mut self, event: Option<&'a InputEvent>) {
        self.event = event;
    }
}
