//! Time sources for the display loop

use std::time::{Duration, Instant};

pub trait Clock {
    /// Sample the current time. Called exactly once per loop iteration.
    fn now(&mut self) -> Instant;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// Deterministic time that advances by a fixed step on every sample.
///
/// The first sample returns the origin. Used for headless runs and tests.
#[derive(Clone, Copy, Debug)]
pub struct StepClock {
    origin: Instant,
    step: Duration,
    ticks: u32,
}

impl StepClock {
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            step,
            ticks: 0,
        }
    }

    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }
}

impl Clock for StepClock {
    fn now(&mut self) -> Instant {
        let now = self.origin + self.step * self.ticks;
        self.ticks = self.ticks.saturating_add(1);
        now
    }
}
