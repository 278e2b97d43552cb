//! # The display loop
//!
//! [`EventDispatcher::run`] owns the loop state for its whole duration:
//! timestamps, the first-call flag, the redraw flag and the quit flag. Each
//! iteration hands a fresh [`FrameParams`] to handlers and to the display
//! callback; the time is sampled once per iteration and shared by both.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::DispatchConfig;
use crate::event::{EventKind, InputEvent, Key, Trigger};
use crate::params::FrameParams;
use crate::registry::{Propagation, Registry};
use crate::source::EventSource;

/// Counters reported when the loop ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub iterations: u64,
    pub events: u64,
    pub handled: u64,
    pub display_calls: u64,
}

pub struct EventDispatcher<S> {
    config: DispatchConfig,
    registry: Registry<S>,
    clock: Box<dyn Clock>,
}

impl<S> EventDispatcher<S> {
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    #[must_use]
    pub fn with_clock(config: DispatchConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            registry: Registry::new(),
            clock: Box::new(clock),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    /// Bind `handler` to `trigger`. Repeated bindings for one trigger run in
    /// the order they were added.
    pub fn bind<F>(&mut self, trigger: impl Into<Trigger>, handler: F)
    where
        F: FnMut(&mut S, &mut FrameParams<'_>) -> Propagation + 'static,
    {
        self.registry.bind(trigger, handler);
    }

    pub fn bind_event<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut S, &mut FrameParams<'_>) -> Propagation + 'static,
    {
        self.registry.bind(kind, handler);
    }

    pub fn bind_key<F>(&mut self, key: Key, handler: F)
    where
        F: FnMut(&mut S, &mut FrameParams<'_>) -> Propagation + 'static,
    {
        self.registry.bind(key, handler);
    }

    /// Run the loop until a handler or the display callback sets quit.
    ///
    /// `source` is polled for input, `options` is passed through to
    /// `display` untouched, and `ctx` is the shared context given to every
    /// handler and to `display`. `display` runs once per iteration after
    /// event dispatch; its return value says whether redraws should continue,
    /// which decides whether the next poll may block.
    pub fn run<W, G, D>(&mut self, source: &mut W, options: &G, ctx: &mut S, mut display: D) -> LoopSummary
    where
        W: EventSource + ?Sized,
        G: ?Sized,
        D: FnMut(&mut S, &G, &mut FrameParams<'_>) -> bool,
    {
        info!(handlers = self.registry.len(), "entering display loop");

        let mut summary = LoopSummary::default();
        let mut events: Vec<InputEvent> = Vec::new();
        let mut initial: Option<Instant> = None;
        let mut last: Option<Instant> = None;
        let mut update = true;

        loop {
            events.clear();
            let wait = if update { Duration::ZERO } else { self.config.idle_wait() };
            source.poll(wait, &mut events);

            let now = self.clock.now();
            let first = initial.is_none();
            let initial_time = *initial.get_or_insert(now);
            let mut params = FrameParams::new(first, initial_time, last.unwrap_or(now), now, update);

            for event in &events {
                params.set_event(Some(event));
                summary.events += 1;
                trace!(?event, "dispatching");
                if self.registry.dispatch(ctx, &mut params) {
                    summary.handled += 1;
                } else if self.config.default_processing {
                    default_process(event, &mut params);
                }
            }
            params.set_event(None);

            update = display(ctx, options, &mut params);
            summary.display_calls += 1;
            if update {
                source.present();
            }

            last = Some(now);
            summary.iterations += 1;

            if params.quit_requested() {
                debug!(iteration = summary.iterations, "quit requested");
                break;
            }
        }

        info!(
            iterations = summary.iterations,
            events = summary.events,
            handled = summary.handled,
            "display loop finished"
        );
        summary
    }
}

fn default_process(event: &InputEvent, params: &mut FrameParams<'_>) {
    match event.kind() {
        EventKind::CloseRequested => params.set_quit(),
        EventKind::Resized
        | EventKind::Focused
        | EventKind::CursorMoved
        | EventKind::MouseButton
        | EventKind::MouseWheel => params.request_update(),
        EventKind::KeyPressed | EventKind::KeyReleased => {}
    }
}

impl<S> std::fmt::Debug for EventDispatcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
