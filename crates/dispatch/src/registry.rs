//! Handler bindings
//!
//! Each trigger maps to an ordered chain of handlers. Binding the same
//! trigger twice appends to the chain; nothing is ever replaced. A handler
//! carries its own context in its captures and also receives the loop's
//! shared context `S`.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::event::Trigger;
use crate::params::FrameParams;

/// Returned by handlers to stop or continue dispatch of the current event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Handled,
    Continue,
}

type Handler<S> = Box<dyn FnMut(&mut S, &mut FrameParams<'_>) -> Propagation>;

pub struct Registry<S> {
    bindings: HashMap<Trigger, Vec<Handler<S>>>,
}

impl<S> Registry<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Append `handler` to the chain for `trigger`.
    pub fn bind<F>(&mut self, trigger: impl Into<Trigger>, handler: F)
    where
        F: FnMut(&mut S, &mut FrameParams<'_>) -> Propagation + 'static,
    {
        let trigger = trigger.into();
        let chain = self.bindings.entry(trigger).or_default();
        chain.push(Box::new(handler));
        trace!(?trigger, position = chain.len(), "handler bound");
    }

    /// Number of handlers bound to `trigger`.
    #[must_use]
    pub fn handlers_for(&self, trigger: impl Into<Trigger>) -> usize {
        self.bindings.get(&trigger.into()).map_or(0, Vec::len)
    }

    /// Total number of bound handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the handlers matching the event in `params`: key bindings first,
    /// then kind bindings. Returns whether a handler reported
    /// [`Propagation::Handled`].
    pub fn dispatch(&mut self, ctx: &mut S, params: &mut FrameParams<'_>) -> bool {
        let Some(event) = params.event().copied() else {
            return false;
        };
        let key = event.pressed_key().map(Trigger::Key);
        let kind = Trigger::Kind(event.kind());

        for trigger in key.into_iter().chain(std::iter::once(kind)) {
            let Some(chain) = self.bindings.get_mut(&trigger) else {
                continue;
            };
            for handler in chain.iter_mut() {
                if handler(ctx, params) == Propagation::Handled {
                    trace!(?trigger, "event handled");
                    return true;
                }
            }
        }
        false
    }
}

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.bindings.iter().map(|(trigger, chain)| (trigger, chain.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, InputEvent, Key};
    use std::time::Instant;

    type Log = Vec<&'static str>;

    fn dispatch_one(registry: &mut Registry<Log>, event: InputEvent) -> (bool, Log) {
        let now = Instant::now();
        let mut params = FrameParams::new(false, now, now, now, false);
        params.set_event(Some(&event));
        let mut log = Vec::new();
        let handled = registry.dispatch(&mut log, &mut params);
        (handled, log)
    }

    #[test]
    fn test_key_bindings_run_before_kind_bindings() {
        let mut registry: Registry<Log> = Registry::new();
        registry.bind(EventKind::KeyPressed, |log: &mut Log, _| {
            log.push("kind");
            Propagation::Continue
        });
        registry.bind(Key::Space, |log: &mut Log, _| {
            log.push("key");
            Propagation::Continue
        });

        let (handled, log) = dispatch_one(&mut registry, InputEvent::KeyPressed(Key::Space));
        assert!(!handled);
        assert_eq!(log, vec!["key", "kind"]);
    }

    #[test]
    fn test_duplicate_bindings_form_a_chain() {
        let mut registry: Registry<Log> = Registry::new();
        for name in ["first", "second", "third"] {
            registry.bind(Key::Char('x'), move |log: &mut Log, _| {
                log.push(name);
                if name == "second" {
                    Propagation::Handled
                } else {
                    Propagation::Continue
                }
            });
        }
        assert_eq!(registry.handlers_for(Key::Char('x')), 3);

        let (handled, log) = dispatch_one(&mut registry, InputEvent::KeyPressed(Key::Char('x')));
        assert!(handled);
        assert_eq!(log, vec!["first", "second"]);
    }

    #[test]
    fn test_key_release_skips_key_bindings() {
        let mut registry: Registry<Log> = Registry::new();
        registry.bind(Key::Space, |log: &mut Log, _| {
            log.push("key");
            Propagation::Handled
        });
        let (handled, log) = dispatch_one(&mut registry, InputEvent::KeyReleased(Key::Space));
        assert!(!handled);
        assert!(log.is_empty());
    }

    #[test]
    fn test_no_event_means_no_dispatch() {
        let mut registry: Registry<Log> = Registry::new();
        registry.bind(EventKind::CloseRequested, |_, _| {
            Propagation::Handled
        });
        let now = Instant::now();
        let mut params = FrameParams::new(false, now, now, now, false);
        assert!(!registry.dispatch(&mut Vec::new(), &mut params));
    }
}
