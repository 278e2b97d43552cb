use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder};

use dispatch::{EventSource, InputEvent};

use crate::error::WindowError;
use crate::translate::translate_window_event;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "velo".to_owned(),
            width: 1024,
            height: 768,
        }
    }
}

/// A single window whose platform events are pumped on demand.
pub struct WinitSource {
    event_loop: EventLoop<()>,
    window: Window,
    exited: bool,
}

impl WinitSource {
    /// Open the window. Must be called on the main thread.
    ///
    /// # Errors
    ///
    /// [`WindowError`] when the platform refuses an event loop or a window.
    pub fn new(config: &WindowConfig) -> Result<Self, WindowError> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .build(&event_loop)?;
        info!(title = %config.title, width = config.width, height = config.height, "window opened");
        Ok(Self {
            event_loop,
            window,
            exited: false,
        })
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl EventSource for WinitSource {
    fn poll(&mut self, timeout: Duration, events: &mut Vec<InputEvent>) {
        if self.exited {
            events.push(InputEvent::CloseRequested);
            return;
        }

        let window_id = self.window.id();
        let status = self.event_loop.pump_events(Some(timeout), |event, _| {
            if let Event::WindowEvent { window_id: id, event } = event {
                if id == window_id {
                    events.extend(translate_window_event(&event));
                }
            }
        });

        if let PumpStatus::Exit(code) = status {
            debug!(code, "event loop exited");
            self.exited = true;
            events.push(InputEvent::CloseRequested);
        }
    }

    fn present(&mut self) {
        self.window.request_redraw();
    }
}

impl std::fmt::Debug for WinitSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitSource")
            .field("window", &self.window.id())
            .field("exited", &self.exited)
            .finish_non_exhaustive()
    }
}
