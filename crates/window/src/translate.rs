//! winit events to dispatcher events

use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

use dispatch::{InputEvent, Key, MouseButton};

/// Pixels per scroll line for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f64 = 20.0;

/// Translate one window event. Events the dispatcher has no use for, key
/// repeats and unmapped keys among them, yield `None`.
#[must_use]
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(InputEvent::CloseRequested),
        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),
        WindowEvent::KeyboardInput { event, .. } if !event.repeat => {
            let key = translate_key(&event.logical_key)?;
            Some(match event.state {
                ElementState::Pressed => InputEvent::KeyPressed(key),
                ElementState::Released => InputEvent::KeyReleased(key),
            })
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::MouseButton {
            button: translate_button(*button),
            pressed: *state == ElementState::Pressed,
        }),
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel {
            delta: scroll_lines(*delta),
        }),
        _ => None,
    }
}

#[must_use]
pub fn translate_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Named(named) => match named {
            NamedKey::Escape => Some(Key::Escape),
            NamedKey::Enter => Some(Key::Enter),
            NamedKey::Space => Some(Key::Space),
            NamedKey::Tab => Some(Key::Tab),
            NamedKey::Backspace => Some(Key::Backspace),
            NamedKey::ArrowUp => Some(Key::Up),
            NamedKey::ArrowDown => Some(Key::Down),
            NamedKey::ArrowLeft => Some(Key::Left),
            NamedKey::ArrowRight => Some(Key::Right),
            _ => None,
        },
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => Some(Key::Space),
                (Some(c), None) => c.to_lowercase().next().map(Key::Char),
                _ => None,
            }
        }
        _ => None,
    }
}

#[must_use]
pub fn translate_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Other(3),
        WinitButton::Forward => MouseButton::Other(4),
        WinitButton::Other(code) => MouseButton::Other(code),
    }
}

/// Vertical scroll in lines, positive away from the user.
#[must_use]
pub fn scroll_lines(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
    }
}
