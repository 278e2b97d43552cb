//! Input events as seen by handlers
//!
//! Window backends translate their native events into [`InputEvent`]; the
//! dispatcher never sees backend types.

/// Keys that handlers can bind to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// A printable key, lowercased.
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The window asked to close, or the backend stopped.
    CloseRequested,
    Resized { width: u32, height: u32 },
    Focused(bool),
    KeyPressed(Key),
    KeyReleased(Key),
    CursorMoved { x: f64, y: f64 },
    MouseButton { button: MouseButton, pressed: bool },
    /// Vertical scroll, in lines.
    MouseWheel { delta: f64 },
}

/// Discriminant of [`InputEvent`], used for kind-level bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    CloseRequested,
    Resized,
    Focused,
    KeyPressed,
    KeyReleased,
    CursorMoved,
    MouseButton,
    MouseWheel,
}

impl InputEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::CloseRequested => EventKind::CloseRequested,
            InputEvent::Resized { .. } => EventKind::Resized,
            InputEvent::Focused(_) => EventKind::Focused,
            InputEvent::KeyPressed(_) => EventKind::KeyPressed,
            InputEvent::KeyReleased(_) => EventKind::KeyReleased,
            InputEvent::CursorMoved { .. } => EventKind::CursorMoved,
            InputEvent::MouseButton { .. } => EventKind::MouseButton,
            InputEvent::MouseWheel { .. } => EventKind::MouseWheel,
        }
    }

    /// The key for key-press events. Key bindings only fire on presses.
    #[must_use]
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            InputEvent::KeyPressed(key) => Some(*key),
            _ => None,
        }
    }
}

/// What a handler is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Kind(EventKind),
    Key(Key),
}

impl From<EventKind> for Trigger {
    fn from(kind: EventKind) -> Self {
        Trigger::Kind(kind)
    }
}

impl From<Key> for Trigger {
    fn from(key: Key) -> Self {
        Trigger::Key(key)
    }
}
