//! Input event types delivered by the host.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// One of the four arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    pub const ALL: [ArrowKey; 4] = [ArrowKey::Left, ArrowKey::Right, ArrowKey::Up, ArrowKey::Down];

    /// Unit direction in board coordinates (y grows downwards).
    pub fn direction(self) -> Vec2 {
        match self {
            ArrowKey::Left => Vec2::new(-1.0, 0.0),
            ArrowKey::Right => Vec2::new(1.0, 0.0),
            ArrowKey::Up => Vec2::new(0.0, -1.0),
            ArrowKey::Down => Vec2::new(0.0, 1.0),
        }
    }
}

/// Keys the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Arrow(ArrowKey),
    Delete,
    Backspace,
    Escape,
    /// A printable key, lowercase.
    Character(char),
}

impl Key {
    /// Build a character key, normalising case.
    pub fn character(c: char) -> Self {
        Key::Character(c.to_ascii_lowercase())
    }

    pub fn arrow(&self) -> Option<ArrowKey> {
        match self {
            Key::Arrow(arrow) => Some(*arrow),
            _ => None,
        }
    }

    /// Parse a host key name such as `"ArrowLeft"`, `"Delete"` or `"z"`.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name {
            "ArrowLeft" | "Left" => Key::Arrow(ArrowKey::Left),
            "ArrowRight" | "Right" => Key::Arrow(ArrowKey::Right),
            "ArrowUp" | "Up" => Key::Arrow(ArrowKey::Up),
            "ArrowDown" | "Down" => Key::Arrow(ArrowKey::Down),
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" | "Esc" => Key::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::character(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// A pointer sample with the modifier state at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerInput {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(position: Point, modifiers: Modifiers) -> Self {
        Self {
            position,
            modifiers,
        }
    }
}

/// Discrete input event, in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        input: PointerInput,
        button: MouseButton,
    },
    PointerMove {
        input: PointerInput,
    },
    PointerUp {
        input: PointerInput,
        button: MouseButton,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    Wheel {
        input: PointerInput,
        delta: Vec2,
    },
}
