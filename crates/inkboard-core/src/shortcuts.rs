//! Keyboard shortcut registry.

use crate::input::{Key, Modifiers};

/// Editor-level action a shortcut triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Undo,
    Redo,
    SelectAll,
    Copy,
    Cut,
    Paste,
    Duplicate,
    Delete,
    Cancel,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub command: EditorCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: Key,
        ctrl: bool,
        shift: bool,
        command: EditorCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Whether this shortcut fires for `key` with `modifiers`.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == key && self.ctrl == modifiers.command() && self.shift == modifiers.shift
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(match self.key {
            Key::Character(c) => c.to_ascii_uppercase().to_string(),
            other => format!("{:?}", other),
        });
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
#[derive(Debug, Clone)]
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new(Self::defaults())
    }
}

impl ShortcutRegistry {
    pub fn new(shortcuts: Vec<Shortcut>) -> Self {
        Self { shortcuts }
    }

    /// Built-in bindings.
    pub fn defaults() -> Vec<Shortcut> {
        use EditorCommand as C;
        vec![
            Shortcut::new(Key::Character('z'), true, false, C::Undo, "Undo"),
            Shortcut::new(Key::Character('z'), true, true, C::Redo, "Redo"),
            Shortcut::new(Key::Character('y'), true, false, C::Redo, "Redo"),
            Shortcut::new(Key::Character('a'), true, false, C::SelectAll, "Select all shapes"),
            Shortcut::new(Key::Character('c'), true, false, C::Copy, "Copy shapes"),
            Shortcut::new(Key::Character('x'), true, false, C::Cut, "Cut shapes"),
            Shortcut::new(Key::Character('v'), true, false, C::Paste, "Paste shapes"),
            Shortcut::new(Key::Character('d'), true, false, C::Duplicate, "Duplicate selection"),
            Shortcut::new(Key::Delete, false, false, C::Delete, "Delete selected shapes"),
            Shortcut::new(Key::Backspace, false, false, C::Delete, "Delete selected shapes"),
            Shortcut::new(Key::Escape, false, false, C::Cancel, "Cancel current action"),
        ]
    }

    pub fn all(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// Command bound to `key` with `modifiers`, if any.
    pub fn lookup(&self, key: Key, modifiers: Modifiers) -> Option<EditorCommand> {
        self.shortcuts
            .iter()
            .find(|s| s.matches(key, modifiers))
            .map(|s| s.command)
    }
}
