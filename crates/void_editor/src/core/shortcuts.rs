//! Global keyboard shortcuts.

use std::fmt;
use std::str::FromStr;

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Command key on macOS, treated like ctrl
    pub meta: bool,
}

impl Modifiers {
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A pressed character key and its modifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key as typed; compared case-insensitively
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Unmodified key press.
    pub fn key(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::default())
    }
}

impl FromStr for KeyChord {
    type Err = String;

    /// Parse chords written like `Ctrl+Shift+D`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::default();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                "cmd" | "meta" => modifiers.meta = true,
                "" => return Err(format!("Empty key in {:?}", s)),
                _ if key.is_none() => key = Some(part.to_string()),
                _ => return Err(format!("More than one key in {:?}", s)),
            }
        }

        key.map(|key| Self { key, modifiers })
            .ok_or_else(|| format!("No key in {:?}", s))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.meta {
            f.write_str("Cmd+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        f.write_str(&self.key.to_uppercase())
    }
}

/// Editor actions reachable from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Ctrl+Shift+D - duplicate the current game object
    DuplicateObject,
    /// F - focus the camera on the current game object
    FocusCamera,
    /// Ctrl+Shift+Z
    Redo,
    /// Ctrl+Z
    Undo,
}

impl Shortcut {
    /// Map a key press to its action.
    pub fn from_chord(chord: &KeyChord) -> Option<Self> {
        let ctrl = chord.modifiers.command();
        let shift = chord.modifiers.shift;
        let key = chord.key.to_lowercase();

        match key.as_str() {
            "d" if ctrl && shift => Some(Shortcut::DuplicateObject),
            "z" if ctrl && shift => Some(Shortcut::Redo),
            "z" if ctrl => Some(Shortcut::Undo),
            "f" if !ctrl => Some(Shortcut::FocusCamera),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Shortcut::DuplicateObject => "Duplicate Object",
            Shortcut::FocusCamera => "Focus Camera",
            Shortcut::Redo => "Redo",
            Shortcut::Undo => "Undo",
        }
    }
}
