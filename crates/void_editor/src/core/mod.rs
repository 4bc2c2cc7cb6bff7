//! Core editor types and state management.
//!
//! This module contains the central `EditorState` and supporting types
//! that form the foundation of the editor.

mod config;
pub mod editor_state;
mod history;
mod shortcuts;

pub use config::{ConfigError, EditorConfig};
pub use editor_state::{EditorState, SessionEvent};
pub use history::EditHistory;
pub use shortcuts::{KeyChord, Modifiers, Shortcut};
