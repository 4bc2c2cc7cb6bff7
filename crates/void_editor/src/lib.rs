//! Void Engine Scene Editor Core
//!
//! The asset, script binding and undo engine behind the scene editor.
//!
//! ## Features
//!
//! - **Asset Store**: Uploads classified into categories by extension
//! - **Script Bindings**: Scripts attached to game objects with typed fields
//! - **Inspector Contract**: Rendered field descriptions for dynamic UI
//! - **Undo/Redo**: Command history with a configurable depth
//! - **Shortcuts**: Duplicate, focus, undo and redo from the keyboard
//!
//! ## Architecture
//!
//! The editor follows a command-based architecture:
//!
//! ```text
//! User Input → EditorSession → Command → EditorState → SessionEvent → View
//! ```
//!
//! All modifications go through the command system for undo/redo support.

pub mod commands;
pub mod core;
pub mod integration;
pub mod scene;
pub mod session;

// Re-export commonly used types
pub use core::{
    ConfigError,
    EditHistory,
    EditorConfig,
    EditorState,
    KeyChord,
    Modifiers,
    SessionEvent,
    Shortcut,
};

pub use commands::{
    Command,
    CommandError,
    CommandResult,
};

pub use integration::{FilePicker, PickError, PickResponse, QueuedPicker};
pub use scene::{GameObject, Scene};
pub use session::{EditorSession, SessionError};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "Void Engine Editor";
