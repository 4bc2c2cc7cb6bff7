//! Command pattern implementation for undo/redo support.
//!
//! All editor modifications that should be undoable must go through
//! the command system.

mod asset_commands;
mod command;
mod object_commands;
mod script_commands;

pub use asset_commands::{
    CreateAnimationCommand,
    EditFileCommand,
    RemoveAssetCommand,
    RenameAssetCommand,
};
pub use command::{Command, CommandError, CommandResult};
pub use object_commands::{CreateObjectCommand, DestroyObjectCommand, DuplicateObjectCommand};
pub use script_commands::{AttachScriptCommand, DetachScriptCommand, SetFieldCommand};
