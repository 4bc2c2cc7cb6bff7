//! Command trait and result types.

use thiserror::Error;
use void_asset::AssetError;
use void_core::ObjectId;
use void_script::{FieldError, ScriptError};

use crate::core::EditorState;

/// Result type for command execution.
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Game object not found, or destroyed since the command ran
    #[error("Game object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Script {script} is not attached to {object}")]
    ScriptNotAttached { object: ObjectId, script: String },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// A command that can be executed, undone, and redone.
///
/// Commands are the primary way to modify editor state. They capture
/// both the action and its inverse, enabling undo/redo. Redo calls
/// `execute` again, so `execute` must work on a command that has
/// already been executed and undone.
///
/// # Example
///
/// ```ignore
/// struct RenameObjectCommand {
///     object: ObjectId,
///     old_name: String,
///     new_name: String,
/// }
///
/// impl Command for RenameObjectCommand {
///     fn description(&self) -> &str { "Rename Object" }
///
///     fn execute(&mut self, state: &mut EditorState) -> CommandResult {
///         let obj = state.scene.get_mut(self.object)
///             .ok_or(CommandError::ObjectNotFound(self.object))?;
///         obj.name = self.new_name.clone();
///         Ok(())
///     }
///
///     fn undo(&mut self, state: &mut EditorState) -> CommandResult {
///         let obj = state.scene.get_mut(self.object)
///             .ok_or(CommandError::ObjectNotFound(self.object))?;
///         obj.name = self.old_name.clone();
///         Ok(())
///     }
/// }
/// ```
pub trait Command: Send {
    /// Human-readable description for the undo/redo menu.
    fn description(&self) -> &str;

    /// Execute the command, modifying the editor state.
    fn execute(&mut self, state: &mut EditorState) -> CommandResult;

    /// Undo the command, restoring the previous state.
    fn undo(&mut self, state: &mut EditorState) -> CommandResult;
}
