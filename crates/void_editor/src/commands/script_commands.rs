//! Script attachment and field edits.

use void_core::ObjectId;
use void_script::{FieldPath, FieldValue, ScriptBinding};

use crate::core::{EditorState, SessionEvent};
use super::{Command, CommandError, CommandResult};

/// Command to attach a script file to a game object.
///
/// Attaching a script that is already attached replaces its binding.
pub struct AttachScriptCommand {
    pub object: ObjectId,
    pub script: String,
    // Stored for undo
    replaced: Option<ScriptBinding>,
}

impl AttachScriptCommand {
    pub fn new(object: ObjectId, script: impl Into<String>) -> Self {
        Self {
            object,
            script: script.into(),
            replaced: None,
        }
    }
}

impl Command for AttachScriptCommand {
    fn description(&self) -> &str {
        "Attach Script"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        if !state.scene.contains(self.object) {
            return Err(CommandError::ObjectNotFound(self.object));
        }
        let binding = state.load_binding(self.object, &self.script)?;

        let obj = state
            .scene
            .get_mut(self.object)
            .ok_or(CommandError::ObjectNotFound(self.object))?;
        self.replaced = obj.attach(binding);

        log::info!("Attached {} to {}", self.script, obj.name);
        state.emit(SessionEvent::ScriptsChanged(self.object));
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        let obj = state
            .scene
            .get_mut(self.object)
            .ok_or(CommandError::ObjectNotFound(self.object))?;

        obj.detach(&self.script);
        if let Some(previous) = self.replaced.take() {
            obj.attach(previous);
        }
        state.emit(SessionEvent::ScriptsChanged(self.object));
        Ok(())
    }
}

/// Command to detach a script from a game object.
pub struct DetachScriptCommand {
    pub object: ObjectId,
    pub script: String,
    // Stored for undo
    removed: Option<ScriptBinding>,
}

impl DetachScriptCommand {
    pub fn new(object: ObjectId, script: impl Into<String>) -> Self {
        Self {
            object,
            script: script.into(),
            removed: None,
        }
    }
}

impl Command for DetachScriptCommand {
    fn description(&self) -> &str {
        "Detach Script"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        let obj = state
            .scene
            .get_mut(self.object)
            .ok_or(CommandError::ObjectNotFound(self.object))?;

        let removed = obj
            .detach(&self.script)
            .ok_or_else(|| CommandError::ScriptNotAttached {
                object: self.object,
                script: self.script.clone(),
            })?;
        self.removed = Some(removed);

        state.emit(SessionEvent::ScriptsChanged(self.object));
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        let obj = state
            .scene
            .get_mut(self.object)
            .ok_or(CommandError::ObjectNotFound(self.object))?;

        let removed = self
            .removed
            .take()
            .ok_or_else(|| CommandError::InvalidOperation("No script to restore".to_string()))?;
        obj.attach(removed);

        state.emit(SessionEvent::ScriptsChanged(self.object));
        Ok(())
    }
}

/// Command to write one script field.
pub struct SetFieldCommand {
    pub object: ObjectId,
    pub script: String,
    pub path: FieldPath,
    pub value: FieldValue,
    // Stored for undo
    old_value: Option<FieldValue>,
}

impl SetFieldCommand {
    pub fn new(
        object: ObjectId,
        script: impl Into<String>,
        path: FieldPath,
        value: FieldValue,
    ) -> Self {
        Self {
            object,
            script: script.into(),
            path,
            value,
            old_value: None,
        }
    }

    fn write(&self, state: &mut EditorState, value: FieldValue) -> CommandResult {
        let binding = state.binding_mut(self.object, &self.script)?;
        let change = binding.set(&self.path, value)?;
        state.emit(SessionEvent::FieldChanged(change));
        Ok(())
    }
}

impl Command for SetFieldCommand {
    fn description(&self) -> &str {
        "Set Field"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        let old = state.binding_mut(self.object, &self.script)?.get(&self.path);
        self.write(state, self.value.clone())?;
        self.old_value = old;
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        let old = self
            .old_value
            .clone()
            .ok_or_else(|| CommandError::InvalidOperation(format!("No previous value of {}", self.path)))?;
        self.write(state, old)
    }
}
