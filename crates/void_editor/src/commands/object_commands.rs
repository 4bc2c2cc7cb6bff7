//! Game object creation, duplication and destruction commands.

use void_core::ObjectId;

use crate::core::{EditorState, SessionEvent};
use crate::scene::GameObject;
use super::{Command, CommandError, CommandResult};

/// Put an object removed by an earlier undo back under its id.
fn restore(state: &mut EditorState, id: ObjectId, slot: &mut Option<GameObject>) -> CommandResult {
    let object = slot
        .take()
        .ok_or_else(|| CommandError::InvalidOperation("No object to restore".to_string()))?;

    if let Err(object) = state.scene.restore(id, object) {
        *slot = Some(object);
        return Err(CommandError::InvalidOperation(format!("Slot of {} was reused", id)));
    }
    state.emit(SessionEvent::RefreshTree);
    Ok(())
}

/// Remove an object created by this command.
fn take_back(state: &mut EditorState, id: ObjectId, slot: &mut Option<GameObject>) -> CommandResult {
    let object = state
        .scene
        .remove(id)
        .ok_or(CommandError::ObjectNotFound(id))?;
    state.forget_object(id);
    *slot = Some(object);
    state.emit(SessionEvent::RefreshTree);
    Ok(())
}

/// Command to create an empty game object.
pub struct CreateObjectCommand {
    pub name: String,
    // Filled after execution
    created_id: Option<ObjectId>,
    removed: Option<GameObject>,
}

impl CreateObjectCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_id: None,
            removed: None,
        }
    }

    pub fn created_id(&self) -> Option<ObjectId> {
        self.created_id
    }
}

impl Command for CreateObjectCommand {
    fn description(&self) -> &str {
        "Create Object"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        if let Some(id) = self.created_id {
            return restore(state, id, &mut self.removed);
        }
        self.created_id = Some(state.scene.spawn(self.name.clone()));
        state.emit(SessionEvent::RefreshTree);
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        let id = self
            .created_id
            .ok_or_else(|| CommandError::InvalidOperation("Nothing created".to_string()))?;
        take_back(state, id, &mut self.removed)
    }
}

/// Command to duplicate a game object with its scripts.
pub struct DuplicateObjectCommand {
    pub source_id: ObjectId,
    // Filled after execution
    created_id: Option<ObjectId>,
    removed: Option<GameObject>,
}

impl DuplicateObjectCommand {
    pub fn new(source_id: ObjectId) -> Self {
        Self {
            source_id,
            created_id: None,
            removed: None,
        }
    }

    pub fn created_id(&self) -> Option<ObjectId> {
        self.created_id
    }
}

impl Command for DuplicateObjectCommand {
    fn description(&self) -> &str {
        "Duplicate Object"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        if let Some(id) = self.created_id {
            return restore(state, id, &mut self.removed);
        }

        let source = state
            .scene
            .get(self.source_id)
            .ok_or(CommandError::ObjectNotFound(self.source_id))?
            .clone();
        let name = format!("{} (Copy)", source.name);
        let id = state.scene.insert_copy(&source, name.clone());

        log::info!("Duplicated {} as {}", source.name, name);
        self.created_id = Some(id);
        state.emit(SessionEvent::RefreshTree);
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        let id = self
            .created_id
            .ok_or_else(|| CommandError::InvalidOperation("Nothing duplicated".to_string()))?;
        take_back(state, id, &mut self.removed)
    }
}

/// Command to destroy a game object along with its script bindings.
pub struct DestroyObjectCommand {
    pub object: ObjectId,
    // Stored for undo
    removed: Option<GameObject>,
}

impl DestroyObjectCommand {
    pub fn new(object: ObjectId) -> Self {
        Self {
            object,
            removed: None,
        }
    }
}

impl Command for DestroyObjectCommand {
    fn description(&self) -> &str {
        "Destroy Object"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        take_back(state, self.object, &mut self.removed)
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        restore(state, self.object, &mut self.removed)
    }
}
