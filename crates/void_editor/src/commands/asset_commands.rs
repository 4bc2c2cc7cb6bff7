//! Asset rename, removal, creation and content edits.

use void_asset::{AssetError, FileContent, RemovedAsset};
use void_core::ObjectId;
use void_script::ScriptBinding;

use crate::core::{EditorState, SessionEvent};
use super::{Command, CommandError, CommandResult};

/// Command to rename an asset, keeping script bindings attached.
pub struct RenameAssetCommand {
    pub old_name: String,
    pub new_name: String,
}

impl RenameAssetCommand {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    fn apply(state: &mut EditorState, from: &str, to: &str) -> CommandResult {
        // A removed script can still be bound; re-keying onto it would drop that binding
        let holders = state.scene.objects_with_script(to);
        if !holders.is_empty() {
            log::warn!(
                "Cannot rename {} to {}: still bound on {} objects",
                from,
                to,
                holders.len()
            );
            return Err(AssetError::NameTaken(to.to_string()).into());
        }
        state.assets.rename(from, to)?;
        let rebound = state.scene.rename_script(from, to);
        if rebound > 0 {
            log::debug!("Rebound {} on {} objects", to, rebound);
        }
        state.emit(SessionEvent::AssetsChanged);
        Ok(())
    }
}

impl Command for RenameAssetCommand {
    fn description(&self) -> &str {
        "Rename Asset"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        Self::apply(state, &self.old_name, &self.new_name)
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        Self::apply(state, &self.new_name, &self.old_name)
    }
}

/// Command to remove an asset and its content.
pub struct RemoveAssetCommand {
    pub name: String,
    // Stored for undo
    removed: Option<RemovedAsset>,
    selected: Option<String>,
}

impl RemoveAssetCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            removed: None,
            selected: None,
        }
    }
}

impl Command for RemoveAssetCommand {
    fn description(&self) -> &str {
        "Remove Asset"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        let selected = state.assets.current_file().map(str::to_string);
        self.removed = Some(state.assets.remove(&self.name)?);
        self.selected = selected;
        state.emit(SessionEvent::AssetsChanged);
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        if state.assets.contains(&self.name) {
            return Err(AssetError::NameTaken(self.name.clone()).into());
        }
        let removed = self
            .removed
            .take()
            .ok_or_else(|| CommandError::InvalidOperation("No asset to restore".to_string()))?;

        state.assets.reinsert(removed)?;
        if let Err(err) = state.assets.select_file(self.selected.as_deref()) {
            log::warn!("Selection not restored: {}", err);
        }
        state.emit(SessionEvent::AssetsChanged);
        Ok(())
    }
}

/// Command to create the empty `newAnimation.anim`.
#[derive(Default)]
pub struct CreateAnimationCommand {
    created: Option<String>,
}

impl CreateAnimationCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_name(&self) -> Option<&str> {
        self.created.as_deref()
    }
}

impl Command for CreateAnimationCommand {
    fn description(&self) -> &str {
        "Create Animation"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        self.created = Some(state.assets.create_animation()?);
        state.emit(SessionEvent::AssetsChanged);
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        let name = self
            .created
            .as_deref()
            .ok_or_else(|| CommandError::InvalidOperation("No animation created".to_string()))?;
        state.assets.remove(name)?;
        state.emit(SessionEvent::AssetsChanged);
        Ok(())
    }
}

/// Command to replace a file's content.
///
/// Every game object bound to the file gets a fresh script instance built
/// from the new source.
pub struct EditFileCommand {
    pub name: String,
    pub content: FileContent,
    // Stored for undo
    old_content: Option<FileContent>,
    old_bindings: Vec<(ObjectId, ScriptBinding)>,
}

impl EditFileCommand {
    pub fn new(name: impl Into<String>, content: FileContent) -> Self {
        Self {
            name: name.into(),
            content,
            old_content: None,
            old_bindings: Vec::new(),
        }
    }
}

impl Command for EditFileCommand {
    fn description(&self) -> &str {
        "Edit File"
    }

    fn execute(&mut self, state: &mut EditorState) -> CommandResult {
        self.old_content = state.assets.write_content(&self.name, self.content.clone())?;
        self.old_bindings = state.rebuild_script(&self.name);
        state.emit(SessionEvent::AssetsChanged);
        Ok(())
    }

    fn undo(&mut self, state: &mut EditorState) -> CommandResult {
        let previous = self.old_content.clone().unwrap_or_else(FileContent::empty);
        state.assets.write_content(&self.name, previous)?;

        for (id, binding) in self.old_bindings.drain(..) {
            match state.scene.get_mut(id) {
                Some(obj) => {
                    obj.attach(binding);
                    state.emit(SessionEvent::ScriptsChanged(id));
                }
                None => log::warn!("Not restoring {} on {}: object is gone", self.name, id),
            }
        }
        state.emit(SessionEvent::AssetsChanged);
        Ok(())
    }
}
