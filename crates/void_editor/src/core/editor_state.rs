//! Central editor state - single source of truth.
//!
//! All editor data flows through `EditorState`. Modifications should
//! go through the command system for undo/redo support.

use void_asset::{AssetError, AssetStore, FileContent};
use void_core::ObjectId;
use void_script::{
    FieldChange, FieldPath, FieldValue, RenderedField, ScriptBinding, ScriptError, ScriptLoaders,
};

use super::{EditHistory, EditorConfig, Shortcut};
use crate::commands::{
    AttachScriptCommand, Command, CommandError, CommandResult, CreateAnimationCommand,
    CreateObjectCommand, DestroyObjectCommand, DetachScriptCommand, DuplicateObjectCommand,
    EditFileCommand, RemoveAssetCommand, RenameAssetCommand, SetFieldCommand,
};
use crate::scene::Scene;

/// Notifications for the view layer, drained once per frame.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Objects were added or removed; rebuild the scene tree
    RefreshTree,
    /// Point the camera at this object
    FocusCamera(ObjectId),
    /// Category lists or file contents changed
    AssetsChanged,
    /// Scripts attached to this object changed
    ScriptsChanged(ObjectId),
    /// A script field was written
    FieldChanged(FieldChange),
}

/// Central editor state.
pub struct EditorState {
    /// Uploaded and generated files
    pub assets: AssetStore,
    /// Game objects of the open scene
    pub scene: Scene,
    /// Script loaders by extension
    pub loaders: ScriptLoaders,
    /// Undo/redo history
    pub history: EditHistory,
    pub config: EditorConfig,

    current_object: Option<ObjectId>,
    events: Vec<SessionEvent>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            assets: AssetStore::with_table(config.classification.clone()),
            scene: Scene::new(),
            loaders: ScriptLoaders::with_defaults(),
            history: EditHistory::with_capacity(config.history_depth),
            config,
            current_object: None,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Events and Selection
    // ========================================================================

    pub fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// The game object the user is working on.
    pub fn current_object(&self) -> Option<ObjectId> {
        self.current_object
    }

    pub fn select_object(&mut self, id: Option<ObjectId>) -> CommandResult {
        if let Some(id) = id {
            if !self.scene.contains(id) {
                return Err(CommandError::ObjectNotFound(id));
            }
        }
        self.current_object = id;
        Ok(())
    }

    /// Drop the selection if it points at `id`.
    pub(crate) fn forget_object(&mut self, id: ObjectId) {
        if self.current_object == Some(id) {
            self.current_object = None;
        }
    }

    // ========================================================================
    // Script Bindings
    // ========================================================================

    /// Build a binding of `script` for `object` from the stored source.
    pub fn load_binding(&self, object: ObjectId, script: &str) -> Result<ScriptBinding, CommandError> {
        let content = self
            .assets
            .content(script)
            .ok_or_else(|| AssetError::NotFound(script.to_string()))?;
        let source = content
            .as_text()
            .ok_or_else(|| ScriptError::NotText(script.to_string()))?;
        Ok(ScriptBinding::load(&self.loaders, script, source, object)?)
    }

    pub fn binding_mut(
        &mut self,
        object: ObjectId,
        script: &str,
    ) -> Result<&mut ScriptBinding, CommandError> {
        self.scene
            .get_mut(object)
            .ok_or(CommandError::ObjectNotFound(object))?
            .script_mut(script)
            .ok_or_else(|| CommandError::ScriptNotAttached {
                object,
                script: script.to_string(),
            })
    }

    /// Fields of a bound script, ready for the inspector.
    pub fn inspect(&self, object: ObjectId, script: &str) -> Option<Vec<RenderedField>> {
        self.scene
            .get(object)?
            .script(script)
            .map(ScriptBinding::render)
    }

    /// Rebuild every binding of `script` from its current source.
    ///
    /// Field values that still fit the new declarations are kept. Objects
    /// whose rebuild fails keep their old binding. Returns the replaced
    /// bindings.
    pub fn rebuild_script(&mut self, script: &str) -> Vec<(ObjectId, ScriptBinding)> {
        let mut replaced = Vec::new();

        for id in self.scene.objects_with_script(script) {
            let mut fresh = match self.load_binding(id, script) {
                Ok(binding) => binding,
                Err(err) => {
                    log::error!("Cannot rebuild {} on {}: {}", script, id, err);
                    continue;
                }
            };

            let Some(obj) = self.scene.get_mut(id) else {
                continue;
            };
            if let Some(old) = obj.script(script) {
                old.carry_values_into(&mut fresh);
            }
            if let Some(old) = obj.attach(fresh) {
                replaced.push((id, old));
            }
            self.events.push(SessionEvent::ScriptsChanged(id));
        }

        if !replaced.is_empty() {
            log::info!("Rebuilt {} on {} objects", script, replaced.len());
        }
        replaced
    }

    // ========================================================================
    // Command System Integration
    // ========================================================================

    fn run(&mut self, cmd: &mut dyn Command) -> CommandResult {
        cmd.execute(self).map_err(|e| {
            log::warn!("{} failed: {}", cmd.description(), e);
            e
        })
    }

    /// Execute a command and add it to history for undo/redo.
    ///
    /// A failed command leaves no history entry.
    pub fn execute_command(&mut self, mut cmd: Box<dyn Command>) -> CommandResult {
        self.run(cmd.as_mut())?;
        self.history.push(cmd);
        Ok(())
    }

    /// Undo the last command.
    pub fn undo(&mut self) -> bool {
        // Pop command from undo stack
        if let Some(mut cmd) = self.history.pop_undo() {
            let desc = cmd.description().to_string();
            match cmd.undo(self) {
                Ok(()) => {
                    self.history.push_to_redo(cmd);
                    log::info!("Undo: {}", desc);
                    true
                }
                Err(e) => {
                    // Put command back on undo stack
                    self.history.push_to_undo(cmd);
                    log::error!("Undo failed: {}", e);
                    false
                }
            }
        } else {
            log::debug!("Nothing to undo");
            false
        }
    }

    /// Redo the last undone command.
    pub fn redo(&mut self) -> bool {
        // Pop command from redo stack
        if let Some(mut cmd) = self.history.pop_redo() {
            let desc = cmd.description().to_string();
            match cmd.execute(self) {
                Ok(()) => {
                    self.history.push_to_undo(cmd);
                    log::info!("Redo: {}", desc);
                    true
                }
                Err(e) => {
                    // Put command back on redo stack
                    self.history.push_to_redo(cmd);
                    log::error!("Redo failed: {}", e);
                    false
                }
            }
        } else {
            log::debug!("Nothing to redo");
            false
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Get the description of the next undo action.
    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    /// Get the description of the next redo action.
    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    // ========================================================================
    // Command-based Operations
    // ========================================================================

    pub fn create_animation(&mut self) -> Result<String, CommandError> {
        let mut cmd = CreateAnimationCommand::new();
        self.run(&mut cmd)?;
        let name = cmd.created_name().unwrap_or_default().to_string();
        self.history.push(Box::new(cmd));
        Ok(name)
    }

    pub fn rename_asset(&mut self, old_name: &str, new_name: &str) -> CommandResult {
        self.execute_command(Box::new(RenameAssetCommand::new(old_name, new_name)))
    }

    pub fn remove_asset(&mut self, name: &str) -> CommandResult {
        self.execute_command(Box::new(RemoveAssetCommand::new(name)))
    }

    /// Replace a file's content and rebuild the scripts bound to it.
    pub fn edit_file(&mut self, name: &str, content: FileContent) -> CommandResult {
        self.execute_command(Box::new(EditFileCommand::new(name, content)))
    }

    pub fn attach_script(&mut self, object: ObjectId, script: &str) -> CommandResult {
        self.execute_command(Box::new(AttachScriptCommand::new(object, script)))
    }

    pub fn detach_script(&mut self, object: ObjectId, script: &str) -> CommandResult {
        self.execute_command(Box::new(DetachScriptCommand::new(object, script)))
    }

    pub fn set_field(
        &mut self,
        object: ObjectId,
        script: &str,
        path: FieldPath,
        value: FieldValue,
    ) -> CommandResult {
        self.execute_command(Box::new(SetFieldCommand::new(object, script, path, value)))
    }

    pub fn create_object(&mut self, name: &str) -> Result<ObjectId, CommandError> {
        let mut cmd = CreateObjectCommand::new(name);
        self.run(&mut cmd)?;
        let id = cmd
            .created_id()
            .ok_or_else(|| CommandError::InvalidOperation("Object was not created".to_string()))?;
        self.history.push(Box::new(cmd));
        Ok(id)
    }

    pub fn duplicate_object(&mut self, source: ObjectId) -> Result<ObjectId, CommandError> {
        let mut cmd = DuplicateObjectCommand::new(source);
        self.run(&mut cmd)?;
        let id = cmd
            .created_id()
            .ok_or_else(|| CommandError::InvalidOperation("Object was not duplicated".to_string()))?;
        self.history.push(Box::new(cmd));
        Ok(id)
    }

    pub fn destroy_object(&mut self, object: ObjectId) -> CommandResult {
        self.execute_command(Box::new(DestroyObjectCommand::new(object)))
    }

    /// Ask the view to focus the camera on the current object.
    pub fn focus_camera(&mut self) -> bool {
        match self.current_object {
            Some(id) => {
                self.emit(SessionEvent::FocusCamera(id));
                true
            }
            None => false,
        }
    }

    /// Run the action bound to a shortcut. Returns whether anything happened.
    pub fn apply_shortcut(&mut self, shortcut: Shortcut) -> bool {
        match shortcut {
            Shortcut::DuplicateObject => match self.current_object {
                Some(id) => self.duplicate_object(id).is_ok(),
                None => {
                    log::debug!("Nothing selected to duplicate");
                    false
                }
            },
            Shortcut::FocusCamera => self.focus_camera(),
            Shortcut::Redo => self.redo(),
            Shortcut::Undo => self.undo(),
        }
    }

    /// Close the project: drop every asset, object and history entry.
    pub fn clear(&mut self) {
        self.assets.clear();
        self.scene.clear();
        self.history.clear();
        self.current_object = None;
        self.emit(SessionEvent::AssetsChanged);
        self.emit(SessionEvent::RefreshTree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_asset::AssetCategory;

    const MOVER: &str = r#"/* @fields
[{ "name": "speed", "type": "NUMBER", "default": 1, "options": { "min": 0, "max": 10 } }]
*/"#;

    fn state_with_script() -> (EditorState, ObjectId) {
        let mut state = EditorState::new();
        state.assets.insert("mover.js", FileContent::Text(MOVER.to_string()));
        let id = state.create_object("Player").unwrap();
        state.attach_script(id, "mover.js").unwrap();
        state.drain_events();
        (state, id)
    }

    fn speed(state: &EditorState, id: ObjectId) -> Option<FieldValue> {
        state
            .scene
            .get(id)?
            .script("mover.js")?
            .get(&FieldPath::root("speed"))
    }

    #[test]
    fn test_set_field_undo_redo() {
        let (mut state, id) = state_with_script();

        state
            .set_field(id, "mover.js", FieldPath::root("speed"), 4.0.into())
            .unwrap();
        assert_eq!(speed(&state, id), Some(4.0.into()));

        let events = state.drain_events();
        assert!(matches!(
            &events[..],
            [SessionEvent::FieldChanged(change)] if change.field_name == "speed"
        ));

        assert!(state.undo());
        assert_eq!(speed(&state, id), Some(1.0.into()));
        assert!(state.redo());
        assert_eq!(speed(&state, id), Some(4.0.into()));
    }

    #[test]
    fn test_failed_command_leaves_no_entry() {
        let (mut state, id) = state_with_script();
        let before = state.history.undo_count();

        assert!(matches!(
            state.rename_asset("missing.png", "other.png"),
            Err(CommandError::Asset(AssetError::NotFound(_)))
        ));
        assert!(state
            .set_field(id, "mover.js", FieldPath::root("speed"), 50.0.into())
            .is_err());
        assert_eq!(state.history.undo_count(), before);
    }

    #[test]
    fn test_rename_keeps_binding() {
        let (mut state, id) = state_with_script();

        state.rename_asset("mover.js", "walker.js").unwrap();
        assert_eq!(state.assets.category_of("walker.js"), Some(AssetCategory::Scripts));
        assert!(state.scene.get(id).unwrap().has_script("walker.js"));

        assert!(state.undo());
        assert!(state.scene.get(id).unwrap().has_script("mover.js"));
        assert!(state.assets.contains("mover.js"));
    }

    #[test]
    fn test_edit_file_rebuilds_bindings() {
        let (mut state, id) = state_with_script();
        let copy = state.duplicate_object(id).unwrap();
        state
            .set_field(id, "mover.js", FieldPath::root("speed"), 7.0.into())
            .unwrap();

        let edited = MOVER.replace(r#""max": 10"#, r#""max": 5"#);
        state.edit_file("mover.js", FileContent::Text(edited)).unwrap();

        // 7 no longer fits; the copy's 1 still does
        assert_eq!(speed(&state, id), Some(1.0.into()));
        assert_eq!(speed(&state, copy), Some(1.0.into()));

        assert!(state.undo());
        assert_eq!(speed(&state, id), Some(7.0.into()));
        assert_eq!(
            state.assets.content("mover.js").and_then(FileContent::as_text),
            Some(MOVER)
        );
    }

    #[test]
    fn test_inspect() {
        let (state, id) = state_with_script();
        let fields = state.inspect(id, "mover.js").unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label(), "Speed");
        assert!(state.inspect(id, "other.js").is_none());
    }

    #[test]
    fn test_attach_non_text_script() {
        let mut state = EditorState::new();
        state
            .assets
            .insert("broken.js", FileContent::Binary(vec![0, 159, 146, 150]));
        let id = state.create_object("Thing").unwrap();

        assert!(matches!(
            state.attach_script(id, "broken.js"),
            Err(CommandError::Script(ScriptError::NotText(_)))
        ));
    }

    #[test]
    fn test_destroy_clears_selection() {
        let (mut state, id) = state_with_script();
        state.select_object(Some(id)).unwrap();

        state.destroy_object(id).unwrap();
        assert_eq!(state.current_object(), None);
        assert!(!state.focus_camera());

        assert!(state.undo());
        assert!(state.scene.get(id).unwrap().has_script("mover.js"));
    }

    #[test]
    fn test_shortcuts() {
        let (mut state, id) = state_with_script();
        assert!(!state.apply_shortcut(Shortcut::DuplicateObject));

        state.select_object(Some(id)).unwrap();
        assert!(state.apply_shortcut(Shortcut::DuplicateObject));
        assert_eq!(state.scene.len(), 2);

        assert!(state.apply_shortcut(Shortcut::FocusCamera));
        assert!(state.drain_events().contains(&SessionEvent::FocusCamera(id)));

        assert!(state.apply_shortcut(Shortcut::Undo));
        assert_eq!(state.scene.len(), 1);
        assert!(state.apply_shortcut(Shortcut::Redo));
        assert_eq!(state.scene.len(), 2);
    }
}
