//! Editor session - the composition root.
//!
//! Owns the editor state together with the collaborators that may suspend:
//! the file source used for uploads and the picker dialogs. Everything
//! synchronous lives on [`EditorState`].

use thiserror::Error;
use void_asset::{AssetError, AssetResult, FileSource, LocalFileSource, PickedFile, Uploaded};
use void_core::ObjectId;
use void_script::{FieldError, FieldKind, FieldPath, FieldValue};

use crate::commands::CommandError;
use crate::core::{EditorConfig, EditorState, KeyChord, SessionEvent, Shortcut};
use crate::integration::{FilePicker, PickError, QueuedPicker};

/// Errors of session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Pick(#[from] PickError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<FieldError> for SessionError {
    fn from(err: FieldError) -> Self {
        SessionError::Command(err.into())
    }
}

/// A dismissed dialog is an empty answer, not a failure.
fn picked<T>(result: Result<T, PickError>) -> Result<Option<T>, SessionError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(PickError::Cancelled) => {
            log::info!("Pick cancelled");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// One open project in the editor.
pub struct EditorSession {
    state: EditorState,
    source: Box<dyn FileSource>,
    picker: Box<dyn FilePicker>,
}

impl EditorSession {
    pub fn new(
        state: EditorState,
        source: impl FileSource + 'static,
        picker: impl FilePicker + 'static,
    ) -> Self {
        Self {
            state,
            source: Box::new(source),
            picker: Box::new(picker),
        }
    }

    /// Session over the local file system without dialogs.
    pub fn headless(config: EditorConfig) -> Self {
        Self::new(
            EditorState::with_config(config),
            LocalFileSource::new(),
            QueuedPicker::new(),
        )
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    /// Read, classify and store files.
    pub async fn upload(&mut self, files: &[PickedFile]) -> AssetResult<Uploaded> {
        let result = self.state.assets.upload(self.source.as_ref(), files).await;
        self.state.emit(SessionEvent::AssetsChanged);
        result
    }

    /// Ask the user for files and upload them.
    ///
    /// Returns `None` when the dialog was dismissed.
    pub async fn import(&mut self) -> Result<Option<Uploaded>, SessionError> {
        let Some(files) = picked(self.picker.pick_files(true).await)? else {
            return Ok(None);
        };
        if files.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.upload(&files).await?))
    }

    /// Fill a file or game object field through a picker.
    ///
    /// Returns whether the field was written.
    pub async fn pick_field(
        &mut self,
        object: ObjectId,
        script: &str,
        path: FieldPath,
    ) -> Result<bool, SessionError> {
        let kind = self
            .state
            .binding_mut(object, script)?
            .field(&path)
            .map(|spec| spec.kind)
            .ok_or_else(|| FieldError::UnknownField(path.clone()))?;

        let value = match kind {
            FieldKind::File => {
                let files = picked(self.picker.pick_files(false).await)?;
                files
                    .and_then(|files| files.into_iter().next())
                    .map(|file| FieldValue::String(file.path.to_string_lossy().into_owned()))
            }
            FieldKind::GameObject => match picked(self.picker.pick_object().await)? {
                Some(id) => Some(
                    self.state
                        .scene
                        .object_ref(id)
                        .ok_or(CommandError::ObjectNotFound(id))?
                        .into(),
                ),
                None => None,
            },
            other => {
                return Err(CommandError::InvalidOperation(format!(
                    "{} fields are not set through a picker",
                    other
                ))
                .into())
            }
        };

        let Some(value) = value else {
            return Ok(false);
        };
        self.state.set_field(object, script, path, value)?;
        Ok(true)
    }

    /// Route a key press to its shortcut, if any.
    pub fn handle_key(&mut self, chord: &KeyChord) -> Option<Shortcut> {
        let shortcut = Shortcut::from_chord(chord)?;
        log::debug!("{} -> {}", chord, shortcut.description());
        self.state.apply_shortcut(shortcut);
        Some(shortcut)
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.state.drain_events()
    }
}
