//! File and game object pickers.

use std::collections::VecDeque;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::sync::Mutex;
use void_asset::PickedFile;
use void_core::ObjectId;

/// Why a pick produced nothing.
#[derive(Debug, Error)]
pub enum PickError {
    /// The user dismissed the dialog; not a failure
    #[error("Pick cancelled")]
    Cancelled,

    #[error("Picker failed: {0}")]
    Failed(String),
}

impl PickError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PickError::Cancelled)
    }
}

/// Dialogs the host shows on the editor's behalf.
pub trait FilePicker: Send + Sync {
    /// Let the user choose files, one or several.
    fn pick_files(&self, multiple: bool) -> BoxFuture<'_, Result<Vec<PickedFile>, PickError>>;

    /// Let the user choose a game object of the open scene.
    fn pick_object(&self) -> BoxFuture<'_, Result<ObjectId, PickError>>;
}

/// Canned answer for a [`QueuedPicker`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickResponse {
    Files(Vec<PickedFile>),
    Object(ObjectId),
    Cancel,
}

/// Picker that replays queued answers in order.
///
/// Used by the headless binary and by tests. An empty queue behaves like
/// a dismissed dialog.
#[derive(Debug, Default)]
pub struct QueuedPicker {
    responses: Mutex<VecDeque<PickResponse>>,
}

impl QueuedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: impl IntoIterator<Item = PickResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    pub async fn push(&self, response: PickResponse) {
        self.responses.lock().await.push_back(response);
    }

    async fn next(&self) -> PickResponse {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or(PickResponse::Cancel)
    }
}

impl FilePicker for QueuedPicker {
    fn pick_files(&self, multiple: bool) -> BoxFuture<'_, Result<Vec<PickedFile>, PickError>> {
        Box::pin(async move {
            match self.next().await {
                PickResponse::Files(mut files) => {
                    if !multiple {
                        files.truncate(1);
                    }
                    Ok(files)
                }
                PickResponse::Object(id) => {
                    Err(PickError::Failed(format!("expected files, got object {}", id)))
                }
                PickResponse::Cancel => Err(PickError::Cancelled),
            }
        })
    }

    fn pick_object(&self) -> BoxFuture<'_, Result<ObjectId, PickError>> {
        Box::pin(async move {
            match self.next().await {
                PickResponse::Object(id) => Ok(id),
                PickResponse::Files(_) => {
                    Err(PickError::Failed("expected an object, got files".to_string()))
                }
                PickResponse::Cancel => Err(PickError::Cancelled),
            }
        })
    }
}
