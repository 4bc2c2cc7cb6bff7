//! Asynchronous file reading.
//!
//! A [`FileSource`] turns a picked file into [`FileContent`] according to a
//! [`ReadMode`]. Reads are independent futures; callers that need ordering
//! collect results positionally.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use futures_util::future::BoxFuture;

use crate::category::{extension_of, mime_for_extension, ReadMode};
use crate::content::FileContent;
use crate::error::ReadError;

/// A file handed over by a picker or a drop.
///
/// `name` is the name as reported by the picker and may carry a directory
/// prefix; the store trims it before listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Picked file named after its path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            name: path.to_string_lossy().into_owned(),
            path: path.to_path_buf(),
        }
    }
}

/// Reads picked files into content.
pub trait FileSource: Send + Sync {
    fn read<'a>(
        &'a self,
        file: &'a PickedFile,
        mode: ReadMode,
    ) -> BoxFuture<'a, Result<FileContent, ReadError>>;
}

/// [`FileSource`] backed by the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFileSource;

impl LocalFileSource {
    pub fn new() -> Self {
        Self
    }
}

impl FileSource for LocalFileSource {
    fn read<'a>(
        &'a self,
        file: &'a PickedFile,
        mode: ReadMode,
    ) -> BoxFuture<'a, Result<FileContent, ReadError>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|source| ReadError::Io {
                    name: file.name.clone(),
                    source,
                })?;
            log::debug!("Read {} bytes from {:?}", bytes.len(), file.path);
            decode(&file.name, bytes, mode)
        })
    }
}

/// Convert raw bytes into content for the given read mode.
pub fn decode(name: &str, bytes: Vec<u8>, mode: ReadMode) -> Result<FileContent, ReadError> {
    match mode {
        ReadMode::Text => String::from_utf8(bytes)
            .map(FileContent::Text)
            .map_err(|_| ReadError::InvalidText {
                name: name.to_string(),
            }),
        ReadMode::ArrayBuffer => Ok(FileContent::Binary(bytes)),
        ReadMode::DataUrl => Ok(FileContent::DataUrl(data_url(name, &bytes))),
    }
}

/// Encode bytes as a base64 data URL with a MIME type derived from `name`.
pub fn data_url(name: &str, bytes: &[u8]) -> String {
    let ext = extension_of(name).unwrap_or_default();
    format!(
        "data:{};base64,{}",
        mime_for_extension(&ext),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_modes() {
        let text = decode("a.js", b"let a = 1;".to_vec(), ReadMode::Text).unwrap();
        assert_eq!(text, FileContent::Text("let a = 1;".into()));

        let binary = decode("a.stl", vec![0, 159, 146], ReadMode::ArrayBuffer).unwrap();
        assert_eq!(binary, FileContent::Binary(vec![0, 159, 146]));

        let url = decode("a.png", b"hi".to_vec(), ReadMode::DataUrl).unwrap();
        assert_eq!(url, FileContent::DataUrl("data:image/png;base64,aGk=".into()));
    }

    #[test]
    fn test_invalid_text_is_rejected() {
        let result = decode("broken.js", vec![0xff, 0xfe], ReadMode::Text);
        assert!(matches!(result, Err(ReadError::InvalidText { .. })));
    }

    #[test]
    fn test_unknown_mime() {
        assert!(data_url("blob", b"").starts_with("data:application/octet-stream;base64,"));
    }
}
