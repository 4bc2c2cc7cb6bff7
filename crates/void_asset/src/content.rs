//! File contents backing the asset lists.
//!
//! The asset store only keeps names; the bytes live in a [`FileContents`]
//! collaborator (the running game's file map). [`FilesMap`] is the
//! in-memory implementation used by the editor and tests.

use std::collections::BTreeMap;

/// Stored content of one file, in the form its read mode produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
    DataUrl(String),
}

impl FileContent {
    /// Empty text content, used for freshly created files.
    pub fn empty() -> Self {
        FileContent::Text(String::new())
    }

    /// Text view of the content, for script sources.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Text(text) => Some(text),
            FileContent::DataUrl(_) | FileContent::Binary(_) => None,
        }
    }

    /// Size in bytes of the stored representation.
    pub fn len(&self) -> usize {
        match self {
            FileContent::Text(text) | FileContent::DataUrl(text) => text.len(),
            FileContent::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        FileContent::Text(text.to_string())
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        FileContent::Text(text)
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        FileContent::Binary(bytes)
    }
}

/// Name-keyed file content map owned by the game.
pub trait FileContents: Send {
    /// Create or overwrite a file.
    fn set_file_value(&mut self, name: &str, content: FileContent);

    /// Current content of a file.
    fn file_value(&self, name: &str) -> Option<&FileContent>;

    /// Delete a file, returning what it held.
    fn remove_file(&mut self, name: &str) -> Option<FileContent>;

    /// Move a file to a new name. Returns `false` when `old` does not exist.
    fn rename_file(&mut self, old: &str, new: &str) -> bool {
        match self.remove_file(old) {
            Some(content) => {
                self.set_file_value(new, content);
                true
            }
            None => false,
        }
    }

    fn contains_file(&self, name: &str) -> bool {
        self.file_value(name).is_some()
    }

    /// All file names, sorted.
    fn file_names(&self) -> Vec<String>;
}

/// In-memory [`FileContents`].
#[derive(Clone, Debug, Default)]
pub struct FilesMap {
    files: BTreeMap<String, FileContent>,
}

impl FilesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileContents for FilesMap {
    fn set_file_value(&mut self, name: &str, content: FileContent) {
        self.files.insert(name.to_string(), content);
    }

    fn file_value(&self, name: &str) -> Option<&FileContent> {
        self.files.get(name)
    }

    fn remove_file(&mut self, name: &str) -> Option<FileContent> {
        self.files.remove(name)
    }

    fn file_names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }
}
