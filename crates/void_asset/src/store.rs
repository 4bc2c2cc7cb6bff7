//! Asset Store - categorised asset names plus their backing content.
//!
//! The category lists are the single source of truth for what the
//! explorer shows. Every mutation goes through [`AssetStore`], which keeps
//! two invariants:
//!
//! - a name is listed in at most one category
//! - every listed name has a content entry, and every content entry is listed

use std::collections::HashMap;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use crate::category::{extension_of, trim_filename, AssetCategory, ClassificationTable, ReadMode};
use crate::content::{FileContent, FileContents, FilesMap};
use crate::error::{AssetError, AssetResult};
use crate::reader::{FileSource, PickedFile};

/// Name given to animations created from the explorer.
pub const NEW_ANIMATION_NAME: &str = "newAnimation.anim";

/// A stored asset as reported back to the uploader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub name: String,
    pub category: AssetCategory,
    pub content: FileContent,
}

/// Result of an upload: a single asset for a single file, else the batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Uploaded {
    One(AssetDescriptor),
    Many(Vec<AssetDescriptor>),
}

impl Uploaded {
    pub fn into_vec(self) -> Vec<AssetDescriptor> {
        match self {
            Uploaded::One(asset) => vec![asset],
            Uploaded::Many(assets) => assets,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Uploaded::One(asset) => vec![asset.name.as_str()],
            Uploaded::Many(assets) => assets.iter().map(|a| a.name.as_str()).collect(),
        }
    }
}

/// An asset taken out of the store, with enough to put it back in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedAsset {
    pub name: String,
    pub category: AssetCategory,
    pub position: usize,
    pub content: Option<FileContent>,
}

/// Serializable category lists, saved alongside a scene.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub textures: Vec<String>,
    #[serde(default)]
    pub scripts: Vec<String>,
    #[serde(default)]
    pub prefabs: Vec<String>,
    #[serde(default)]
    pub templates: Vec<String>,
    #[serde(default)]
    pub animations: Vec<String>,
    #[serde(default)]
    pub others: Vec<String>,
}

impl AssetManifest {
    pub fn names(&self, category: AssetCategory) -> &[String] {
        match category {
            AssetCategory::Models => &self.models,
            AssetCategory::Textures => &self.textures,
            AssetCategory::Scripts => &self.scripts,
            AssetCategory::Prefabs => &self.prefabs,
            AssetCategory::Templates => &self.templates,
            AssetCategory::Animations => &self.animations,
            AssetCategory::Others => &self.others,
        }
    }

    pub fn names_mut(&mut self, category: AssetCategory) -> &mut Vec<String> {
        match category {
            AssetCategory::Models => &mut self.models,
            AssetCategory::Textures => &mut self.textures,
            AssetCategory::Scripts => &mut self.scripts,
            AssetCategory::Prefabs => &mut self.prefabs,
            AssetCategory::Templates => &mut self.templates,
            AssetCategory::Animations => &mut self.animations,
            AssetCategory::Others => &mut self.others,
        }
    }
}

/// Categorised asset names and the content map behind them.
pub struct AssetStore {
    /// Ordered names per category, indexed by `AssetCategory::index`
    lists: [Vec<String>; AssetCategory::COUNT],
    /// Name -> category currently listing it
    index: HashMap<String, AssetCategory>,
    /// Backing file content
    contents: Box<dyn FileContents>,
    /// Extension classification
    table: ClassificationTable,
    /// File currently open in the editor panes
    current_file: Option<String>,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore {
    /// Store with the default classification table and an in-memory content map.
    pub fn new() -> Self {
        Self::with_table(ClassificationTable::default())
    }

    pub fn with_table(table: ClassificationTable) -> Self {
        Self::with_contents(table, Box::new(FilesMap::new()))
    }

    /// Store over an existing content collaborator.
    ///
    /// Content already present is adopted into the lists so both sides
    /// start in sync.
    pub fn with_contents(table: ClassificationTable, contents: Box<dyn FileContents>) -> Self {
        let mut store = Self {
            lists: Default::default(),
            index: HashMap::new(),
            contents,
            table,
            current_file: None,
        };
        store.adopt_unlisted();
        store
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    /// Names listed under a category, in insertion order.
    pub fn names(&self, category: AssetCategory) -> &[String] {
        &self.lists[category.index()]
    }

    /// Category currently listing `name`.
    pub fn category_of(&self, name: &str) -> Option<AssetCategory> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn content(&self, name: &str) -> Option<&FileContent> {
        self.contents.file_value(name)
    }

    pub fn contents(&self) -> &dyn FileContents {
        self.contents.as_ref()
    }

    /// Total number of listed assets.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All listed names with their category, category by category.
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, &str)> {
        AssetCategory::all().iter().flat_map(move |&category| {
            self.lists[category.index()]
                .iter()
                .map(move |name| (category, name.as_str()))
        })
    }

    /// Category and read mode a file name would get on upload.
    pub fn classify(&self, file_name: &str) -> (AssetCategory, ReadMode) {
        let ext = extension_of(file_name).unwrap_or_default();
        (self.table.classify(&ext), ReadMode::for_extension(&ext))
    }

    /// Read and store a batch of files.
    ///
    /// Reads run concurrently; each successfully read file is classified
    /// and stored in input order, and the result preserves that order. When
    /// any read fails the first failure (by input position) is returned
    /// after the successful files have been stored.
    pub async fn upload(
        &mut self,
        source: &dyn FileSource,
        files: &[PickedFile],
    ) -> AssetResult<Uploaded> {
        let reads = files.iter().map(|file| {
            let (_, mode) = self.classify(&file.name);
            source.read(file, mode)
        });
        let results = join_all(reads).await;

        let mut uploaded = Vec::with_capacity(files.len());
        let mut first_error = None;

        for (file, result) in files.iter().zip(results) {
            match result {
                Ok(content) => uploaded.push(self.insert(&file.name, content)),
                Err(err) => {
                    log::error!("Upload of {} failed: {}", file.name, err);
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err.into());
        }

        if files.len() == 1 {
            if let Some(asset) = uploaded.pop() {
                return Ok(Uploaded::One(asset));
            }
        }
        Ok(Uploaded::Many(uploaded))
    }

    /// Classify and store already-read content under its trimmed name.
    pub fn insert(&mut self, file_name: &str, content: FileContent) -> AssetDescriptor {
        let name = trim_filename(file_name).to_string();
        let (category, _) = self.classify(&name);
        self.place(category, name, content)
    }

    /// Store content under an explicit category (generated prefabs, templates).
    pub fn insert_into(
        &mut self,
        category: AssetCategory,
        name: &str,
        content: FileContent,
    ) -> AssetDescriptor {
        self.place(category, trim_filename(name).to_string(), content)
    }

    fn place(&mut self, category: AssetCategory, name: String, content: FileContent) -> AssetDescriptor {
        match self.index.get(&name).copied() {
            Some(existing) if existing == category => {
                log::debug!("Replacing content of {}", name);
            }
            Some(existing) => {
                // Keep the name in exactly one category
                self.lists[existing.index()].retain(|n| n != &name);
                self.lists[category.index()].push(name.clone());
                log::info!("Moved {} from {} to {}", name, existing, category);
            }
            None => {
                self.lists[category.index()].push(name.clone());
                log::info!("Added {} to {}", name, category);
            }
        }

        self.index.insert(name.clone(), category);
        self.contents.set_file_value(&name, content.clone());

        AssetDescriptor {
            name,
            category,
            content,
        }
    }

    /// Register an empty `newAnimation.anim` under animations.
    pub fn create_animation(&mut self) -> AssetResult<String> {
        if self.contains(NEW_ANIMATION_NAME) {
            log::warn!("{} already exists", NEW_ANIMATION_NAME);
            return Err(AssetError::NameTaken(NEW_ANIMATION_NAME.to_string()));
        }

        self.place(
            AssetCategory::Animations,
            NEW_ANIMATION_NAME.to_string(),
            FileContent::empty(),
        );
        Ok(NEW_ANIMATION_NAME.to_string())
    }

    /// Rename an asset in place, keeping its position in its category.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> AssetResult<AssetCategory> {
        let Some(category) = self.category_of(old_name) else {
            log::warn!("Cannot rename {}: not in any category", old_name);
            return Err(AssetError::NotFound(old_name.to_string()));
        };

        if old_name == new_name {
            return Ok(category);
        }
        if self.contains(new_name) {
            log::warn!("Cannot rename {} to {}: name in use", old_name, new_name);
            return Err(AssetError::NameTaken(new_name.to_string()));
        }

        let list = &mut self.lists[category.index()];
        if let Some(slot) = list.iter_mut().find(|n| n.as_str() == old_name) {
            *slot = new_name.to_string();
        }

        self.index.remove(old_name);
        self.index.insert(new_name.to_string(), category);

        if !self.contents.rename_file(old_name, new_name) {
            log::warn!("No content behind {}; creating an empty entry", old_name);
            self.contents.set_file_value(new_name, FileContent::empty());
        }

        if self.current_file.as_deref() == Some(old_name) {
            self.current_file = Some(new_name.to_string());
        }

        log::info!("Renamed {} to {} in {}", old_name, new_name, category);
        Ok(category)
    }

    /// Remove an asset and its content; clears the current file selection.
    pub fn remove(&mut self, name: &str) -> AssetResult<RemovedAsset> {
        let Some(category) = self.index.remove(name) else {
            log::warn!("Cannot remove {}: not in any category", name);
            return Err(AssetError::NotFound(name.to_string()));
        };

        let list = &mut self.lists[category.index()];
        let position = list.iter().position(|n| n == name).unwrap_or(list.len());
        if position < list.len() {
            list.remove(position);
        }

        let content = self.contents.remove_file(name);
        self.current_file = None;

        log::info!("Removed {} from {}", name, category);
        Ok(RemovedAsset {
            name: name.to_string(),
            category,
            position,
            content,
        })
    }

    /// Put a removed asset back at its old position.
    pub fn reinsert(&mut self, removed: RemovedAsset) -> AssetResult<()> {
        if self.contains(&removed.name) {
            return Err(AssetError::NameTaken(removed.name));
        }

        let list = &mut self.lists[removed.category.index()];
        let position = removed.position.min(list.len());
        list.insert(position, removed.name.clone());

        self.index.insert(removed.name.clone(), removed.category);
        self.contents.set_file_value(
            &removed.name,
            removed.content.unwrap_or_else(FileContent::empty),
        );
        Ok(())
    }

    /// Overwrite the content of a listed asset, returning the previous content.
    pub fn write_content(&mut self, name: &str, content: FileContent) -> AssetResult<Option<FileContent>> {
        if !self.contains(name) {
            return Err(AssetError::NotFound(name.to_string()));
        }
        let previous = self.contents.file_value(name).cloned();
        self.contents.set_file_value(name, content);
        Ok(previous)
    }

    /// Empty every category, dropping the content of every listed name.
    pub fn clear(&mut self) {
        for (name, _) in self.index.drain() {
            self.contents.remove_file(&name);
        }
        for list in &mut self.lists {
            list.clear();
        }
        self.current_file = None;
    }

    /// Snapshot of the category lists.
    pub fn manifest(&self) -> AssetManifest {
        let mut manifest = AssetManifest::default();
        for &category in AssetCategory::all() {
            *manifest.names_mut(category) = self.lists[category.index()].clone();
        }
        manifest
    }

    /// Replace the category lists with a saved manifest.
    ///
    /// Names without content are dropped, names repeated across categories
    /// keep their first listing, and content the manifest does not mention
    /// is listed by classification. Returns the number of dropped names.
    pub fn restore(&mut self, manifest: &AssetManifest) -> usize {
        for list in &mut self.lists {
            list.clear();
        }
        self.index.clear();
        self.current_file = None;

        let mut dropped = 0;
        for &category in AssetCategory::all() {
            for name in manifest.names(category) {
                if !self.contents.contains_file(name) {
                    log::warn!("Dropping {} from {}: no content", name, category);
                    dropped += 1;
                    continue;
                }
                if self.index.contains_key(name) {
                    log::warn!("Dropping duplicate listing of {} in {}", name, category);
                    dropped += 1;
                    continue;
                }
                self.lists[category.index()].push(name.clone());
                self.index.insert(name.clone(), category);
            }
        }

        self.adopt_unlisted();
        dropped
    }

    fn adopt_unlisted(&mut self) {
        for name in self.contents.file_names() {
            if self.index.contains_key(&name) {
                continue;
            }
            let (category, _) = self.classify(&name);
            log::debug!("Listing unlisted content {} under {}", name, category);
            self.lists[category.index()].push(name.clone());
            self.index.insert(name, category);
        }
    }

    /// Mark a listed file as the one open in the editor.
    pub fn select_file(&mut self, name: Option<&str>) -> AssetResult<()> {
        match name {
            Some(name) if !self.contains(name) => Err(AssetError::NotFound(name.to_string())),
            _ => {
                self.current_file = name.map(str::to_string);
                Ok(())
            }
        }
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// Check both bookkeeping invariants.
    pub fn is_consistent(&self) -> bool {
        let listed: usize = self.lists.iter().map(Vec::len).sum();
        if listed != self.index.len() {
            return false;
        }

        let every_listed_has_content = self.iter().all(|(category, name)| {
            self.index.get(name) == Some(&category) && self.contents.contains_file(name)
        });
        let every_content_listed = self
            .contents
            .file_names()
            .iter()
            .all(|name| self.index.contains_key(name));

        every_listed_has_content && every_content_listed
    }
}
