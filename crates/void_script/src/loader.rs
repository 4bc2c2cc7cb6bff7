//! Script loaders keyed by file extension.

use std::collections::BTreeMap;

use void_core::ObjectId;

use crate::error::{ScriptError, ScriptResult};
use crate::instance::ScriptInstance;
use crate::manifest::ManifestLoader;

/// Turns script source text into a live instance.
pub trait ScriptLoader: Send + Sync {
    /// File extensions this loader handles, lowercase without the dot
    fn extensions(&self) -> &[&str];

    /// Instantiate `source` for the game object `target`.
    fn load(
        &self,
        source_name: &str,
        source: &str,
        target: ObjectId,
    ) -> ScriptResult<Box<dyn ScriptInstance>>;
}

/// Registry of script loaders.
///
/// The last loader registered for an extension wins.
pub struct ScriptLoaders {
    by_extension: BTreeMap<String, usize>,
    loaders: Vec<Box<dyn ScriptLoader>>,
}

impl ScriptLoaders {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            by_extension: BTreeMap::new(),
            loaders: Vec::new(),
        }
    }

    /// Registry with the manifest loader installed
    pub fn with_defaults() -> Self {
        let mut loaders = Self::new();
        loaders.register(ManifestLoader);
        loaders
    }

    /// Register a loader
    pub fn register<L: ScriptLoader + 'static>(&mut self, loader: L) {
        let idx = self.loaders.len();
        for ext in loader.extensions() {
            self.by_extension.insert(ext.to_lowercase(), idx);
        }
        self.loaders.push(Box::new(loader));
    }

    /// Loader for a file name, by its extension
    pub fn get(&self, source_name: &str) -> Option<&dyn ScriptLoader> {
        let (_, ext) = source_name.rsplit_once('.')?;
        let idx = *self.by_extension.get(&ext.to_lowercase())?;
        self.loaders.get(idx).map(|l| l.as_ref())
    }

    /// Check if some loader handles this file
    pub fn supports(&self, source_name: &str) -> bool {
        self.get(source_name).is_some()
    }

    /// Instantiate a script with the matching loader
    pub fn load(
        &self,
        source_name: &str,
        source: &str,
        target: ObjectId,
    ) -> ScriptResult<Box<dyn ScriptInstance>> {
        let loader = self
            .get(source_name)
            .ok_or_else(|| ScriptError::Unsupported(source_name.to_string()))?;
        loader.load(source_name, source, target)
    }

    /// Number of registered loaders
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl Default for ScriptLoaders {
    fn default() -> Self {
        Self::with_defaults()
    }
}
