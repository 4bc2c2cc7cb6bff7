//! Asset categories and the extension classification table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Category an asset is listed under in the explorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Models,
    Textures,
    Scripts,
    Prefabs,
    Templates,
    Animations,
    Others,
}

impl AssetCategory {
    /// Number of categories.
    pub const COUNT: usize = 7;

    /// All categories in listing order. Rename/remove scan in this order.
    pub fn all() -> &'static [AssetCategory; Self::COUNT] {
        &[
            AssetCategory::Models,
            AssetCategory::Textures,
            AssetCategory::Scripts,
            AssetCategory::Prefabs,
            AssetCategory::Templates,
            AssetCategory::Animations,
            AssetCategory::Others,
        ]
    }

    /// Position of this category in [`AssetCategory::all`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetCategory::Models => "models",
            AssetCategory::Textures => "textures",
            AssetCategory::Scripts => "scripts",
            AssetCategory::Prefabs => "prefabs",
            AssetCategory::Templates => "templates",
            AssetCategory::Animations => "animations",
            AssetCategory::Others => "others",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a file's bytes are turned into stored content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadMode {
    /// UTF-8 text (scripts and text model formats)
    Text,
    /// Raw bytes
    ArrayBuffer,
    /// `data:<mime>;base64,...` string
    DataUrl,
}

impl ReadMode {
    /// Read mode for a lowercase extension.
    pub fn for_extension(ext: &str) -> Self {
        match ext {
            "js" | "obj" | "gltf" | "babylon" => ReadMode::Text,
            "stl" => ReadMode::ArrayBuffer,
            _ => ReadMode::DataUrl,
        }
    }
}

/// Extension to category mapping.
///
/// Extensions missing from the table classify as [`AssetCategory::Others`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTable {
    /// Table format version
    pub version: u32,
    /// Lowercase extension -> category
    pub entries: BTreeMap<String, AssetCategory>,
}

impl ClassificationTable {
    pub const CURRENT_VERSION: u32 = 1;

    /// Table with no entries: everything classifies as `others`.
    pub fn empty() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an entry.
    pub fn with(mut self, ext: &str, category: AssetCategory) -> Self {
        self.entries.insert(ext.to_lowercase(), category);
        self
    }

    /// Category for an extension (case-insensitive).
    pub fn classify(&self, ext: &str) -> AssetCategory {
        self.entries
            .get(&ext.to_lowercase())
            .copied()
            .unwrap_or(AssetCategory::Others)
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::empty()
            .with("png", AssetCategory::Textures)
            .with("gif", AssetCategory::Textures)
            .with("jpg", AssetCategory::Textures)
            .with("js", AssetCategory::Scripts)
            .with("stl", AssetCategory::Models)
            .with("obj", AssetCategory::Models)
            .with("gltf", AssetCategory::Models)
            .with("babylon", AssetCategory::Models)
    }
}

/// Strip any directory prefix (either separator style) from a file name.
pub fn trim_filename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Lowercase text after the last `.` of the file name, if any.
pub fn extension_of(name: &str) -> Option<String> {
    let name = trim_filename(name);
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// MIME type used when encoding a data URL.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "gif" => "image/gif",
        "jpg" | "jpeg" => "image/jpeg",
        "json" | "anim" | "prefab" | "template" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_matches_listing() {
        let table = ClassificationTable::default();
        assert_eq!(table.classify("png"), AssetCategory::Textures);
        assert_eq!(table.classify("GIF"), AssetCategory::Textures);
        assert_eq!(table.classify("jpg"), AssetCategory::Textures);
        assert_eq!(table.classify("js"), AssetCategory::Scripts);
        assert_eq!(table.classify("stl"), AssetCategory::Models);
        assert_eq!(table.classify("obj"), AssetCategory::Models);
        assert_eq!(table.classify("gltf"), AssetCategory::Models);
        assert_eq!(table.classify("babylon"), AssetCategory::Models);
        assert_eq!(table.classify("jpeg"), AssetCategory::Others);
        assert_eq!(table.classify("wav"), AssetCategory::Others);
        assert_eq!(table.entries.len(), 8);
    }

    #[test]
    fn test_read_modes() {
        assert_eq!(ReadMode::for_extension("js"), ReadMode::Text);
        assert_eq!(ReadMode::for_extension("babylon"), ReadMode::Text);
        assert_eq!(ReadMode::for_extension("stl"), ReadMode::ArrayBuffer);
        assert_eq!(ReadMode::for_extension("png"), ReadMode::DataUrl);
        assert_eq!(ReadMode::for_extension(""), ReadMode::DataUrl);
    }

    #[test]
    fn test_trim_and_extension() {
        assert_eq!(trim_filename("assets/textures/logo.png"), "logo.png");
        assert_eq!(trim_filename("C:\\work\\player.JS"), "player.JS");
        assert_eq!(trim_filename("plain.obj"), "plain.obj");

        assert_eq!(extension_of("dir/Logo.PNG").as_deref(), Some("png"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of("some.dir/README"), None);
    }

    #[test]
    fn test_category_order() {
        for (i, category) in AssetCategory::all().iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        assert_eq!(AssetCategory::Animations.to_string(), "animations");
    }
}
