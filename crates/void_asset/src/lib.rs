//! # void_asset - Editor Asset Store
//!
//! Keeps track of every file imported into a project:
//! - Classification of uploads into categories by extension
//! - Pluggable, asynchronous file reading with per-extension read modes
//! - Name-keyed content shared with the running game
//! - Rename/remove that keep the category lists and content in sync
//!
//! ## Example
//!
//! ```ignore
//! use void_asset::prelude::*;
//!
//! let mut store = AssetStore::new();
//! let files = vec![PickedFile::from_path("art/logo.png")];
//!
//! let uploaded = store.upload(&LocalFileSource, &files).await?;
//! assert_eq!(store.category_of("logo.png"), Some(AssetCategory::Textures));
//!
//! store.rename("logo.png", "brand.png")?;
//! store.remove("brand.png")?;
//! ```

pub mod category;
pub mod content;
pub mod error;
pub mod reader;
pub mod store;

pub use category::{
    extension_of, mime_for_extension, trim_filename, AssetCategory, ClassificationTable, ReadMode,
};
pub use content::{FileContent, FileContents, FilesMap};
pub use error::{AssetError, AssetResult, ReadError};
pub use reader::{FileSource, LocalFileSource, PickedFile};
pub use store::{
    AssetDescriptor, AssetManifest, AssetStore, RemovedAsset, Uploaded, NEW_ANIMATION_NAME,
};

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::category::{AssetCategory, ClassificationTable, ReadMode};
    pub use crate::content::{FileContent, FileContents, FilesMap};
    pub use crate::error::{AssetError, ReadError};
    pub use crate::reader::{FileSource, LocalFileSource, PickedFile};
    pub use crate::store::{AssetStore, Uploaded};
}
