//! # void_script - Script Fields and Bindings
//!
//! Scripts attached to game objects declare typed, editable fields. This
//! crate provides:
//! - The field descriptor protocol (`FieldKind`, `FieldSpec`, `FieldValue`)
//! - Script instances and loaders keyed by file extension
//! - Bindings of one instance to one game object
//! - The render contract the inspector builds its controls from
//!
//! ## Example
//!
//! ```ignore
//! use void_script::prelude::*;
//!
//! let loaders = ScriptLoaders::with_defaults();
//! let mut binding = ScriptBinding::load(&loaders, "player.js", source, object)?;
//!
//! for field in binding.render() {
//!     println!("{} = {:?}", field.label(), field.value());
//! }
//!
//! let change = binding.set(&FieldPath::root("speed"), 4.0.into())?;
//! ```

pub mod binding;
pub mod control;
pub mod error;
pub mod field;
pub mod instance;
pub mod loader;
pub mod manifest;

pub use binding::{FieldChange, ScriptBinding, ScriptDefinition};
pub use control::{humanize, render, Control, PickScope, RenderedField, DEFAULT_HINT_TEXT};
pub use error::{FieldError, ScriptError, ScriptResult};
pub use field::{FieldKind, FieldOptions, FieldPath, FieldSpec, FieldValue, ObjectRef};
pub use instance::{PropertyTable, ScriptInstance};
pub use loader::{ScriptLoader, ScriptLoaders};
pub use manifest::{Manifest, ManifestLoader, FIELDS_MARKER};

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::binding::{FieldChange, ScriptBinding};
    pub use crate::control::{Control, PickScope, RenderedField};
    pub use crate::error::{FieldError, ScriptError};
    pub use crate::field::{FieldKind, FieldPath, FieldSpec, FieldValue, ObjectRef};
    pub use crate::instance::ScriptInstance;
    pub use crate::loader::{ScriptLoader, ScriptLoaders};
}
