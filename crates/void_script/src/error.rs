//! Field and script errors

use thiserror::Error;

use crate::field::{FieldKind, FieldPath};

/// Errors raised by field declarations and field writes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Not a valid field type: {0}")]
    InvalidFieldType(String),

    #[error("Unknown field: {0}")]
    UnknownField(FieldPath),

    #[error("Field {0} is a group and holds no value")]
    NotSettable(FieldPath),

    #[error("Field {path} expects a {expected} value, got {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: FieldKind,
        found: &'static str,
    },

    #[error("{value:?} is not one of the choices of {path}")]
    InvalidChoice { path: FieldPath, value: String },

    #[error("{value} is outside the range of {path}")]
    OutOfRange { path: FieldPath, value: f64 },
}

/// Errors raised while turning a script source into an instance
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Invalid field manifest in {name}: {source}")]
    Manifest {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Script {0} is not a text file")]
    NotText(String),

    #[error("No script loader for {0}")]
    Unsupported(String),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Script result
pub type ScriptResult<T> = Result<T, ScriptError>;
