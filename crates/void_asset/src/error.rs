//! Asset store errors

use thiserror::Error;

/// Failure while reading a picked file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is not valid UTF-8 text")]
    InvalidText { name: String },
}

/// Asset store errors
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset name already in use: {0}")]
    NameTaken(String),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Asset store result
pub type AssetResult<T> = Result<T, AssetError>;
