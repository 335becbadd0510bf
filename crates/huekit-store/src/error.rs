//! Error types for theme persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by key-value backends and the theme repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be mapped to a storage slot.
    #[error("invalid store key '{0}'")]
    InvalidKey(String),

    /// Reading or writing a backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be serialized.
    #[error("failed to encode themes: {0}")]
    Encode(#[source] serde_json::Error),

    /// Imported text is not a theme list.
    #[error("invalid theme JSON: {0}")]
    Import(#[source] serde_json::Error),
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
