use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefaultsError {
    /// The key is not in the store's allowed set. Carries the caller's
    /// fallback so it can still be used.
    #[error("unsupported key '{key}'")]
    UnsupportedKey { key: String, fallback: String },

    #[error("invalid defaults file {path:?}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error on defaults file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize defaults: {0}")]
    Serialize(#[source] serde_json::Error),
}
