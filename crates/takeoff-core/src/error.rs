//! Error types for takeoff-core

use std::path::PathBuf;

/// Result type for takeoff-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an install run.
///
/// Missing or malformed manifests, descriptors and bootstrap anchors are not
/// errors; they are skipped and show up in the [`InstallReport`](crate::InstallReport).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file given explicitly but not present
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file is not valid TOML or has unknown keys
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Manifest could not be serialized back to JSON
    #[error("Failed to serialize manifest {path}: {source}")]
    ManifestSerialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem error from takeoff-fs
    #[error(transparent)]
    Fs(#[from] takeoff_fs::Error),
}
