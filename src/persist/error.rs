//! Error types for the persist module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing a downloaded image.
#[derive(Debug, Error)]
pub enum PersistError {
    /// File system error (create directory, write file).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
