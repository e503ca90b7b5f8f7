//! Error types for tslister

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a type listing.
///
/// Missing config files, missing conventional directories and empty file
/// sets are not errors; they drive the fallback logic instead.
#[derive(Error, Debug)]
pub enum ListError {
    /// The lister was built without a file system
    #[error("no file system was provided to the type lister")]
    MissingFileSystem,

    /// Cancellation was requested through the lister's token
    #[error("type listing was cancelled")]
    Cancelled,

    /// A file system operation failed
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A tsconfig include/exclude pattern could not be compiled
    #[error("invalid glob pattern '{pattern}' in '{config}': {message}")]
    InvalidPattern {
        config: PathBuf,
        pattern: String,
        message: String,
    },

    /// A source file could not be parsed
    #[error("failed to parse '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

impl ListError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, ListError>;
