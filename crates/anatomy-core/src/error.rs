//! # Error Types
//!
//! Load failures are the only fatal condition in the validator. Every
//! variant names the path that could not be loaded so the caller can print
//! an actionable message before exiting non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// A schema, bundle, or data document could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist.
    #[error("{} not found", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying parse error, carrying line and column.
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// The path this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
