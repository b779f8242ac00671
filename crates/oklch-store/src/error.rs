//! Error types for the value store.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for store construction and configuration.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The configured default color does not parse.
    #[error("invalid default color: '{0}'")]
    InvalidDefaultColor(String),

    /// A configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A configuration file is not valid RON.
    #[error("invalid config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// A configuration could not be serialized.
    #[error("cannot serialize config: {0}")]
    ConfigWrite(#[from] ron::Error),
}

impl StoreError {
    /// Creates an [`InvalidDefaultColor`](Self::InvalidDefaultColor) error.
    #[inline]
    pub fn invalid_default_color(code: impl Into<String>) -> Self {
        Self::InvalidDefaultColor(code.into())
    }

    /// Creates a [`ConfigRead`](Self::ConfigRead) error.
    #[inline]
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
