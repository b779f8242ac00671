//! Error types for the rasterizer.

use thiserror::Error;

/// Error type for paint operations.
#[derive(Error, Debug)]
pub enum PaintError {
    /// Canvas or column range is unusable.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Pixel buffer length does not match its dimensions.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Required length
        expected: usize,
        /// Provided length
        actual: usize,
    },

    /// PNG encoding failed.
    #[error("png encode: {0}")]
    Encode(String),

    /// File could not be written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PaintError {
    /// Creates an [`InvalidDimensions`](Self::InvalidDimensions) error.
    #[inline]
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }
}

/// Result type for paint operations.
pub type Result<T> = std::result::Result<T, PaintError>;
