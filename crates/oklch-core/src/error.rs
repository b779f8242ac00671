//! Error types for oklch-core.
//!
//! The picker's public entry points report bad user input through `Option`
//! sentinels. [`Error`] covers the remaining failure modes: string-to-enum
//! conversions, invalid buffer sizes and non-finite component values.
//!
//! # Usage
//!
//! ```rust
//! use oklch_core::{Axis, Error};
//!
//! let err = "x".parse::<Axis>().unwrap_err();
//! assert!(matches!(err, Error::UnknownName { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by core value types.
#[derive(Debug, Error)]
pub enum Error {
    /// A component value is NaN or infinite.
    #[error("invalid {name} value: {value}")]
    InvalidValue {
        /// Component name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A name did not match any variant of an enumeration.
    #[error("unknown {kind} '{name}'")]
    UnknownName {
        /// What was being looked up (axis, gamut, format...)
        kind: &'static str,
        /// The rejected name
        name: String,
    },

    /// Image dimensions are zero or too large for a pixel buffer.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::InvalidValue`] error.
    #[inline]
    pub fn invalid_value(name: &'static str, value: f64) -> Self {
        Self::InvalidValue { name, value }
    }

    /// Creates an [`Error::UnknownName`] error.
    #[inline]
    pub fn unknown_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a lookup error.
    #[inline]
    pub fn is_unknown_name(&self) -> bool {
        matches!(self, Self::UnknownName { .. })
    }
}
