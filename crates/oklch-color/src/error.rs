//! Error types for the color model.
//!
//! Parsing is the only fallible operation. Public entry points such as
//! [`parse_anything`](crate::parse_anything) and
//! [`code_to_lch_value`](crate::code_to_lch_value) turn these errors into
//! `None`; [`parse_css`](crate::parse_css) keeps them for diagnostics.

use thiserror::Error;

/// Color model error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Text does not match any supported color grammar.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// Trimmed input text
        input: String,
        /// What went wrong
        reason: String,
    },

    /// Unknown color function, space or keyword.
    #[error(transparent)]
    Core(#[from] oklch_core::Error),
}

impl ColorError {
    /// Creates a parse error.
    #[inline]
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for parse errors.
    #[inline]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ColorError::parse("rgb(", "missing closing parenthesis");
        assert!(err.is_parse());
        assert_eq!(
            err.to_string(),
            "cannot parse \"rgb(\": missing closing parenthesis"
        );
    }

    #[test]
    fn test_from_core() {
        let err: ColorError = oklch_core::Error::unknown_name("color space", "cmyk").into();
        assert!(!err.is_parse());
        assert!(err.to_string().contains("cmyk"));
    }
}
