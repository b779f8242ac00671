//! # oklch-core
//!
//! Core value types for the OKLCH color picker.
//!
//! This crate provides the foundational types shared by every other crate in
//! the workspace:
//!
//! - [`OklchColor`] - canonical immutable OKLCH color with normalized hue
//! - [`LchValue`], [`PartialValue`] - UI-facing value and partial updates
//! - [`Axis`] - one of the three OKLCH components (`l`, `c`, `h`)
//! - [`GamutSpace`] - innermost display gamut a color fits into
//! - [`Support`] - which wide gamuts the display can show
//! - [`Rgb`] - plain floating point RGB triple with alpha
//! - [`PickerId`] - per-session identifier used to key listeners and tasks
//!
//! ## Crate Structure
//!
//! ```text
//! oklch-core (this crate)
//!    ^
//!    |
//!    +-- oklch-color (parsing, formatting, gamut classification)
//!    +-- oklch-paint (gamut slice rasterizer)
//!    +-- oklch-worker (worker pool and scheduler)
//!    +-- oklch-store (value store and listeners)
//! ```
//!
//! ## Alpha
//!
//! Alpha is always stored in `0..=1`, both in [`OklchColor`] and [`LchValue`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod id;
pub mod rgb;
pub mod space;
pub mod value;

// Re-exports for convenience
pub use error::*;
pub use id::PickerId;
pub use rgb::Rgb;
pub use space::{GamutSpace, Support};
pub use value::{normalize_hue, Axis, LchValue, OklchColor, PartialValue};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use oklch_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{Error, Result};
    pub use crate::id::PickerId;
    pub use crate::rgb::Rgb;
    pub use crate::space::{GamutSpace, Support};
    pub use crate::value::{Axis, LchValue, OklchColor, PartialValue};
}
