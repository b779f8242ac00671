//! # oklch-color
//!
//! The color model behind the picker: CSS parsing and formatting, color space
//! conversion, gamut classification and gamut mapping.
//!
//! - **Parsing** - hex, named colors and every CSS Color 4 function, plus
//!   lenient forms pasted from stylesheets ([`parse_anything`])
//! - **Conversion** - sRGB, Display P3, Rec2020, A98 RGB, ProPhoto RGB,
//!   linear sRGB, XYZ, HSL, HWB, CIELAB/LCH and OKLab/OKLCH
//! - **Gamut** - innermost display gamut of a color ([`get_space`]) and
//!   chroma-reduction mapping into sRGB ([`to_rgb_gamut`])
//! - **Picker values** - [`code_to_lch_value`], [`get_visible_value`] and
//!   the output notations of [`format_output`]
//!
//! # Architecture
//!
//! ```text
//!        oklch-color
//!             |
//!     +-------+--------+-----------+
//!     |       |        |           |
//! oklch-core palette cssparser    glam
//! ```
//!
//! Every conversion goes through linear sRGB. `palette` supplies the color
//! models, the wide RGB spaces are matrices over linear sRGB, and pairs that
//! share an intermediate (OKLCH/OKLab, HSL/sRGB) take direct paths.
//!
//! # Quick Start
//!
//! ```rust
//! use oklch_color::{code_to_lch_value, get_space, Color, format_output, OutputFormat};
//! use oklch_core::GamutSpace;
//!
//! let value = code_to_lch_value("oklch(0.65 0.15 130)").unwrap();
//! assert_eq!(get_space(&Color::from(value.to_color())), GamutSpace::Srgb);
//!
//! let hex = format_output(&value, OutputFormat::Hex);
//! assert!(hex.starts_with('#'));
//! ```
//!
//! # Dependencies
//!
//! - [`oklch-core`] - value types and picker constants
//! - `palette` - OKLab/OKLCH, CIELAB/LCH, XYZ, HSL/HWB and adaptation
//! - `cssparser` - CSS tokens and named colors
//! - `glam` - wide RGB matrices
//!
//! # Used By
//!
//! - `oklch-paint` - gamut classification per pixel
//! - `oklch-store` - code input and visible value
//! - `oklch-cli`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod code;
mod color;
mod error;
mod fragment;
mod output;
mod parse;
mod round;
mod visible;
pub mod convert;
pub mod format;
pub mod gamut;
pub mod space;

pub use code::{code_to_lch_value, is_hex_notation};
pub use color::Color;
pub use error::{ColorError, ColorResult};
pub use format::{fast_format, format_css, format_hex, format_hex8, format_lch, format_rgb};
pub use fragment::{parse_fragment, to_fragment};
pub use gamut::{
    delta_e_ok, get_space, in_p3, in_rec2020, in_rgb, to_rgb_gamut, GamutSample, SpaceFilter,
};
pub use output::{format_all, format_output, OutputFormat};
pub use parse::{parse, parse_anything, parse_css};
pub use round::{clean, round_fixed, snap, Rounding};
pub use space::ColorSpace;
pub use visible::{get_visible_value, VisibleValue};

/// Prelude with commonly used items
pub mod prelude {
    pub use crate::{
        code_to_lch_value, get_space, get_visible_value, parse_anything, Color, ColorSpace,
        GamutSample, OutputFormat, Rounding, SpaceFilter,
    };
    pub use oklch_core::prelude::*;
}
