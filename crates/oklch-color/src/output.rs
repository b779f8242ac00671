//! Output notations offered to the user.

use crate::color::Color;
use crate::format::{fmt_num, format_css, format_hex, format_hex8, format_rgb_int};
use crate::gamut::{in_rgb, to_rgb_gamut};
use crate::round::clean;
use crate::space::ColorSpace;
use oklch_core::{Error, LchValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notation used for the formatted output field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// `Figma P3 #rrggbbaa`
    #[serde(rename = "figmaP3")]
    FigmaP3,
    /// `#rrggbb`, or `#rrggbbaa` when translucent
    #[serde(rename = "hex")]
    Hex,
    /// `#rrggbb`, or `rgba(...)` when translucent
    #[serde(rename = "hex/rgba")]
    HexRgba,
    /// `hsl(h s% l%)`
    #[serde(rename = "hsl")]
    Hsl,
    /// `lab(l a b)`
    #[serde(rename = "lab")]
    Lab,
    /// `lch(l c h)`
    #[default]
    #[serde(rename = "lch")]
    Lch,
    /// `Linear RGB vec(r, g, b, a)`
    #[serde(rename = "lrgb")]
    Lrgb,
    /// `l, c, h[, a]`
    #[serde(rename = "numbers")]
    Numbers,
    /// `oklab(l a b)`
    #[serde(rename = "oklab")]
    Oklab,
    /// `color(display-p3 r g b)`
    #[serde(rename = "p3")]
    P3,
    /// `rgb(r, g, b)`
    #[serde(rename = "rgb")]
    Rgb,
}

impl OutputFormat {
    /// Every format, in menu order.
    pub const ALL: [OutputFormat; 11] = [
        OutputFormat::FigmaP3,
        OutputFormat::Hex,
        OutputFormat::HexRgba,
        OutputFormat::Hsl,
        OutputFormat::Lab,
        OutputFormat::Lch,
        OutputFormat::Lrgb,
        OutputFormat::Numbers,
        OutputFormat::Oklab,
        OutputFormat::P3,
        OutputFormat::Rgb,
    ];

    /// Identifier used in configuration files and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            OutputFormat::FigmaP3 => "figmaP3",
            OutputFormat::Hex => "hex",
            OutputFormat::HexRgba => "hex/rgba",
            OutputFormat::Hsl => "hsl",
            OutputFormat::Lab => "lab",
            OutputFormat::Lch => "lch",
            OutputFormat::Lrgb => "lrgb",
            OutputFormat::Numbers => "numbers",
            OutputFormat::Oklab => "oklab",
            OutputFormat::P3 => "p3",
            OutputFormat::Rgb => "rgb",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unknown_name("output format", s))
    }
}

/// Cleans every coordinate of `color` to `precision` decimals, alpha excluded.
fn clean_coords(color: Color, precision: i32) -> Color {
    Color {
        coords: color.coords.map(|v| clean(v, precision)),
        ..color
    }
}

/// Formats a value in the given notation.
///
/// Notations that can only show sRGB (`hex`, `hex/rgba`, `hsl`, `rgb`) use
/// the gamut-mapped color when the value is outside sRGB.
///
/// ```
/// use oklch_color::{format_output, OutputFormat};
/// use oklch_core::LchValue;
///
/// let value = LchValue::new(1.0, 0.0, 0.0, 1.0);
/// assert_eq!(format_output(&value, OutputFormat::Hex), "#ffffff");
/// assert_eq!(format_output(&value, OutputFormat::Numbers), "1, 0, 0");
/// ```
pub fn format_output(value: &LchValue, format: OutputFormat) -> String {
    let oklch = value.to_color();
    let color = Color::from(oklch);
    let translucent = oklch.is_translucent();
    let rgb = || {
        if in_rgb(&color) {
            color.to_rgb()
        } else {
            to_rgb_gamut(&oklch)
        }
    };

    match format {
        OutputFormat::FigmaP3 => {
            format!("Figma P3 {}", format_hex8(&color.to_rgb_in(ColorSpace::DisplayP3)))
        }
        OutputFormat::Hex if translucent => format_hex8(&rgb()),
        OutputFormat::Hex => format_hex(&rgb()),
        OutputFormat::HexRgba if translucent => format_rgb_int(&rgb()),
        OutputFormat::HexRgba => format_hex(&rgb()),
        OutputFormat::Hsl => {
            let srgb = Color::from_rgb(ColorSpace::Srgb, rgb());
            format_css(&clean_coords(srgb.to(ColorSpace::Hsl), 2))
        }
        OutputFormat::Lab => format_css(&clean_coords(color.to(ColorSpace::Lab), 2)),
        OutputFormat::Lch => format_css(&clean_coords(color.to(ColorSpace::Lch), 2)),
        OutputFormat::Lrgb => {
            let lin = color.to_rgb_in(ColorSpace::SrgbLinear);
            let ch = |v: f64| fmt_num(clean(v, 5));
            format!(
                "Linear RGB vec({}, {}, {}, {})",
                ch(lin.r),
                ch(lin.g),
                ch(lin.b),
                ch(lin.alpha)
            )
        }
        OutputFormat::Numbers => {
            let ch = |v: f64| fmt_num(clean(v, 2));
            let mut out = format!("{}, {}, {}", ch(oklch.l()), ch(oklch.c()), ch(oklch.h()));
            if translucent {
                out = format!("{out}, {}", ch(oklch.alpha()));
            }
            out
        }
        OutputFormat::Oklab => {
            let [l, a, b] = color.to(ColorSpace::Oklab).coords;
            let ch = |v: f64| fmt_num(clean(v, 2));
            let alpha = if translucent {
                format!(" / {}", ch(oklch.alpha()))
            } else {
                String::new()
            };
            format!("oklab({} {} {}{alpha})", ch(l), ch(a), ch(b))
        }
        OutputFormat::P3 => format_css(&clean_coords(color.to(ColorSpace::DisplayP3), 4)),
        OutputFormat::Rgb => format_rgb_int(&rgb()),
    }
}

/// Formats a value in every notation, in [`OutputFormat::ALL`] order.
pub fn format_all(value: &LchValue) -> Vec<(OutputFormat, String)> {
    OutputFormat::ALL
        .into_iter()
        .map(|f| (f, format_output(value, f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: LchValue = LchValue::new(0.65, 0.15, 130.0, 1.0);

    #[test]
    fn test_format_ids_roundtrip() {
        for format in OutputFormat::ALL {
            assert_eq!(format.id().parse::<OutputFormat>().unwrap(), format);
        }
        assert!("cmyk".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Lch);
    }

    #[test]
    fn test_hex_and_rgb_agree() {
        let hex = format_output(&GREEN, OutputFormat::Hex);
        let rgb = format_output(&GREEN, OutputFormat::Rgb);
        assert_eq!(hex.len(), 7);
        assert!(rgb.starts_with("rgb("));
        assert_eq!(format_output(&GREEN, OutputFormat::HexRgba), hex);
    }

    #[test]
    fn test_translucent_switches_notation() {
        let value = LchValue { a: 0.5, ..GREEN };
        assert_eq!(format_output(&value, OutputFormat::Hex).len(), 9);
        assert!(format_output(&value, OutputFormat::HexRgba).starts_with("rgba("));
        assert!(format_output(&value, OutputFormat::Numbers).ends_with(", 0.5"));
        assert!(format_output(&value, OutputFormat::Oklab).ends_with(" / 0.5)"));
        assert!(format_output(&value, OutputFormat::Lch).ends_with(" / 0.5)"));
    }

    #[test]
    fn test_out_of_srgb_maps_for_hex() {
        let vivid = LchValue::new(0.7, 0.3, 150.0, 1.0);
        let rgb = format_output(&vivid, OutputFormat::Rgb);
        assert!(!rgb.contains('-'));
        // P3 keeps the unclamped channels
        assert!(format_output(&vivid, OutputFormat::P3).starts_with("color(display-p3 "));
    }

    #[test]
    fn test_fixed_notations() {
        let white = LchValue::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(format_output(&white, OutputFormat::FigmaP3), "Figma P3 #ffffffff");
        assert_eq!(format_output(&white, OutputFormat::Lrgb), "Linear RGB vec(1, 1, 1, 1)");
        assert_eq!(format_output(&white, OutputFormat::Oklab), "oklab(1 0 0)");
        let black = LchValue::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(format_output(&black, OutputFormat::Hsl), "hsl(none 0% 0%)");
        assert_eq!(format_output(&white, OutputFormat::Lab), "lab(100 0 0)");
        assert_eq!(format_all(&white).len(), OutputFormat::ALL.len());
    }
}
