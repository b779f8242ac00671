//! Color code to picker value.
//!
//! Parsing produces an exact OKLCH value that is usually noisy
//! (`0.62796 0.25768 29.2339`). [`code_to_lch_value`] looks for the shortest
//! rounding that still describes the same 8-bit color in the same gamut, so
//! typing `#ff0000` shows clean numbers.

use crate::color::Color;
use crate::format::format_hex8;
use crate::fragment::parse_fragment;
use crate::gamut::{get_space, to_rgb_gamut};
use crate::parse::parse_anything;
use crate::round::Rounding;
use crate::space::ColorSpace;
use oklch_core::{GamutSpace, LchValue};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static HEX_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#?([\da-f]{3}|[\da-f]{4}|[\da-f]{6}|[\da-f]{8})$").expect("valid regex")
});

/// `rgb(1 1 1)` in the space-separated form, read as 0..1 channels.
static UNIT_WHITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*rgb\(\s*1\s+1\s+1\s*(/[^)]*)?\)\s*;?\s*$").expect("valid regex")
});

/// Returns `true` for 3, 4, 6 or 8 hex digits with an optional `#`.
///
/// ```
/// use oklch_color::is_hex_notation;
///
/// assert!(is_hex_notation("#FF8000"));
/// assert!(is_hex_notation("f80"));
/// assert!(is_hex_notation("#ff80"));
/// assert!(!is_hex_notation("#ff800"));
/// assert!(!is_hex_notation("red"));
/// ```
pub fn is_hex_notation(text: &str) -> bool {
    HEX_NOTATION.is_match(text)
}

/// Converts any color code to a picker value.
///
/// - `#l,c,h,a` fragments and OKLCH input are taken as they are
/// - sRGB white (`#fff`, `white`, `color(srgb 1 1 1)`) and the unit form
///   `rgb(1 1 1)` become `{1, 0, 0}`; the comma form `rgb(1, 1, 1)` keeps
///   its CSS meaning of 1 out of 255
/// - everything else is rounded aggressively, then precisely, keeping the
///   first rounding that has the same gamut and the same `#rrggbbaa` as the
///   input; the unrounded value is the fallback
///
/// An sRGB input whose exact OKLCH conversion drifts out of sRGB is first
/// snapped back into sRGB.
///
/// Returns `None` when the text is not a color.
pub fn code_to_lch_value(code: &str) -> Option<LchValue> {
    if let Some(value) = parse_fragment(code) {
        return Some(value);
    }
    let parsed = parse_anything(code)?;
    if parsed.is_oklch() {
        return Some(LchValue::from_color(&parsed.to_oklch()));
    }

    let white = parsed.coords == [1.0, 1.0, 1.0] || UNIT_WHITE.is_match(code);
    if parsed.space == ColorSpace::Srgb && white {
        return Some(LchValue::new(1.0, 0.0, 0.0, parsed.alpha));
    }

    let origin = get_space(&parsed);
    let target_hex = format_hex8(&parsed.to_rgb());
    let precise_enough = |value: &LchValue| {
        let color = Color::from(value.to_color());
        get_space(&color) == origin && format_hex8(&color.to_rgb()) == target_hex
    };

    let mut accurate = parsed.to_oklch();
    if origin == GamutSpace::Srgb && get_space(&Color::from(accurate)) != GamutSpace::Srgb {
        accurate = Color::from_rgb(ColorSpace::Srgb, to_rgb_gamut(&accurate)).to_oklch();
    }
    let accurate = LchValue::from_color(&accurate);

    for tier in [Rounding::Aggressive, Rounding::Precise] {
        let rounded = tier.value(&accurate);
        if precise_enough(&rounded) {
            trace!(code, ?tier, "code rounded");
            return Some(rounded);
        }
    }
    trace!(code, "code kept unrounded");
    Some(accurate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oklch_core::OklchColor;

    #[test]
    fn test_oklch_passthrough() {
        let v = code_to_lch_value("oklch(0.65 0.15 130)").unwrap();
        assert_eq!(v, LchValue::new(0.65, 0.15, 130.0, 1.0));
        let v = code_to_lch_value("oklch(65% 0.15 490 / 20%)").unwrap();
        assert_eq!(v, LchValue::new(0.65, 0.15, 130.0, 0.2));
    }

    #[test]
    fn test_white_special_cases() {
        let white = LchValue::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(code_to_lch_value("color(srgb 1 1 1)"), Some(white));
        assert_eq!(code_to_lch_value("#ffffff"), Some(white));
        assert_eq!(code_to_lch_value("white"), Some(white));
        assert_eq!(code_to_lch_value("rgb(255 255 255)"), Some(white));
        assert_eq!(code_to_lch_value("rgb(1 1 1)"), Some(white));
        assert_eq!(code_to_lch_value("color(srgb 1 1 1 / 0.5)").map(|v| v.a), Some(0.5));
        assert_eq!(code_to_lch_value("rgb(1 1 1 / 0.5)").map(|v| v.a), Some(0.5));
    }

    #[test]
    fn test_channel_one_is_not_white() {
        // Channels out of 255
        for code in ["rgb(1, 1, 1)", "rgba(1, 1, 1, 0.5)", "rgb(1 1 2)"] {
            let v = code_to_lch_value(code).unwrap();
            assert!(v.l < 0.1, "{code}: {v:?}");
            let back = Color::from(v.to_color());
            let hex = format_hex8(&back.to_rgb());
            assert!(hex.starts_with("#0101"), "{code}: {hex}");
        }
    }

    #[test]
    fn test_hex_rounds_to_same_color() {
        let v = code_to_lch_value("#ff0000").unwrap();
        assert_eq!(v, Rounding::Precise.value(&v));
        let back = Color::from(v.to_color());
        assert_eq!(format_hex8(&back.to_rgb()), "#ff0000ff");
        assert_eq!(get_space(&back), GamutSpace::Srgb);
    }

    #[test]
    fn test_keeps_gamut_of_wide_input() {
        let v = code_to_lch_value("color(display-p3 1 0 0)").unwrap();
        assert_eq!(get_space(&Color::from(v.to_color())), GamutSpace::P3);
    }

    #[test]
    fn test_fragment_input() {
        let v = code_to_lch_value("#0.5,0.1,200,1").unwrap();
        assert_eq!(v.to_color(), OklchColor::opaque(0.5, 0.1, 200.0));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(code_to_lch_value("").is_none());
        assert!(code_to_lch_value("blurple").is_none());
    }
}
