//! CSS serialization.
//!
//! Numbers are printed the way a browser prints them: shortest round-trip
//! decimal, no trailing zeros, `-0` as `0`. Callers clean float noise with
//! [`clean`](crate::clean) before formatting where it matters.

use crate::color::Color;
use crate::round::clean;
use crate::space::ColorSpace;
use oklch_core::config::{COLOR_FN, L_MAX};
use oklch_core::{OklchColor, Rgb};

/// Formats a number as the shortest decimal that reads back to the same
/// value.
///
/// ```
/// use oklch_color::format::fmt_num;
///
/// assert_eq!(fmt_num(0.5), "0.5");
/// assert_eq!(fmt_num(130.0), "130");
/// assert_eq!(fmt_num(-0.0), "0");
/// ```
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        // Covers -0
        "0".to_string()
    } else {
        format!("{v}")
    }
}

/// Number or `none` for a powerless (NaN) component.
fn fmt_or_none(v: f64) -> String {
    if v.is_nan() { "none".to_string() } else { fmt_num(v) }
}

fn alpha_suffix(alpha: f64) -> String {
    if alpha < 1.0 {
        format!(" / {}", fmt_num(alpha))
    } else {
        String::new()
    }
}

// ============================================================================
// RGB
// ============================================================================

/// `rgb(r, g, b)` with 0-255 channels kept to two decimals, not clamped.
///
/// Used for the sRGB fallback of the visible value, where the exact channel
/// matters more than a pretty integer.
pub fn format_rgb(rgb: &Rgb) -> String {
    let ch = |v: f64| fmt_num((25500.0 * v).round() / 100.0);
    let (r, g, b) = (ch(rgb.r), ch(rgb.g), ch(rgb.b));
    if rgb.alpha < 1.0 {
        format!("rgba({r}, {g}, {b}, {})", fmt_num(rgb.alpha))
    } else {
        format!("rgb({r}, {g}, {b})")
    }
}

/// `rgb(r, g, b)` / `rgba(r, g, b, a)` with clamped integer channels and alpha
/// rounded to two decimals.
pub fn format_rgb_int(rgb: &Rgb) -> String {
    let [r, g, b, _] = rgb.to_rgba8();
    if rgb.alpha < 1.0 {
        let alpha = (rgb.alpha.clamp(0.0, 1.0) * 100.0).round() / 100.0;
        format!("rgba({r}, {g}, {b}, {})", fmt_num(alpha))
    } else {
        format!("rgb({r}, {g}, {b})")
    }
}

/// `#rrggbb`, clamped.
pub fn format_hex(rgb: &Rgb) -> String {
    let [r, g, b, _] = rgb.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// `#rrggbbaa`, clamped. Alpha is always written.
pub fn format_hex8(rgb: &Rgb) -> String {
    let [r, g, b, a] = rgb.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

// ============================================================================
// OKLCH
// ============================================================================

/// `oklch(L C H[ / A%])` with lightness cleaned to 4 decimals.
///
/// ```
/// use oklch_color::format_lch;
/// use oklch_core::OklchColor;
///
/// let color = OklchColor::new(0.65, 0.15, 130.0, 0.5);
/// assert_eq!(format_lch(&color), "oklch(0.65 0.15 130 / 50%)");
/// ```
pub fn format_lch(color: &OklchColor) -> String {
    let mut out = format!(
        "{COLOR_FN}({} {} {}",
        fmt_num(clean(color.l() / L_MAX, 4)),
        fmt_num(color.c()),
        fmt_num(color.h()),
    );
    if color.alpha() < 1.0 {
        out.push_str(&format!(" / {}%", fmt_num(clean(100.0 * color.alpha(), 2))));
    }
    out.push(')');
    out
}

/// [`format_lch`] for OKLCH colors, [`format_rgb_int`] of the sRGB channels
/// for everything else.
pub fn fast_format(color: &Color) -> String {
    if color.is_oklch() {
        format_lch(&color.to_oklch())
    } else {
        format_rgb_int(&color.to_rgb())
    }
}

// ============================================================================
// Generic CSS
// ============================================================================

/// Serializes a color in the notation of its own space.
///
/// `hsl`/`hwb` print percentages, RGB spaces other than sRGB and the XYZ
/// spaces go through `color()`, NaN hues print as `none`. Components are
/// written as they are; clean them first for display.
pub fn format_css(color: &Color) -> String {
    let [x, y, z] = color.coords;
    let alpha = alpha_suffix(color.alpha);
    let pct = |v: f64| format!("{}%", fmt_num(clean(v * 100.0, 2)));
    match color.space {
        ColorSpace::Hsl | ColorSpace::Hwb => {
            format!("{}({} {} {}{alpha})", color.space.css_name(), fmt_or_none(x), pct(y), pct(z))
        }
        ColorSpace::Lab | ColorSpace::Lch | ColorSpace::Oklab | ColorSpace::Oklch => format!(
            "{}({} {} {}{alpha})",
            color.space.css_name(),
            fmt_or_none(x),
            fmt_or_none(y),
            fmt_or_none(z)
        ),
        space => format!(
            "color({} {} {} {}{alpha})",
            space.css_name(),
            fmt_num(x),
            fmt_num(y),
            fmt_num(z)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(-12.5), "-12.5");
        assert_eq!(fmt_or_none(f64::NAN), "none");
    }

    #[test]
    fn test_format_rgb_two_decimals() {
        assert_eq!(format_rgb(&Rgb::opaque(1.0, 0.5, 0.0)), "rgb(255, 127.5, 0)");
        assert_eq!(format_rgb(&Rgb::new(1.0, 1.0, 1.0, 0.5)), "rgba(255, 255, 255, 0.5)");
        // Not clamped
        assert_eq!(format_rgb(&Rgb::opaque(1.1, 0.0, -0.1)), "rgb(280.5, 0, -25.5)");
    }

    #[test]
    fn test_format_rgb_int() {
        assert_eq!(format_rgb_int(&Rgb::opaque(1.0, 0.5, 0.0)), "rgb(255, 128, 0)");
        assert_eq!(format_rgb_int(&Rgb::new(1.2, 0.0, 0.0, 0.333)), "rgba(255, 0, 0, 0.33)");
    }

    #[test]
    fn test_format_hex() {
        let rgb = Rgb::new(1.0, 0.5, 0.0, 0.5);
        assert_eq!(format_hex(&rgb), "#ff8000");
        assert_eq!(format_hex8(&rgb), "#ff800080");
        assert_eq!(format_hex8(&Rgb::opaque(-1.0, 2.0, 0.0)), "#00ff00ff");
    }

    #[test]
    fn test_format_lch_alpha_percent() {
        let color = OklchColor::new(0.123456, 0.1, 20.0, 0.333);
        assert_eq!(format_lch(&color), "oklch(0.1235 0.1 20 / 33.3%)");
        let opaque = OklchColor::opaque(1.0, 0.0, 0.0);
        assert_eq!(format_lch(&opaque), "oklch(1 0 0)");
    }

    #[test]
    fn test_fast_format() {
        let color = Color::from(OklchColor::opaque(0.5, 0.1, 200.0));
        assert!(fast_format(&color).starts_with("oklch("));
        assert_eq!(fast_format(&Color::srgb(0.0, 0.0, 1.0, 1.0)), "rgb(0, 0, 255)");
    }

    #[test]
    fn test_format_css() {
        let hsl = Color::new(ColorSpace::Hsl, [f64::NAN, 0.0, 0.5], 1.0);
        assert_eq!(format_css(&hsl), "hsl(none 0% 50%)");
        let p3 = Color::new(ColorSpace::DisplayP3, [1.0, 0.5, 0.0], 0.25);
        assert_eq!(format_css(&p3), "color(display-p3 1 0.5 0 / 0.25)");
        let lab = Color::new(ColorSpace::Lab, [50.0, -20.0, 30.5], 1.0);
        assert_eq!(format_css(&lab), "lab(50 -20 30.5)");
    }
}
