//! What the UI can actually show for a value.

use crate::color::Color;
use crate::format::{format_lch, format_rgb};
use crate::gamut::{get_space, to_rgb_gamut};
use crate::space::ColorSpace;
use oklch_core::{GamutSpace, LchValue, OklchColor};

/// A value resolved against the enabled gamuts.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleValue {
    /// Color to show: the value itself when its gamut is shown, otherwise the
    /// sRGB fallback
    pub color: OklchColor,
    /// Innermost gamut of the value, independent of the show flags
    pub space: GamutSpace,
    /// Exact CSS, present when the value is in sRGB or in a shown gamut
    pub displayable: Option<String>,
    /// sRGB CSS of the gamut-mapped value
    pub fallback_css: String,
}

impl VisibleValue {
    /// CSS to paint with: the exact notation when available, else the
    /// fallback.
    #[inline]
    pub fn css(&self) -> &str {
        self.displayable.as_deref().unwrap_or(&self.fallback_css)
    }

    /// Returns `true` if the value is shown without gamut mapping.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.displayable.is_some()
    }
}

/// Resolves a value against the P3 and Rec2020 show flags.
///
/// ```
/// use oklch_color::get_visible_value;
/// use oklch_core::{GamutSpace, LchValue};
///
/// let green = LchValue::new(0.65, 0.15, 130.0, 1.0);
/// let visible = get_visible_value(&green, true, false);
/// assert_eq!(visible.space, GamutSpace::Srgb);
/// assert_eq!(visible.displayable.as_deref(), Some(visible.fallback_css.as_str()));
/// ```
pub fn get_visible_value(value: &LchValue, show_p3: bool, show_rec2020: bool) -> VisibleValue {
    let oklch = value.to_color();
    let color = Color::from(oklch);
    let space = get_space(&color);

    if space == GamutSpace::Srgb {
        let css = format_rgb(&color.to_rgb());
        return VisibleValue {
            color: oklch,
            space,
            displayable: Some(css.clone()),
            fallback_css: css,
        };
    }

    let mapped = to_rgb_gamut(&oklch);
    let fallback_css = format_rgb(&mapped);
    let shown = match space {
        GamutSpace::P3 => show_p3,
        GamutSpace::Rec2020 => show_rec2020,
        _ => false,
    };
    VisibleValue {
        color: if shown {
            oklch
        } else {
            Color::from_rgb(ColorSpace::Srgb, mapped).to_oklch()
        },
        space,
        displayable: shown.then(|| format_lch(&oklch)),
        fallback_css,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p3_green() -> LchValue {
        // Inside P3, far outside sRGB
        let color = Color::new(ColorSpace::DisplayP3, [0.2, 0.9, 0.1], 1.0);
        LchValue::from_color(&color.to_oklch())
    }

    #[test]
    fn test_p3_color_hidden() {
        let p3_green = p3_green();
        let visible = get_visible_value(&p3_green, false, false);
        assert_eq!(visible.space, GamutSpace::P3);
        assert!(visible.displayable.is_none());
        assert!(visible.fallback_css.starts_with("rgb("));
        assert_ne!(visible.fallback_css, format_lch(&p3_green.to_color()));
        assert_eq!(get_space(&Color::from(visible.color)), GamutSpace::Srgb);
    }

    #[test]
    fn test_p3_color_shown() {
        let p3_green = p3_green();
        let visible = get_visible_value(&p3_green, true, false);
        assert_eq!(visible.css(), format_lch(&p3_green.to_color()));
        assert_eq!(visible.color, p3_green.to_color());
        assert!(visible.is_exact());
    }

    #[test]
    fn test_out_of_gamut_never_displayable() {
        let wild = LchValue::new(0.7, 0.5, 150.0, 1.0);
        let visible = get_visible_value(&wild, true, true);
        assert_eq!(visible.space, GamutSpace::Out);
        assert!(visible.displayable.is_none());
    }
}
