//! A color in any supported space.

use crate::convert::convert;
use crate::space::ColorSpace;
use oklch_core::{OklchColor, Rgb};

/// Coordinates in one [`ColorSpace`] plus alpha.
///
/// This is what the parser produces; the source space is kept so callers can
/// tell which gamut the user was working in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Space of `coords`
    pub space: ColorSpace,
    /// Components in the space's native ranges
    pub coords: [f64; 3],
    /// Alpha in `[0, 1]`
    pub alpha: f64,
}

impl Color {
    /// Creates a color.
    #[inline]
    pub const fn new(space: ColorSpace, coords: [f64; 3], alpha: f64) -> Self {
        Self {
            space,
            coords,
            alpha,
        }
    }

    /// Creates an sRGB color from encoded channels.
    #[inline]
    pub const fn srgb(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self::new(ColorSpace::Srgb, [r, g, b], alpha)
    }

    /// Interprets an [`Rgb`] as channels of `space`.
    #[inline]
    pub fn from_rgb(space: ColorSpace, rgb: Rgb) -> Self {
        Self::new(space, rgb.to_array(), rgb.alpha)
    }

    /// Converts to another space.
    pub fn to(&self, space: ColorSpace) -> Color {
        Self::new(space, convert(self.space, space, self.coords), self.alpha)
    }

    /// Converts to the canonical OKLCH value.
    pub fn to_oklch(&self) -> OklchColor {
        let [l, c, h] = convert(self.space, ColorSpace::Oklch, self.coords);
        OklchColor::new(l, c, h, self.alpha)
    }

    /// Encoded sRGB channels, not clamped.
    #[inline]
    pub fn to_rgb(&self) -> Rgb {
        self.to_rgb_in(ColorSpace::Srgb)
    }

    /// Channels of `space`, not clamped.
    ///
    /// `space` should be an RGB space; other spaces return their raw
    /// coordinates.
    #[inline]
    pub fn to_rgb_in(&self, space: ColorSpace) -> Rgb {
        let [r, g, b] = convert(self.space, space, self.coords);
        Rgb::new(r, g, b, self.alpha)
    }

    /// Returns `true` if the color was parsed as, or built in, OKLCH.
    #[inline]
    pub fn is_oklch(&self) -> bool {
        self.space == ColorSpace::Oklch
    }
}

impl From<OklchColor> for Color {
    fn from(color: OklchColor) -> Self {
        Self::new(
            ColorSpace::Oklch,
            [color.l(), color.c(), color.h()],
            color.alpha(),
        )
    }
}

impl From<&OklchColor> for Color {
    fn from(color: &OklchColor) -> Self {
        Self::from(*color)
    }
}
