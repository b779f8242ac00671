//! Gamut classification and mapping.
//!
//! Containment is tested per channel with a [`COLOR_SPACE_GAP`] tolerance on
//! every gamut. The strict test of the underlying conversion rejects colors
//! that sit exactly on the sRGB boundary after a float round-trip, so the
//! tolerance is part of the contract, not a shortcut.

use crate::color::Color;
use crate::convert::{from_linear_srgb, to_linear_srgb, LinSrgb};
use crate::space::ColorSpace;
use oklch_core::config::COLOR_SPACE_GAP;
use oklch_core::{GamutSpace, OklchColor, Rgb};
use palette::color_difference::EuclideanDistance;
use palette::Oklab;

/// Just noticeable difference in OKLab used by gamut mapping.
pub const JND: f64 = 0.02;

/// Chroma search resolution (OKLCH chroma range / 4000).
pub const MAPPING_EPSILON: f64 = 0.4 / 4000.0;

// ============================================================================
// Sample
// ============================================================================

/// One color converted to linear sRGB once, projected into each display
/// gamut on demand.
#[derive(Debug, Clone, Copy)]
pub struct GamutSample {
    linear: LinSrgb,
    alpha: f64,
}

impl GamutSample {
    /// Creates a sample for any color.
    #[inline]
    pub fn new(color: &Color) -> Self {
        Self {
            linear: to_linear_srgb(color.space, color.coords),
            alpha: color.alpha,
        }
    }

    /// Creates a sample for an OKLCH color.
    #[inline]
    pub fn oklch(color: &OklchColor) -> Self {
        Self::new(&Color::from(color))
    }

    /// Channels in one RGB space, not clamped.
    ///
    /// Other spaces return their raw coordinates.
    #[inline]
    pub fn channels(&self, space: ColorSpace) -> Rgb {
        let [r, g, b] = from_linear_srgb(space, self.linear);
        Rgb::new(r, g, b, self.alpha)
    }

    /// Encoded sRGB channels.
    #[inline]
    pub fn srgb(&self) -> Rgb {
        self.channels(ColorSpace::Srgb)
    }

    /// Encoded Display P3 channels.
    #[inline]
    pub fn p3(&self) -> Rgb {
        self.channels(ColorSpace::DisplayP3)
    }

    /// Encoded Rec2020 channels.
    #[inline]
    pub fn rec2020(&self) -> Rgb {
        self.channels(ColorSpace::Rec2020)
    }
}

/// Returns `true` if `rgb` lies in the unit cube within [`COLOR_SPACE_GAP`].
#[inline]
pub fn in_unit_gamut(rgb: &Rgb) -> bool {
    rgb.in_unit_cube(COLOR_SPACE_GAP)
}

/// Returns `true` if the color fits in sRGB.
pub fn in_rgb(color: &Color) -> bool {
    in_unit_gamut(&color.to_rgb())
}

/// Returns `true` if the color fits in Display P3.
pub fn in_p3(color: &Color) -> bool {
    in_unit_gamut(&color.to_rgb_in(ColorSpace::DisplayP3))
}

/// Returns `true` if the color fits in Rec2020.
pub fn in_rec2020(color: &Color) -> bool {
    in_unit_gamut(&color.to_rgb_in(ColorSpace::Rec2020))
}

// ============================================================================
// Classification
// ============================================================================

/// Which wide gamuts take part in classification.
///
/// Hidden gamuts are skipped: with P3 hidden, a P3 color falls through to
/// Rec2020 or [`GamutSpace::Out`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpaceFilter {
    /// Classify Display P3 colors
    pub show_p3: bool,
    /// Classify Rec2020 colors
    pub show_rec2020: bool,
}

impl SpaceFilter {
    /// Every gamut enabled.
    pub const ALL: SpaceFilter = SpaceFilter::new(true, true);

    /// sRGB only.
    pub const SRGB_ONLY: SpaceFilter = SpaceFilter::new(false, false);

    /// Creates a filter from the show flags.
    #[inline]
    pub const fn new(show_p3: bool, show_rec2020: bool) -> Self {
        Self {
            show_p3,
            show_rec2020,
        }
    }

    /// Classifies a sampled color.
    pub fn classify_sample(&self, sample: &GamutSample) -> GamutSpace {
        if in_unit_gamut(&sample.srgb()) {
            GamutSpace::Srgb
        } else if self.show_p3 && in_unit_gamut(&sample.p3()) {
            GamutSpace::P3
        } else if self.show_rec2020 && in_unit_gamut(&sample.rec2020()) {
            GamutSpace::Rec2020
        } else {
            GamutSpace::Out
        }
    }

    /// Classifies any color.
    #[inline]
    pub fn classify(&self, color: &Color) -> GamutSpace {
        self.classify_sample(&GamutSample::new(color))
    }

    /// Classifies an OKLCH color.
    #[inline]
    pub fn classify_oklch(&self, color: &OklchColor) -> GamutSpace {
        self.classify_sample(&GamutSample::oklch(color))
    }
}

/// Innermost gamut containing the color: sRGB, then P3, then Rec2020.
///
/// ```
/// use oklch_color::{get_space, Color};
/// use oklch_core::{GamutSpace, OklchColor};
///
/// let green = OklchColor::opaque(0.65, 0.15, 130.0);
/// assert_eq!(get_space(&Color::from(green)), GamutSpace::Srgb);
/// ```
#[inline]
pub fn get_space(color: &Color) -> GamutSpace {
    SpaceFilter::ALL.classify(color)
}

// ============================================================================
// Mapping
// ============================================================================

/// Euclidean distance in OKLab.
pub fn delta_e_ok(a: &Color, b: &Color) -> f64 {
    let oklab = |color: &Color| {
        let [l, a, b] = color.to(ColorSpace::Oklab).coords;
        Oklab::new(l, a, b)
    };
    oklab(a).distance(oklab(b))
}

/// Maps a color into sRGB by reducing OKLCH chroma.
///
/// Binary search on chroma at constant lightness and hue: a candidate is
/// accepted while it is in gamut or its clipped version is within [`JND`].
/// Lightness at or above 1 gives white, at or below 0 gives black. Alpha is
/// kept.
pub fn to_rgb_gamut(color: &OklchColor) -> Rgb {
    let alpha = color.alpha();
    if color.l() >= 1.0 {
        return Rgb::new(1.0, 1.0, 1.0, alpha);
    }
    if color.l() <= 0.0 {
        return Rgb::new(0.0, 0.0, 0.0, alpha);
    }

    let strict = |rgb: &Rgb| rgb.in_unit_cube(0.0);
    let srgb_at = |chroma: f64| Color::from(color.with_c(chroma)).to_rgb();

    let mut candidate = srgb_at(color.c());
    if strict(&candidate) {
        return candidate;
    }

    let mut clipped = candidate.clamped();
    let mut start = 0.0;
    let mut end = color.c();
    while end - start > MAPPING_EPSILON {
        let chroma = (start + end) * 0.5;
        candidate = srgb_at(chroma);
        clipped = candidate.clamped();
        let close_enough = || {
            delta_e_ok(
                &Color::from_rgb(ColorSpace::Srgb, candidate),
                &Color::from_rgb(ColorSpace::Srgb, clipped),
            ) <= JND
        };
        if strict(&candidate) || close_enough() {
            start = chroma;
        } else {
            end = chroma;
        }
    }

    if strict(&candidate) { candidate } else { clipped }
}

/// [`to_rgb_gamut`] expressed back in OKLCH.
pub fn to_rgb_gamut_oklch(color: &OklchColor) -> OklchColor {
    Color::from_rgb(ColorSpace::Srgb, to_rgb_gamut(color)).to_oklch()
}
