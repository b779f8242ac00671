//! Conversion graph.
//!
//! `palette` does the color models: XYZ, HSL, HWB, CIELAB/LCH, OKLab/OKLCH
//! and chromatic adaptation. RGB transfer curves live here, odd-extended
//! below zero as CSS does, and the wide RGB spaces are layered on linear
//! sRGB with one matrix each, so every RGB space lands on the same white.
//!
//! ```text
//!   hsl, hwb ── srgb ──────┐
//!   display-p3, rec2020 ───┤
//!   a98-rgb, prophoto-rgb ─┼── srgb-linear ── xyz-d65 ── xyz-d50 ── lab ── lch
//!   oklch ── oklab ────────┘
//! ```
//!
//! All conversions are unclamped. Polar spaces leave hue as `NaN` when
//! chroma is exactly zero, the CSS "powerless" hue. Conversions back to
//! rectangular treat it as `0`.

use crate::space::ColorSpace;
use glam::{DMat3, DVec3};
use oklch_core::normalize_hue;
use palette::chromatic_adaptation::AdaptFrom;
use palette::convert::FromColorUnclamped;
use palette::encoding;
use palette::white_point::{D50, D65};

/// Linear sRGB in `f64`, the hub every conversion passes through.
pub type LinSrgb = palette::LinSrgb<f64>;

type Srgb = palette::Srgb<f64>;
type Hsl = palette::Hsl<encoding::Srgb, f64>;
type Hwb = palette::Hwb<encoding::Srgb, f64>;
type Xyz65 = palette::Xyz<D65, f64>;
type Xyz50 = palette::Xyz<D50, f64>;
type Lab50 = palette::Lab<D50, f64>;
type Lch50 = palette::Lch<D50, f64>;
type Oklab = palette::Oklab<f64>;
type Oklch = palette::Oklch<f64>;

// ============================================================================
// RGB spaces
// ============================================================================

const REC2020_ALPHA: f64 = 1.09929682680944;
const REC2020_BETA: f64 = 0.018053968510807;

/// Transfer curve of an RGB space, odd-extended below zero.
#[derive(Debug, Clone, Copy)]
enum Curve {
    /// sRGB and Display P3
    Srgb,
    Rec2020,
    A98,
    ProPhoto,
}

impl Curve {
    fn decode(self, rgb: [f64; 3]) -> DVec3 {
        DVec3::from_array(rgb.map(|v| {
            let (sign, abs) = (v.signum(), v.abs());
            match self {
                Curve::Srgb if abs <= 0.04045 => v / 12.92,
                Curve::Srgb => sign * ((abs + 0.055) / 1.055).powf(2.4),
                Curve::Rec2020 if abs < REC2020_BETA * 4.5 => v / 4.5,
                Curve::Rec2020 => {
                    sign * ((abs + REC2020_ALPHA - 1.0) / REC2020_ALPHA).powf(1.0 / 0.45)
                }
                Curve::A98 => sign * abs.powf(563.0 / 256.0),
                Curve::ProPhoto if abs <= 16.0 / 512.0 => v / 16.0,
                Curve::ProPhoto => sign * abs.powf(1.8),
            }
        }))
    }

    fn encode(self, linear: DVec3) -> [f64; 3] {
        linear.to_array().map(|v| {
            let (sign, abs) = (v.signum(), v.abs());
            match self {
                Curve::Srgb if abs <= 0.0031308 => 12.92 * v,
                Curve::Srgb => sign * (1.055 * abs.powf(1.0 / 2.4) - 0.055),
                Curve::Rec2020 if abs > REC2020_BETA => {
                    sign * (REC2020_ALPHA * abs.powf(0.45) - (REC2020_ALPHA - 1.0))
                }
                Curve::Rec2020 => 4.5 * v,
                Curve::A98 => sign * abs.powf(256.0 / 563.0),
                Curve::ProPhoto if abs >= 1.0 / 512.0 => sign * abs.powf(1.0 / 1.8),
                Curve::ProPhoto => 16.0 * v,
            }
        })
    }
}

#[inline]
fn srgb_to_linear(rgb: [f64; 3]) -> LinSrgb {
    let v = Curve::Srgb.decode(rgb);
    LinSrgb::new(v.x, v.y, v.z)
}

#[inline]
fn linear_to_srgb(linear: LinSrgb) -> [f64; 3] {
    Curve::Srgb.encode(DVec3::new(linear.red, linear.green, linear.blue))
}

#[inline]
fn srgb_in(rgb: [f64; 3]) -> Srgb {
    Srgb::new(rgb[0], rgb[1], rgb[2])
}

/// An RGB space expressed against linear sRGB.
///
/// The matrices come from the CSS Color 4 linear-to-XYZ matrices, folded
/// into linear sRGB (with Bradford D50 to D65 for ProPhoto). Rows sum to 1.
#[derive(Debug, Clone, Copy)]
struct WideRgb {
    curve: Curve,
    to_srgb: DMat3,
    from_srgb: DMat3,
}

impl WideRgb {
    #[inline]
    fn to_linear_srgb(&self, rgb: [f64; 3]) -> LinSrgb {
        let v = self.to_srgb * self.curve.decode(rgb);
        LinSrgb::new(v.x, v.y, v.z)
    }

    #[inline]
    fn from_linear_srgb(&self, linear: LinSrgb) -> [f64; 3] {
        let v = DVec3::new(linear.red, linear.green, linear.blue);
        self.curve.encode(self.from_srgb * v)
    }
}

const DISPLAY_P3: WideRgb = WideRgb {
    curve: Curve::Srgb,
    to_srgb: DMat3::from_cols(
        DVec3::new(1.2249401762805598, -0.04205695470968816, -0.019637554590334432),
        DVec3::new(-0.22494017628055996, 1.042056954709688, -0.07863604555063189),
        DVec3::new(0.0, 0.0, 1.0982736001409663),
    ),
    from_srgb: DMat3::from_cols(
        DVec3::new(0.8224619687143623, 0.03319419885096162, 0.017082630721120033),
        DVec3::new(0.17753803128563775, 0.9668058011490384, 0.07239744066396347),
        DVec3::new(0.0, 0.0, 0.9105199286149165),
    ),
};

const REC2020: WideRgb = WideRgb {
    curve: Curve::Rec2020,
    to_srgb: DMat3::from_cols(
        DVec3::new(1.6604910021084345, -0.12455047452159074, -0.018150763354905303),
        DVec3::new(-0.5876411387885495, 1.1328998971259603, -0.10057889800800739),
        DVec3::new(-0.07284986331988488, -0.008349422604369477, 1.1187296613629127),
    ),
    from_srgb: DMat3::from_cols(
        DVec3::new(0.627403895934699, 0.06909728935823208, 0.01639143887515028),
        DVec3::new(0.3292830383778837, 0.9195403950754587, 0.08801330787722575),
        DVec3::new(0.043313065687417225, 0.011362315566309178, 0.895595253247624),
    ),
};

const A98_RGB: WideRgb = WideRgb {
    curve: Curve::A98,
    to_srgb: DMat3::from_cols(
        DVec3::new(1.3983557439607783, 0.0, 0.0),
        DVec3::new(-0.3983557439607783, 1.0, -0.042928989294473266),
        DVec3::new(0.0, 0.0, 1.0429289892944733),
    ),
    from_srgb: DMat3::from_cols(
        DVec3::new(0.7151256068556247, 0.0, 0.0),
        DVec3::new(0.2848743931443754, 1.0, 0.04116194845011847),
        DVec3::new(0.0, 0.0, 0.9588380515498816),
    ),
};

const PROPHOTO_RGB: WideRgb = WideRgb {
    curve: Curve::ProPhoto,
    to_srgb: DMat3::from_cols(
        DVec3::new(2.034380849516996, -0.22882573163305037, -0.008558828783917425),
        DVec3::new(-0.7276357899341342, 1.2317425411901048, -0.15326670213803723),
        DVec3::new(-0.30674505958286186, -0.0029168095570544935, 1.1618255309219547),
    ),
    from_srgb: DMat3::from_cols(
        DVec3::new(0.5292769776226116, 0.09836585954044917, 0.016875340921386844),
        DVec3::new(0.33015450197849283, 0.8734707129069619, 0.11765941425612084),
        DVec3::new(0.14056852039889559, 0.028163427552589004, 0.8654652448224923),
    ),
};

fn wide_rgb(space: ColorSpace) -> Option<&'static WideRgb> {
    match space {
        ColorSpace::DisplayP3 => Some(&DISPLAY_P3),
        ColorSpace::Rec2020 => Some(&REC2020),
        ColorSpace::A98Rgb => Some(&A98_RGB),
        ColorSpace::ProphotoRgb => Some(&PROPHOTO_RGB),
        _ => None,
    }
}

// ============================================================================
// Hue helpers
// ============================================================================

/// A `none` hue reads as 0.
#[inline]
fn hue_in(h: f64) -> f64 {
    if h.is_nan() { 0.0 } else { h }
}

/// Wraps an outgoing hue, or `NaN` when `powerless`.
#[inline]
fn hue_out(degrees: f64, powerless: bool) -> f64 {
    if powerless { f64::NAN } else { normalize_hue(degrees) }
}

fn oklch_coords(c: Oklch) -> [f64; 3] {
    [c.l, c.chroma, hue_out(c.hue.into_degrees(), c.chroma == 0.0)]
}

fn lch_coords(c: Lch50) -> [f64; 3] {
    [c.l, c.chroma, hue_out(c.hue.into_degrees(), c.chroma == 0.0)]
}

fn hsl_coords(c: Hsl) -> [f64; 3] {
    [hue_out(c.hue.into_degrees(), c.saturation == 0.0), c.saturation, c.lightness]
}

fn hwb_coords(c: Hwb) -> [f64; 3] {
    let gray = c.whiteness + c.blackness >= 1.0;
    [hue_out(c.hue.into_degrees(), gray), c.whiteness, c.blackness]
}

fn hsl_to_srgb(c: Hsl) -> [f64; 3] {
    let c = Srgb::from_color_unclamped(c);
    [c.red, c.green, c.blue]
}

fn hwb_to_srgb(c: Hwb) -> [f64; 3] {
    let c = Srgb::from_color_unclamped(c);
    [c.red, c.green, c.blue]
}

fn hwb_in(coords: [f64; 3]) -> Hwb {
    let [h, mut w, mut b] = coords;
    // Whiteness and blackness past 1 together make a gray of ratio w / (w + b)
    if w + b >= 1.0 {
        let sum = w + b;
        w /= sum;
        b /= sum;
    }
    Hwb::new(hue_in(h), w, b)
}

// ============================================================================
// Hub
// ============================================================================

/// Converts coordinates of `space` to linear sRGB.
pub fn to_linear_srgb(space: ColorSpace, coords: [f64; 3]) -> LinSrgb {
    if let Some(wide) = wide_rgb(space) {
        return wide.to_linear_srgb(coords);
    }
    let [x, y, z] = coords;
    match space {
        ColorSpace::Srgb => srgb_to_linear(coords),
        ColorSpace::Hsl => srgb_to_linear(hsl_to_srgb(Hsl::new(hue_in(x), y, z))),
        ColorSpace::Hwb => srgb_to_linear(hwb_to_srgb(hwb_in(coords))),
        ColorSpace::XyzD65 => LinSrgb::from_color_unclamped(Xyz65::new(x, y, z)),
        ColorSpace::XyzD50 => LinSrgb::from_color_unclamped(Xyz65::adapt_from(Xyz50::new(x, y, z))),
        ColorSpace::Lab => {
            let xyz = Xyz50::from_color_unclamped(Lab50::new(x, y, z));
            LinSrgb::from_color_unclamped(Xyz65::adapt_from(xyz))
        }
        ColorSpace::Lch => {
            let xyz = Xyz50::from_color_unclamped(Lch50::new(x, y, hue_in(z)));
            LinSrgb::from_color_unclamped(Xyz65::adapt_from(xyz))
        }
        ColorSpace::Oklab => LinSrgb::from_color_unclamped(Oklab::new(x, y, z)),
        ColorSpace::Oklch => LinSrgb::from_color_unclamped(Oklch::new(x, y, hue_in(z))),
        // srgb-linear, and the wide spaces handled above
        _ => LinSrgb::new(x, y, z),
    }
}

/// Converts linear sRGB to coordinates of `space`.
pub fn from_linear_srgb(space: ColorSpace, linear: LinSrgb) -> [f64; 3] {
    if let Some(wide) = wide_rgb(space) {
        return wide.from_linear_srgb(linear);
    }
    let xyz_d50 = || Xyz50::adapt_from(Xyz65::from_color_unclamped(linear));
    match space {
        ColorSpace::Srgb => linear_to_srgb(linear),
        ColorSpace::Hsl => hsl_coords(Hsl::from_color_unclamped(srgb_in(linear_to_srgb(linear)))),
        ColorSpace::Hwb => hwb_coords(Hwb::from_color_unclamped(srgb_in(linear_to_srgb(linear)))),
        ColorSpace::XyzD65 => {
            let c = Xyz65::from_color_unclamped(linear);
            [c.x, c.y, c.z]
        }
        ColorSpace::XyzD50 => {
            let c = xyz_d50();
            [c.x, c.y, c.z]
        }
        ColorSpace::Lab => {
            let c = Lab50::from_color_unclamped(xyz_d50());
            [c.l, c.a, c.b]
        }
        ColorSpace::Lch => lch_coords(Lch50::from_color_unclamped(xyz_d50())),
        ColorSpace::Oklab => {
            let c = Oklab::from_color_unclamped(linear);
            [c.l, c.a, c.b]
        }
        ColorSpace::Oklch => oklch_coords(Oklch::from_color_unclamped(linear)),
        _ => [linear.red, linear.green, linear.blue],
    }
}

/// Converts coordinates between two spaces.
///
/// Pairs that share an intermediate (polar/rectangular, sRGB/HSL/HWB) skip
/// the linear sRGB hop.
pub fn convert(from: ColorSpace, to: ColorSpace, coords: [f64; 3]) -> [f64; 3] {
    use ColorSpace as S;

    let [x, y, z] = coords;
    match (from, to) {
        _ if from == to => coords,
        (S::Oklch, S::Oklab) => {
            let c = Oklab::from_color_unclamped(Oklch::new(x, y, hue_in(z)));
            [c.l, c.a, c.b]
        }
        (S::Oklab, S::Oklch) => oklch_coords(Oklch::from_color_unclamped(Oklab::new(x, y, z))),
        (S::Lch, S::Lab) => {
            let c = Lab50::from_color_unclamped(Lch50::new(x, y, hue_in(z)));
            [c.l, c.a, c.b]
        }
        (S::Lab, S::Lch) => lch_coords(Lch50::from_color_unclamped(Lab50::new(x, y, z))),
        (S::Hsl, S::Srgb) => hsl_to_srgb(Hsl::new(hue_in(x), y, z)),
        (S::Hwb, S::Srgb) => hwb_to_srgb(hwb_in(coords)),
        (S::Srgb, S::Hsl) => hsl_coords(Hsl::from_color_unclamped(srgb_in(coords))),
        (S::Srgb, S::Hwb) => hwb_coords(Hwb::from_color_unclamped(srgb_in(coords))),
        _ => from_linear_srgb(to, to_linear_srgb(from, coords)),
    }
}
