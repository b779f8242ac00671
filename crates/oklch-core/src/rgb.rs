//! Floating point RGB triple with alpha.
//!
//! [`Rgb`] does not track its color space; callers know whether the channels
//! are sRGB, Display-P3 or Rec2020 from context. Channels are nominally in
//! `[0, 1]` but may fall outside for out-of-gamut colors.

use serde::{Deserialize, Serialize};

/// RGB color with alpha, channels nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Alpha in `[0, 1]`
    pub alpha: f64,
}

impl Rgb {
    /// Opaque white.
    pub const WHITE: Rgb = Rgb::opaque(1.0, 1.0, 1.0);

    /// Opaque black.
    pub const BLACK: Rgb = Rgb::opaque(0.0, 0.0, 0.0);

    /// Creates a color with alpha.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Channels as an array, alpha excluded.
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Builds an opaque color from an array.
    #[inline]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::opaque(arr[0], arr[1], arr[2])
    }

    /// Applies `f` to the color channels, keeping alpha.
    #[inline]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.alpha)
    }

    /// Clamps every channel into `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        self.map(|v| v.clamp(0.0, 1.0))
    }

    /// Returns `true` if every channel is within `[-tolerance, 1 + tolerance]`.
    #[inline]
    pub fn in_unit_cube(&self, tolerance: f64) -> bool {
        self.to_array()
            .iter()
            .all(|&v| v >= -tolerance && v <= 1.0 + tolerance)
    }

    /// Rounds to 8-bit RGBA, clamping out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.alpha)]
    }

    /// Builds a color from 8-bit channels.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        let f = |v: u8| f64::from(v) / 255.0;
        Self::new(f(px[0]), f(px[1]), f(px[2]), f(px[3]))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8() {
        assert_eq!(Rgb::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Rgb::new(-0.2, 0.5, 1.4, 0.0).to_rgba8(), [0, 128, 255, 0]);
        assert_eq!(Rgb::from_rgba8([255, 0, 0, 255]), Rgb::opaque(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_unit_cube() {
        assert!(Rgb::opaque(1.00005, 0.0, -0.00005).in_unit_cube(0.0001));
        assert!(!Rgb::opaque(1.001, 0.0, 0.0).in_unit_cube(0.0001));
    }
}
