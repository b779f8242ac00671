//! OKLCH value types.
//!
//! - [`OklchColor`] - canonical immutable color used by the color model
//! - [`LchValue`] - UI-facing value held by the store
//! - [`PartialValue`] - sparse update merged into an [`LchValue`]
//! - [`Axis`] - one of the three OKLCH components
//!
//! # Hue
//!
//! Hue is always kept in `[0, 360)`. Values outside the range wrap:
//!
//! ```
//! use oklch_core::OklchColor;
//!
//! assert_eq!(OklchColor::new(0.5, 0.1, 370.0, 1.0).h(), 10.0);
//! assert_eq!(OklchColor::new(0.5, 0.1, -10.0, 1.0).h(), 350.0);
//! ```

use crate::config::L_MAX_COLOR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wraps a hue angle into `[0, 360)`.
///
/// Non-finite hues (the powerless hue of achromatic colors) become `0`.
#[inline]
pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid of a tiny negative number rounds up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

// ============================================================================
// OklchColor
// ============================================================================

/// Canonical OKLCH color.
///
/// Lightness is nominally in `[0, 1]`, chroma is non-negative, hue is in
/// `[0, 360)` and alpha in `[0, 1]`. Every `with_*` method returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OklchColor {
    l: f64,
    c: f64,
    h: f64,
    alpha: f64,
}

impl OklchColor {
    /// Creates a color, wrapping hue and clamping chroma and alpha.
    pub fn new(l: f64, c: f64, h: f64, alpha: f64) -> Self {
        Self {
            l,
            c: c.max(0.0),
            h: normalize_hue(h),
            alpha: if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) },
        }
    }

    /// Creates an opaque color.
    #[inline]
    pub fn opaque(l: f64, c: f64, h: f64) -> Self {
        Self::new(l, c, h, 1.0)
    }

    /// Creates a color, rejecting non-finite lightness or chroma.
    pub fn try_new(l: f64, c: f64, h: f64, alpha: f64) -> Result<Self> {
        if !l.is_finite() {
            return Err(Error::invalid_value("lightness", l));
        }
        if !c.is_finite() {
            return Err(Error::invalid_value("chroma", c));
        }
        Ok(Self::new(l, c, h, alpha))
    }

    /// Lightness.
    #[inline]
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Chroma.
    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Hue in degrees, `[0, 360)`.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Alpha, `[0, 1]`.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns a copy with a new lightness.
    #[inline]
    pub fn with_l(self, l: f64) -> Self {
        Self::new(l, self.c, self.h, self.alpha)
    }

    /// Returns a copy with a new chroma.
    #[inline]
    pub fn with_c(self, c: f64) -> Self {
        Self::new(self.l, c, self.h, self.alpha)
    }

    /// Returns a copy with a new hue.
    #[inline]
    pub fn with_h(self, h: f64) -> Self {
        Self::new(self.l, self.c, h, self.alpha)
    }

    /// Returns a copy with a new alpha.
    #[inline]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::new(self.l, self.c, self.h, alpha)
    }

    /// Returns the component for one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::L => self.l,
            Axis::C => self.c,
            Axis::H => self.h,
        }
    }

    /// Returns a copy with one axis replaced.
    #[inline]
    pub fn with(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::L => self.with_l(value),
            Axis::C => self.with_c(value),
            Axis::H => self.with_h(value),
        }
    }

    /// Returns `true` if alpha is below 1.
    #[inline]
    pub fn is_translucent(&self) -> bool {
        self.alpha < 1.0
    }
}

impl Default for OklchColor {
    fn default() -> Self {
        Self::opaque(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for OklchColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({} {} {}", self.l, self.c, self.h)?;
        if self.is_translucent() {
            write!(f, " / {}", self.alpha)?;
        }
        f.write_str(")")
    }
}

// ============================================================================
// LchValue
// ============================================================================

/// Value held by the store and exchanged with UI collaborators.
///
/// Lightness is expressed relative to [`L_MAX_COLOR`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LchValue {
    /// Lightness
    pub l: f64,
    /// Chroma
    pub c: f64,
    /// Hue in degrees
    pub h: f64,
    /// Alpha in `[0, 1]`
    pub a: f64,
}

impl LchValue {
    /// Creates a value.
    #[inline]
    pub const fn new(l: f64, c: f64, h: f64, a: f64) -> Self {
        Self { l, c, h, a }
    }

    /// Converts a canonical color into a UI value.
    #[inline]
    pub fn from_color(color: &OklchColor) -> Self {
        Self {
            l: color.l() / L_MAX_COLOR,
            c: color.c(),
            h: color.h(),
            a: color.alpha(),
        }
    }

    /// Converts this value into a canonical color.
    #[inline]
    pub fn to_color(&self) -> OklchColor {
        OklchColor::new(self.l * L_MAX_COLOR, self.c, self.h, self.a)
    }

    /// Returns the component for one axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::L => self.l,
            Axis::C => self.c,
            Axis::H => self.h,
        }
    }

    /// Returns a copy with hue wrapped into `[0, 360)`, chroma at least 0
    /// and alpha in `[0, 1]`, the same rules [`OklchColor::new`] applies.
    ///
    /// ```
    /// use oklch_core::LchValue;
    ///
    /// let value = LchValue::new(0.7, -0.2, 370.0, 1.5).normalized();
    /// assert_eq!(value, LchValue::new(0.7, 0.0, 10.0, 1.0));
    /// ```
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::from_color(&self.to_color())
    }

    /// Applies every component present in `parts`.
    ///
    /// The result is not normalized; see [`LchValue::normalized`].
    pub fn merge(&self, parts: &PartialValue) -> Self {
        Self {
            l: parts.l.unwrap_or(self.l),
            c: parts.c.unwrap_or(self.c),
            h: parts.h.unwrap_or(self.h),
            a: parts.a.unwrap_or(self.a),
        }
    }

    /// Applies `f` to every component.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.l), f(self.c), f(self.h), f(self.a))
    }
}

impl Default for LchValue {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl From<OklchColor> for LchValue {
    fn from(color: OklchColor) -> Self {
        Self::from_color(&color)
    }
}

impl From<LchValue> for OklchColor {
    fn from(value: LchValue) -> Self {
        value.to_color()
    }
}

/// Sparse update for [`LchValue`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialValue {
    /// Lightness
    pub l: Option<f64>,
    /// Chroma
    pub c: Option<f64>,
    /// Hue
    pub h: Option<f64>,
    /// Alpha
    pub a: Option<f64>,
}

impl PartialValue {
    /// Update touching a single axis.
    pub fn axis(axis: Axis, value: f64) -> Self {
        let mut parts = Self::default();
        match axis {
            Axis::L => parts.l = Some(value),
            Axis::C => parts.c = Some(value),
            Axis::H => parts.h = Some(value),
        }
        parts
    }

    /// Update touching alpha only.
    pub fn alpha(a: f64) -> Self {
        Self {
            a: Some(a),
            ..Self::default()
        }
    }

    /// Adds one axis to this update.
    pub fn and(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::L => self.l = Some(value),
            Axis::C => self.c = Some(value),
            Axis::H => self.h = Some(value),
        }
        self
    }

    /// Applies `f` to every present component.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            l: self.l.map(&f),
            c: self.c.map(&f),
            h: self.h.map(&f),
            a: self.a.map(&f),
        }
    }
}

// ============================================================================
// Axis
// ============================================================================

/// One of the three OKLCH components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Lightness
    L,
    /// Chroma
    C,
    /// Hue
    H,
}

impl Axis {
    /// All axes in `l, c, h` order.
    pub const ALL: [Axis; 3] = [Axis::L, Axis::C, Axis::H];

    /// Single-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::L => "l",
            Axis::C => "c",
            Axis::H => "h",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Axis::L => "Lightness",
            Axis::C => "Chroma",
            Axis::H => "Hue",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "lightness" => Ok(Axis::L),
            "c" | "chroma" => Ok(Axis::C),
            "h" | "hue" => Ok(Axis::H),
            _ => Err(Error::unknown_name("axis", s)),
        }
    }
}
