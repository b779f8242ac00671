//! Rounding helpers.
//!
//! Two tiers are used on OKLCH values:
//!
//! | Tier | L, C | H, alpha |
//! |------|------|----------|
//! | [`Rounding::Aggressive`] | 4 places | 2 places |
//! | [`Rounding::Precise`] | 6 places | 4 places |
//!
//! Aggressive rounding gives clean numbers in the UI and doubles as the
//! "significant change" threshold of the store. Precise rounding is what the
//! store keeps.

use oklch_core::{LchValue, PartialValue};

/// Rounds to a fixed number of decimals, the way `Number.toFixed` does.
///
/// Goes through the decimal expansion so `1.005` rounds on its exact binary
/// value rather than on a scaled approximation.
pub fn round_fixed(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Removes float noise such as `0.6999999999` by rounding to `precision`
/// decimals.
///
/// ```
/// use oklch_color::clean;
///
/// assert_eq!(clean(0.1 + 0.2, 2), 0.3);
/// assert_eq!(clean(12.3456, 4), 12.3456);
/// ```
pub fn clean(value: f64, precision: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision);
    let scaled = round_fixed(value * factor, precision.max(0) as usize);
    // Half-way cases round towards positive infinity
    (scaled + 0.5).floor() / factor
}

/// Snaps `value` to a multiple of `step` with `round`, then cleans the
/// result to the step's decimals.
pub fn snap(value: f64, step: f64, round: impl Fn(f64) -> f64) -> f64 {
    let decimals = step_decimals(step);
    clean(round(value / step) * step, decimals)
}

fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 10 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Rounding tier applied to OKLCH values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// 4 places for L and C, 2 for H and alpha
    Aggressive,
    /// 6 places for L and C, 4 for H and alpha
    Precise,
}

impl Rounding {
    /// Decimals for lightness and chroma.
    #[inline]
    pub const fn lc_digits(self) -> usize {
        match self {
            Rounding::Aggressive => 4,
            Rounding::Precise => 6,
        }
    }

    /// Decimals for hue and alpha.
    #[inline]
    pub const fn ha_digits(self) -> usize {
        match self {
            Rounding::Aggressive => 2,
            Rounding::Precise => 4,
        }
    }

    /// Rounds every component of a value.
    pub fn value(self, v: &LchValue) -> LchValue {
        LchValue {
            l: round_fixed(v.l, self.lc_digits()),
            c: round_fixed(v.c, self.lc_digits()),
            h: round_fixed(v.h, self.ha_digits()),
            a: round_fixed(v.a, self.ha_digits()),
        }
    }

    /// Rounds the components present in a partial update.
    pub fn partial(self, p: &PartialValue) -> PartialValue {
        PartialValue {
            l: p.l.map(|v| round_fixed(v, self.lc_digits())),
            c: p.c.map(|v| round_fixed(v, self.lc_digits())),
            h: p.h.map(|v| round_fixed(v, self.ha_digits())),
            a: p.a.map(|v| round_fixed(v, self.ha_digits())),
        }
    }
}
