//! Picker constants.
//!
//! Axis ranges, slider steps and the numeric tolerances shared by the color
//! model and the rasterizer.

/// Upper bound of the lightness axis in [`LchValue`](crate::LchValue).
pub const L_MAX: f64 = 1.0;

/// Scale between [`LchValue`](crate::LchValue) lightness and OKLCH lightness.
pub const L_MAX_COLOR: f64 = 1.0;

/// Chroma axis bound when Rec2020 is hidden.
pub const C_MAX: f64 = 0.37;

/// Chroma axis bound when Rec2020 is shown.
pub const C_MAX_REC2020: f64 = 0.47;

/// Hue axis bound in degrees.
pub const H_MAX: f64 = 360.0;

/// Alpha slider bound (percent).
pub const ALPHA_MAX: f64 = 100.0;

/// Lightness slider step.
pub const L_STEP: f64 = 0.01;

/// Chroma slider step (percent of a unit, divided by 100 on the slider).
pub const C_STEP: f64 = 0.01;

/// Hue slider step (divided by 100 on the slider).
pub const H_STEP: f64 = 1.0;

/// Alpha slider step (percent).
pub const ALPHA_STEP: f64 = 1.0;

/// Per-channel tolerance for gamut containment tests.
pub const COLOR_SPACE_GAP: f64 = 0.0001;

/// Tolerance used when comparing gamut-mapped channels.
pub const GAMUT_EPSILON: f64 = 1e-6;

/// Name of the canonical CSS color function.
pub const COLOR_FN: &str = "oklch";

// ============================================================================
// Rasterizer
// ============================================================================

/// Inner-loop sampling stride for charts with a fixed L or H.
pub const BLOCK_COARSE: u32 = 6;

/// Inner-loop sampling stride for the fixed-C chart.
pub const BLOCK_FINE: u32 = 2;

/// Largest vertical jump (pixels) between neighbouring boundary points that
/// still gets a border painted. Tuned visually.
pub const BORDER_TOLERANCE_PX: i64 = 10;

/// Fraction of the chart height after which an out-of-gamut run in the
/// fixed-C chart ends the column.
pub const MAX_GAP_RATIO: f64 = 0.42;

/// Returns the chroma axis bound for the given Rec2020 visibility.
#[inline]
pub fn max_chroma(show_rec2020: bool) -> f64 {
    if show_rec2020 { C_MAX_REC2020 } else { C_MAX }
}
