//! Paint request and result messages.
//!
//! A [`PaintRequest`] describes one contiguous column slice of one chart and
//! carries everything a worker needs; nothing is shared between the
//! coordinator and the worker. The worker answers with a [`PaintResult`]
//! holding the pixels of that slice.

use crate::error::{PaintError, Result};
use crate::image::{CanvasEncoding, RgbaImage};
use oklch_color::{parse, SpaceFilter};
use oklch_core::{Axis, Rgb};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Border colors painted on gamut boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderColors {
    /// sRGB / P3 boundary
    pub p3: Rgb,
    /// P3 / Rec2020 boundary (or sRGB / Rec2020 when P3 is hidden)
    pub rec2020: Rgb,
}

impl Default for BorderColors {
    fn default() -> Self {
        Self {
            p3: Rgb::WHITE,
            rec2020: Rgb::WHITE,
        }
    }
}

impl BorderColors {
    /// Resolves CSS color strings, using white for empty or invalid ones.
    ///
    /// ```
    /// use oklch_paint::BorderColors;
    /// use oklch_core::Rgb;
    ///
    /// let borders = BorderColors::from_css("#000", "");
    /// assert_eq!(borders.p3, Rgb::BLACK);
    /// assert_eq!(borders.rec2020, Rgb::WHITE);
    /// ```
    pub fn from_css(p3: &str, rec2020: &str) -> Self {
        Self {
            p3: css_or_white(p3),
            rec2020: css_or_white(rec2020),
        }
    }
}

fn css_or_white(css: &str) -> Rgb {
    if css.trim().is_empty() {
        return Rgb::WHITE;
    }
    match parse(css) {
        Some(color) => color.to_rgb(),
        None => {
            warn!(css, "invalid border color, using white");
            Rgb::WHITE
        }
    }
}

/// One column slice of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintRequest {
    /// Fixed axis of the chart
    pub axis: Axis,
    /// Value of the fixed axis
    pub value: f64,
    /// First column, inclusive
    pub from: u32,
    /// Last column, exclusive
    pub to: u32,
    /// Full canvas width, used for axis scaling
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Show the P3 gamut
    pub show_p3: bool,
    /// Show the Rec2020 gamut
    pub show_rec2020: bool,
    /// Display can show P3; selects the canvas encoding
    pub display_p3: bool,
    /// Boundary colors
    pub borders: BorderColors,
}

impl PaintRequest {
    /// Number of columns in the slice.
    #[inline]
    pub fn columns(&self) -> u32 {
        self.to.saturating_sub(self.from)
    }

    /// Gamut filter for the show flags.
    #[inline]
    pub fn filter(&self) -> SpaceFilter {
        SpaceFilter::new(self.show_p3, self.show_rec2020)
    }

    /// Canvas encoding for the display.
    #[inline]
    pub fn encoding(&self) -> CanvasEncoding {
        CanvasEncoding::for_display(self.display_p3)
    }

    /// Checks that the slice lies inside a non-empty canvas.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PaintError::invalid_dimensions(format!(
                "canvas {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.from >= self.to || self.to > self.width {
            return Err(PaintError::invalid_dimensions(format!(
                "columns {}..{} outside canvas width {}",
                self.from, self.to, self.width
            )));
        }
        Ok(())
    }
}

/// Pixels of one painted slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintResult {
    /// Column of the slice in the full canvas (the request's `from`)
    pub from: u32,
    /// `columns x height` pixels
    pub image: RgbaImage,
    /// Paint time, diagnostic only
    pub elapsed_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaintRequest {
        PaintRequest {
            axis: Axis::L,
            value: 0.7,
            from: 0,
            to: 10,
            width: 10,
            height: 5,
            show_p3: true,
            show_rec2020: false,
            display_p3: false,
            borders: BorderColors::default(),
        }
    }

    #[test]
    fn test_validate() {
        assert!(request().validate().is_ok());
        assert!(PaintRequest { to: 11, ..request() }.validate().is_err());
        assert!(PaintRequest { from: 10, ..request() }.validate().is_err());
        assert!(PaintRequest { height: 0, ..request() }.validate().is_err());
    }

    #[test]
    fn test_columns_and_encoding() {
        let req = PaintRequest { from: 4, display_p3: true, ..request() };
        assert_eq!(req.columns(), 6);
        assert_eq!(req.encoding(), CanvasEncoding::DisplayP3);
    }

    #[test]
    fn test_border_fallback() {
        let borders = BorderColors::from_css("not a color", "oklch(0 0 0)");
        assert_eq!(borders.p3, Rgb::WHITE);
        assert_eq!(borders.rec2020.to_rgba8(), [0, 0, 0, 255]);
    }
}
