//! 2D gamut slices.
//!
//! Each chart fixes one OKLCH axis and spans the other two:
//!
//! | Fixed | x | y | Block | Gaps |
//! |-------|---|---|-------|------|
//! | L | hue `0..360` | chroma `0..C max` | 6 | no |
//! | C | hue `0..360` | lightness `0..1` | 2 | yes |
//! | H | lightness `0..1` | chroma `0..C max` | 6 | no |
//!
//! Columns are scanned bottom-up in blocks. A block whose end lands in the
//! same gamut as its start is filled in one go; a block that crosses a
//! gamut boundary is resampled pixel by pixel and the crossings are
//! recorded for the border pass. A column ends at the first out-of-gamut
//! block, except on the fixed-C chart where gamuts can have holes: there a
//! column only ends once an out-of-gamut run starts above
//! [`MAX_GAP_RATIO`] of the height.

use crate::error::Result;
use crate::image::RgbaImage;
use crate::pixel::{Pixel, PixelEncoder};
use crate::request::{PaintRequest, PaintResult};
use crate::separator::Separators;
use oklch_core::config::{max_chroma, BLOCK_COARSE, BLOCK_FINE, H_MAX, L_MAX_COLOR, MAX_GAP_RATIO};
use oklch_core::{Axis, OklchColor};
use std::time::Instant;
use tracing::trace;

/// Scan parameters of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    /// Rows per step of the inner loop
    pub block: u32,
    /// Keep scanning past out-of-gamut runs
    pub has_gaps: bool,
}

impl ChartLayout {
    /// Layout of the chart with `axis` fixed.
    pub const fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::C => Self {
                block: BLOCK_FINE,
                has_gaps: true,
            },
            Axis::L | Axis::H => Self {
                block: BLOCK_COARSE,
                has_gaps: false,
            },
        }
    }
}

/// Maps canvas coordinates of a chart to colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMapping {
    axis: Axis,
    value: f64,
    x_factor: f64,
    y_factor: f64,
}

impl ChartMapping {
    /// Mapping for a `width x height` chart with `axis` fixed at `value`.
    pub fn new(axis: Axis, value: f64, width: u32, height: u32, show_rec2020: bool) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let c_max = max_chroma(show_rec2020);
        let (x_factor, y_factor) = match axis {
            Axis::L => (H_MAX / w, c_max / h),
            Axis::C => (H_MAX / w, L_MAX_COLOR / h),
            Axis::H => (L_MAX_COLOR / w, c_max / h),
        };
        Self {
            axis,
            value,
            x_factor,
            y_factor,
        }
    }

    /// Color at canvas column `x`, `y` pixels above the bottom edge.
    #[inline]
    pub fn color(&self, x: f64, y: f64) -> OklchColor {
        let (sx, sy) = (x * self.x_factor, y * self.y_factor);
        match self.axis {
            Axis::L => OklchColor::opaque(L_MAX_COLOR * self.value, sy, sx),
            Axis::C => OklchColor::opaque(sy, self.value, sx),
            Axis::H => OklchColor::opaque(sx, sy, self.value),
        }
    }
}

/// Paints one column slice.
///
/// The returned image is `to - from` columns wide; column 0 is canvas
/// column `from`.
pub fn paint_chart(req: &PaintRequest) -> RgbaImage {
    let layout = ChartLayout::for_axis(req.axis);
    let mapping = ChartMapping::new(req.axis, req.value, req.width, req.height, req.show_rec2020);
    let encoder = PixelEncoder::new(req.filter(), req.encoding());

    let height = i64::from(req.height);
    let block = i64::from(layout.block);
    let max_gap = MAX_GAP_RATIO * f64::from(req.height);

    let mut image = RgbaImage::new(req.columns(), req.height, encoder.encoding());
    let mut separators = Separators::default();

    for col in 0..i64::from(req.columns()) {
        let canvas_x = (i64::from(req.from) + col) as f64;
        let sample = |y: i64| encoder.pixel(&mapping.color(canvas_x, y as f64));
        // Rows count from the bottom edge
        let mut put = |y: i64, px: &Pixel| {
            image.put(col, height - y, px.rgba);
        };

        let mut pixel = sample(0);
        let mut prev = pixel;
        let mut y = 0;
        while y <= height {
            let next = sample(y + block);

            if next.space != pixel.space {
                if !pixel.is_out() {
                    put(y, &pixel);
                }
                let mut prev_i = pixel;
                for i in 1..=block {
                    let ip = sample(y + i);
                    if ip.space != prev_i.space {
                        separators.push(prev_i.space, ip.space, col, height - y - i);
                    }
                    if !ip.is_out() {
                        put(y + i, &ip);
                    }
                    prev_i = ip;
                }
            } else if !pixel.is_out() {
                for i in 0..block {
                    put(y + i, &pixel);
                }
            } else if layout.has_gaps {
                if !prev.is_out() && y as f64 > max_gap {
                    break;
                }
            } else {
                break;
            }

            prev = pixel;
            pixel = next;
            y += block;
        }
    }

    separators.draw(&mut image, req.show_p3, req.show_rec2020, &req.borders);
    image
}

/// Validates and paints a request, timing the work.
///
/// This is the whole worker side of the paint protocol.
pub fn paint(req: &PaintRequest) -> Result<PaintResult> {
    req.validate()?;
    let start = Instant::now();
    let image = paint_chart(req);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    trace!(axis = %req.axis, from = req.from, to = req.to, elapsed_ms, "slice painted");
    Ok(PaintResult {
        from: req.from,
        image,
        elapsed_ms,
    })
}
