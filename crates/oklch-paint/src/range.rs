//! 1D slider strips.
//!
//! A strip varies one axis from 0 to its maximum across the width and keeps
//! the other two components of the current value. Each column shows the
//! gamut of its color: sRGB columns are solid, wide-gamut columns show the
//! true color on top and the sRGB fallback below, out-of-gamut columns stay
//! empty. Every gamut transition gets a border column and a slider stop.

use crate::image::{CanvasEncoding, RgbaImage};
use crate::pixel::{encode_round, PixelEncoder};
use crate::request::BorderColors;
use oklch_color::{snap, to_rgb_gamut, SpaceFilter};
use oklch_core::config::{max_chroma, C_STEP, H_MAX, H_STEP, L_MAX_COLOR, L_STEP};
use oklch_core::{Axis, GamutSpace, LchValue, OklchColor};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Slider step of an axis; stops are snapped to it.
#[inline]
pub fn slider_step(axis: Axis) -> f64 {
    match axis {
        Axis::L => L_STEP,
        Axis::C => C_STEP / 100.0,
        Axis::H => H_STEP / 100.0,
    }
}

/// One slider strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRequest {
    /// Axis the slider controls
    pub axis: Axis,
    /// Current value; supplies the two fixed components
    pub value: LchValue,
    /// Strip width
    pub width: u32,
    /// Strip height
    pub height: u32,
    /// Show the P3 gamut
    pub show_p3: bool,
    /// Show the Rec2020 gamut
    pub show_rec2020: bool,
    /// Display can show P3
    pub display_p3: bool,
    /// Boundary colors
    pub borders: BorderColors,
}

impl RangeRequest {
    /// Slider value at column `x`.
    #[inline]
    pub fn axis_value(&self, x: i64) -> f64 {
        let x = x as f64;
        let w = f64::from(self.width);
        match self.axis {
            Axis::L => x * L_MAX_COLOR / w,
            Axis::C => x * max_chroma(self.show_rec2020) / w,
            Axis::H => x * H_MAX / w,
        }
    }

    /// Color at column `x`.
    pub fn color(&self, x: i64) -> OklchColor {
        let base = self.value.to_color().with_alpha(1.0);
        base.with(self.axis, self.axis_value(x))
    }
}

/// A painted strip and its slider stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RangePaint {
    /// `width x height` pixels
    pub image: RgbaImage,
    /// Slider values at gamut transitions, in paint order
    pub stops: Vec<f64>,
}

/// Paints a slider strip.
pub fn paint_range(req: &RangeRequest) -> RangePaint {
    use GamutSpace::{Out, Rec2020, Srgb, P3};

    let encoder = PixelEncoder::new(
        SpaceFilter::new(req.show_p3, req.show_rec2020),
        CanvasEncoding::for_display(req.display_p3),
    );
    let height = i64::from(req.height);
    let half = height / 2;
    let step = slider_step(req.axis);
    let p3_border = encode_round(&req.borders.p3);
    let rec2020_border = encode_round(&req.borders.rec2020);

    let mut image = RgbaImage::new(req.width, req.height, encoder.encoding());
    let mut stops = Vec::new();
    let mut add_stop = |x: i64, round: fn(f64) -> f64| {
        stops.push(snap(req.axis_value(x), step, round));
    };

    // With P3 hidden, Rec2020 is the only wide gamut and takes P3's place
    let wide = |space: GamutSpace| {
        if !req.show_p3 && space == Rec2020 { P3 } else { space }
    };

    let mut prev_space = wide(encoder.classify(&req.color(0)));
    for x in 0..=i64::from(req.width) {
        let color = req.color(x);
        let pixel = encoder.pixel(&color);
        let space = wide(pixel.space);

        if space != Out {
            if space == Srgb {
                image.fill_column(x, 0, height, pixel.rgba);
            } else {
                image.fill_column(x, 0, half, pixel.rgba);
                let fallback = encoder.encode_srgb(&to_rgb_gamut(&color));
                image.fill_column(x, half, height, fallback);
            }

            if prev_space != space {
                let rises = prev_space == Out
                    || (prev_space == Rec2020 && space == P3)
                    || (prev_space == P3 && space == Srgb);
                if rises {
                    add_stop(x, f64::ceil);
                } else {
                    add_stop(x - 1, f64::floor);
                }

                if space == P3 && prev_space != Rec2020 {
                    image.fill_column(x, 0, height, p3_border);
                } else if space == Srgb && prev_space == P3 {
                    image.fill_column(x - 1, 0, height, p3_border);
                } else if space == Rec2020 {
                    image.fill_column(x, 0, height, rec2020_border);
                } else if prev_space == Rec2020 {
                    image.fill_column(x - 1, 0, height, rec2020_border);
                }
            }
        } else {
            if prev_space != Out {
                add_stop(x - 1, f64::floor);
            }
            if req.axis == Axis::C {
                break;
            }
        }
        prev_space = space;
    }

    trace!(axis = %req.axis, stops = stops.len(), "range painted");
    RangePaint { image, stops }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oklch_core::Rgb;

    fn request(axis: Axis, value: LchValue) -> RangeRequest {
        RangeRequest {
            axis,
            value,
            width: 100,
            height: 10,
            show_p3: true,
            show_rec2020: false,
            display_p3: false,
            borders: BorderColors {
                p3: Rgb::new(1.0, 0.0, 1.0, 1.0),
                rec2020: Rgb::WHITE,
            },
        }
    }

    #[test]
    fn test_slider_steps() {
        assert_eq!(slider_step(Axis::L), 0.01);
        assert_eq!(slider_step(Axis::C), 0.0001);
        assert_eq!(slider_step(Axis::H), 0.01);
    }

    #[test]
    fn test_axis_value_keeps_full_turn() {
        let req = request(Axis::H, LchValue::new(0.7, 0.1, 0.0, 1.0));
        assert_eq!(req.axis_value(100), 360.0);
        assert_eq!(req.color(100).h(), 0.0);
    }

    #[test]
    fn test_gray_strip_has_no_stops() {
        let paint = paint_range(&request(Axis::L, LchValue::new(0.5, 0.0, 0.0, 1.0)));
        assert!(paint.stops.is_empty(), "{:?}", paint.stops);
        assert_eq!(paint.image.pixel(50, 0).map(|p| p[3]), Some(255));
        assert_eq!(paint.image.pixel(50, 9).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_chroma_strip_stops_at_gamut_edges() {
        let paint = paint_range(&request(Axis::C, LchValue::new(0.7, 0.1, 150.0, 1.0)));
        // sRGB to P3, then P3 to out
        assert_eq!(paint.stops.len(), 2, "{:?}", paint.stops);
        assert!(paint.stops[0] < paint.stops[1]);
        // Nothing is painted past the end of P3
        assert_eq!(paint.image.pixel(99, 0), Some([0; 4]));
    }

    #[test]
    fn test_wide_gamut_column_split() {
        let req = RangeRequest {
            display_p3: true,
            ..request(Axis::C, LchValue::new(0.7, 0.1, 150.0, 1.0))
        };
        let paint = paint_range(&req);
        let filter = SpaceFilter::new(true, false);
        let last_p3 = (0..100)
            .filter(|&x| filter.classify_oklch(&req.color(x)) == GamutSpace::P3)
            .max()
            .unwrap();
        let top = paint.image.pixel(last_p3, 0).unwrap();
        let bottom = paint.image.pixel(last_p3, 9).unwrap();
        assert_eq!(top[3], 255);
        assert_eq!(bottom[3], 255);
        // Fallback has visibly less chroma
        assert_ne!(top, bottom);
    }

    #[test]
    fn test_rec2020_alone_stops_like_p3() {
        let req = RangeRequest {
            show_p3: false,
            show_rec2020: true,
            ..request(Axis::H, LchValue::new(0.7, 0.15, 0.0, 1.0))
        };
        let filter = SpaceFilter::new(false, true);
        let back_to_srgb = (1..=100)
            .find(|&x| {
                filter.classify_oklch(&req.color(x - 1)) == GamutSpace::Rec2020
                    && filter.classify_oklch(&req.color(x)) == GamutSpace::Srgb
            })
            .expect("hue strip leaves and re-enters sRGB");

        let paint = paint_range(&req);
        let step = slider_step(Axis::H);
        let up = snap(req.axis_value(back_to_srgb), step, f64::ceil);
        let down = snap(req.axis_value(back_to_srgb - 1), step, f64::floor);
        assert!(paint.stops.contains(&up), "{:?}", paint.stops);
        assert!(!paint.stops.contains(&down), "{:?}", paint.stops);
    }
}
