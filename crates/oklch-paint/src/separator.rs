//! Gamut boundary lines.
//!
//! While painting a chart every vertical transition between two gamuts is
//! recorded as a point. Afterwards the points of each transition are drawn in
//! the border color, skipping points that jump more than
//! [`BORDER_TOLERANCE_PX`] away from their predecessor in the same column
//! run. That keeps real contours and drops isolated aliasing specks.

use crate::image::RgbaImage;
use crate::pixel::encode_round;
use crate::request::BorderColors;
use oklch_core::config::BORDER_TOLERANCE_PX;
use oklch_core::{GamutSpace, Rgb};
use std::collections::HashMap;

/// Transition points grouped by `(from, to)` gamut pair, in paint order.
#[derive(Debug, Clone, Default)]
pub struct Separators {
    lines: HashMap<(GamutSpace, GamutSpace), Vec<(i64, i64)>>,
}

impl Separators {
    /// Records a transition at image column `x`, row `y`.
    #[inline]
    pub fn push(&mut self, from: GamutSpace, to: GamutSpace, x: i64, y: i64) {
        self.lines.entry((from, to)).or_default().push((x, y));
    }

    /// Points of one transition.
    pub fn line(&self, from: GamutSpace, to: GamutSpace) -> &[(i64, i64)] {
        self.lines.get(&(from, to)).map_or(&[], Vec::as_slice)
    }

    /// Draws the boundaries visible under the show flags.
    pub fn draw(&self, image: &mut RgbaImage, show_p3: bool, show_rec2020: bool, borders: &BorderColors) {
        for (from, to, color) in border_pairs(show_p3, show_rec2020, borders) {
            separate(image, &color, self.line(from, to));
        }
    }
}

/// Transitions that get a border, both directions, with their color.
pub fn border_pairs(
    show_p3: bool,
    show_rec2020: bool,
    borders: &BorderColors,
) -> Vec<(GamutSpace, GamutSpace, Rgb)> {
    use GamutSpace::{Rec2020, Srgb, P3};

    let mut pairs = Vec::with_capacity(4);
    let mut both_ways = |a, b, color| {
        pairs.push((a, b, color));
        pairs.push((b, a, color));
    };
    match (show_p3, show_rec2020) {
        (true, true) => {
            both_ways(Srgb, P3, borders.p3);
            both_ways(P3, Rec2020, borders.rec2020);
        }
        (true, false) => both_ways(Srgb, P3, borders.p3),
        (false, true) => both_ways(Srgb, Rec2020, borders.rec2020),
        (false, false) => {}
    }
    pairs
}

/// Draws one transition line.
///
/// A point is drawn when it is within the tolerance of the previous point.
/// A jump of more than one column restarts the comparison from the line's
/// first row.
pub fn separate(image: &mut RgbaImage, color: &Rgb, line: &[(i64, i64)]) {
    let Some(&(_, first_y)) = line.first() else {
        return;
    };
    let px = encode_round(color);
    let mut prev_x = 0;
    let mut prev_y = first_y;
    for &(x, y) in line {
        if x > prev_x + 1 {
            prev_y = first_y;
        }
        if (prev_y - y).abs() < BORDER_TOLERANCE_PX {
            image.put(x, y, px);
        }
        prev_x = x;
        prev_y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::CanvasEncoding;

    const BORDER: Rgb = Rgb::new(1.0, 0.0, 1.0, 1.0);

    #[test]
    fn test_separate_skips_jumps() {
        let mut img = RgbaImage::new(4, 40, CanvasEncoding::Srgb);
        separate(&mut img, &BORDER, &[(0, 10), (1, 12), (2, 35), (3, 36)]);
        let magenta = Some([255, 0, 255, 255]);
        assert_eq!(img.pixel(0, 10), magenta);
        assert_eq!(img.pixel(1, 12), magenta);
        // 23px jump
        assert_eq!(img.pixel(2, 35), Some([0; 4]));
        // Continues from the skipped point
        assert_eq!(img.pixel(3, 36), magenta);
    }

    #[test]
    fn test_column_gap_resets_reference() {
        let mut img = RgbaImage::new(10, 40, CanvasEncoding::Srgb);
        separate(&mut img, &BORDER, &[(0, 10), (1, 30), (5, 12)]);
        assert_eq!(img.pixel(1, 30), Some([0; 4]));
        // Compared against the first row after the gap
        assert_eq!(img.pixel(5, 12), Some([255, 0, 255, 255]));
    }

    #[test]
    fn test_border_pairs() {
        let borders = BorderColors {
            p3: Rgb::BLACK,
            rec2020: Rgb::WHITE,
        };
        assert_eq!(border_pairs(true, true, &borders).len(), 4);
        let rec_only = border_pairs(false, true, &borders);
        assert!(rec_only.contains(&(GamutSpace::Rec2020, GamutSpace::Srgb, Rgb::WHITE)));
        assert!(border_pairs(false, false, &borders).is_empty());
    }

    #[test]
    fn test_separators_collect_by_pair() {
        let mut seps = Separators::default();
        seps.push(GamutSpace::Srgb, GamutSpace::P3, 0, 5);
        seps.push(GamutSpace::Srgb, GamutSpace::P3, 1, 6);
        assert_eq!(seps.line(GamutSpace::Srgb, GamutSpace::P3).len(), 2);
        assert!(seps.line(GamutSpace::P3, GamutSpace::Srgb).is_empty());
    }
}
