//! Color to canvas pixel.

use crate::image::CanvasEncoding;
use oklch_color::{Color, ColorSpace, GamutSample, SpaceFilter};
use oklch_core::{GamutSpace, OklchColor, Rgb};

/// Gamut of a sample plus its encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    /// Innermost shown gamut of the sample
    pub space: GamutSpace,
    /// Encoded RGBA, alpha always 255
    pub rgba: [u8; 4],
}

impl Pixel {
    /// Returns `true` if the sample is outside every shown gamut.
    #[inline]
    pub fn is_out(&self) -> bool {
        self.space == GamutSpace::Out
    }
}

/// `floor(255 * channel)`, clamped, opaque.
#[inline]
pub fn encode_floor(rgb: &Rgb) -> [u8; 4] {
    let q = |v: f64| (255.0 * v).floor().clamp(0.0, 255.0) as u8;
    [q(rgb.r), q(rgb.g), q(rgb.b), 255]
}

/// `round(255 * channel)` including alpha, used for border colors.
#[inline]
pub fn encode_round(rgb: &Rgb) -> [u8; 4] {
    rgb.to_rgba8()
}

/// Classifies samples and encodes them for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelEncoder {
    filter: SpaceFilter,
    encoding: CanvasEncoding,
}

impl PixelEncoder {
    /// Creates an encoder for the shown gamuts and the display's encoding.
    #[inline]
    pub fn new(filter: SpaceFilter, encoding: CanvasEncoding) -> Self {
        Self { filter, encoding }
    }

    /// Canvas encoding produced by this encoder.
    #[inline]
    pub fn encoding(&self) -> CanvasEncoding {
        self.encoding
    }

    /// Gamut of a color under the show flags.
    #[inline]
    pub fn classify(&self, color: &OklchColor) -> GamutSpace {
        self.filter.classify_oklch(color)
    }

    /// Canvas channels of a color, not clamped.
    pub fn channels(&self, color: &OklchColor) -> Rgb {
        Self::channels_of(&GamutSample::oklch(color), self.encoding)
    }

    fn channels_of(sample: &GamutSample, encoding: CanvasEncoding) -> Rgb {
        match encoding {
            CanvasEncoding::Srgb => sample.srgb(),
            CanvasEncoding::DisplayP3 => sample.p3(),
        }
    }

    /// Classifies and encodes one sample.
    pub fn pixel(&self, color: &OklchColor) -> Pixel {
        let sample = GamutSample::oklch(color);
        Pixel {
            space: self.filter.classify_sample(&sample),
            rgba: encode_floor(&Self::channels_of(&sample, self.encoding)),
        }
    }

    /// Encodes sRGB channels for this canvas.
    pub fn encode_srgb(&self, rgb: &Rgb) -> [u8; 4] {
        match self.encoding {
            CanvasEncoding::Srgb => encode_floor(rgb),
            CanvasEncoding::DisplayP3 => {
                let color = Color::from_rgb(ColorSpace::Srgb, *rgb);
                encode_floor(&color.to_rgb_in(ColorSpace::DisplayP3))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_floor_clamps() {
        assert_eq!(encode_floor(&Rgb::opaque(1.2, 0.999, -0.3)), [255, 254, 0, 255]);
        assert_eq!(encode_round(&Rgb::new(0.999, 0.0, 0.0, 0.5)), [255, 0, 0, 128]);
    }

    #[test]
    fn test_pixel_classifies_with_filter() {
        // Inside P3, outside sRGB
        let vivid = Color::new(ColorSpace::DisplayP3, [0.9, 0.2, 0.1], 1.0).to_oklch();
        let shown = PixelEncoder::new(SpaceFilter::new(true, false), CanvasEncoding::DisplayP3);
        let hidden = PixelEncoder::new(SpaceFilter::SRGB_ONLY, CanvasEncoding::Srgb);
        assert_eq!(shown.pixel(&vivid).space, GamutSpace::P3);
        assert!(hidden.pixel(&vivid).is_out());
    }

    #[test]
    fn test_p3_canvas_black() {
        let enc = PixelEncoder::new(SpaceFilter::ALL, CanvasEncoding::DisplayP3);
        assert_eq!(enc.encode_srgb(&Rgb::BLACK), [0, 0, 0, 255]);
        let black = enc.pixel(&OklchColor::opaque(0.0, 0.0, 0.0));
        assert_eq!(black.rgba, [0, 0, 0, 255]);
        assert_eq!(black.space, GamutSpace::Srgb);
    }
}
