//! RGBA8 pixel buffer.
//!
//! [`RgbaImage`] is the rasterizer's canvas: row-major, top-to-bottom, four
//! bytes per pixel. Writes outside the buffer are ignored, which lets the
//! painters address rows relative to the bottom edge without bounds
//! bookkeeping.
//!
//! # Usage
//!
//! ```rust
//! use oklch_paint::{CanvasEncoding, RgbaImage};
//!
//! let mut img = RgbaImage::new(4, 2, CanvasEncoding::Srgb);
//! img.put(1, 1, [255, 0, 0, 255]);
//! img.put(9, 9, [255, 0, 0, 255]); // ignored
//! assert_eq!(img.pixel(1, 1), Some([255, 0, 0, 255]));
//! ```

use crate::error::{PaintError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Color space the bytes of an image are encoded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasEncoding {
    /// sRGB channels
    #[default]
    Srgb,
    /// Display P3 channels, used when the display can show P3
    DisplayP3,
}

impl CanvasEncoding {
    /// Encoding for a display with or without P3 support.
    #[inline]
    pub fn for_display(supports_p3: bool) -> Self {
        if supports_p3 {
            CanvasEncoding::DisplayP3
        } else {
            CanvasEncoding::Srgb
        }
    }
}

/// Owned RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    encoding: CanvasEncoding,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32, encoding: CanvasEncoding) -> Self {
        Self {
            width,
            height,
            encoding,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wraps existing bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::SizeMismatch`] if `data` is not exactly
    /// `width * height * 4` bytes.
    pub fn from_data(width: u32, height: u32, encoding: CanvasEncoding, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PaintError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            encoding,
            data,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel encoding of the bytes.
    #[inline]
    pub fn encoding(&self) -> CanvasEncoding {
        self.encoding
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning its bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        let in_bounds = x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height);
        in_bounds.then(|| 4 * (y as usize * self.width as usize + x as usize))
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        Some(px)
    }

    /// Writes a pixel. Returns `false` (and writes nothing) outside the image.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, px: [u8; 4]) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.data[i..i + 4].copy_from_slice(&px);
                true
            }
            None => false,
        }
    }

    /// Fills rows `y0..y1` of column `x`.
    pub fn fill_column(&mut self, x: i64, y0: i64, y1: i64, px: [u8; 4]) {
        for y in y0.max(0)..y1.min(i64::from(self.height)) {
            self.put(x, y, px);
        }
    }

    /// Copies `part` into this image with its left edge at column `x`.
    ///
    /// Columns that fall outside this image are dropped. Both images must
    /// have the same height.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidDimensions`] on a height mismatch.
    pub fn blit_columns(&mut self, part: &RgbaImage, x: u32) -> Result<()> {
        if part.height != self.height {
            return Err(PaintError::invalid_dimensions(format!(
                "part height {} does not match canvas height {}",
                part.height, self.height
            )));
        }
        let cols = part.width.min(self.width.saturating_sub(x)) as usize;
        if cols == 0 {
            return Ok(());
        }
        let (dst_stride, src_stride) = (self.width as usize * 4, part.width as usize * 4);
        for row in 0..self.height as usize {
            let dst = row * dst_stride + x as usize * 4;
            let src = row * src_stride;
            self.data[dst..dst + cols * 4].copy_from_slice(&part.data[src..src + cols * 4]);
        }
        Ok(())
    }

    /// Writes the image as an 8-bit RGBA PNG.
    ///
    /// sRGB images are tagged with an sRGB chunk; P3 images are written
    /// untagged.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);

        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::default());
        if self.encoding == CanvasEncoding::Srgb {
            encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);
        }

        let mut png_writer = encoder
            .write_header()
            .map_err(|e| PaintError::Encode(e.to_string()))?;
        png_writer
            .write_image_data(&self.data)
            .map_err(|e| PaintError::Encode(e.to_string()))?;

        debug!(path = %path.as_ref().display(), width = self.width, height = self.height, "png written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];

    #[test]
    fn test_put_ignores_out_of_bounds() {
        let mut img = RgbaImage::new(3, 3, CanvasEncoding::Srgb);
        assert!(img.put(2, 2, RED));
        assert!(!img.put(-1, 0, RED));
        assert!(!img.put(0, 3, RED));
        assert_eq!(img.pixel(2, 2), Some(RED));
        assert_eq!(img.pixel(3, 0), None);
    }

    #[test]
    fn test_fill_column_clips() {
        let mut img = RgbaImage::new(2, 4, CanvasEncoding::Srgb);
        img.fill_column(1, -5, 2, RED);
        assert_eq!(img.pixel(1, 0), Some(RED));
        assert_eq!(img.pixel(1, 1), Some(RED));
        assert_eq!(img.pixel(1, 2), Some([0; 4]));
        assert_eq!(img.pixel(0, 0), Some([0; 4]));
    }

    #[test]
    fn test_from_data_checks_length() {
        assert!(RgbaImage::from_data(2, 2, CanvasEncoding::Srgb, vec![0; 16]).is_ok());
        let err = RgbaImage::from_data(2, 2, CanvasEncoding::Srgb, vec![0; 15]).unwrap_err();
        assert!(matches!(err, PaintError::SizeMismatch { expected: 16, actual: 15 }));
    }

    #[test]
    fn test_blit_columns() {
        let mut canvas = RgbaImage::new(4, 2, CanvasEncoding::Srgb);
        let mut part = RgbaImage::new(3, 2, CanvasEncoding::Srgb);
        part.fill_column(0, 0, 2, RED);
        canvas.blit_columns(&part, 2).unwrap();
        assert_eq!(canvas.pixel(2, 1), Some(RED));
        assert_eq!(canvas.pixel(1, 1), Some([0; 4]));

        let short = RgbaImage::new(1, 1, CanvasEncoding::Srgb);
        assert!(canvas.blit_columns(&short, 0).is_err());
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slice.png");
        let mut img = RgbaImage::new(8, 8, CanvasEncoding::DisplayP3);
        img.fill_column(3, 0, 8, RED);
        img.write_png(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
