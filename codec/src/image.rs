//! Decoded image model and the RGBA8 format check.

use std::fmt;

use thiserror::Error;

use crate::rgb565::Pixel565;

/// Bytes per pixel of an RGBA8 buffer
pub const RGBA8_BYTES_PER_PIXEL: usize = 4;

/// Number of passes reported for an Adam7-interlaced image
pub const ADAM7_PASSES: u8 = 7;

/// Color types a PNG header can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorType {
    Gray = 0,
    Rgb = 2,
    Palette = 3,
    GrayAlpha = 4,
    Rgba = 6,
}

impl ColorType {
    /// Wire code as stored in the IHDR chunk
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Gray),
            2 => Some(Self::Rgb),
            3 => Some(Self::Palette),
            4 => Some(Self::GrayAlpha),
            6 => Some(Self::Rgba),
            _ => None,
        }
    }

    pub const fn channels(self) -> usize {
        match self {
            Self::Gray | Self::Palette => 1,
            Self::GrayAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Gray => "grayscale",
            Self::Rgb => "RGB",
            Self::Palette => "palette",
            Self::GrayAlpha => "grayscale+alpha",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for ColorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

/// Reasons a decoded image cannot be quantized
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("input PNG must be RGBA ({}), but is {actual}", ColorType::Rgba.code())]
    UnsupportedColorFormat { actual: ColorType },

    #[error("input PNG must have 8 bits per channel, but has {actual}")]
    UnsupportedBitDepth { actual: u8 },

    #[error("decoded buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A fully decoded image, interlacing already resolved.
///
/// Rows are stored back to back in one buffer; `row(y)` yields `stride()`
/// bytes for row `y`.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub color_type: ColorType,
    pub bit_depth: u8,
    pub num_passes: u8,
    pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(
        width: u32,
        height: u32,
        color_type: ColorType,
        bit_depth: u8,
        num_passes: u8,
        pixels: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            color_type,
            bit_depth,
            num_passes,
            pixels,
        }
    }

    /// Build a non-interlaced RGBA8 image from a raw buffer
    pub fn rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::new(width, height, ColorType::Rgba, 8, 1, pixels)
    }

    /// Bytes per row as declared by the header
    pub fn stride(&self) -> usize {
        let bits = self.width as usize * self.color_type.channels() * self.bit_depth as usize;
        (bits + 7) / 8
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the image is strictly RGBA8 and the buffer covers every row.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.color_type != ColorType::Rgba {
            return Err(FormatError::UnsupportedColorFormat {
                actual: self.color_type,
            });
        }

        if self.bit_depth != 8 {
            return Err(FormatError::UnsupportedBitDepth {
                actual: self.bit_depth,
            });
        }

        let expected = self.pixel_count() * RGBA8_BYTES_PER_PIXEL;
        if self.pixels.len() != expected {
            return Err(FormatError::BufferSizeMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: self.pixels.len(),
            });
        }

        Ok(())
    }

    /// Borrow the image as RGBA8 pixels, validating it first
    pub fn as_rgba8(&self) -> Result<Rgba8<'_>, FormatError> {
        self.validate()?;
        Ok(Rgba8 { image: self })
    }
}

/// A [`DecodedImage`] known to be RGBA8 with every row present.
///
/// Only obtainable through [`DecodedImage::as_rgba8`], so every
/// `x < width`, `y < height` is in bounds.
#[derive(Debug, Clone, Copy)]
pub struct Rgba8<'a> {
    image: &'a DecodedImage,
}

impl<'a> Rgba8<'a> {
    pub fn image(&self) -> &'a DecodedImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Quantized pixel at column `x` of row `y`
    pub fn pixel565(&self, x: u32, y: u32) -> Pixel565 {
        let offset = x as usize * RGBA8_BYTES_PER_PIXEL;
        let row = self.image.row(y);
        Pixel565::from_rgba8(row[offset], row[offset + 1], row[offset + 2], row[offset + 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_type_codes() {
        for ct in [
            ColorType::Gray,
            ColorType::Rgb,
            ColorType::Palette,
            ColorType::GrayAlpha,
            ColorType::Rgba,
        ] {
            assert_eq!(ColorType::from_code(ct.code()), Some(ct));
        }
        assert_eq!(ColorType::from_code(1), None);
        assert_eq!(ColorType::Rgba.code(), 6);
    }

    #[test]
    fn test_validate_accepts_rgba8() {
        let image = DecodedImage::rgba8(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 128]);
        assert_eq!(image.validate(), Ok(()));
        assert_eq!(image.stride(), 8);
        let rgba = image.as_rgba8().unwrap();
        assert_eq!(rgba.pixel565(0, 0).value(), 0xF800);
        assert_eq!(rgba.pixel565(1, 0).value(), 0x07E0);
    }

    #[test]
    fn test_validate_rejects_every_other_color_type() {
        for ct in [
            ColorType::Gray,
            ColorType::Rgb,
            ColorType::Palette,
            ColorType::GrayAlpha,
        ] {
            let pixels = vec![0; 4 * ct.channels()];
            let image = DecodedImage::new(2, 2, ct, 8, 1, pixels);
            assert_eq!(
                image.validate(),
                Err(FormatError::UnsupportedColorFormat { actual: ct })
            );
        }
    }

    #[test]
    fn test_color_error_names_actual_code() {
        let err = FormatError::UnsupportedColorFormat {
            actual: ColorType::Gray,
        };
        assert_eq!(
            err.to_string(),
            "input PNG must be RGBA (6), but is 0 (grayscale)"
        );
    }

    #[test]
    fn test_validate_rejects_sixteen_bit() {
        let image = DecodedImage::new(1, 1, ColorType::Rgba, 16, 1, vec![0; 8]);
        assert_eq!(
            image.validate(),
            Err(FormatError::UnsupportedBitDepth { actual: 16 })
        );
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        let image = DecodedImage::rgba8(2, 2, vec![0; 12]);
        assert_eq!(
            image.validate(),
            Err(FormatError::BufferSizeMismatch {
                width: 2,
                height: 2,
                expected: 16,
                actual: 12,
            })
        );
    }

    #[test]
    fn test_rgba8_view_refused_for_unvalidated_layouts() {
        // 2x2 grayscale holds 4 bytes; reading it as RGBA would run off the end
        let gray = DecodedImage::new(2, 2, ColorType::Gray, 8, 1, vec![0; 4]);
        assert_eq!(
            gray.as_rgba8().unwrap_err(),
            FormatError::UnsupportedColorFormat {
                actual: ColorType::Gray
            }
        );

        let short = DecodedImage::rgba8(2, 2, vec![0; 4]);
        assert!(matches!(
            short.as_rgba8(),
            Err(FormatError::BufferSizeMismatch { .. })
        ));
    }
}
