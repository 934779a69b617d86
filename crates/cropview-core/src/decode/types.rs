//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The requested region lies outside the source bounds.
    #[error("Region {0:?} is outside the source image")]
    RegionOutOfBounds(PixelRect),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Source rotation derived from EXIF orientation, reduced to the 90-degree
/// steps the crop engine consumes. Mirrored orientations map to their
/// rotation component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExifRotation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl ExifRotation {
    /// Rotation angle in degrees.
    pub fn degrees(self) -> f32 {
        match self {
            ExifRotation::Rotate0 => 0.0,
            ExifRotation::Rotate90 => 90.0,
            ExifRotation::Rotate180 => 180.0,
            ExifRotation::Rotate270 => 270.0,
        }
    }
}

impl From<u32> for ExifRotation {
    /// Map a raw EXIF orientation value (1-8) to its rotation component.
    fn from(value: u32) -> Self {
        match value {
            3 | 4 => ExifRotation::Rotate180,
            5 | 6 => ExifRotation::Rotate90,
            7 | 8 => ExifRotation::Rotate270,
            _ => ExifRotation::Rotate0,
        }
    }
}

/// Interpolation filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor, fastest but lowest quality.
    Nearest,
    /// Bilinear interpolation, good for thumbnails.
    #[default]
    Bilinear,
    /// Lanczos3, highest quality for final output.
    Lanczos3,
}

impl FilterType {
    pub(crate) fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An integer rectangle in source-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A decoded image with RGBA pixel data.
///
/// Alpha is carried through the whole pipeline because circular extraction
/// masks the result by writing alpha.
#[derive(Debug, Clone)]
pub struct Raster {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// An opaque single-color raster, mostly useful in tests.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgba);
        }
        Self::new(width, height, pixels)
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage` for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// RGBA bytes of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}
