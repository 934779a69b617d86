//! Image encoding for crop output.
//!
//! Encodes extracted rasters to PNG or JPEG bytes using the `image` crate's
//! encoders. JPEG has no alpha channel, so rasters are flattened to RGB for
//! that format; PNG keeps RGBA so circular crops preserve their transparent
//! corners.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Raster;

/// Output compression format for saved crops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressFormat {
    #[default]
    Png,
    Jpeg,
}

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded bytes failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Encode a raster to bytes in the given format.
///
/// `quality` applies to JPEG only (1-100, clamped) and is ignored for PNG.
///
/// # Errors
///
/// Returns an error for empty dimensions, an inconsistent pixel buffer, or
/// an encoder failure.
pub fn encode(raster: &Raster, format: CompressFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: raster.width,
            height: raster.height,
        });
    }

    let expected_len = (raster.width as usize) * (raster.height as usize) * 4;
    if raster.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: raster.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    match format {
        CompressFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            encoder
                .write_image(
                    &raster.pixels,
                    raster.width,
                    raster.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        CompressFormat::Jpeg => {
            // Flatten alpha away; JPEG can't carry it
            let rgb: Vec<u8> = raster
                .pixels
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let quality = quality.clamp(1, 100);
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            encoder
                .write_image(&rgb, raster.width, raster.height, ExtendedColorType::Rgb8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer.into_inner())
}

/// Encode a raster and write it to a file.
pub fn encode_to_file(
    raster: &Raster,
    path: impl AsRef<std::path::Path>,
    format: CompressFormat,
    quality: u8,
) -> Result<(), EncodeError> {
    let bytes = encode(raster, format, quality)?;
    std::fs::write(path, bytes).map_err(|e| EncodeError::Io(e.to_string()))
}
