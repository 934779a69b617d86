//! Image sources for asynchronous loading and cropping.
//!
//! An [`ImageSource`] abstracts where pixels come from: the engine asks it
//! for dimensions, EXIF rotation, a downsampled preload, or a pixel region.
//! [`EncodedSource`] is the bundled implementation over an encoded byte
//! buffer (JPEG or PNG), decoding with the `image` crate and reading
//! orientation with `kamadak-exif`.

use std::io::Cursor;

use super::{resize, DecodeError, ExifRotation, FilterType, PixelRect, Raster};

/// A pixel source the crop engine can load from and extract crops from.
///
/// Implementations must be callable from the engine's worker thread.
/// Decoded pixels are returned in their stored orientation; EXIF rotation
/// is reported separately and applied by the engine as a view angle.
pub trait ImageSource: Send + Sync {
    /// Stored pixel dimensions, without EXIF rotation applied.
    fn dimensions(&self) -> Result<(u32, u32), DecodeError>;

    /// Rotation recorded in the source's metadata, if any.
    fn exif_rotation(&self) -> ExifRotation;

    /// Decode the full image, downscaled so no edge exceeds
    /// `max_dimension`. Used for preview preloads.
    fn decode_sampled(&self, max_dimension: u32) -> Result<Raster, DecodeError>;

    /// Decode only the given region, in stored-orientation pixel
    /// coordinates.
    fn decode_region(&self, region: PixelRect) -> Result<Raster, DecodeError>;
}

/// An [`ImageSource`] over an in-memory encoded image (JPEG or PNG).
pub struct EncodedSource {
    bytes: Vec<u8>,
}

impl EncodedSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Read and decode a source from a file path.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::IoError` if the file cannot be read.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, DecodeError> {
        let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
        Ok(Self::new(bytes))
    }

    fn decode_full(&self) -> Result<Raster, DecodeError> {
        let img = image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::IoError(e.to_string()))?
            .decode()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
        Ok(Raster::from_rgba_image(img.to_rgba8()))
    }
}

impl ImageSource for EncodedSource {
    fn dimensions(&self) -> Result<(u32, u32), DecodeError> {
        image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::IoError(e.to_string()))?
            .into_dimensions()
            .map_err(|_| DecodeError::InvalidFormat)
    }

    fn exif_rotation(&self) -> ExifRotation {
        let mut cursor = Cursor::new(&self.bytes);
        let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
            return ExifRotation::Rotate0;
        };
        exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(ExifRotation::from)
            .unwrap_or_default()
    }

    fn decode_sampled(&self, max_dimension: u32) -> Result<Raster, DecodeError> {
        let full = self.decode_full()?;
        resize::resize_to_fit(&full, max_dimension, FilterType::Bilinear)
    }

    fn decode_region(&self, region: PixelRect) -> Result<Raster, DecodeError> {
        let full = self.decode_full()?;
        if region.width == 0
            || region.height == 0
            || region.x.saturating_add(region.width) > full.width
            || region.y.saturating_add(region.height) > full.height
        {
            return Err(DecodeError::RegionOutOfBounds(region));
        }
        let image = full
            .to_rgba_image()
            .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;
        let cropped =
            image::imageops::crop_imm(&image, region.x, region.y, region.width, region.height)
                .to_image();
        Ok(Raster::from_rgba_image(cropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        });
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_dimensions_without_full_decode() {
        let source = EncodedSource::new(encode_png(64, 48));
        assert_eq!(source.dimensions().unwrap(), (64, 48));
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        let source = EncodedSource::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(source.dimensions().is_err());
    }

    #[test]
    fn test_no_exif_defaults_to_no_rotation() {
        let source = EncodedSource::new(encode_png(8, 8));
        assert_eq!(source.exif_rotation(), ExifRotation::Rotate0);
    }

    #[test]
    fn test_decode_sampled_limits_longest_edge() {
        let source = EncodedSource::new(encode_png(128, 64));
        let raster = source.decode_sampled(32).unwrap();
        assert_eq!(raster.width, 32);
        assert_eq!(raster.height, 16);
    }

    #[test]
    fn test_decode_sampled_small_image_unchanged() {
        let source = EncodedSource::new(encode_png(16, 8));
        let raster = source.decode_sampled(32).unwrap();
        assert_eq!((raster.width, raster.height), (16, 8));
    }

    #[test]
    fn test_decode_region() {
        let source = EncodedSource::new(encode_png(64, 64));
        let raster = source
            .decode_region(PixelRect::new(10, 20, 30, 16))
            .unwrap();
        assert_eq!((raster.width, raster.height), (30, 16));
        // Region pixels keep their source-space gradient values
        assert_eq!(raster.pixel(0, 0)[0], 10);
        assert_eq!(raster.pixel(0, 0)[1], 20);
    }

    #[test]
    fn test_decode_region_out_of_bounds() {
        let source = EncodedSource::new(encode_png(32, 32));
        let result = source.decode_region(PixelRect::new(20, 20, 20, 20));
        assert!(matches!(result, Err(DecodeError::RegionOutOfBounds(_))));
    }
}
