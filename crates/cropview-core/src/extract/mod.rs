//! Crop extraction: mapping the viewport frame to source pixels and
//! producing the output raster.
//!
//! Two extraction paths exist. The source path asks the [`ImageSource`] to
//! decode only the mapped region (corrected back through the inverse
//! rotation) and then rotates the small result. The raster path rotates an
//! already-decoded raster and crops it, for hosts that keep the preview
//! pixels around. Both finish with the output-size policy and the optional
//! circular mask.

mod circle;
mod output;
mod region;

pub use circle::apply_circle_mask;
pub use output::{apply_output_policy, OutputPolicy};
pub use region::{map_frame_to_source, rotate_region_for_decode};

use thiserror::Error;

use crate::decode::{self, DecodeError, FilterType, ImageSource, PixelRect, Raster};
use crate::geometry::RectF;

use region::normalized_quarter_turns;

/// Errors that can occur during crop extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Rotation correction only supports 90-degree steps.
    #[error("Rotation angle {0} is not a multiple of 90 degrees")]
    UnsupportedAngle(f32),

    /// The mapped crop region has no pixels.
    #[error("Crop region is empty")]
    EmptyRegion,

    /// Decoding the source region failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Rotate a raster by a 90-degree-multiple angle (clockwise).
pub fn rotate_raster(raster: &Raster, angle: f32) -> Result<Raster, ExtractError> {
    let turns = normalized_quarter_turns(angle)?;
    if turns == 0 {
        return Ok(raster.clone());
    }
    let image = raster
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;
    let rotated = match turns {
        1 => image::imageops::rotate90(&image),
        2 => image::imageops::rotate180(&image),
        3 => image::imageops::rotate270(&image),
        _ => unreachable!(),
    };
    Ok(Raster::from_rgba_image(rotated))
}

/// Crop a raster to a pixel region.
fn crop_raster(raster: &Raster, region: PixelRect) -> Result<Raster, ExtractError> {
    if region.width == 0 || region.height == 0 {
        return Err(ExtractError::EmptyRegion);
    }
    if region.x.saturating_add(region.width) > raster.width
        || region.y.saturating_add(region.height) > raster.height
    {
        return Err(DecodeError::RegionOutOfBounds(region).into());
    }
    let image = raster
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;
    let cropped =
        image::imageops::crop_imm(&image, region.x, region.y, region.width, region.height)
            .to_image();
    Ok(Raster::from_rgba_image(cropped))
}

/// Extract the crop by region-decoding from the source.
///
/// Decodes only the pixels the frame covers: the frame is mapped to rotated
/// source space, corrected back to stored space, region-decoded, and the
/// small result rotated forward.
pub fn extract_from_source(
    source: &dyn ImageSource,
    frame: &RectF,
    image_rect: &RectF,
    angle: f32,
) -> Result<Raster, ExtractError> {
    let (src_w, src_h) = source.dimensions()?;
    let region = map_frame_to_source(frame, image_rect, angle, src_w, src_h);
    if region.width == 0 || region.height == 0 {
        return Err(ExtractError::EmptyRegion);
    }
    let stored = rotate_region_for_decode(region, angle, src_w, src_h)?;
    let raster = source.decode_region(stored)?;
    rotate_raster(&raster, angle)
}

/// Extract the crop from an already-decoded raster.
///
/// The raster may be a downsampled preload; the frame is mapped against its
/// own dimensions, so the crop stays proportionally correct.
pub fn extract_from_raster(
    raster: &Raster,
    frame: &RectF,
    image_rect: &RectF,
    angle: f32,
) -> Result<Raster, ExtractError> {
    let rotated = rotate_raster(raster, angle)?;
    let region = map_frame_to_source(frame, image_rect, angle, raster.width, raster.height);
    crop_raster(&rotated, region)
}

/// Apply the output-size policy and optional circular mask.
pub fn finalize_output(
    raster: Raster,
    frame_ratio: f32,
    policy: OutputPolicy,
    circle: bool,
) -> Result<Raster, ExtractError> {
    let (out_w, out_h) = apply_output_policy(raster.width, raster.height, frame_ratio, policy);
    let mut out = if (out_w, out_h) == (raster.width, raster.height) {
        raster
    } else {
        decode::resize(&raster, out_w, out_h, FilterType::Lanczos3)?
    };
    if circle {
        apply_circle_mask(&mut out);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::EncodedSource;

    fn gradient_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 0, 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let raster = gradient_raster(width, height);
        crate::encode::encode(&raster, crate::encode::CompressFormat::Png, 100).unwrap()
    }

    #[test]
    fn test_rotate_raster_90_swaps_dimensions() {
        let raster = gradient_raster(8, 4);
        let rotated = rotate_raster(&raster, 90.0).unwrap();
        assert_eq!((rotated.width, rotated.height), (4, 8));
        // Stored (0, 3) lands at rotated (0, 0) under a clockwise turn
        assert_eq!(rotated.pixel(0, 0), raster.pixel(0, 3));
    }

    #[test]
    fn test_rotate_raster_rejects_odd_angle() {
        let raster = gradient_raster(4, 4);
        assert!(matches!(
            rotate_raster(&raster, 45.0),
            Err(ExtractError::UnsupportedAngle(_))
        ));
    }

    #[test]
    fn test_extract_from_raster_identity_layout() {
        let raster = gradient_raster(100, 80);
        let image_rect = RectF::new(0.0, 0.0, 100.0, 80.0);
        let frame = RectF::new(10.0, 20.0, 40.0, 50.0);

        let out = extract_from_raster(&raster, &frame, &image_rect, 0.0).unwrap();
        assert_eq!((out.width, out.height), (30, 30));
        assert_eq!(out.pixel(0, 0), raster.pixel(10, 20));
    }

    #[test]
    fn test_extract_from_raster_scaled_layout() {
        // 100x80 raster shown at double size
        let raster = gradient_raster(100, 80);
        let image_rect = RectF::new(0.0, 0.0, 200.0, 160.0);
        let frame = RectF::new(20.0, 40.0, 80.0, 100.0);

        let out = extract_from_raster(&raster, &frame, &image_rect, 0.0).unwrap();
        assert_eq!((out.width, out.height), (30, 30));
        assert_eq!(out.pixel(0, 0), raster.pixel(10, 20));
    }

    #[test]
    fn test_source_and_raster_paths_agree() {
        let raster = gradient_raster(64, 64);
        let source = EncodedSource::new(gradient_png(64, 64));
        let image_rect = RectF::new(0.0, 0.0, 64.0, 64.0);
        let frame = RectF::new(8.0, 16.0, 40.0, 48.0);

        for angle in [0.0, 90.0, 180.0, 270.0] {
            let from_source = extract_from_source(&source, &frame, &image_rect, angle).unwrap();
            let from_raster = extract_from_raster(&raster, &frame, &image_rect, angle).unwrap();
            assert_eq!(from_source.width, from_raster.width, "angle {angle}");
            assert_eq!(from_source.height, from_raster.height, "angle {angle}");
            assert_eq!(from_source.pixels, from_raster.pixels, "angle {angle}");
        }
    }

    #[test]
    fn test_extract_empty_frame_errors() {
        let raster = gradient_raster(64, 64);
        let image_rect = RectF::new(0.0, 0.0, 64.0, 64.0);
        let frame = RectF::new(10.0, 10.0, 10.0, 10.0);
        assert!(matches!(
            extract_from_raster(&raster, &frame, &image_rect, 0.0),
            Err(ExtractError::EmptyRegion)
        ));
    }

    #[test]
    fn test_finalize_resizes_and_masks() {
        let raster = gradient_raster(100, 100);
        let out = finalize_output(
            raster,
            1.0,
            OutputPolicy::MaxBounds {
                width: 50,
                height: 50,
            },
            true,
        )
        .unwrap();
        assert_eq!((out.width, out.height), (50, 50));
        assert_eq!(out.pixel(0, 0)[3], 0);
        assert_eq!(out.pixel(25, 25)[3], 255);
    }

    #[test]
    fn test_finalize_no_policy_keeps_pixels() {
        let raster = gradient_raster(10, 10);
        let expected = raster.clone();
        let out = finalize_output(raster, 1.0, OutputPolicy::None, false).unwrap();
        assert_eq!(out.pixels, expected.pixels);
    }
}
