//! Image resizing for thumbnail preloads and output-size limiting.
//!
//! All functions return new `Raster` instances without modifying the input.

use super::{DecodeError, FilterType, Raster};

/// Resize a raster to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions or
/// `DecodeError::CorruptedFile` if the pixel buffer is inconsistent.
pub fn resize(
    raster: &Raster,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if raster.width == width && raster.height == height {
        return Ok(raster.clone());
    }

    let rgba_image = raster
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(Raster::from_rgba_image(resized))
}

/// Resize a raster to fit within a maximum edge length while preserving
/// aspect ratio. Already-smaller rasters are returned unchanged.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `max_edge` is zero.
pub fn resize_to_fit(
    raster: &Raster,
    max_edge: u32,
    filter: FilterType,
) -> Result<Raster, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (src_width, src_height) = (raster.width, raster.height);

    // If already fits, just clone
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(raster.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, max_edge);

    resize(raster, new_width, new_height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
pub fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_width = max_edge;
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (new_width, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_height = max_edge;
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), new_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_raster(width: u32, height: u32) -> Raster {
        // Simple gradient for testing
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
                pixels.push(255); // A
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_raster(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_raster(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_raster(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_raster(600, 400);
        let resized = resize_to_fit(&img, 256, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.width, 256);
        assert_eq!(resized.height, 171); // 400 * (256/600) ≈ 171
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_raster(400, 600);
        let resized = resize_to_fit(&img, 256, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.height, 256);
        assert_eq!(resized.width, 171);
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_raster(100, 50);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 100);
        assert_eq!(resized.height, 50);
    }

    #[test]
    fn test_resize_to_fit_zero_max_edge_error() {
        let img = create_test_raster(100, 50);
        assert!(resize_to_fit(&img, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(calculate_fit_dimensions(4000, 4000, 256), (256, 256));
        assert_eq!(calculate_fit_dimensions(0, 0, 256), (0, 0));
    }
}
