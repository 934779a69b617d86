//! Circular masking for circle-mode crops.

use crate::decode::Raster;

/// Clear alpha outside the circle inscribed in the raster.
///
/// The circle is centered with radius `min(width, height) / 2`. Applied
/// after output resizing so the mask edge is computed at final resolution.
pub fn apply_circle_mask(raster: &mut Raster) {
    if raster.is_empty() {
        return;
    }
    let cx = raster.width as f32 / 2.0;
    let cy = raster.height as f32 / 2.0;
    let radius = raster.width.min(raster.height) as f32 / 2.0;
    let radius_sq = radius * radius;

    for y in 0..raster.height {
        for x in 0..raster.width {
            // Sample at the pixel center
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy > radius_sq {
                let idx = ((y as usize) * (raster.width as usize) + x as usize) * 4 + 3;
                raster.pixels[idx] = 0;
            }
        }
    }
}
