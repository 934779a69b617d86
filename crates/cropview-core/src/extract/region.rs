//! Viewport-to-source crop region mapping.
//!
//! The crop frame lives in viewport coordinates over the scaled, rotated
//! image; extraction needs the matching rectangle in source pixels. Two
//! steps: undo the viewport scale (giving a rect in rotated source space),
//! then undo the rotation (giving a rect in stored source space that a
//! region decoder can read).

use crate::decode::PixelRect;
use crate::geometry::RectF;
use crate::layout::{rotated_height, rotated_width};

use super::ExtractError;

/// Map the crop frame from viewport space to rotated source-pixel space.
///
/// The viewport-to-source scale is the rotated source width over the
/// placed image rect width. Edges are rounded to whole pixels and clamped
/// to the rotated source bounds, so a frame nudged fractionally past the
/// image edge still yields a valid region.
pub fn map_frame_to_source(
    frame: &RectF,
    image_rect: &RectF,
    angle: f32,
    src_w: u32,
    src_h: u32,
) -> PixelRect {
    let rot_w = rotated_width(angle, src_w as f32, src_h as f32);
    let rot_h = rotated_height(angle, src_w as f32, src_h as f32);
    if image_rect.width() <= 0.0 {
        return PixelRect::default();
    }
    let scale = rot_w / image_rect.width();

    let offset_x = image_rect.left * scale;
    let offset_y = image_rect.top * scale;
    let left = (frame.left * scale - offset_x).round().max(0.0) as u32;
    let top = (frame.top * scale - offset_y).round().max(0.0) as u32;
    let right = (frame.right * scale - offset_x).round().min(rot_w) as u32;
    let bottom = (frame.bottom * scale - offset_y).round().min(rot_h) as u32;

    PixelRect::new(
        left,
        top,
        right.saturating_sub(left),
        bottom.saturating_sub(top),
    )
}

/// Rotate a region from rotated source space back to stored source space.
///
/// Region decoders read the stored pixels, so a region computed against the
/// rotated image must be mapped back through the inverse rotation. Only
/// 90-degree multiples are meaningful here; other angles are rejected.
pub fn rotate_region_for_decode(
    region: PixelRect,
    angle: f32,
    src_w: u32,
    src_h: u32,
) -> Result<PixelRect, ExtractError> {
    let turns = normalized_quarter_turns(angle)?;
    let (l, t) = (region.x as i64, region.y as i64);
    let (r, b) = (l + region.width as i64, t + region.height as i64);

    // Corners under rotation by -angle about the origin, then shifted back
    // into the positive quadrant.
    let (mut left, mut top, w, h) = match turns {
        0 => (l, t, region.width, region.height),
        1 => (t, -r, region.height, region.width),
        2 => (-r, -b, region.width, region.height),
        3 => (-b, l, region.height, region.width),
        _ => unreachable!(),
    };
    if left < 0 {
        left += src_w as i64;
    }
    if top < 0 {
        top += src_h as i64;
    }

    Ok(PixelRect::new(
        left.max(0) as u32,
        top.max(0) as u32,
        w,
        h,
    ))
}

/// Number of clockwise quarter turns for a 90-degree-multiple angle.
pub(super) fn normalized_quarter_turns(angle: f32) -> Result<u32, ExtractError> {
    let rounded = angle.round();
    if (angle - rounded).abs() > 1e-3 || rounded as i64 % 90 != 0 {
        return Err(ExtractError::UnsupportedAngle(angle));
    }
    let normalized = ((rounded as i64 % 360) + 360) % 360;
    Ok((normalized / 90) as u32)
}
