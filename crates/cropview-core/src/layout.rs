//! Viewport layout: fit scale and placed image bounds.
//!
//! Given the source image's intrinsic size, the viewport size, and the
//! current rotation angle, this module computes the scale that keeps the
//! whole (rotated) image visible and the axis-aligned rectangle the placed
//! image occupies in viewport space.

use crate::geometry::{PointF, RectF, Transform};

/// Width of the image's rotated bounding box.
///
/// Only 90-degree steps change the bounding box here: at angles where
/// `angle % 180 != 0` the width and height trade places. The engine's
/// rotation API only produces 90-degree multiples; transition frames between
/// them reuse the interpolated scale instead of re-deriving it.
pub fn rotated_width(angle_degrees: f32, width: f32, height: f32) -> f32 {
    if angle_degrees % 180.0 == 0.0 {
        width
    } else {
        height
    }
}

/// Height of the image's rotated bounding box. See [`rotated_width`].
pub fn rotated_height(angle_degrees: f32, width: f32, height: f32) -> f32 {
    if angle_degrees % 180.0 == 0.0 {
        height
    } else {
        width
    }
}

/// Compute the scale that fits the rotated image inside the viewport while
/// keeping it fully visible.
///
/// The rotated bounding box is compared against the viewport by aspect
/// ratio: when the rotated image is wider than the viewport's ratio the
/// width binds, otherwise the height binds.
///
/// Returns 1.0 when any dimension is non-positive; callers skip layout for
/// degenerate viewports before this matters.
pub fn compute_scale(
    view_w: f32,
    view_h: f32,
    img_w: f32,
    img_h: f32,
    angle_degrees: f32,
) -> f32 {
    if view_w <= 0.0 || view_h <= 0.0 || img_w <= 0.0 || img_h <= 0.0 {
        return 1.0;
    }
    let rot_w = rotated_width(angle_degrees, img_w, img_h);
    let rot_h = rotated_height(angle_degrees, img_w, img_h);
    let view_ratio = view_w / view_h;
    let img_ratio = rot_w / rot_h;
    if img_ratio >= view_ratio {
        view_w / rot_w
    } else {
        view_h / rot_h
    }
}

/// Build the placement matrix: translate the image center to `center`, scale
/// about it, then rotate about it.
pub fn placement_matrix(
    img_w: f32,
    img_h: f32,
    center: PointF,
    scale: f32,
    angle_degrees: f32,
) -> Transform {
    Transform::translation(center.x - img_w * 0.5, center.y - img_h * 0.5)
        .then_scale_about(scale, center)
        .then_rotate_about(angle_degrees, center)
}

/// Map the image's local bounds through the placement matrix and return the
/// axis-aligned rectangle it occupies in viewport space.
pub fn compute_image_rect(img_w: f32, img_h: f32, matrix: &Transform) -> RectF {
    matrix.map_rect(&RectF::new(0.0, 0.0, img_w, img_h))
}
