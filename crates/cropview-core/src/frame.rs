//! Crop modes and frame placement policy.
//!
//! Defines the closed set of crop modes, the target aspect ratio each mode
//! imposes, and how the initial crop frame is laid out inside the placed
//! image rectangle.

use serde::{Deserialize, Serialize};

use crate::geometry::RectF;

/// Crop frame aspect behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropMode {
    /// Frame matches the placed image bounds exactly.
    FitImage,
    /// Unconstrained ratio; corners move freely.
    Free,
    Ratio4x3,
    Ratio3x4,
    Ratio16x9,
    Ratio9x16,
    #[default]
    Square,
    /// Square frame, extraction masked to an inscribed circle.
    Circle,
    /// Square frame with a circular overlay but square extraction.
    CircleSquare,
    /// Caller-supplied ratio, set through `set_custom_ratio`.
    Custom,
}

impl CropMode {
    /// True for modes whose frame must hold a fixed width:height ratio
    /// during corner drags.
    pub fn is_ratio_locked(self) -> bool {
        !matches!(self, CropMode::Free)
    }

    /// True for modes that render a circular overlay instead of the plain
    /// frame cut-out.
    pub fn has_circle_overlay(self) -> bool {
        matches!(self, CropMode::Circle | CropMode::CircleSquare)
    }
}

/// Target ratio components for a mode.
///
/// `FitImage` follows the current image rect; `Free` reports the frame's own
/// extents (so ratio comparisons degenerate to equality); fixed modes return
/// their constants; `Custom` returns the caller-set pair.
pub fn aspect_ratio(
    mode: CropMode,
    image_rect: &RectF,
    frame_w: f32,
    frame_h: f32,
    custom: (f32, f32),
) -> (f32, f32) {
    match mode {
        CropMode::FitImage => (image_rect.width(), image_rect.height()),
        CropMode::Free => (frame_w, frame_h),
        CropMode::Ratio4x3 => (4.0, 3.0),
        CropMode::Ratio3x4 => (3.0, 4.0),
        CropMode::Ratio16x9 => (16.0, 9.0),
        CropMode::Ratio9x16 => (9.0, 16.0),
        CropMode::Square | CropMode::Circle | CropMode::CircleSquare => (1.0, 1.0),
        CropMode::Custom => custom,
    }
}

/// Ratio components used during a locked corner drag.
///
/// Unlike [`aspect_ratio`], Free mode reports 1:1 here; the drag code never
/// consults it in that mode.
pub fn locked_ratio(mode: CropMode, image_rect: &RectF, custom: (f32, f32)) -> (f32, f32) {
    match mode {
        CropMode::FitImage => (image_rect.width(), image_rect.height()),
        CropMode::Custom => custom,
        _ => aspect_ratio(mode, image_rect, 1.0, 1.0, custom),
    }
}

/// Lay out the default crop frame for a mode inside the image rect.
///
/// The largest ratio-respecting rectangle is inscribed and centered: when the
/// target ratio is at least the image rect's own ratio the full width is
/// used and the height derived, otherwise the full height is used and the
/// width derived. The result is then shrunk uniformly about its center by
/// `initial_scale` (in (0, 1], 1.0 keeps the inscribed size).
pub fn initial_frame_rect(
    image_rect: &RectF,
    mode: CropMode,
    custom: (f32, f32),
    initial_scale: f32,
) -> RectF {
    let (rx, ry) = aspect_ratio(
        mode,
        image_rect,
        image_rect.width(),
        image_rect.height(),
        custom,
    );
    let img_ratio = image_rect.width() / image_rect.height();
    let frame_ratio = rx / ry;

    let mut rect = *image_rect;
    if frame_ratio >= img_ratio {
        // Full width, derived height, vertically centered
        let cy = (image_rect.top + image_rect.bottom) * 0.5;
        let half_h = image_rect.width() / frame_ratio * 0.5;
        rect.top = cy - half_h;
        rect.bottom = cy + half_h;
    } else {
        // Full height, derived width, horizontally centered
        let cx = (image_rect.left + image_rect.right) * 0.5;
        let half_w = image_rect.height() * frame_ratio * 0.5;
        rect.left = cx - half_w;
        rect.right = cx + half_w;
    }
    rect.scaled_about_center(initial_scale)
}

/// Map a caller-provided initial frame (source-pixel space) into viewport
/// space and clamp it to the image rect, each edge independently.
pub fn apply_initial_frame_rect(initial: &RectF, image_rect: &RectF, scale: f32) -> RectF {
    let mapped = initial.scaled(scale).offset(image_rect.left, image_rect.top);
    mapped.intersect(image_rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn square_image_rect() -> RectF {
        RectF::new(0.0, 0.0, 400.0, 400.0)
    }

    #[test]
    fn test_ratio_locked_modes() {
        assert!(CropMode::Square.is_ratio_locked());
        assert!(CropMode::Circle.is_ratio_locked());
        assert!(CropMode::FitImage.is_ratio_locked());
        assert!(CropMode::Custom.is_ratio_locked());
        assert!(!CropMode::Free.is_ratio_locked());
    }

    #[test]
    fn test_circle_overlay_modes() {
        assert!(CropMode::Circle.has_circle_overlay());
        assert!(CropMode::CircleSquare.has_circle_overlay());
        assert!(!CropMode::Square.has_circle_overlay());
    }

    #[test]
    fn test_fixed_ratios() {
        let img = square_image_rect();
        assert_eq!(aspect_ratio(CropMode::Ratio16x9, &img, 0.0, 0.0, (1.0, 1.0)), (16.0, 9.0));
        assert_eq!(aspect_ratio(CropMode::Ratio9x16, &img, 0.0, 0.0, (1.0, 1.0)), (9.0, 16.0));
        assert_eq!(aspect_ratio(CropMode::Square, &img, 0.0, 0.0, (1.0, 1.0)), (1.0, 1.0));
        assert_eq!(aspect_ratio(CropMode::Custom, &img, 0.0, 0.0, (5.0, 2.0)), (5.0, 2.0));
    }

    #[test]
    fn test_fit_image_ratio_follows_image_rect() {
        let img = RectF::new(10.0, 10.0, 310.0, 210.0);
        let (rx, ry) = aspect_ratio(CropMode::FitImage, &img, 0.0, 0.0, (1.0, 1.0));
        assert!((rx - 300.0).abs() < EPS);
        assert!((ry - 200.0).abs() < EPS);
    }

    #[test]
    fn test_initial_frame_wide_ratio_clamps_width() {
        // Target 16:9 on a square image rect: full width, height = 400 * 9/16
        let img = square_image_rect();
        let frame = initial_frame_rect(&img, CropMode::Ratio16x9, (1.0, 1.0), 1.0);
        assert!((frame.width() - 400.0).abs() < EPS);
        assert!((frame.height() - 225.0).abs() < EPS);
        // Vertically centered
        assert!((frame.center().y - 200.0).abs() < EPS);
        assert!((frame.top - 87.5).abs() < EPS);
    }

    #[test]
    fn test_initial_frame_tall_ratio_clamps_height() {
        let img = square_image_rect();
        let frame = initial_frame_rect(&img, CropMode::Ratio9x16, (1.0, 1.0), 1.0);
        assert!((frame.height() - 400.0).abs() < EPS);
        assert!((frame.width() - 225.0).abs() < EPS);
        assert!((frame.center().x - 200.0).abs() < EPS);
    }

    #[test]
    fn test_initial_frame_fit_image_fills_rect() {
        let img = RectF::new(20.0, 40.0, 420.0, 240.0);
        let frame = initial_frame_rect(&img, CropMode::FitImage, (1.0, 1.0), 1.0);
        assert!((frame.left - img.left).abs() < EPS);
        assert!((frame.right - img.right).abs() < EPS);
        assert!((frame.top - img.top).abs() < EPS);
        assert!((frame.bottom - img.bottom).abs() < EPS);
    }

    #[test]
    fn test_initial_frame_scale_shrinks_about_center() {
        let img = square_image_rect();
        let frame = initial_frame_rect(&img, CropMode::Square, (1.0, 1.0), 0.75);
        assert!((frame.width() - 300.0).abs() < EPS);
        assert!((frame.height() - 300.0).abs() < EPS);
        assert!((frame.center().x - 200.0).abs() < EPS);
        assert!((frame.center().y - 200.0).abs() < EPS);
    }

    #[test]
    fn test_apply_initial_frame_rect_maps_and_clamps() {
        let img = RectF::new(50.0, 100.0, 450.0, 300.0);
        // Source-space rect, view scale 0.5
        let initial = RectF::new(0.0, 0.0, 1000.0, 200.0);
        let frame = apply_initial_frame_rect(&initial, &img, 0.5);
        // 1000 * 0.5 = 500 wide, offset to (50, 100), right edge clamped to 450
        assert!((frame.left - 50.0).abs() < EPS);
        assert!((frame.top - 100.0).abs() < EPS);
        assert!((frame.right - 450.0).abs() < EPS);
        assert!((frame.bottom - 200.0).abs() < EPS);
    }
}
