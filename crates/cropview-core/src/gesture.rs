//! Pointer hit-testing and crop-frame drag corrections.
//!
//! The drag logic is expressed as pure functions that take the current frame
//! rectangle by value and return the corrected one, so every correction rule
//! (minimum size, aspect lock, image bounds) is unit-testable without an
//! event source.
//!
//! # Correction order
//!
//! 1. Apply the pointer delta to the edges the touched zone owns.
//! 2. Push edges back out to the minimum frame size (through both axes when
//!    the ratio is locked).
//! 3. Clamp against the image rect: body drags shift the whole frame, corner
//!    drags move the offending edge and, when ratio-locked, propagate a
//!    ratio-consistent correction to the adjacent edge.

use serde::{Deserialize, Serialize};

use crate::geometry::RectF;

/// Where a pointer-down landed relative to the crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TouchZone {
    #[default]
    OutOfBounds,
    /// Frame body: dragging moves the whole frame.
    Center,
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

impl TouchZone {
    /// True for the four resize handles.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            TouchZone::LeftTop | TouchZone::RightTop | TouchZone::LeftBottom | TouchZone::RightBottom
        )
    }
}

/// Classify a pointer position against the frame.
///
/// Corners win over the body; a corner hits when the squared distance from
/// the handle center is within `(handle_radius + touch_padding)^2`. Corners
/// are tested in LT, RT, LB, RB order, first match wins.
pub fn hit_test(frame: &RectF, x: f32, y: f32, handle_radius: f32, touch_padding: f32) -> TouchZone {
    let reach_sq = {
        let r = handle_radius + touch_padding;
        r * r
    };
    let near = |cx: f32, cy: f32| {
        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= reach_sq
    };
    if near(frame.left, frame.top) {
        return TouchZone::LeftTop;
    }
    if near(frame.right, frame.top) {
        return TouchZone::RightTop;
    }
    if near(frame.left, frame.bottom) {
        return TouchZone::LeftBottom;
    }
    if near(frame.right, frame.bottom) {
        return TouchZone::RightBottom;
    }
    if frame.contains(x, y) {
        return TouchZone::Center;
    }
    TouchZone::OutOfBounds
}

/// Translate the frame and shift it back inside the image rect on any axis
/// where it would overflow. The frame never resizes here.
pub fn drag_center(frame: RectF, dx: f32, dy: f32, image: &RectF) -> RectF {
    shift_inside(frame.offset(dx, dy), image)
}

/// Apply a corner drag.
///
/// `ratio` is `Some((rx, ry))` for ratio-locked modes, in which case only the
/// x delta drives the resize and the y delta is derived from the lock. `None`
/// moves the corner's two edges independently.
pub fn drag_corner(
    frame: RectF,
    zone: TouchZone,
    dx: f32,
    dy: f32,
    ratio: Option<(f32, f32)>,
    min_size: f32,
    image: &RectF,
) -> RectF {
    match ratio {
        None => drag_corner_free(frame, zone, dx, dy, min_size, image),
        Some((rx, ry)) => drag_corner_locked(frame, zone, dx, rx, ry, min_size, image),
    }
}

fn drag_corner_free(
    mut f: RectF,
    zone: TouchZone,
    dx: f32,
    dy: f32,
    min_size: f32,
    image: &RectF,
) -> RectF {
    match zone {
        TouchZone::LeftTop => {
            f.left += dx;
            f.top += dy;
            if f.width() < min_size {
                f.left -= min_size - f.width();
            }
            if f.height() < min_size {
                f.top -= min_size - f.height();
            }
        }
        TouchZone::RightTop => {
            f.right += dx;
            f.top += dy;
            if f.width() < min_size {
                f.right += min_size - f.width();
            }
            if f.height() < min_size {
                f.top -= min_size - f.height();
            }
        }
        TouchZone::LeftBottom => {
            f.left += dx;
            f.bottom += dy;
            if f.width() < min_size {
                f.left -= min_size - f.width();
            }
            if f.height() < min_size {
                f.bottom += min_size - f.height();
            }
        }
        TouchZone::RightBottom => {
            f.right += dx;
            f.bottom += dy;
            if f.width() < min_size {
                f.right += min_size - f.width();
            }
            if f.height() < min_size {
                f.bottom += min_size - f.height();
            }
        }
        TouchZone::Center | TouchZone::OutOfBounds => return f,
    }
    clamp_edges(f, image)
}

fn drag_corner_locked(
    mut f: RectF,
    zone: TouchZone,
    dx: f32,
    rx: f32,
    ry: f32,
    min_size: f32,
    image: &RectF,
) -> RectF {
    // Secondary-axis delta derived from the x delta through the lock
    let dy = dx * ry / rx;
    match zone {
        TouchZone::LeftTop => {
            f.left += dx;
            f.top += dy;
            if f.width() < min_size {
                let ox = min_size - f.width();
                f.left -= ox;
                f.top -= ox * ry / rx;
            }
            if f.height() < min_size {
                let oy = min_size - f.height();
                f.top -= oy;
                f.left -= oy * rx / ry;
            }
            if !inside_horizontal(f.left, image) {
                let ox = image.left - f.left;
                f.left += ox;
                f.top += ox * ry / rx;
            }
            if !inside_vertical(f.top, image) {
                let oy = image.top - f.top;
                f.top += oy;
                f.left += oy * rx / ry;
            }
        }
        TouchZone::RightTop => {
            f.right += dx;
            f.top -= dy;
            if f.width() < min_size {
                let ox = min_size - f.width();
                f.right += ox;
                f.top -= ox * ry / rx;
            }
            if f.height() < min_size {
                let oy = min_size - f.height();
                f.top -= oy;
                f.right += oy * rx / ry;
            }
            if !inside_horizontal(f.right, image) {
                let ox = f.right - image.right;
                f.right -= ox;
                f.top += ox * ry / rx;
            }
            if !inside_vertical(f.top, image) {
                let oy = image.top - f.top;
                f.top += oy;
                f.right -= oy * rx / ry;
            }
        }
        TouchZone::LeftBottom => {
            f.left += dx;
            f.bottom -= dy;
            if f.width() < min_size {
                let ox = min_size - f.width();
                f.left -= ox;
                f.bottom += ox * ry / rx;
            }
            if f.height() < min_size {
                let oy = min_size - f.height();
                f.bottom += oy;
                f.left -= oy * rx / ry;
            }
            if !inside_horizontal(f.left, image) {
                let ox = image.left - f.left;
                f.left += ox;
                f.bottom -= ox * ry / rx;
            }
            if !inside_vertical(f.bottom, image) {
                let oy = f.bottom - image.bottom;
                f.bottom -= oy;
                f.left += oy * rx / ry;
            }
        }
        TouchZone::RightBottom => {
            f.right += dx;
            f.bottom += dy;
            if f.width() < min_size {
                let ox = min_size - f.width();
                f.right += ox;
                f.bottom += ox * ry / rx;
            }
            if f.height() < min_size {
                let oy = min_size - f.height();
                f.bottom += oy;
                f.right += oy * rx / ry;
            }
            if !inside_horizontal(f.right, image) {
                let ox = f.right - image.right;
                f.right -= ox;
                f.bottom -= ox * ry / rx;
            }
            if !inside_vertical(f.bottom, image) {
                let oy = f.bottom - image.bottom;
                f.bottom -= oy;
                f.right -= oy * rx / ry;
            }
        }
        TouchZone::Center | TouchZone::OutOfBounds => {}
    }
    f
}

/// Shift the whole frame back inside the image rect without resizing.
pub fn shift_inside(mut f: RectF, image: &RectF) -> RectF {
    let diff = f.left - image.left;
    if diff < 0.0 {
        f.left -= diff;
        f.right -= diff;
    }
    let diff = f.right - image.right;
    if diff > 0.0 {
        f.left -= diff;
        f.right -= diff;
    }
    let diff = f.top - image.top;
    if diff < 0.0 {
        f.top -= diff;
        f.bottom -= diff;
    }
    let diff = f.bottom - image.bottom;
    if diff > 0.0 {
        f.top -= diff;
        f.bottom -= diff;
    }
    f
}

/// Clamp each edge independently against the image rect (resizes the frame).
pub fn clamp_edges(mut f: RectF, image: &RectF) -> RectF {
    if f.left < image.left {
        f.left = image.left;
    }
    if f.right > image.right {
        f.right = image.right;
    }
    if f.top < image.top {
        f.top = image.top;
    }
    if f.bottom > image.bottom {
        f.bottom = image.bottom;
    }
    f
}

fn inside_horizontal(x: f32, image: &RectF) -> bool {
    image.left <= x && x <= image.right
}

fn inside_vertical(y: f32, image: &RectF) -> bool {
    image.top <= y && y <= image.bottom
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const MIN: f32 = 50.0;
    const EPS: f32 = 0.05;

    fn image() -> RectF {
        RectF::new(0.0, 0.0, 400.0, 400.0)
    }

    fn delta_strategy() -> impl Strategy<Value = (f32, f32)> {
        (-600.0f32..=600.0, -600.0f32..=600.0)
    }

    fn corner_strategy() -> impl Strategy<Value = TouchZone> {
        prop_oneof![
            Just(TouchZone::LeftTop),
            Just(TouchZone::RightTop),
            Just(TouchZone::LeftBottom),
            Just(TouchZone::RightBottom),
        ]
    }

    proptest! {
        /// Property: any sequence of body drags keeps the frame inside the
        /// image rect and never changes its size.
        #[test]
        fn prop_center_drag_stays_inside(
            deltas in proptest::collection::vec(delta_strategy(), 1..20),
        ) {
            let image = image();
            let mut frame = RectF::new(100.0, 100.0, 300.0, 300.0);
            let (w, h) = (frame.width(), frame.height());
            for (dx, dy) in deltas {
                frame = drag_center(frame, dx, dy, &image);
                prop_assert!(image.contains_rect(&frame, EPS), "escaped: {frame:?}");
                prop_assert!((frame.width() - w).abs() < EPS);
                prop_assert!((frame.height() - h).abs() < EPS);
            }
        }

        /// Property: ratio-locked corner drags hold the target ratio.
        #[test]
        fn prop_locked_drag_holds_ratio(
            zone in corner_strategy(),
            deltas in proptest::collection::vec(-300.0f32..=300.0, 1..15),
        ) {
            let image = image();
            let target = 16.0 / 9.0;
            let mut frame = RectF::new(40.0, 110.0, 360.0, 290.0);
            for dx in deltas {
                frame = drag_corner(frame, zone, dx, 0.0, Some((16.0, 9.0)), MIN, &image);
                let ratio = frame.width() / frame.height();
                prop_assert!((ratio - target).abs() < 0.01, "ratio drifted to {ratio}");
            }
        }

        /// Property: the frame never shrinks below the minimum size.
        #[test]
        fn prop_minimum_size_enforced(
            zone in corner_strategy(),
            (dx, dy) in delta_strategy(),
            locked in proptest::bool::ANY,
        ) {
            let image = image();
            let ratio = if locked { Some((1.0, 1.0)) } else { None };
            let frame = drag_corner(
                RectF::new(100.0, 100.0, 300.0, 300.0),
                zone, dx, dy, ratio, MIN, &image,
            );
            prop_assert!(frame.width() >= MIN - EPS, "width {}", frame.width());
            prop_assert!(frame.height() >= MIN - EPS, "height {}", frame.height());
        }

        /// Property: free corner drags stay clamped inside the image rect.
        #[test]
        fn prop_free_drag_stays_inside(
            zone in corner_strategy(),
            deltas in proptest::collection::vec(delta_strategy(), 1..15),
        ) {
            let image = image();
            let mut frame = RectF::new(100.0, 100.0, 300.0, 300.0);
            for (dx, dy) in deltas {
                frame = drag_corner(frame, zone, dx, dy, None, MIN, &image);
                prop_assert!(image.contains_rect(&frame, EPS), "escaped: {frame:?}");
            }
        }

        /// Property: hit-testing the frame's own corners always reports the
        /// matching zone regardless of handle size.
        #[test]
        fn prop_hit_test_exact_corners(radius in 1.0f32..=30.0) {
            let frame = RectF::new(100.0, 100.0, 300.0, 300.0);
            prop_assert_eq!(hit_test(&frame, 100.0, 100.0, radius, 0.0), TouchZone::LeftTop);
            prop_assert_eq!(hit_test(&frame, 300.0, 300.0, radius, 0.0), TouchZone::RightBottom);
        }
    }
}
