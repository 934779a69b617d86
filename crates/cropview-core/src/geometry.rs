//! Viewport-space geometry primitives.
//!
//! All interactive crop math happens in viewport space using `f32`
//! coordinates: points, edge-addressed rectangles, and a minimal 2D affine
//! transform for placing the image inside the viewport.

/// A point in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle addressed by its four edges.
///
/// Edge addressing (rather than origin + size) matches how the crop frame is
/// manipulated: corner drags move exactly two edges, and boundary corrections
/// adjust individual edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from an origin and a size.
    pub fn from_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Translate the whole rectangle.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Scale all four edges about the origin.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }

    /// Uniformly scale the rectangle about its own center.
    pub fn scaled_about_center(&self, factor: f32) -> Self {
        let c = self.center();
        let hw = self.width() * factor * 0.5;
        let hh = self.height() * factor * 0.5;
        Self::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh)
    }

    /// True if the point lies within the rectangle (edges inclusive).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.left <= x && x <= self.right && self.top <= y && y <= self.bottom
    }

    /// True if `other` lies entirely within this rectangle, with a small
    /// tolerance for accumulated float error.
    pub fn contains_rect(&self, other: &RectF, epsilon: f32) -> bool {
        self.left - epsilon <= other.left
            && self.top - epsilon <= other.top
            && other.right <= self.right + epsilon
            && other.bottom <= self.bottom + epsilon
    }

    /// Intersect with another rectangle, edge by edge.
    pub fn intersect(&self, other: &RectF) -> Self {
        Self::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Linear interpolation between two rectangles, each edge independently.
    pub fn lerp(from: &RectF, to: &RectF, t: f32) -> Self {
        Self::new(
            from.left + (to.left - from.left) * t,
            from.top + (to.top - from.top) * t,
            from.right + (to.right - from.right) * t,
            from.bottom + (to.bottom - from.bottom) * t,
        )
    }
}

/// A 2D affine transform in row-major `[a b tx; c d ty]` form.
///
/// Only the operations the placement matrix needs: post-composed translation,
/// scale about a pivot, and rotation about a pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::identity()
        }
    }

    /// Post-compose: `other` is applied after `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            a: other.a * self.a + other.b * self.c,
            b: other.a * self.b + other.b * self.d,
            c: other.c * self.a + other.d * self.c,
            d: other.c * self.b + other.d * self.d,
            tx: other.a * self.tx + other.b * self.ty + other.tx,
            ty: other.c * self.tx + other.d * self.ty + other.ty,
        }
    }

    /// Post-compose a uniform scale about a pivot point.
    pub fn then_scale_about(&self, s: f32, pivot: PointF) -> Self {
        let scale = Self {
            a: s,
            b: 0.0,
            c: 0.0,
            d: s,
            tx: pivot.x * (1.0 - s),
            ty: pivot.y * (1.0 - s),
        };
        self.then(&scale)
    }

    /// Post-compose a rotation (degrees, clockwise-positive in screen space)
    /// about a pivot point.
    pub fn then_rotate_about(&self, angle_degrees: f32, pivot: PointF) -> Self {
        let rad = angle_degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let rotate = Self {
            a: cos,
            b: -sin,
            c: sin,
            d: cos,
            tx: pivot.x - cos * pivot.x + sin * pivot.y,
            ty: pivot.y - sin * pivot.x - cos * pivot.y,
        };
        self.then(&rotate)
    }

    pub fn map_point(&self, p: PointF) -> PointF {
        PointF::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    /// Map a rectangle and return the axis-aligned bounding box of its four
    /// mapped corners.
    pub fn map_rect(&self, rect: &RectF) -> RectF {
        let corners = [
            self.map_point(PointF::new(rect.left, rect.top)),
            self.map_point(PointF::new(rect.right, rect.top)),
            self.map_point(PointF::new(rect.left, rect.bottom)),
            self.map_point(PointF::new(rect.right, rect.bottom)),
        ];
        let mut out = RectF::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
        for p in &corners[1..] {
            out.left = out.left.min(p.x);
            out.top = out.top.min(p.y);
            out.right = out.right.max(p.x);
            out.bottom = out.bottom.max(p.y);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "expected {b}, got {a}");
    }

    #[test]
    fn test_rect_dimensions() {
        let r = RectF::new(10.0, 20.0, 110.0, 70.0);
        assert_close(r.width(), 100.0);
        assert_close(r.height(), 50.0);
        let c = r.center();
        assert_close(c.x, 60.0);
        assert_close(c.y, 45.0);
    }

    #[test]
    fn test_rect_scaled_about_center() {
        let r = RectF::new(0.0, 0.0, 100.0, 100.0);
        let s = r.scaled_about_center(0.5);
        assert_close(s.left, 25.0);
        assert_close(s.top, 25.0);
        assert_close(s.right, 75.0);
        assert_close(s.bottom, 75.0);
        // Center must not move
        assert_close(s.center().x, 50.0);
        assert_close(s.center().y, 50.0);
    }

    #[test]
    fn test_rect_contains() {
        let r = RectF::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(5.0, 5.0));
        assert!(r.contains(0.0, 0.0)); // edges inclusive
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(10.1, 5.0));
        assert!(!r.contains(5.0, -0.1));
    }

    #[test]
    fn test_rect_lerp_endpoints() {
        let a = RectF::new(0.0, 0.0, 10.0, 10.0);
        let b = RectF::new(20.0, 20.0, 60.0, 40.0);
        assert_eq!(RectF::lerp(&a, &b, 0.0), a);
        assert_eq!(RectF::lerp(&a, &b, 1.0), b);
        let mid = RectF::lerp(&a, &b, 0.5);
        assert_close(mid.left, 10.0);
        assert_close(mid.right, 35.0);
    }

    #[test]
    fn test_transform_identity_maps_rect() {
        let r = RectF::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Transform::identity().map_rect(&r), r);
    }

    #[test]
    fn test_transform_scale_about_pivot() {
        let t = Transform::identity().then_scale_about(2.0, PointF::new(50.0, 50.0));
        // Pivot is fixed
        let p = t.map_point(PointF::new(50.0, 50.0));
        assert_close(p.x, 50.0);
        assert_close(p.y, 50.0);
        // Other points scale away from it
        let q = t.map_point(PointF::new(60.0, 50.0));
        assert_close(q.x, 70.0);
    }

    #[test]
    fn test_transform_rotate_90_about_pivot() {
        let t = Transform::identity().then_rotate_about(90.0, PointF::new(0.0, 0.0));
        let p = t.map_point(PointF::new(1.0, 0.0));
        assert_close(p.x, 0.0);
        assert_close(p.y, 1.0);
    }

    #[test]
    fn test_map_rect_rotation_bbox() {
        // A 100x50 rect rotated 90 degrees about its center becomes a 50x100 bbox
        let r = RectF::new(0.0, 0.0, 100.0, 50.0);
        let t = Transform::identity().then_rotate_about(90.0, r.center());
        let mapped = t.map_rect(&r);
        assert_close(mapped.width(), 50.0);
        assert_close(mapped.height(), 100.0);
        assert_close(mapped.center().x, 50.0);
        assert_close(mapped.center().y, 25.0);
    }

    #[test]
    fn test_then_composes_in_order() {
        // Translate then rotate differs from rotate then translate
        let translate = Transform::translation(10.0, 0.0);
        let a = translate.then_rotate_about(90.0, PointF::new(0.0, 0.0));
        let p = a.map_point(PointF::new(0.0, 0.0));
        assert_close(p.x, 0.0);
        assert_close(p.y, 10.0);
    }
}
