//! Animated transitions between geometric states.
//!
//! A [`Transition`] is a value snapshot: the start and end of either a frame
//! rect change or a rotation (angle + scale pair). The engine interpolates it
//! with a normalized progress supplied by the host's clock; the clock itself
//! is abstracted behind [`TimeSource`].
//!
//! Lifecycle is ordered and explicit: started, stepped with p in [0, 1],
//! then either finished (snap to the target) or cancelled (state abandoned,
//! completion work never runs).

use crate::geometry::RectF;

/// Host-provided uniform-progress clock.
///
/// The engine calls `start` when a transition begins and `cancel` when one is
/// aborted; the host is expected to feed progress back through the engine's
/// `transition_step` / `transition_finish` calls until completion.
pub trait TimeSource {
    /// Begin emitting progress over `duration_ms` milliseconds.
    fn start(&mut self, duration_ms: u64);
    /// Stop emitting; no further progress or completion should be delivered
    /// for the cancelled run.
    fn cancel(&mut self);
}

/// A time source for hosts that drive the engine without a clock. Transitions
/// started against it stay pending until stepped manually.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTimeSource;

impl TimeSource for ManualTimeSource {
    fn start(&mut self, _duration_ms: u64) {}
    fn cancel(&mut self) {}
}

/// An in-flight geometric transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Frame rect change (crop mode / ratio switch).
    Frame { from: RectF, to: RectF },
    /// Rotation: angle and fit scale interpolate together.
    Rotate {
        from_angle: f32,
        to_angle: f32,
        from_scale: f32,
        to_scale: f32,
    },
}

impl Transition {
    /// Interpolated frame rect at progress `p`; `None` for rotations.
    pub fn frame_at(&self, p: f32) -> Option<RectF> {
        match self {
            Transition::Frame { from, to } => Some(RectF::lerp(from, to, p.clamp(0.0, 1.0))),
            Transition::Rotate { .. } => None,
        }
    }

    /// Interpolated (angle, scale) at progress `p`; `None` for frame moves.
    pub fn rotation_at(&self, p: f32) -> Option<(f32, f32)> {
        match self {
            Transition::Frame { .. } => None,
            Transition::Rotate {
                from_angle,
                to_angle,
                from_scale,
                to_scale,
            } => {
                let p = p.clamp(0.0, 1.0);
                Some((
                    from_angle + (to_angle - from_angle) * p,
                    from_scale + (to_scale - from_scale) * p,
                ))
            }
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, Transition::Rotate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_transition_endpoints() {
        let from = RectF::new(0.0, 0.0, 100.0, 100.0);
        let to = RectF::new(50.0, 50.0, 250.0, 150.0);
        let t = Transition::Frame { from, to };
        assert_eq!(t.frame_at(0.0), Some(from));
        assert_eq!(t.frame_at(1.0), Some(to));
        assert_eq!(t.rotation_at(0.5), None);
    }

    #[test]
    fn test_frame_transition_midpoint_each_edge() {
        let from = RectF::new(0.0, 0.0, 100.0, 100.0);
        let to = RectF::new(20.0, 40.0, 120.0, 300.0);
        let t = Transition::Frame { from, to };
        let mid = t.frame_at(0.5).unwrap();
        assert_eq!(mid, RectF::new(10.0, 20.0, 110.0, 200.0));
    }

    #[test]
    fn test_rotation_transition_interpolates_both() {
        let t = Transition::Rotate {
            from_angle: 0.0,
            to_angle: 90.0,
            from_scale: 0.5,
            to_scale: 1.0,
        };
        let (a, s) = t.rotation_at(0.5).unwrap();
        assert!((a - 45.0).abs() < 1e-4);
        assert!((s - 0.75).abs() < 1e-4);
        assert_eq!(t.frame_at(0.5), None);
    }

    #[test]
    fn test_progress_clamped() {
        let from = RectF::new(0.0, 0.0, 10.0, 10.0);
        let to = RectF::new(10.0, 10.0, 20.0, 20.0);
        let t = Transition::Frame { from, to };
        assert_eq!(t.frame_at(-1.0), Some(from));
        assert_eq!(t.frame_at(2.0), Some(to));
    }
}
