//! Output-size policy for extracted crops.

use serde::{Deserialize, Serialize};

/// How the extracted crop is sized before encoding.
///
/// Fixed policies are mutually exclusive: setting a fixed width clears a
/// fixed height and vice versa, which the view-level setters enforce by
/// replacing the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputPolicy {
    /// Keep the extracted pixel size.
    #[default]
    None,
    /// Force the output width; height follows the frame ratio.
    FixedWidth(u32),
    /// Force the output height; width follows the frame ratio.
    FixedHeight(u32),
    /// Shrink (never grow) to fit within the bounds, keeping the frame
    /// ratio.
    MaxBounds { width: u32, height: u32 },
}

/// Compute the final output dimensions for an extracted crop.
///
/// `frame_ratio` is the crop frame's width over height; it, not the
/// extracted pixel ratio, drives derived dimensions so rounding in region
/// mapping can't skew the requested shape.
pub fn apply_output_policy(
    width: u32,
    height: u32,
    frame_ratio: f32,
    policy: OutputPolicy,
) -> (u32, u32) {
    if frame_ratio <= 0.0 {
        return (width, height);
    }
    match policy {
        OutputPolicy::None => (width, height),
        // A zero fixed dimension means unconstrained, not a 0x0 output
        OutputPolicy::FixedWidth(0) | OutputPolicy::FixedHeight(0) => (width, height),
        OutputPolicy::FixedWidth(w) => (w, (w as f32 / frame_ratio).round() as u32),
        OutputPolicy::FixedHeight(h) => ((h as f32 * frame_ratio).round() as u32, h),
        OutputPolicy::MaxBounds {
            width: max_w,
            height: max_h,
        } => {
            if max_w == 0 || max_h == 0 || (width <= max_w && height <= max_h) {
                return (width, height);
            }
            let max_ratio = max_w as f32 / max_h as f32;
            if max_ratio >= frame_ratio {
                // Bounds are relatively wider; height limits first
                ((max_h as f32 * frame_ratio).round() as u32, max_h)
            } else {
                (max_w, (max_w as f32 / frame_ratio).round() as u32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_policy_keeps_size() {
        assert_eq!(apply_output_policy(800, 600, 4.0 / 3.0, OutputPolicy::None), (800, 600));
    }

    #[test]
    fn test_fixed_width_derives_height() {
        let (w, h) = apply_output_policy(800, 600, 4.0 / 3.0, OutputPolicy::FixedWidth(400));
        assert_eq!((w, h), (400, 300));
    }

    #[test]
    fn test_fixed_height_derives_width() {
        let (w, h) = apply_output_policy(800, 600, 16.0 / 9.0, OutputPolicy::FixedHeight(90));
        assert_eq!((w, h), (160, 90));
    }

    #[test]
    fn test_max_bounds_width_limited() {
        let policy = OutputPolicy::MaxBounds {
            width: 400,
            height: 400,
        };
        // 4:3 crop against square bounds: width is the tighter limit
        assert_eq!(apply_output_policy(800, 600, 4.0 / 3.0, policy), (400, 300));
    }

    #[test]
    fn test_max_bounds_height_limited() {
        let policy = OutputPolicy::MaxBounds {
            width: 400,
            height: 200,
        };
        assert_eq!(apply_output_policy(600, 600, 1.0, policy), (200, 200));
    }

    #[test]
    fn test_max_bounds_never_upscales() {
        let policy = OutputPolicy::MaxBounds {
            width: 4000,
            height: 4000,
        };
        assert_eq!(apply_output_policy(800, 600, 4.0 / 3.0, policy), (800, 600));
    }

    #[test]
    fn test_zero_fixed_dimension_is_unconstrained() {
        assert_eq!(
            apply_output_policy(800, 600, 4.0 / 3.0, OutputPolicy::FixedWidth(0)),
            (800, 600)
        );
        assert_eq!(
            apply_output_policy(800, 600, 4.0 / 3.0, OutputPolicy::FixedHeight(0)),
            (800, 600)
        );
    }

    #[test]
    fn test_degenerate_ratio_keeps_size() {
        assert_eq!(
            apply_output_policy(800, 600, 0.0, OutputPolicy::FixedWidth(400)),
            (800, 600)
        );
    }
}
