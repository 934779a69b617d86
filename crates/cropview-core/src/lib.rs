//! Cropview Core - Interactive crop geometry engine
//!
//! This crate provides the headless core of an image crop view: viewport
//! layout, crop-frame gesture handling, animated transitions, and the
//! mapping from the on-screen frame back to source pixels for extraction.
//! Rendering and input are the host's job; the engine exposes geometry and
//! state for the host to draw and feeds on pointer events.

pub mod animation;
pub mod decode;
pub mod encode;
pub mod extract;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod view;
pub mod worker;

pub use animation::{ManualTimeSource, TimeSource, Transition};
pub use decode::{DecodeError, EncodedSource, ExifRotation, ImageSource, PixelRect, Raster};
pub use encode::{CompressFormat, EncodeError};
pub use extract::{ExtractError, OutputPolicy};
pub use frame::CropMode;
pub use geometry::{PointF, RectF};
pub use gesture::TouchZone;
pub use view::CropView;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for view operations.
#[derive(Debug, Error)]
pub enum CropError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The operation was issued before the state it needs exists
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

/// When the guide lines or corner handles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShowMode {
    /// Always visible
    #[default]
    ShowAlways,
    /// Visible only while a drag is in progress
    ShowOnTouch,
    /// Never visible
    NotShow,
}

/// Rotation steps accepted by [`CropView::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateDegrees {
    Rotate90,
    Rotate180,
    Rotate270,
    RotateM90,
    RotateM180,
    RotateM270,
}

impl RotateDegrees {
    /// Signed rotation in degrees.
    pub fn value(self) -> f32 {
        match self {
            RotateDegrees::Rotate90 => 90.0,
            RotateDegrees::Rotate180 => 180.0,
            RotateDegrees::Rotate270 => 270.0,
            RotateDegrees::RotateM90 => -90.0,
            RotateDegrees::RotateM180 => -180.0,
            RotateDegrees::RotateM270 => -270.0,
        }
    }
}

/// RGBA colors for the crop overlay, for hosts that want the stock look.
///
/// The engine never draws; this is plain data the host can feed to its
/// renderer or replace entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayPalette {
    /// Behind the image
    pub background: [u8; 4],
    /// Dimming outside the frame
    pub overlay: [u8; 4],
    /// Frame border
    pub frame: [u8; 4],
    /// Corner handles
    pub handle: [u8; 4],
    /// Thirds guide lines
    pub guide: [u8; 4],
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 0],
            overlay: [0, 0, 0, 0xBB],
            frame: [0xFF, 0xFF, 0xFF, 0xFF],
            handle: [0xFF, 0xFF, 0xFF, 0xFF],
            guide: [0xFF, 0xFF, 0xFF, 0xCC],
        }
    }
}

/// Tunable view behavior, all in viewport units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropConfig {
    /// Smallest frame edge a drag can produce, in viewport pixels
    pub min_frame_size: f32,
    /// Corner handle radius, in viewport pixels
    pub handle_radius: f32,
    /// Extra touch reach around handles beyond their radius
    pub touch_padding: f32,
    /// Initial frame size as a fraction of the fitted frame (0.01 to 1.0)
    pub initial_frame_scale: f32,
    /// Whether frame and rotation changes animate
    pub animation_enabled: bool,
    /// Animation length in milliseconds
    pub animation_duration_ms: u64,
    /// Guide line visibility policy
    pub guide_show_mode: ShowMode,
    /// Handle visibility policy
    pub handle_show_mode: ShowMode,
    /// Whether handles cast a shadow (render hint only)
    pub handle_shadow: bool,
    /// Whether the frame responds to pointer input
    pub crop_enabled: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_frame_size: 50.0,
            handle_radius: 14.0,
            touch_padding: 0.0,
            initial_frame_scale: 1.0,
            animation_enabled: true,
            animation_duration_ms: 100,
            guide_show_mode: ShowMode::ShowAlways,
            handle_show_mode: ShowMode::ShowAlways,
            handle_shadow: true,
            crop_enabled: true,
        }
    }
}
