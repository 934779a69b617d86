//! Image decoding pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG images from encoded bytes
//! - Reading EXIF orientation as a rotation angle
//! - Region decoding for crop extraction
//! - Downsampled decoding for preview preloads
//!
//! # Architecture
//!
//! Pixels come from an [`ImageSource`]; the engine never decodes directly.
//! Decoded rasters keep their stored orientation, with EXIF rotation
//! reported separately and applied as a view angle.

pub mod resize;
mod source;
mod types;

pub use resize::{calculate_fit_dimensions, resize, resize_to_fit};
pub use source::{EncodedSource, ImageSource};
pub use types::{DecodeError, ExifRotation, FilterType, PixelRect, Raster};
