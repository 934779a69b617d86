//! The crop view engine.
//!
//! [`CropView`] owns the whole interactive state: the placed image, the crop
//! frame, in-flight transitions, and the background worker for load, crop,
//! and save jobs. It is a headless view; the host pumps pointer events in,
//! reads geometry out for rendering, and calls [`CropView::poll`] on its
//! own thread to apply finished background work.
//!
//! All state mutation happens on the owning thread. Background jobs compute
//! off-thread and hand back a closure that `poll` applies, so no field here
//! needs synchronization.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::animation::{TimeSource, Transition};
use crate::decode::{ExifRotation, ImageSource, Raster};
use crate::encode::{self, CompressFormat};
use crate::extract::{self, OutputPolicy};
use crate::frame::{self, CropMode};
use crate::geometry::{PointF, RectF, Transform};
use crate::gesture::{self, TouchZone};
use crate::layout;
use crate::worker::SerialWorker;
use crate::{CropConfig, CropError, RotateDegrees, ShowMode};

/// Work finished on the worker thread, applied to the view by `poll`.
type Completion = Box<dyn FnOnce(&mut CropView) + Send + 'static>;

/// Headless interactive crop view.
pub struct CropView {
    config: CropConfig,
    mode: CropMode,
    custom_ratio: (f32, f32),
    output_policy: OutputPolicy,
    compress_format: CompressFormat,
    compress_quality: u8,
    enabled: bool,

    view_w: f32,
    view_h: f32,
    center: PointF,
    scale: f32,
    angle: f32,
    img_w: f32,
    img_h: f32,
    matrix: Transform,
    image_rect: Option<RectF>,
    frame_rect: Option<RectF>,
    /// Caller-requested initial frame in source-pixel space, consumed by
    /// the next layout and dropped after a rotation.
    initial_frame_override: Option<RectF>,
    initialized: bool,

    touch_zone: TouchZone,
    last_x: f32,
    last_y: f32,
    touch_guide_visible: bool,
    touch_handle_visible: bool,

    transition: Option<Transition>,
    is_animating: bool,
    is_rotating: bool,
    time_source: Option<Box<dyn TimeSource>>,

    source: Option<Arc<dyn ImageSource>>,
    loaded: Option<Arc<Raster>>,
    exif_rotation: ExifRotation,
    input_image_size: (u32, u32),
    output_image_size: (u32, u32),

    pending_loads: u32,
    pending_crops: u32,
    pending_saves: u32,

    worker: SerialWorker<Completion>,
}

impl CropView {
    pub fn new(config: CropConfig) -> Self {
        Self {
            config,
            mode: CropMode::default(),
            custom_ratio: (1.0, 1.0),
            output_policy: OutputPolicy::default(),
            compress_format: CompressFormat::default(),
            compress_quality: 100,
            enabled: true,
            view_w: 0.0,
            view_h: 0.0,
            center: PointF::new(0.0, 0.0),
            scale: 1.0,
            angle: 0.0,
            img_w: 0.0,
            img_h: 0.0,
            matrix: Transform::identity(),
            image_rect: None,
            frame_rect: None,
            initial_frame_override: None,
            initialized: false,
            touch_zone: TouchZone::OutOfBounds,
            last_x: 0.0,
            last_y: 0.0,
            touch_guide_visible: false,
            touch_handle_visible: false,
            transition: None,
            is_animating: false,
            is_rotating: false,
            time_source: None,
            source: None,
            loaded: None,
            exif_rotation: ExifRotation::Rotate0,
            input_image_size: (0, 0),
            output_image_size: (0, 0),
            pending_loads: 0,
            pending_crops: 0,
            pending_saves: 0,
            worker: SerialWorker::new(),
        }
    }

    /// Install the clock used to drive transitions. Without one,
    /// transitions still work but must be stepped manually.
    pub fn set_time_source(&mut self, source: Box<dyn TimeSource>) {
        self.time_source = Some(source);
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Give the view its viewport size. Zero dimensions are ignored; the
    /// image is laid out once both a size and pixels are known.
    pub fn layout(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.view_w = width;
        self.view_h = height;
        self.setup_layout();
    }

    fn setup_layout(&mut self) {
        if self.view_w <= 0.0 || self.view_h <= 0.0 || self.img_w <= 0.0 || self.img_h <= 0.0 {
            return;
        }
        self.center = PointF::new(self.view_w * 0.5, self.view_h * 0.5);
        self.scale =
            layout::compute_scale(self.view_w, self.view_h, self.img_w, self.img_h, self.angle);
        self.matrix =
            layout::placement_matrix(self.img_w, self.img_h, self.center, self.scale, self.angle);
        let image_rect = layout::compute_image_rect(self.img_w, self.img_h, &self.matrix);
        let frame = match self.initial_frame_override {
            Some(initial) => frame::apply_initial_frame_rect(&initial, &image_rect, self.scale),
            None => frame::initial_frame_rect(
                &image_rect,
                self.mode,
                self.custom_ratio,
                self.config.initial_frame_scale,
            ),
        };
        self.image_rect = Some(image_rect);
        self.frame_rect = Some(frame);
        self.initialized = true;
        debug!(
            scale = self.scale,
            angle = self.angle,
            "layout complete"
        );
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    fn accepts_input(&self) -> bool {
        self.initialized
            && self.enabled
            && self.config.crop_enabled
            && !self.is_rotating
            && !self.is_animating
            && self.pending_loads == 0
            && self.pending_crops == 0
    }

    /// Begin a gesture. Returns true when the pointer landed on the frame
    /// and the view claims the gesture.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(frame) = self.frame_rect else {
            return false;
        };
        self.last_x = x;
        self.last_y = y;
        self.touch_zone = gesture::hit_test(
            &frame,
            x,
            y,
            self.config.handle_radius,
            self.config.touch_padding,
        );
        if self.touch_zone != TouchZone::OutOfBounds {
            if self.config.guide_show_mode == ShowMode::ShowOnTouch {
                self.touch_guide_visible = true;
            }
            // Handles only appear for a resize; a body drag never shows them
            if self.config.handle_show_mode == ShowMode::ShowOnTouch && self.touch_zone.is_corner()
            {
                self.touch_handle_visible = true;
            }
            return true;
        }
        false
    }

    /// Continue a gesture. Returns true while the view owns the pointer.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        if !self.accepts_input() || self.touch_zone == TouchZone::OutOfBounds {
            return false;
        }
        let (Some(frame), Some(image)) = (self.frame_rect, self.image_rect) else {
            return false;
        };
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;

        let moved = if self.touch_zone == TouchZone::Center {
            gesture::drag_center(frame, dx, dy, &image)
        } else {
            let ratio = self
                .mode
                .is_ratio_locked()
                .then(|| frame::locked_ratio(self.mode, &image, self.custom_ratio));
            gesture::drag_corner(
                frame,
                self.touch_zone,
                dx,
                dy,
                ratio,
                self.config.min_frame_size,
                &image,
            )
        };
        self.frame_rect = Some(moved);
        true
    }

    /// End a gesture.
    pub fn on_pointer_up(&mut self) {
        self.end_gesture();
    }

    /// Abort a gesture (pointer capture lost).
    pub fn on_pointer_cancel(&mut self) {
        self.end_gesture();
    }

    fn end_gesture(&mut self) {
        if self.config.guide_show_mode == ShowMode::ShowOnTouch {
            self.touch_guide_visible = false;
        }
        if self.config.handle_show_mode == ShowMode::ShowOnTouch {
            self.touch_handle_visible = false;
        }
        self.touch_zone = TouchZone::OutOfBounds;
    }

    // ------------------------------------------------------------------
    // Mode, ratio, rotation
    // ------------------------------------------------------------------

    /// Switch the crop mode, animating the frame to the new ratio.
    ///
    /// `Custom` without an explicit ratio behaves as 1:1; call
    /// [`CropView::set_custom_ratio`] to pick the ratio directly.
    pub fn set_crop_mode(&mut self, mode: CropMode) {
        if mode == CropMode::Custom {
            self.set_custom_ratio(1, 1);
            return;
        }
        self.mode = mode;
        self.recalculate_frame();
    }

    /// Set a custom frame ratio and switch to `Custom` mode. A zero
    /// component is ignored outright.
    pub fn set_custom_ratio(&mut self, ratio_x: u32, ratio_y: u32) {
        if ratio_x == 0 || ratio_y == 0 {
            debug!(ratio_x, ratio_y, "ignoring zero custom ratio");
            return;
        }
        self.mode = CropMode::Custom;
        self.custom_ratio = (ratio_x as f32, ratio_y as f32);
        self.recalculate_frame();
    }

    pub fn crop_mode(&self) -> CropMode {
        self.mode
    }

    fn recalculate_frame(&mut self) {
        // Start from settled geometry, never a mid-transition snapshot
        self.settle_transition();
        let (Some(image), Some(current)) = (self.image_rect, self.frame_rect) else {
            return;
        };
        let target = frame::initial_frame_rect(
            &image,
            self.mode,
            self.custom_ratio,
            self.config.initial_frame_scale,
        );
        self.start_transition(Transition::Frame {
            from: current,
            to: target,
        });
    }

    /// Rotate the image by a 90-degree step, animating angle and fit scale
    /// together.
    pub fn rotate(&mut self, degrees: RotateDegrees) {
        if !self.initialized {
            return;
        }
        // An interrupted rotation must land on its target first, or the new
        // target would be offset by the interpolated angle and leave the
        // view stuck off the 90-degree grid.
        self.settle_transition();
        let to_angle = self.angle + degrees.value();
        let to_scale =
            layout::compute_scale(self.view_w, self.view_h, self.img_w, self.img_h, to_angle);
        self.start_transition(Transition::Rotate {
            from_angle: self.angle,
            to_angle,
            from_scale: self.scale,
            to_scale,
        });
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn start_transition(&mut self, transition: Transition) {
        self.settle_transition();
        if !self.config.animation_enabled || self.config.animation_duration_ms == 0 {
            self.transition = Some(transition);
            self.transition_finish();
            return;
        }
        self.is_animating = true;
        self.is_rotating = transition.is_rotation();
        self.transition = Some(transition);
        if let Some(time_source) = &mut self.time_source {
            time_source.start(self.config.animation_duration_ms);
        }
    }

    /// Abort the in-flight transition.
    ///
    /// A frame transition is abandoned at its interpolated state. A
    /// rotation snaps to its target instead: angle and scale must stay on
    /// the 90-degree grid, and the last stepped value is off it.
    pub fn cancel_transition(&mut self) {
        if let Some(transition) = self.transition {
            if let Some(time_source) = &mut self.time_source {
                time_source.cancel();
            }
            if transition.is_rotation() {
                self.transition_finish();
                return;
            }
            self.transition = None;
        }
        self.is_animating = false;
        self.is_rotating = false;
    }

    /// Bring any in-flight transition to its end state before new work
    /// reads or replaces the geometry.
    fn settle_transition(&mut self) {
        if self.transition.is_some() {
            if let Some(time_source) = &mut self.time_source {
                time_source.cancel();
            }
            self.transition_finish();
        }
    }

    /// Advance the in-flight transition to normalized progress `p`.
    pub fn transition_step(&mut self, p: f32) {
        let Some(transition) = self.transition else {
            return;
        };
        if let Some(frame) = transition.frame_at(p) {
            self.frame_rect = Some(frame);
        }
        if let Some((angle, scale)) = transition.rotation_at(p) {
            self.angle = angle;
            self.scale = scale;
            self.matrix = layout::placement_matrix(
                self.img_w,
                self.img_h,
                self.center,
                self.scale,
                self.angle,
            );
            self.image_rect = Some(layout::compute_image_rect(
                self.img_w,
                self.img_h,
                &self.matrix,
            ));
        }
    }

    /// Complete the in-flight transition, snapping to its end state.
    pub fn transition_finish(&mut self) {
        let Some(transition) = self.transition.take() else {
            return;
        };
        match transition {
            Transition::Frame { to, .. } => {
                self.frame_rect = Some(to);
            }
            Transition::Rotate {
                to_angle, to_scale, ..
            } => {
                self.angle = to_angle % 360.0;
                self.scale = to_scale;
                // A rotation invalidates any caller-provided initial frame
                self.initial_frame_override = None;
                self.setup_layout();
            }
        }
        self.is_animating = false;
        self.is_rotating = false;
    }

    // ------------------------------------------------------------------
    // Background operations
    // ------------------------------------------------------------------

    /// Load pixels from a source on the worker thread.
    ///
    /// The view angle starts at the source's EXIF rotation. With
    /// `use_thumbnail` the preload is downsampled to a tenth of the longest
    /// viewport edge; otherwise it targets the viewport size. An
    /// `initial_rect` (source-pixel space) overrides the mode's default
    /// frame on the next layout.
    pub fn load_async<F>(
        &mut self,
        source: Arc<dyn ImageSource>,
        use_thumbnail: bool,
        initial_rect: Option<RectF>,
        on_done: F,
    ) where
        F: FnOnce(&mut CropView, Result<(), CropError>) + Send + 'static,
    {
        self.pending_loads += 1;
        self.initial_frame_override = initial_rect;

        let max_view = self.view_w.max(self.view_h);
        let job_source = Arc::clone(&source);
        self.worker.submit(move || -> Completion {
            let outcome = (|| {
                let exif = job_source.exif_rotation();
                let (src_w, src_h) = job_source.dimensions()?;
                let base = if max_view > 0.0 {
                    max_view as u32
                } else {
                    src_w.max(src_h)
                };
                let max_dimension = if use_thumbnail {
                    (base / 10).max(1)
                } else {
                    base.max(1)
                };
                let raster = job_source.decode_sampled(max_dimension)?;
                Ok::<_, CropError>((exif, src_w, src_h, raster))
            })();

            Box::new(move |view: &mut CropView| {
                view.pending_loads -= 1;
                match outcome {
                    Ok((exif, src_w, src_h, raster)) => {
                        view.source = Some(source);
                        view.loaded = Some(Arc::new(raster));
                        view.exif_rotation = exif;
                        view.angle = exif.degrees();
                        view.img_w = src_w as f32;
                        view.img_h = src_h as f32;
                        view.input_image_size = (src_w, src_h);
                        view.setup_layout();
                        on_done(view, Ok(()));
                    }
                    Err(e) => {
                        warn!(error = %e, "image load failed");
                        on_done(view, Err(e));
                    }
                }
            })
        });
    }

    /// Extract the crop on the worker thread.
    ///
    /// Region-decodes from the source when one is attached, otherwise crops
    /// the loaded raster. The result has the output policy and circular
    /// mask already applied.
    pub fn crop_async<F>(&mut self, on_done: F)
    where
        F: FnOnce(&mut CropView, Result<Raster, CropError>) + Send + 'static,
    {
        let snapshot = match self.crop_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                on_done(self, Err(e));
                return;
            }
        };
        self.pending_crops += 1;
        self.worker.submit(move || -> Completion {
            let outcome = snapshot.run();
            Box::new(move |view: &mut CropView| {
                view.pending_crops -= 1;
                if let Ok(raster) = &outcome {
                    view.output_image_size = (raster.width, raster.height);
                }
                on_done(view, outcome);
            })
        });
    }

    /// Encode a raster and write it to `path` on the worker thread.
    pub fn save_async<F>(&mut self, raster: Raster, path: PathBuf, on_done: F)
    where
        F: FnOnce(&mut CropView, Result<PathBuf, CropError>) + Send + 'static,
    {
        self.pending_saves += 1;
        let format = self.compress_format;
        let quality = self.compress_quality;
        self.worker.submit(move || -> Completion {
            let outcome = encode::encode_to_file(&raster, &path, format, quality)
                .map(|()| path)
                .map_err(CropError::from);
            Box::new(move |view: &mut CropView| {
                view.pending_saves -= 1;
                if let Err(e) = &outcome {
                    warn!(error = %e, "save failed");
                }
                on_done(view, outcome);
            })
        });
    }

    /// Extract the crop and write it to `path` in one worker job.
    ///
    /// `on_cropped` fires first with the extraction outcome; `on_saved`
    /// fires only when extraction succeeded.
    pub fn crop_and_save_async<F, G>(&mut self, path: PathBuf, on_cropped: F, on_saved: G)
    where
        F: FnOnce(&mut CropView, Result<(), CropError>) + Send + 'static,
        G: FnOnce(&mut CropView, Result<PathBuf, CropError>) + Send + 'static,
    {
        let snapshot = match self.crop_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                on_cropped(self, Err(e));
                return;
            }
        };
        self.pending_crops += 1;
        self.pending_saves += 1;
        let format = self.compress_format;
        let quality = self.compress_quality;
        self.worker.submit(move || -> Completion {
            let outcome = snapshot.run().map(|raster| {
                let saved = encode::encode_to_file(&raster, &path, format, quality)
                    .map(|()| path)
                    .map_err(CropError::from);
                (raster, saved)
            });
            Box::new(move |view: &mut CropView| {
                view.pending_crops -= 1;
                view.pending_saves -= 1;
                match outcome {
                    Ok((raster, saved)) => {
                        view.output_image_size = (raster.width, raster.height);
                        on_cropped(view, Ok(()));
                        on_saved(view, saved);
                    }
                    Err(e) => {
                        warn!(error = %e, "crop failed");
                        on_cropped(view, Err(e));
                    }
                }
            })
        });
    }

    /// Apply completions from finished background jobs. Call regularly on
    /// the thread that owns the view.
    pub fn poll(&mut self) {
        let mut done: Vec<Completion> = Vec::new();
        self.worker.drain(|c| done.push(c));
        for completion in done {
            completion(self);
        }
    }

    fn crop_snapshot(&self) -> Result<CropSnapshot, CropError> {
        let (Some(frame), Some(image)) = (self.frame_rect, self.image_rect) else {
            return Err(CropError::InvalidState("view not laid out"));
        };
        if self.source.is_none() && self.loaded.is_none() {
            return Err(CropError::InvalidState("no image attached"));
        }
        Ok(CropSnapshot {
            frame,
            image_rect: image,
            angle: self.angle,
            source: self.source.clone(),
            loaded: self.loaded.clone(),
            circle: self.mode == CropMode::Circle,
            output_policy: self.output_policy,
        })
    }

    // ------------------------------------------------------------------
    // Geometry queries
    // ------------------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current crop frame in viewport space.
    pub fn frame_rect(&self) -> Option<RectF> {
        self.frame_rect
    }

    /// Placed image bounds in viewport space.
    pub fn image_rect(&self) -> Option<RectF> {
        self.image_rect
    }

    /// Matrix the host applies when drawing the image.
    pub fn placement(&self) -> Transform {
        self.matrix
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn touch_zone(&self) -> TouchZone {
        self.touch_zone
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn is_rotating(&self) -> bool {
        self.is_rotating
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    pub fn is_cropping(&self) -> bool {
        self.pending_crops > 0
    }

    pub fn is_saving(&self) -> bool {
        self.pending_saves > 0
    }

    /// Source pixel dimensions of the attached image.
    pub fn input_image_size(&self) -> (u32, u32) {
        self.input_image_size
    }

    /// Pixel dimensions of the most recent crop output.
    pub fn output_image_size(&self) -> (u32, u32) {
        self.output_image_size
    }

    /// The crop frame mapped into rotated source-pixel space.
    pub fn frame_rect_in_source(&self) -> Option<RectF> {
        let (frame, image) = (self.frame_rect?, self.image_rect?);
        if self.scale <= 0.0 {
            return None;
        }
        let rot_w = layout::rotated_width(self.angle, self.img_w, self.img_h);
        let rot_h = layout::rotated_height(self.angle, self.img_w, self.img_h);
        let offset_x = image.left / self.scale;
        let offset_y = image.top / self.scale;
        Some(RectF::new(
            (frame.left / self.scale - offset_x).max(0.0),
            (frame.top / self.scale - offset_y).max(0.0),
            (frame.right / self.scale - offset_x).min(rot_w),
            (frame.bottom / self.scale - offset_y).min(rot_h),
        ))
    }

    /// Whether thirds guide lines should be drawn right now.
    pub fn show_guide(&self) -> bool {
        match self.config.guide_show_mode {
            ShowMode::ShowAlways => true,
            ShowMode::NotShow => false,
            ShowMode::ShowOnTouch => self.touch_guide_visible,
        }
    }

    /// Whether corner handles should be drawn right now.
    pub fn show_handle(&self) -> bool {
        match self.config.handle_show_mode {
            ShowMode::ShowAlways => true,
            ShowMode::NotShow => false,
            ShowMode::ShowOnTouch => self.touch_handle_visible,
        }
    }

    /// Handle centers in LT, RT, LB, RB order.
    pub fn handle_positions(&self) -> Option<[PointF; 4]> {
        let f = self.frame_rect?;
        Some([
            PointF::new(f.left, f.top),
            PointF::new(f.right, f.top),
            PointF::new(f.left, f.bottom),
            PointF::new(f.right, f.bottom),
        ])
    }

    /// Thirds guide segments: two vertical then two horizontal, each as
    /// (start, end).
    pub fn guide_lines(&self) -> Option<[(PointF, PointF); 4]> {
        let f = self.frame_rect?;
        let third_w = f.width() / 3.0;
        let third_h = f.height() / 3.0;
        Some([
            (
                PointF::new(f.left + third_w, f.top),
                PointF::new(f.left + third_w, f.bottom),
            ),
            (
                PointF::new(f.right - third_w, f.top),
                PointF::new(f.right - third_w, f.bottom),
            ),
            (
                PointF::new(f.left, f.top + third_h),
                PointF::new(f.right, f.top + third_h),
            ),
            (
                PointF::new(f.left, f.bottom - third_h),
                PointF::new(f.right, f.bottom - third_h),
            ),
        ])
    }

    /// Circle overlay (center, radius) for circle modes, suppressed while
    /// the frame is animating.
    pub fn circle_overlay(&self) -> Option<(PointF, f32)> {
        if !self.mode.has_circle_overlay() || self.is_animating {
            return None;
        }
        let f = self.frame_rect?;
        Some((f.center(), f.width().min(f.height()) / 2.0))
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_crop_enabled(&mut self, enabled: bool) {
        self.config.crop_enabled = enabled;
    }

    pub fn set_min_frame_size(&mut self, size: f32) {
        self.config.min_frame_size = size;
    }

    pub fn set_handle_radius(&mut self, radius: f32) {
        self.config.handle_radius = radius;
    }

    pub fn set_touch_padding(&mut self, padding: f32) {
        self.config.touch_padding = padding;
    }

    pub fn set_guide_show_mode(&mut self, mode: ShowMode) {
        self.config.guide_show_mode = mode;
        self.touch_guide_visible = false;
    }

    pub fn set_handle_show_mode(&mut self, mode: ShowMode) {
        self.config.handle_show_mode = mode;
        self.touch_handle_visible = false;
    }

    pub fn set_handle_shadow(&mut self, shadow: bool) {
        self.config.handle_shadow = shadow;
    }

    /// Set the initial frame size as a fraction of the fitted frame.
    /// Out-of-range values fall back to the default of 1.0.
    pub fn set_initial_frame_scale(&mut self, frame_scale: f32) {
        if (0.01..=1.0).contains(&frame_scale) {
            self.config.initial_frame_scale = frame_scale;
        } else {
            debug!(frame_scale, "initial frame scale out of range, using default");
            self.config.initial_frame_scale = 1.0;
        }
    }

    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.config.animation_enabled = enabled;
    }

    pub fn set_animation_duration_ms(&mut self, duration_ms: u64) {
        self.config.animation_duration_ms = duration_ms;
    }

    /// Fix the output width; height follows the frame ratio. Clears any
    /// fixed height or max bounds.
    pub fn set_output_width(&mut self, width: u32) {
        self.output_policy = OutputPolicy::FixedWidth(width);
    }

    /// Fix the output height; width follows the frame ratio. Clears any
    /// fixed width or max bounds.
    pub fn set_output_height(&mut self, height: u32) {
        self.output_policy = OutputPolicy::FixedHeight(height);
    }

    /// Bound the output size without upscaling. Clears any fixed
    /// dimension.
    pub fn set_output_max_size(&mut self, width: u32, height: u32) {
        self.output_policy = OutputPolicy::MaxBounds { width, height };
    }

    pub fn output_policy(&self) -> OutputPolicy {
        self.output_policy
    }

    pub fn set_compress_format(&mut self, format: CompressFormat) {
        self.compress_format = format;
    }

    /// JPEG quality (1-100); ignored for PNG.
    pub fn set_compress_quality(&mut self, quality: u8) {
        self.compress_quality = quality;
    }
}

impl Default for CropView {
    fn default() -> Self {
        Self::new(CropConfig::default())
    }
}

/// Everything a crop job needs, detached from the view.
struct CropSnapshot {
    frame: RectF,
    image_rect: RectF,
    angle: f32,
    source: Option<Arc<dyn ImageSource>>,
    loaded: Option<Arc<Raster>>,
    circle: bool,
    output_policy: OutputPolicy,
}

impl CropSnapshot {
    fn run(self) -> Result<Raster, CropError> {
        let raster = if let Some(source) = &self.source {
            extract::extract_from_source(source.as_ref(), &self.frame, &self.image_rect, self.angle)?
        } else if let Some(loaded) = &self.loaded {
            extract::extract_from_raster(loaded, &self.frame, &self.image_rect, self.angle)?
        } else {
            return Err(CropError::InvalidState("no image attached"));
        };
        let frame_ratio = if self.frame.height() > 0.0 {
            self.frame.width() / self.frame.height()
        } else {
            1.0
        };
        let out = extract::finalize_output(raster, frame_ratio, self.output_policy, self.circle)?;
        Ok(out)
    }
}
