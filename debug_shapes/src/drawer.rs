use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Quat, Vec2, Vec3};
use parking_lot::Mutex;

use crate::color::Color;
use crate::command::{DrawCommand, DrawOptions, QueuedShape};
use crate::config::DebugShapesConfig;
use crate::frame::ShapeBuckets;
use crate::queue::ShapeQueue;

/// Thread-safe accumulator for the persistent debug shape API.
///
/// Systems draw through short-lived [`DebugShapesContext`]s; once per frame
/// the owner calls [`update`](Self::update) to route the queued shapes into
/// [`ShapeBuckets`] and age the timed ones.
///
/// Contexts are bound to the frame they were created in. A context dropped
/// after the next `update` is discarded with a warning.
pub struct DebugShapes {
    current_frame: AtomicU64,
    queue: Mutex<ShapeQueue>,
}

impl DebugShapes {
    pub fn new(config: &DebugShapesConfig) -> Self {
        Self {
            current_frame: AtomicU64::new(0),
            queue: Mutex::new(ShapeQueue::from_config(config)),
        }
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame.load(Ordering::Acquire)
    }

    /// Create a drawing context for the current frame.
    ///
    /// The context collects shapes locally and flushes them on [`Drop`],
    /// holding the queue lock only for the flush.
    pub fn context(&self) -> DebugShapesContext<'_> {
        DebugShapesContext {
            shapes: self,
            frame: self.current_frame(),
            options: DrawOptions::default(),
            pending: Vec::new(),
        }
    }

    /// Route queued shapes into `buckets`, age them by `elapsed` seconds, and
    /// start the next frame.
    pub fn update(&self, elapsed: f32, buckets: &mut ShapeBuckets) {
        {
            let mut queue = self.queue.lock();
            queue.tick(elapsed, |shape| {
                buckets.route(shape);
            });
        }
        self.current_frame.fetch_add(1, Ordering::AcqRel);
    }

    /// Queued shapes with a positive lifetime.
    pub fn timed_len(&self) -> usize {
        self.queue.lock().timed_len()
    }

    /// Queued shapes waiting for a single frame.
    pub fn single_frame_len(&self) -> usize {
        self.queue.lock().single_frame_len()
    }

    /// Drop every queued shape.
    pub fn clear(&self) {
        self.queue.lock().clear();
    }

    fn flush(&self, frame: u64, shapes: Vec<QueuedShape>) {
        if shapes.is_empty() {
            return;
        }
        let current = self.current_frame();
        if frame != current {
            log::warn!(
                "DebugShapesContext flushed for frame {} but current is {}; discarding",
                frame,
                current
            );
            return;
        }
        self.queue.lock().extend(shapes);
    }
}

impl Default for DebugShapes {
    fn default() -> Self {
        Self::new(&DebugShapesConfig::default())
    }
}

/// A short-lived drawing context.
///
/// Every `draw_*` call uses the context's current [`DrawOptions`]. On
/// [`Drop`], the collected shapes are flushed to the parent [`DebugShapes`].
///
/// Obtain via [`DebugShapes::context()`].
pub struct DebugShapesContext<'a> {
    shapes: &'a DebugShapes,
    frame: u64,
    options: DrawOptions,
    pending: Vec<QueuedShape>,
}

impl DebugShapesContext<'_> {
    /// Options applied to subsequent draws.
    pub fn set_options(&mut self, options: DrawOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> DrawOptions {
        self.options
    }

    /// Run `f` with temporary options, restoring the previous ones afterwards.
    pub fn with_options(&mut self, options: DrawOptions, f: impl FnOnce(&mut Self)) {
        let previous = std::mem::replace(&mut self.options, options);
        f(self);
        self.options = previous;
    }

    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.pending.push(QueuedShape::new(command, self.options));
    }

    /// Shapes collected but not flushed yet.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn draw_quad(&mut self, position: Vec3, rotation: Quat, size: Vec2, color: Color) {
        self.push(DrawCommand::Quad {
            position,
            rotation,
            size,
            color,
        });
    }

    pub fn draw_circle(&mut self, position: Vec3, rotation: Quat, radius: f32, color: Color) {
        self.push(DrawCommand::Circle {
            position,
            rotation,
            radius,
            color,
        });
    }

    /// Draw a single line segment.
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.push(DrawCommand::Line { start, end, color });
    }

    pub fn draw_cube(&mut self, start: Vec3, end: Vec3, rotation: Quat, color: Color) {
        self.push(DrawCommand::Cube {
            start,
            end,
            rotation,
            color,
        });
    }

    pub fn draw_sphere(&mut self, position: Vec3, radius: f32, color: Color) {
        self.push(DrawCommand::Sphere {
            position,
            radius,
            color,
        });
    }

    pub fn draw_half_sphere(&mut self, position: Vec3, rotation: Quat, radius: f32, color: Color) {
        self.push(DrawCommand::HalfSphere {
            position,
            rotation,
            radius,
            color,
        });
    }

    pub fn draw_capsule(
        &mut self,
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
    ) {
        self.push(DrawCommand::Capsule {
            position,
            rotation,
            height,
            radius,
            color,
        });
    }

    pub fn draw_cylinder(
        &mut self,
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
    ) {
        self.push(DrawCommand::Cylinder {
            position,
            rotation,
            height,
            radius,
            color,
        });
    }

    pub fn draw_cone(
        &mut self,
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
    ) {
        self.push(DrawCommand::Cone {
            position,
            rotation,
            height,
            radius,
            color,
        });
    }
}

impl Drop for DebugShapesContext<'_> {
    fn drop(&mut self) {
        let shapes = std::mem::take(&mut self.pending);
        self.shapes.flush(self.frame, shapes);
    }
}
