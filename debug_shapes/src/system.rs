use glam::Mat4;

use crate::backend::DebugShapeBackend;
use crate::config::DebugShapesConfig;
use crate::drawer::DebugShapes;
use crate::error::{BackendResult, DebugShapesError};
use crate::frame::ShapeBuckets;
use crate::packing::InstancePacker;
use crate::primitive::PrimitiveCounts;
use crate::renderer::{DebugShapeRenderer, DrawStats};

/// One frame of debug shape rendering: update, extract, render.
///
/// ```ignore
/// let shapes = Arc::new(DebugShapes::new(&config));
/// let mut system = DebugShapeSystem::new(&config)?;
///
/// // Each frame:
/// system.update(delta_seconds, &shapes);
/// system.buckets_mut().frame_mut(Bucket::SolidOpaque).draw_line(a, b, Color::RED, true);
/// system.extract();
/// system.renderer_mut().update_view_proj(camera.view_proj());
/// let stats = system.render(&mut backend)?;
/// ```
pub struct DebugShapeSystem {
    buckets: ShapeBuckets,
    packer: InstancePacker,
    renderer: DebugShapeRenderer,
}

impl DebugShapeSystem {
    pub fn new(config: &DebugShapesConfig) -> Result<Self, DebugShapesError> {
        Ok(Self {
            buckets: ShapeBuckets::new(),
            packer: InstancePacker::new(),
            renderer: DebugShapeRenderer::new(config)?,
        })
    }

    /// Route the persistent shapes into this frame's buckets and age them.
    pub fn update(&mut self, elapsed: f32, shapes: &DebugShapes) {
        shapes.update(elapsed, &mut self.buckets);
    }

    /// Pack every bucket into the shared buffers.
    pub fn extract(&mut self) -> PrimitiveCounts {
        self.buckets.extract(&mut self.packer)
    }

    /// Issue the packed draws.
    pub fn render<B>(&mut self, backend: &mut B) -> BackendResult<DrawStats>
    where
        B: DebugShapeBackend + ?Sized,
    {
        self.renderer.render(backend, &self.buckets, &self.packer)
    }

    pub fn set_view_proj(&mut self, view_projection: Mat4) {
        self.renderer.update_view_proj(view_projection);
    }

    /// Immediate-mode access to the four buckets.
    pub fn buckets(&self) -> &ShapeBuckets {
        &self.buckets
    }

    pub fn buckets_mut(&mut self) -> &mut ShapeBuckets {
        &mut self.buckets
    }

    pub fn packer(&self) -> &InstancePacker {
        &self.packer
    }

    pub fn renderer(&self) -> &DebugShapeRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut DebugShapeRenderer {
        &mut self.renderer
    }
}
