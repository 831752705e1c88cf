use std::ops::{Add, AddAssign};

use glam::Mat4;

use crate::backend::{
    DebugShapeBackend, PipelineGroup, PipelineStateDescriptor, ShaderParameters,
    VertexBufferSource,
};
use crate::config::DebugShapesConfig;
use crate::error::{BackendResult, DebugShapesError};
use crate::frame::{Bucket, ShapeBuckets};
use crate::mesh::MeshCache;
use crate::packing::{InstancePacker, PackedPass};
use crate::primitive::PrimitiveKind;
use crate::vertex::{LineVertex, ShapeVertex};

/// What one [`render`](DebugShapeRenderer::render) call submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub draw_calls: u32,
    pub instances: u32,
    pub triangles: u32,
    pub line_vertices: u32,
}

impl Add for DrawStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            draw_calls: self.draw_calls + rhs.draw_calls,
            instances: self.instances + rhs.instances,
            triangles: self.triangles + rhs.triangles,
            line_vertices: self.line_vertices + rhs.line_vertices,
        }
    }
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Issues the batched draws of packed debug shapes.
///
/// Create once at initialization; mesh build errors surface here. Each
/// frame, call [`render`](Self::render) after the buckets were packed.
///
/// A renderer uploads its meshes to the first backend it renders with and
/// assumes the same backend afterwards.
pub struct DebugShapeRenderer {
    meshes: MeshCache,
    view_projection: Mat4,
    solid_line_width_multiplier: f32,
    wireframe_line_width: f32,
    meshes_uploaded: bool,
}

impl DebugShapeRenderer {
    pub fn new(config: &DebugShapesConfig) -> Result<Self, DebugShapesError> {
        let meshes = MeshCache::build(&config.tessellation)?;
        Ok(Self {
            meshes,
            view_projection: Mat4::IDENTITY,
            solid_line_width_multiplier: config.solid_line_width_multiplier,
            wireframe_line_width: config.wireframe_line_width,
            meshes_uploaded: false,
        })
    }

    /// Update the view-projection matrix.
    ///
    /// Call once per frame before [`render`](Self::render).
    pub fn update_view_proj(&mut self, view_projection: Mat4) {
        self.view_projection = view_projection;
    }

    pub fn view_proj(&self) -> Mat4 {
        self.view_projection
    }

    pub fn mesh_cache(&self) -> &MeshCache {
        &self.meshes
    }

    /// Draw every bucket's packed shapes.
    ///
    /// For each bucket the depth-tested pass goes first, then the pass
    /// without depth test. Kinds with a zero count issue no draw.
    pub fn render<B>(
        &mut self,
        backend: &mut B,
        buckets: &ShapeBuckets,
        packer: &InstancePacker,
    ) -> BackendResult<DrawStats>
    where
        B: DebugShapeBackend + ?Sized,
    {
        if !self.meshes_uploaded {
            backend.upload_meshes(self.meshes.vertices(), self.meshes.indices())?;
            self.meshes_uploaded = true;
        }

        let mut stats = DrawStats::default();
        if packer.instances().is_empty() && packer.line_vertices().is_empty() {
            return Ok(stats);
        }
        backend.upload_instances(packer.instances(), packer.line_vertices())?;

        for bucket in Bucket::ALL {
            let packed = buckets.frame(bucket).packed();
            for depth_test in [true, false] {
                stats += self.draw_pass(backend, bucket, depth_test, packed.pass(depth_test));
            }
        }
        Ok(stats)
    }

    fn draw_pass<B>(
        &self,
        backend: &mut B,
        bucket: Bucket,
        depth_test: bool,
        pass: &PackedPass,
    ) -> DrawStats
    where
        B: DebugShapeBackend + ?Sized,
    {
        let mut stats = DrawStats::default();
        let line_width_multiplier = if bucket.is_solid() {
            self.solid_line_width_multiplier
        } else {
            self.wireframe_line_width
        };

        if pass.counts.instances() > 0 {
            backend.set_vertex_buffer(VertexBufferSource::Shapes, ShapeVertex::STRIDE);
            backend.set_index_buffer(true);

            let groups: [(PipelineGroup, &[PrimitiveKind]); 2] = [
                (PipelineGroup::DoubleSided, &PrimitiveKind::DOUBLE_SIDED),
                (PipelineGroup::SingleSided, &PrimitiveKind::SINGLE_SIDED),
            ];
            for (group, kinds) in groups {
                if kinds.iter().all(|&kind| pass.counts[kind] == 0) {
                    continue;
                }
                backend.set_pipeline_state(&PipelineStateDescriptor::new(
                    group, bucket, depth_test,
                ));

                for &kind in kinds {
                    let count = pass.counts[kind];
                    if count == 0 {
                        continue;
                    }
                    let Some(mesh) = self.meshes.range(kind) else {
                        continue;
                    };
                    backend.set_shader_parameters(&ShaderParameters {
                        view_projection: self.view_projection,
                        instance_offset: pass.offsets[kind],
                        line_width_multiplier,
                    });
                    backend.draw_indexed_instanced(
                        mesh.index_count,
                        count,
                        mesh.index_offset,
                        mesh.vertex_offset,
                    );
                    stats.draw_calls += 1;
                    stats.instances += count;
                    stats.triangles += mesh.index_count / 3 * count;
                }
            }
        }

        if pass.counts.lines > 0 {
            backend.set_vertex_buffer(VertexBufferSource::Lines, LineVertex::STRIDE);
            backend.set_pipeline_state(&PipelineStateDescriptor::new(
                PipelineGroup::Lines,
                bucket,
                depth_test,
            ));
            backend.set_shader_parameters(&ShaderParameters {
                view_projection: self.view_projection,
                instance_offset: 0,
                line_width_multiplier,
            });
            backend.draw(pass.counts.line_vertices(), pass.offsets.lines);
            stats.draw_calls += 1;
            stats.line_vertices += pass.counts.line_vertices();
        }

        stats
    }
}
