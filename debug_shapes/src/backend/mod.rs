//! GPU backend abstraction for debug shape rendering.
//!
//! The renderer never talks to a graphics API directly. It uploads the
//! shared buffers and issues batched draws through [`DebugShapeBackend`],
//! which a host engine implements on top of its own command lists.

mod recording;

pub use recording::{BackendCall, RecordingBackend};

use glam::Mat4;

use crate::error::BackendResult;
use crate::frame::Bucket;
use crate::vertex::{DebugShapeUniforms, LineVertex, ShapeInstance, ShapeVertex};

/// Primitive topology of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    TriangleList,
    LineList,
}

/// Depth-stencil mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthMode {
    /// No depth test, no depth writes.
    Off,
    /// Depth test without writes, for blended shapes.
    ReadOnly,
    ReadWrite,
}

impl DepthMode {
    pub fn select(depth_test: bool, transparent: bool) -> Self {
        match (depth_test, transparent) {
            (false, _) => Self::Off,
            (true, true) => Self::ReadOnly,
            (true, false) => Self::ReadWrite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillMode {
    Solid,
    Wireframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    None,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Opaque,
    /// Straight (non-premultiplied) alpha blending.
    NonPremultiplied,
}

/// Kinds of draws that share one pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineGroup {
    /// Quads, circles and half-spheres: back faces stay visible.
    DoubleSided,
    /// Closed shapes: back faces are culled.
    SingleSided,
    Lines,
}

/// Everything a backend needs to pick or build a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineStateDescriptor {
    pub topology: Topology,
    pub depth: DepthMode,
    pub fill: FillMode,
    pub cull: CullMode,
    pub blend: BlendMode,
}

impl PipelineStateDescriptor {
    /// Pipeline state for `group` inside `bucket`.
    pub fn new(group: PipelineGroup, bucket: Bucket, depth_test: bool) -> Self {
        let transparent = bucket.is_transparent();
        let (topology, cull) = match group {
            PipelineGroup::DoubleSided => (Topology::TriangleList, CullMode::None),
            PipelineGroup::SingleSided => (Topology::TriangleList, CullMode::Back),
            PipelineGroup::Lines => (Topology::LineList, CullMode::None),
        };
        Self {
            topology,
            depth: DepthMode::select(depth_test, transparent),
            fill: if bucket.is_solid() {
                FillMode::Solid
            } else {
                FillMode::Wireframe
            },
            cull,
            blend: if transparent {
                BlendMode::NonPremultiplied
            } else {
                BlendMode::Opaque
            },
        }
    }
}

/// Which shared vertex buffer a draw reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexBufferSource {
    /// The packed canonical meshes.
    Shapes,
    /// The frame's line vertices.
    Lines,
}

/// Shader parameters set before each batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderParameters {
    pub view_projection: Mat4,
    /// First instance slot of the batch in the shared instance buffer.
    pub instance_offset: u32,
    pub line_width_multiplier: f32,
}

impl ShaderParameters {
    pub fn to_uniforms(&self) -> DebugShapeUniforms {
        DebugShapeUniforms {
            view_proj: self.view_projection.to_cols_array_2d(),
            instance_offset: self.instance_offset,
            line_width_multiplier: self.line_width_multiplier,
            _padding: [0; 2],
        }
    }
}

/// The GPU side of debug shape rendering.
///
/// Calls arrive in submission order. Offsets and counts are in elements,
/// not bytes.
pub trait DebugShapeBackend {
    /// Receive the packed canonical meshes. Called once per renderer.
    fn upload_meshes(&mut self, vertices: &[ShapeVertex], indices: &[u32]) -> BackendResult<()>;

    /// Receive this frame's instance and line-vertex buffers.
    fn upload_instances(
        &mut self,
        instances: &[ShapeInstance],
        line_vertices: &[LineVertex],
    ) -> BackendResult<()>;

    fn set_vertex_buffer(&mut self, source: VertexBufferSource, stride: u32);

    fn set_index_buffer(&mut self, use_32bit_indices: bool);

    fn set_pipeline_state(&mut self, state: &PipelineStateDescriptor);

    fn set_shader_parameters(&mut self, parameters: &ShaderParameters);

    /// Draw `instance_count` instances of a mesh. `vertex_offset` is the base
    /// vertex added to every index.
    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        index_offset: u32,
        vertex_offset: u32,
    );

    /// Draw non-indexed vertices from the bound vertex buffer.
    fn draw(&mut self, vertex_count: u32, vertex_offset: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_mode_selection() {
        assert_eq!(DepthMode::select(false, false), DepthMode::Off);
        assert_eq!(DepthMode::select(false, true), DepthMode::Off);
        assert_eq!(DepthMode::select(true, true), DepthMode::ReadOnly);
        assert_eq!(DepthMode::select(true, false), DepthMode::ReadWrite);
    }

    #[test]
    fn test_pipeline_state_for_bucket() {
        let state = PipelineStateDescriptor::new(
            PipelineGroup::SingleSided,
            Bucket::WireframeTransparent,
            true,
        );
        assert_eq!(state.topology, Topology::TriangleList);
        assert_eq!(state.cull, CullMode::Back);
        assert_eq!(state.fill, FillMode::Wireframe);
        assert_eq!(state.blend, BlendMode::NonPremultiplied);
        assert_eq!(state.depth, DepthMode::ReadOnly);

        let state = PipelineStateDescriptor::new(PipelineGroup::Lines, Bucket::SolidOpaque, false);
        assert_eq!(state.topology, Topology::LineList);
        assert_eq!(state.depth, DepthMode::Off);
        assert_eq!(state.blend, BlendMode::Opaque);
    }

    #[test]
    fn test_shader_parameters_to_uniforms() {
        let params = ShaderParameters {
            view_projection: Mat4::IDENTITY,
            instance_offset: 7,
            line_width_multiplier: 2.0,
        };
        let uniforms = params.to_uniforms();
        assert_eq!(uniforms.instance_offset, 7);
        assert_eq!(uniforms.view_proj[3][3], 1.0);
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 80);
    }
}
