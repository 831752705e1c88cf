//! In-memory backend that records every call.
//!
//! Useful for tests and for hosts that replay debug draws into their own
//! command lists later in the frame.

use crate::error::{BackendError, BackendResult};
use crate::vertex::{LineVertex, ShapeInstance, ShapeVertex};

use super::{DebugShapeBackend, PipelineStateDescriptor, ShaderParameters, VertexBufferSource};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    UploadMeshes {
        vertex_count: usize,
        index_count: usize,
    },
    UploadInstances {
        instance_count: usize,
        line_vertex_count: usize,
    },
    SetVertexBuffer {
        source: VertexBufferSource,
        stride: u32,
    },
    SetIndexBuffer {
        use_32bit_indices: bool,
    },
    SetPipelineState(PipelineStateDescriptor),
    SetShaderParameters(ShaderParameters),
    DrawIndexedInstanced {
        index_count: u32,
        instance_count: u32,
        index_offset: u32,
        vertex_offset: u32,
    },
    Draw {
        vertex_count: u32,
        vertex_offset: u32,
    },
}

impl BackendCall {
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::DrawIndexedInstanced { .. } | Self::Draw { .. })
    }
}

/// Backend that keeps uploaded buffers and an ordered call log.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    mesh_vertices: Vec<ShapeVertex>,
    mesh_indices: Vec<u32>,
    instances: Vec<ShapeInstance>,
    line_vertices: Vec<LineVertex>,
    upload_failure: Option<BackendError>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload fail with `error`.
    pub fn with_upload_failure(mut self, error: BackendError) -> Self {
        self.upload_failure = Some(error);
        self
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Only the draw calls, in order.
    pub fn draws(&self) -> impl Iterator<Item = &BackendCall> {
        self.calls.iter().filter(|call| call.is_draw())
    }

    pub fn mesh_vertices(&self) -> &[ShapeVertex] {
        &self.mesh_vertices
    }

    pub fn mesh_indices(&self) -> &[u32] {
        &self.mesh_indices
    }

    pub fn instances(&self) -> &[ShapeInstance] {
        &self.instances
    }

    pub fn line_vertices(&self) -> &[LineVertex] {
        &self.line_vertices
    }

    /// Forget recorded calls. Uploaded buffers are kept.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn check_upload(&self) -> BackendResult<()> {
        match &self.upload_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn record(&mut self, call: BackendCall) {
        log::trace!("RecordingBackend: {:?}", call);
        self.calls.push(call);
    }
}

impl DebugShapeBackend for RecordingBackend {
    fn upload_meshes(&mut self, vertices: &[ShapeVertex], indices: &[u32]) -> BackendResult<()> {
        self.check_upload()?;
        self.mesh_vertices = vertices.to_vec();
        self.mesh_indices = indices.to_vec();
        self.record(BackendCall::UploadMeshes {
            vertex_count: vertices.len(),
            index_count: indices.len(),
        });
        Ok(())
    }

    fn upload_instances(
        &mut self,
        instances: &[ShapeInstance],
        line_vertices: &[LineVertex],
    ) -> BackendResult<()> {
        self.check_upload()?;
        self.instances = instances.to_vec();
        self.line_vertices = line_vertices.to_vec();
        self.record(BackendCall::UploadInstances {
            instance_count: instances.len(),
            line_vertex_count: line_vertices.len(),
        });
        Ok(())
    }

    fn set_vertex_buffer(&mut self, source: VertexBufferSource, stride: u32) {
        self.record(BackendCall::SetVertexBuffer { source, stride });
    }

    fn set_index_buffer(&mut self, use_32bit_indices: bool) {
        self.record(BackendCall::SetIndexBuffer { use_32bit_indices });
    }

    fn set_pipeline_state(&mut self, state: &PipelineStateDescriptor) {
        self.record(BackendCall::SetPipelineState(*state));
    }

    fn set_shader_parameters(&mut self, parameters: &ShaderParameters) {
        self.record(BackendCall::SetShaderParameters(*parameters));
    }

    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        index_offset: u32,
        vertex_offset: u32,
    ) {
        self.record(BackendCall::DrawIndexedInstanced {
            index_count,
            instance_count,
            index_offset,
            vertex_offset,
        });
    }

    fn draw(&mut self, vertex_count: u32, vertex_offset: u32) {
        self.record(BackendCall::Draw {
            vertex_count,
            vertex_offset,
        });
    }
}
