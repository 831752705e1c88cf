//! Debug shape error types.

use thiserror::Error;

/// Errors raised while building the canonical primitive meshes.
///
/// These are configuration errors: meshes are built once at startup, so a
/// bad tessellation setting stops the debug shape renderer from initializing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("uv splits ({uv_splits}) must divide tessellation ({tessellation})")]
    UvSplitsMustDivide { tessellation: u32, uv_splits: u32 },
    #[error("{shape} needs an even number of vertical segments, got {segments}")]
    OddVerticalSegments { shape: &'static str, segments: u32 },
}

/// Errors a GPU backend may report while receiving debug shape data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Failed to create buffer: {0}")]
    BufferCreationFailed(String),
    #[error("Device lost")]
    DeviceLost,
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Top-level error for the debug shape subsystem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DebugShapesError {
    #[error("mesh build failed: {0}")]
    Mesh(#[from] MeshError),
    #[error("backend failure: {0}")]
    Backend(#[from] BackendError),
}
