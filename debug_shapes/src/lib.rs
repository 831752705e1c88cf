//! Batched, instanced debug shape drawing for RedLilium Engine.
//!
//! Debug draws of nine primitive kinds (quads, circles, lines, cubes,
//! spheres, half-spheres, capsules, cylinders, cones) are collected per
//! frame, packed into one shared instance buffer, and drawn with one
//! instanced draw per kind, bucket and depth pass.
//!
//! # Architecture
//!
//! - [`MeshCache`] - Canonical unit meshes packed into shared vertex/index buffers
//! - [`FrameState`] / [`ShapeBuckets`] - Per-frame command lists (immediate API)
//! - [`DebugShapes`] - Thread-safe persistent API with lifetimes (store as a shared resource)
//! - [`DebugShapesContext`] - Short-lived drawing context (created per-system)
//! - [`InstancePacker`] - Writes instance records at non-overlapping offsets
//! - [`DebugShapeRenderer`] - Issues batched draws against a [`DebugShapeBackend`]
//! - [`DebugShapeSystem`] - Runs the update → extract → render sequence
//!
//! # Usage
//!
//! ```
//! use redlilium_debug_shapes::{
//!     Color, DebugShapeSystem, DebugShapes, DebugShapesConfig, DrawOptions, RecordingBackend,
//!     Vec3,
//! };
//!
//! let config = DebugShapesConfig::default();
//! let shapes = DebugShapes::new(&config);
//! let mut system = DebugShapeSystem::new(&config).unwrap();
//! let mut backend = RecordingBackend::new();
//!
//! // In any system:
//! {
//!     let mut ctx = shapes.context();
//!     ctx.draw_sphere(Vec3::ZERO, 1.0, Color::GREEN);
//!     ctx.set_options(DrawOptions::new().wireframe().with_lifetime(2.0));
//!     ctx.draw_aabb(Vec3::splat(-1.0), Vec3::ONE, Color::RED);
//! } // flushed on drop
//!
//! // Once per frame:
//! system.update(1.0 / 60.0, &shapes);
//! system.extract();
//! let stats = system.render(&mut backend).unwrap();
//! assert_eq!(stats.instances, 1);
//! assert_eq!(stats.line_vertices, 24);
//! ```

mod backend;
mod color;
mod command;
mod config;
mod draw_api;
mod drawer;
mod error;
mod frame;
pub mod mesh;
mod packing;
mod primitive;
mod queue;
mod renderer;
mod shader;
mod system;
mod vertex;

pub use backend::{
    BackendCall, BlendMode, CullMode, DebugShapeBackend, DepthMode, FillMode, PipelineGroup,
    PipelineStateDescriptor, RecordingBackend, ShaderParameters, Topology, VertexBufferSource,
};
pub use color::Color;
pub use command::{DrawCommand, DrawOptions, PackedShape, QueuedShape, RenderFlags};
pub use config::{DebugShapesConfig, ShapeTessellation, TessellationSettings};
pub use drawer::{DebugShapes, DebugShapesContext};
pub use error::{BackendError, BackendResult, DebugShapesError, MeshError};
pub use frame::{Bucket, CommandList, FrameState, ShapeBuckets};
pub use mesh::{MeshCache, MeshRange};
pub use packing::{InstancePacker, InstanceStorage, PackedFrame, PackedPass};
pub use primitive::{PrimitiveCounts, PrimitiveKind};
pub use queue::ShapeQueue;
pub use renderer::{DebugShapeRenderer, DrawStats};
pub use shader::DEBUG_SHAPES_SHADER_WGSL;
pub use system::DebugShapeSystem;
pub use vertex::{DebugShapeUniforms, LineVertex, ShapeInstance, ShapeVertex};

pub use glam::{Mat4, Quat, Vec2, Vec3};
