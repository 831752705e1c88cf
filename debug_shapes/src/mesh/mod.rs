//! Canonical unit meshes for the instanced debug shapes.
//!
//! Every instanced [`PrimitiveKind`](crate::PrimitiveKind) is drawn from one
//! unit-sized mesh (radius 0.5, height 1, quad 1×1, cube 1) generated once and
//! packed into shared buffers by [`MeshCache`].
//!
//! # Wireframe edges
//!
//! There is no separate wireframe topology. Each vertex uv component is one of
//! [`UV_EDGE_LOW`], [`UV_EDGE_HIGH`] or [`UV_INTERIOR`], and the fragment
//! shader draws a wire wherever the interpolated value comes within
//! `fwidth(uv) * line_width_multiplier` of 0 or 1. The solid pass uses a huge
//! multiplier, which fills every fragment.
//!
//! Consecutive split lines alternate between the two edge values so that the
//! band between them still passes through the interior value. Fan centers
//! (circle centers, sphere poles, cone tips) are duplicated so that only the
//! marked spokes touch an edge-valued apex.

mod cache;
mod generators;

pub use cache::{MeshCache, MeshRange};
pub use generators::{
    MeshData, UV_EDGE_HIGH, UV_EDGE_LOW, UV_INTERIOR, generate_capsule, generate_circle,
    generate_cone, generate_cube, generate_cylinder, generate_plane, generate_quad,
    generate_sphere,
};
