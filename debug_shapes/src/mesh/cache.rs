use glam::Vec3;

use crate::config::TessellationSettings;
use crate::error::MeshError;
use crate::primitive::PrimitiveKind;
use crate::vertex::ShapeVertex;

use super::generators::{
    MeshData, generate_capsule, generate_circle, generate_cone, generate_cube, generate_cylinder,
    generate_quad, generate_sphere,
};

const UNIT_RADIUS: f32 = 0.5;
const UNIT_HEIGHT: f32 = 1.0;

/// Kinds with their own mesh, in buffer order.
const MESH_ORDER: [PrimitiveKind; 7] = [
    PrimitiveKind::Quad,
    PrimitiveKind::Circle,
    PrimitiveKind::Cube,
    PrimitiveKind::Sphere,
    PrimitiveKind::Capsule,
    PrimitiveKind::Cylinder,
    PrimitiveKind::Cone,
];

/// Where one kind's mesh lives in the shared buffers.
///
/// Indices inside the range are kind-local: the draw call passes
/// `vertex_offset` as its base vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshRange {
    pub vertex_offset: u32,
    pub vertex_count: u32,
    pub index_offset: u32,
    pub index_count: u32,
}

/// The canonical meshes of every instanced kind, packed into one vertex
/// buffer and one index buffer.
///
/// Built once; read-only afterwards.
#[derive(Debug, Clone)]
pub struct MeshCache {
    vertices: Vec<ShapeVertex>,
    indices: Vec<u32>,
    ranges: [MeshRange; MESH_ORDER.len()],
}

impl MeshCache {
    /// Generate and pack every canonical mesh.
    ///
    /// # Errors
    ///
    /// Fails on any tessellation the generators reject, and on an odd sphere
    /// tessellation: half-spheres draw the first half of the sphere's
    /// indices, which is the lower hemisphere only when the equator is a ring.
    pub fn build(settings: &TessellationSettings) -> Result<Self, MeshError> {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut ranges = [MeshRange::default(); MESH_ORDER.len()];

        for (slot, kind) in MESH_ORDER.into_iter().enumerate() {
            let mesh = generate_mesh(kind, settings)?;
            ranges[slot] = MeshRange {
                vertex_offset: vertices.len() as u32,
                vertex_count: mesh.vertex_count(),
                index_offset: indices.len() as u32,
                index_count: mesh.index_count(),
            };
            vertices.extend(mesh.vertices);
            indices.extend(mesh.indices);
        }

        log::debug!(
            "Built debug shape meshes: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            vertices,
            indices,
            ranges,
        })
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Mesh range for `kind`. Half-spheres get the lower half of the sphere's
    /// indices; lines have no mesh.
    pub fn range(&self, kind: PrimitiveKind) -> Option<MeshRange> {
        match kind {
            PrimitiveKind::Line => None,
            PrimitiveKind::HalfSphere => self.range(PrimitiveKind::Sphere).map(|sphere| MeshRange {
                index_count: sphere.index_count / 2,
                ..sphere
            }),
            _ => MESH_ORDER
                .iter()
                .position(|&k| k == kind)
                .map(|slot| self.ranges[slot]),
        }
    }
}

fn generate_mesh(
    kind: PrimitiveKind,
    settings: &TessellationSettings,
) -> Result<MeshData, MeshError> {
    match kind {
        PrimitiveKind::Quad => Ok(generate_quad(UNIT_HEIGHT, UNIT_HEIGHT)),
        PrimitiveKind::Circle => {
            let t = settings.circle;
            generate_circle(UNIT_RADIUS, t.tessellation, t.uv_splits, 0.0, false, 0)
        }
        PrimitiveKind::Cube => Ok(generate_cube(UNIT_HEIGHT)),
        PrimitiveKind::Sphere | PrimitiveKind::HalfSphere => {
            let t = settings.sphere;
            if t.tessellation % 2 != 0 {
                return Err(MeshError::OddVerticalSegments {
                    shape: "sphere",
                    segments: t.tessellation,
                });
            }
            generate_sphere(UNIT_RADIUS, t.tessellation, t.tessellation, t.uv_splits)
        }
        PrimitiveKind::Capsule => {
            let t = settings.capsule;
            // Body plus caps spans 2; squash to the unit height of the other solids
            let mut mesh = generate_capsule(
                UNIT_HEIGHT,
                UNIT_RADIUS,
                t.tessellation,
                t.tessellation,
                t.uv_splits,
            )?;
            mesh.scale(Vec3::new(1.0, UNIT_HEIGHT / (UNIT_HEIGHT + 2.0 * UNIT_RADIUS), 1.0));
            Ok(mesh)
        }
        PrimitiveKind::Cylinder => {
            let t = settings.cylinder;
            generate_cylinder(UNIT_HEIGHT, UNIT_RADIUS, t.tessellation, t.uv_splits)
        }
        PrimitiveKind::Cone => {
            let t = settings.cone;
            generate_cone(UNIT_HEIGHT, UNIT_RADIUS, t.tessellation, t.uv_splits)
        }
        PrimitiveKind::Line => Ok(MeshData::new()),
    }
}
