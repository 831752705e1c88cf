use crate::color::Color;

/// A vertex of a canonical primitive mesh: position + normal + uv.
///
/// The uv channel does not address a texture. It carries the wireframe-edge
/// markers described in [`crate::mesh`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl ShapeVertex {
    pub const STRIDE: u32 = std::mem::size_of::<Self>() as u32;

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// A debug line vertex: position + color.
///
/// Used for line-list rendering. Every pair of consecutive vertices
/// forms one line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const STRIDE: u32 = std::mem::size_of::<Self>() as u32;

    pub fn new(position: glam::Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_f32(),
        }
    }
}

/// Per-instance data for one instanced debug shape.
///
/// Laid out for a WGSL storage buffer: 48 bytes, 16-byte aligned. `scale`
/// is a scale-equivalent whose meaning depends on the shape (see
/// [`DrawCommand`](crate::DrawCommand)).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeInstance {
    pub position: [f32; 3],
    /// RGBA8, red in the lowest byte.
    pub color: u32,
    /// Rotation quaternion as `[x, y, z, w]`.
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub _padding: f32,
}

impl ShapeInstance {
    pub const STRIDE: u32 = std::mem::size_of::<Self>() as u32;

    pub fn new(
        position: glam::Vec3,
        rotation: glam::Quat,
        scale: glam::Vec3,
        color: Color,
    ) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_packed(),
            rotation: rotation.to_array(),
            scale: scale.to_array(),
            _padding: 0.0,
        }
    }
}

/// Uniform buffer data for the debug shape shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugShapeUniforms {
    /// Column-major 4x4 view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// First slot of the current batch within the shared instance buffer.
    pub instance_offset: u32,
    pub line_width_multiplier: f32,
    pub _padding: [u32; 2],
}
