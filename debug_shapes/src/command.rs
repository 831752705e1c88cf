//! Draw commands: one user draw call for one primitive.

use bitflags::bitflags;
use glam::{Quat, Vec2, Vec3};

use crate::color::Color;
use crate::primitive::PrimitiveKind;
use crate::vertex::{LineVertex, ShapeInstance};

/// A single debug draw call.
///
/// Each variant carries only the fields its shape needs. The canonical
/// meshes are unit sized, and each variant derives a scale-equivalent from
/// its own fields:
///
/// | Variant | Scale |
/// |---------|-------|
/// | `Quad` | `(size.x, size.y, 1)` |
/// | `Circle` | `(2r, 1, 2r)` |
/// | `Cube` | `end - start` |
/// | `Sphere`, `HalfSphere` | `2r` on every axis |
/// | `Capsule`, `Cylinder`, `Cone` | `(2r, height, 2r)` |
///
/// For these three, `height` is the total extent along local Y. A capsule's
/// `height` includes its caps, which are only round when `height == 4r`.
///
/// Lines are not instanced; they become two [`LineVertex`] records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Quad {
        position: Vec3,
        rotation: Quat,
        size: Vec2,
        color: Color,
    },
    Circle {
        position: Vec3,
        rotation: Quat,
        radius: f32,
        color: Color,
    },
    Line {
        start: Vec3,
        end: Vec3,
        color: Color,
    },
    /// Box spanning `start..end` in its local frame, rotated about its center.
    Cube {
        start: Vec3,
        end: Vec3,
        rotation: Quat,
        color: Color,
    },
    Sphere {
        position: Vec3,
        radius: f32,
        color: Color,
    },
    /// Lower hemisphere of a sphere, open towards local +Y.
    HalfSphere {
        position: Vec3,
        rotation: Quat,
        radius: f32,
        color: Color,
    },
    /// Capsule along local Y, `height` tall including both caps.
    Capsule {
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
    },
    Cylinder {
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
    },
    /// Cone with its base at local `-height / 2` and its tip at `+height / 2`.
    Cone {
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
    },
}

/// GPU-ready form of a [`DrawCommand`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PackedShape {
    Instance(ShapeInstance),
    Line([LineVertex; 2]),
}

impl DrawCommand {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Quad { .. } => PrimitiveKind::Quad,
            Self::Circle { .. } => PrimitiveKind::Circle,
            Self::Line { .. } => PrimitiveKind::Line,
            Self::Cube { .. } => PrimitiveKind::Cube,
            Self::Sphere { .. } => PrimitiveKind::Sphere,
            Self::HalfSphere { .. } => PrimitiveKind::HalfSphere,
            Self::Capsule { .. } => PrimitiveKind::Capsule,
            Self::Cylinder { .. } => PrimitiveKind::Cylinder,
            Self::Cone { .. } => PrimitiveKind::Cone,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Self::Quad { color, .. }
            | Self::Circle { color, .. }
            | Self::Line { color, .. }
            | Self::Cube { color, .. }
            | Self::Sphere { color, .. }
            | Self::HalfSphere { color, .. }
            | Self::Capsule { color, .. }
            | Self::Cylinder { color, .. }
            | Self::Cone { color, .. } => color,
        }
    }

    /// Convert into the record the packer writes into the shared buffers.
    pub fn pack(&self) -> PackedShape {
        match *self {
            Self::Quad {
                position,
                rotation,
                size,
                color,
            } => PackedShape::Instance(ShapeInstance::new(
                position,
                rotation,
                Vec3::new(size.x, size.y, 1.0),
                color,
            )),
            Self::Circle {
                position,
                rotation,
                radius,
                color,
            } => PackedShape::Instance(ShapeInstance::new(
                position,
                rotation,
                Vec3::new(radius * 2.0, 1.0, radius * 2.0),
                color,
            )),
            Self::Line { start, end, color } => PackedShape::Line([
                LineVertex::new(start, color),
                LineVertex::new(end, color),
            ]),
            Self::Cube {
                start,
                end,
                rotation,
                color,
            } => PackedShape::Instance(ShapeInstance::new(
                start + (end - start) * 0.5,
                rotation,
                end - start,
                color,
            )),
            Self::Sphere {
                position,
                radius,
                color,
            } => PackedShape::Instance(ShapeInstance::new(
                position,
                Quat::IDENTITY,
                Vec3::splat(radius * 2.0),
                color,
            )),
            Self::HalfSphere {
                position,
                rotation,
                radius,
                color,
            } => PackedShape::Instance(ShapeInstance::new(
                position,
                rotation,
                Vec3::splat(radius * 2.0),
                color,
            )),
            Self::Capsule {
                position,
                rotation,
                height,
                radius,
                color,
            }
            | Self::Cylinder {
                position,
                rotation,
                height,
                radius,
                color,
            }
            | Self::Cone {
                position,
                rotation,
                height,
                radius,
                color,
            } => PackedShape::Instance(ShapeInstance::new(
                position,
                rotation,
                Vec3::new(radius * 2.0, height, radius * 2.0),
                color,
            )),
        }
    }
}

bitflags! {
    /// How a queued shape is rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Filled triangles.
        const SOLID = 1 << 0;
        /// Only the marked wireframe edges.
        const WIREFRAME = 1 << 1;
        /// Occluded by scene depth.
        const DEPTH_TEST = 1 << 2;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self::SOLID | Self::DEPTH_TEST
    }
}

/// Options for shapes issued through the persistent API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Seconds the shape stays alive. `<= 0.0` draws it for a single frame.
    pub lifetime: f32,
    pub flags: RenderFlags,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            lifetime: 0.0,
            flags: RenderFlags::default(),
        }
    }
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the shape alive for `seconds`.
    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.lifetime = seconds;
        self
    }

    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.flags.set(RenderFlags::DEPTH_TEST, depth_test);
        self
    }

    /// Choose between filled (`true`) and wireframe (`false`) rendering.
    pub fn with_solid(mut self, solid: bool) -> Self {
        self.flags.remove(RenderFlags::SOLID | RenderFlags::WIREFRAME);
        self.flags.insert(if solid {
            RenderFlags::SOLID
        } else {
            RenderFlags::WIREFRAME
        });
        self
    }

    pub fn wireframe(self) -> Self {
        self.with_solid(false)
    }

    pub fn depth_test(&self) -> bool {
        self.flags.contains(RenderFlags::DEPTH_TEST)
    }

    /// Wireframe wins when both fill flags are set.
    pub fn is_solid(&self) -> bool {
        !self.flags.contains(RenderFlags::WIREFRAME)
    }
}

/// A command waiting in the persistent queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedShape {
    pub command: DrawCommand,
    /// Remaining seconds; only decremented, never otherwise mutated.
    pub lifetime: f32,
    pub flags: RenderFlags,
}

impl QueuedShape {
    pub fn new(command: DrawCommand, options: DrawOptions) -> Self {
        Self {
            command,
            lifetime: options.lifetime,
            flags: options.flags,
        }
    }

    pub fn has_lifetime(&self) -> bool {
        self.lifetime > 0.0
    }

    pub fn depth_test(&self) -> bool {
        self.flags.contains(RenderFlags::DEPTH_TEST)
    }

    pub fn is_solid(&self) -> bool {
        !self.flags.contains(RenderFlags::WIREFRAME)
    }
}
