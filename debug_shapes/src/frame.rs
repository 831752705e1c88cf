//! Per-frame command collection and bucket routing.

use glam::{Quat, Vec2, Vec3};

use crate::color::Color;
use crate::command::{DrawCommand, QueuedShape, RenderFlags};
use crate::packing::{InstancePacker, PackedFrame};
use crate::primitive::PrimitiveCounts;

/// Commands of one depth-test partition and their running counts.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
    counts: PrimitiveCounts,
}

impl CommandList {
    pub fn push(&mut self, command: DrawCommand) {
        self.counts.increment(command.kind());
        self.commands.push(command);
    }

    /// Commands in append order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn counts(&self) -> PrimitiveCounts {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.counts.clear();
    }
}

/// One debug draw target: the immediate-mode API.
///
/// Commands go to the depth-tested or the non-depth-tested list. Packing
/// freezes a [`PackedFrame`] and empties both lists; the frozen layout is
/// what the renderer draws until the next pack.
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    pub(crate) depth: CommandList,
    pub(crate) no_depth: CommandList,
    pub(crate) packed: PackedFrame,
}

impl FrameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand, depth_test: bool) {
        if depth_test {
            self.depth.push(command);
        } else {
            self.no_depth.push(command);
        }
    }

    pub fn commands(&self, depth_test: bool) -> &CommandList {
        if depth_test { &self.depth } else { &self.no_depth }
    }

    /// Running counts of the commands not yet packed.
    pub fn counts(&self, depth_test: bool) -> PrimitiveCounts {
        self.commands(depth_test).counts()
    }

    /// Layout of the last pack.
    pub fn packed(&self) -> &PackedFrame {
        &self.packed
    }

    /// True when no command is waiting to be packed.
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty() && self.no_depth.is_empty()
    }

    /// Drop pending commands. The packed layout is kept.
    pub fn clear(&mut self) {
        self.depth.clear();
        self.no_depth.clear();
    }

    /// Quad of `size` in its local XY plane, facing +Z.
    pub fn draw_quad(
        &mut self,
        position: Vec3,
        rotation: Quat,
        size: Vec2,
        color: Color,
        depth_test: bool,
    ) {
        self.push(
            DrawCommand::Quad {
                position,
                rotation,
                size,
                color,
            },
            depth_test,
        );
    }

    /// Filled circle in its local XZ plane.
    pub fn draw_circle(
        &mut self,
        position: Vec3,
        rotation: Quat,
        radius: f32,
        color: Color,
        depth_test: bool,
    ) {
        self.push(
            DrawCommand::Circle {
                position,
                rotation,
                radius,
                color,
            },
            depth_test,
        );
    }

    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, depth_test: bool) {
        self.push(DrawCommand::Line { start, end, color }, depth_test);
    }

    /// Box spanning `start..end`, rotated about its center.
    pub fn draw_cube(
        &mut self,
        start: Vec3,
        end: Vec3,
        rotation: Quat,
        color: Color,
        depth_test: bool,
    ) {
        self.push(
            DrawCommand::Cube {
                start,
                end,
                rotation,
                color,
            },
            depth_test,
        );
    }

    pub fn draw_sphere(&mut self, position: Vec3, radius: f32, color: Color, depth_test: bool) {
        self.push(
            DrawCommand::Sphere {
                position,
                radius,
                color,
            },
            depth_test,
        );
    }

    pub fn draw_half_sphere(
        &mut self,
        position: Vec3,
        rotation: Quat,
        radius: f32,
        color: Color,
        depth_test: bool,
    ) {
        self.push(
            DrawCommand::HalfSphere {
                position,
                rotation,
                radius,
                color,
            },
            depth_test,
        );
    }

    pub fn draw_capsule(
        &mut self,
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
        depth_test: bool,
    ) {
        self.push(
            DrawCommand::Capsule {
                position,
                rotation,
                height,
                radius,
                color,
            },
            depth_test,
        );
    }

    pub fn draw_cylinder(
        &mut self,
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
        depth_test: bool,
    ) {
        self.push(
            DrawCommand::Cylinder {
                position,
                rotation,
                height,
                radius,
                color,
            },
            depth_test,
        );
    }

    pub fn draw_cone(
        &mut self,
        position: Vec3,
        rotation: Quat,
        height: f32,
        radius: f32,
        color: Color,
        depth_test: bool,
    ) {
        self.push(
            DrawCommand::Cone {
                position,
                rotation,
                height,
                radius,
                color,
            },
            depth_test,
        );
    }
}

/// Render-style partition of the frame's shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    SolidOpaque,
    WireframeOpaque,
    SolidTransparent,
    WireframeTransparent,
}

impl Bucket {
    /// Every bucket, in packing and drawing order.
    pub const ALL: [Bucket; 4] = [
        Self::SolidOpaque,
        Self::WireframeOpaque,
        Self::SolidTransparent,
        Self::WireframeTransparent,
    ];

    /// Pick the bucket for a shape: alpha below 255 is transparent.
    pub fn select(solid: bool, color: Color) -> Self {
        match (solid, color.is_opaque()) {
            (true, true) => Self::SolidOpaque,
            (false, true) => Self::WireframeOpaque,
            (true, false) => Self::SolidTransparent,
            (false, false) => Self::WireframeTransparent,
        }
    }

    pub fn is_solid(self) -> bool {
        matches!(self, Self::SolidOpaque | Self::SolidTransparent)
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, Self::SolidTransparent | Self::WireframeTransparent)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The four [`FrameState`]s of one debug draw system.
#[derive(Debug, Clone, Default)]
pub struct ShapeBuckets {
    frames: [FrameState; 4],
}

impl ShapeBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self, bucket: Bucket) -> &FrameState {
        &self.frames[bucket.index()]
    }

    pub fn frame_mut(&mut self, bucket: Bucket) -> &mut FrameState {
        &mut self.frames[bucket.index()]
    }

    /// Append `command` to the bucket its flags and color select.
    pub fn push(&mut self, command: DrawCommand, flags: RenderFlags) -> Bucket {
        let bucket = Bucket::select(!flags.contains(RenderFlags::WIREFRAME), command.color());
        self.frame_mut(bucket)
            .push(command, flags.contains(RenderFlags::DEPTH_TEST));
        bucket
    }

    pub fn route(&mut self, shape: &QueuedShape) -> Bucket {
        self.push(shape.command, shape.flags)
    }

    /// Pack every bucket into `packer`, starting a fresh chain.
    ///
    /// Returns the records written per kind across all buckets.
    pub fn extract(&mut self, packer: &mut InstancePacker) -> PrimitiveCounts {
        packer.reset();
        let mut writes = PrimitiveCounts::ZERO;
        for frame in &mut self.frames {
            writes += packer.pack(frame);
        }
        writes
    }

    /// Drop every pending command.
    pub fn clear(&mut self) {
        for frame in &mut self.frames {
            frame.clear();
        }
    }

    /// Pending counts across every bucket and both depth partitions.
    pub fn pending(&self) -> PrimitiveCounts {
        self.frames.iter().fold(PrimitiveCounts::ZERO, |acc, frame| {
            acc + frame.counts(true) + frame.counts(false)
        })
    }
}
