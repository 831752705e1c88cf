//! Instance packing: turns per-frame command lists into the shared instance
//! and line-vertex buffers.
//!
//! Every [`pack`](InstancePacker::pack) call lays out the instanced kinds of
//! one [`FrameState`] back to back, starting where the previous call ended:
//!
//! ```text
//! | depth-tested: quads circles spheres half_spheres cubes capsules cylinders cones | no-depth: ... |
//! ```
//!
//! Lines follow the same scheme in their own buffer, two vertices per
//! segment. The chain restarts at zero on [`reset`](InstancePacker::reset).

use std::ops::Range;

use bytemuck::Zeroable;

use crate::command::PackedShape;
use crate::frame::{CommandList, FrameState};
use crate::primitive::{PrimitiveCounts, PrimitiveKind};
use crate::vertex::{LineVertex, ShapeInstance};

/// Growable buffer that is bulk-cleared between frames.
///
/// `len` is a watermark: [`alloc`](Self::alloc) moves it forward and
/// [`clear`](Self::clear) moves it back to zero. The backing `Vec` only
/// grows, so steady-state frames do not allocate.
#[derive(Debug, Clone)]
pub struct InstanceStorage<T> {
    data: Vec<T>,
    len: usize,
}

impl<T> Default for InstanceStorage<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
        }
    }
}

impl<T: Zeroable + Copy> InstanceStorage<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `count` more slots past the watermark and return them.
    ///
    /// Existing contents are kept; new slots start zeroed.
    pub fn alloc(&mut self, count: usize) -> Range<usize> {
        let start = self.len;
        let end = start + count;
        if end > self.data.len() {
            log::debug!(
                "Growing {} storage: {} -> {}",
                std::any::type_name::<T>(),
                self.data.len(),
                end
            );
            self.data.resize(end, T::zeroed());
        }
        self.len = end;
        start..end
    }

    fn write(&mut self, slot: u32, value: T) {
        self.data[slot as usize] = value;
    }

    /// Move the watermark back to zero without freeing anything.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots allocated so far, regardless of the watermark.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }
}

/// Offsets and counts of one depth-test partition after packing.
///
/// Both tables are indexed by kind. For lines, `offsets.lines` is the first
/// line *vertex* while `counts.lines` counts segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedPass {
    pub offsets: PrimitiveCounts,
    pub counts: PrimitiveCounts,
}

impl PackedPass {
    /// Lay out `counts` starting at `instance_start` / `line_start`.
    pub fn layout(instance_start: u32, line_start: u32, counts: PrimitiveCounts) -> Self {
        let mut offsets = PrimitiveCounts::ZERO;
        let mut cursor = instance_start;
        for kind in PrimitiveKind::PACKING_ORDER {
            offsets[kind] = cursor;
            cursor += counts[kind];
        }
        offsets.lines = line_start;
        Self { offsets, counts }
    }

    /// Slots owned by `kind`: instance slots, or line vertices for lines.
    pub fn range(&self, kind: PrimitiveKind) -> Range<u32> {
        let start = self.offsets[kind];
        match kind {
            PrimitiveKind::Line => start..start + self.counts.line_vertices(),
            _ => start..start + self.counts[kind],
        }
    }

    /// One past the last instance slot of this pass.
    pub fn instance_end(&self) -> u32 {
        self.offsets[PrimitiveKind::Cone] + self.counts.cones
    }

    /// One past the last line vertex of this pass.
    pub fn line_end(&self) -> u32 {
        self.offsets.lines + self.counts.line_vertices()
    }
}

/// Layout of one [`FrameState`], frozen until it is packed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedFrame {
    pub depth: PackedPass,
    pub no_depth: PackedPass,
}

impl PackedFrame {
    pub fn pass(&self, depth_test: bool) -> &PackedPass {
        if depth_test { &self.depth } else { &self.no_depth }
    }

    /// Counts of both passes together.
    pub fn counts(&self) -> PrimitiveCounts {
        self.depth.counts + self.no_depth.counts
    }
}

/// Packs command lists into the shared instance and line-vertex buffers.
#[derive(Debug, Default)]
pub struct InstancePacker {
    instances: InstanceStorage<ShapeInstance>,
    line_vertices: InstanceStorage<LineVertex>,
}

impl InstancePacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new chain at slot zero. Call once per frame before packing.
    pub fn reset(&mut self) {
        self.instances.clear();
        self.line_vertices.clear();
    }

    /// Where the next packed instance goes.
    pub fn last_offset(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Where the next packed line vertex goes.
    pub fn last_line_offset(&self) -> u32 {
        self.line_vertices.len() as u32
    }

    pub fn instances(&self) -> &[ShapeInstance] {
        self.instances.as_slice()
    }

    pub fn line_vertices(&self) -> &[LineVertex] {
        self.line_vertices.as_slice()
    }

    /// Pack both command lists of `frame` after everything packed so far.
    ///
    /// Stores the resulting [`PackedFrame`] in `frame`, clears its command
    /// lists, and returns how many records were written per kind (segments
    /// for lines).
    pub fn pack(&mut self, frame: &mut FrameState) -> PrimitiveCounts {
        let depth_counts = frame.depth.counts();
        let no_depth_counts = frame.no_depth.counts();
        let total = depth_counts + no_depth_counts;

        let instances = self.instances.alloc(total.instances() as usize);
        let lines = self.line_vertices.alloc(total.line_vertices() as usize);

        let depth = PackedPass::layout(instances.start as u32, lines.start as u32, depth_counts);
        let no_depth = PackedPass::layout(depth.instance_end(), depth.line_end(), no_depth_counts);
        debug_assert_eq!(no_depth.instance_end() as usize, instances.end);
        debug_assert_eq!(no_depth.line_end() as usize, lines.end);

        let mut writes = self.write_list(&frame.depth, &depth);
        writes += self.write_list(&frame.no_depth, &no_depth);

        log::trace!(
            "Packed {} instances at {}, {} line vertices at {}",
            total.instances(),
            instances.start,
            total.line_vertices(),
            lines.start
        );

        frame.packed = PackedFrame { depth, no_depth };
        frame.clear();
        writes
    }

    fn write_list(&mut self, list: &CommandList, pass: &PackedPass) -> PrimitiveCounts {
        let mut cursors = pass.offsets;
        let mut writes = PrimitiveCounts::ZERO;
        for command in list.commands() {
            let kind = command.kind();
            let slot = cursors[kind];
            match command.pack() {
                PackedShape::Instance(instance) => {
                    self.instances.write(slot, instance);
                    cursors[kind] += 1;
                }
                PackedShape::Line([start, end]) => {
                    self.line_vertices.write(slot, start);
                    self.line_vertices.write(slot + 1, end);
                    cursors[kind] += 2;
                }
            }
            writes.increment(kind);
        }
        writes
    }
}
