//! Primitive kinds and per-kind counters.
//!
//! [`PrimitiveCounts`] serves two roles with the same shape:
//! - as a **count table**, each field is the number of primitives of that kind;
//! - as an **offset table**, each field is the first instance slot of that kind.
//!
//! For [`PrimitiveKind::Line`] a count table holds line *segments*, while an
//! offset table holds the first line *vertex*.

use std::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};

/// The closed set of debug shape categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Quad,
    Circle,
    Line,
    Cube,
    Sphere,
    HalfSphere,
    Capsule,
    Cylinder,
    Cone,
}

impl PrimitiveKind {
    /// Every kind, in declaration order.
    pub const ALL: [PrimitiveKind; 9] = [
        Self::Quad,
        Self::Circle,
        Self::Line,
        Self::Cube,
        Self::Sphere,
        Self::HalfSphere,
        Self::Capsule,
        Self::Cylinder,
        Self::Cone,
    ];

    /// Instanced kinds in the order their instance slot ranges are laid out.
    pub const PACKING_ORDER: [PrimitiveKind; 8] = [
        Self::Quad,
        Self::Circle,
        Self::Sphere,
        Self::HalfSphere,
        Self::Cube,
        Self::Capsule,
        Self::Cylinder,
        Self::Cone,
    ];

    /// Kinds with an open or flat surface, drawn without back-face culling.
    pub const DOUBLE_SIDED: [PrimitiveKind; 3] = [Self::Quad, Self::Circle, Self::HalfSphere];

    /// Closed kinds, drawn with back-face culling.
    pub const SINGLE_SIDED: [PrimitiveKind; 5] = [
        Self::Sphere,
        Self::Cube,
        Self::Capsule,
        Self::Cylinder,
        Self::Cone,
    ];

    /// Human-readable name, used in logs and labels.
    pub fn name(self) -> &'static str {
        match self {
            Self::Quad => "quad",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::HalfSphere => "half_sphere",
            Self::Capsule => "capsule",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
        }
    }

    /// Whether the kind is drawn as an instanced triangle mesh.
    pub fn is_instanced(self) -> bool {
        !matches!(self, Self::Line)
    }

    /// Whether back faces of this kind remain visible.
    pub fn is_double_sided(self) -> bool {
        matches!(self, Self::Quad | Self::Circle | Self::HalfSphere)
    }
}

/// One counter per [`PrimitiveKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrimitiveCounts {
    pub quads: u32,
    pub circles: u32,
    pub lines: u32,
    pub cubes: u32,
    pub spheres: u32,
    pub half_spheres: u32,
    pub capsules: u32,
    pub cylinders: u32,
    pub cones: u32,
}

impl PrimitiveCounts {
    /// All counters at zero.
    pub const ZERO: Self = Self {
        quads: 0,
        circles: 0,
        lines: 0,
        cubes: 0,
        spheres: 0,
        half_spheres: 0,
        capsules: 0,
        cylinders: 0,
        cones: 0,
    };

    pub fn new() -> Self {
        Self::ZERO
    }

    /// Reset every counter to zero.
    pub fn clear(&mut self) {
        *self = Self::ZERO;
    }

    pub fn get(&self, kind: PrimitiveKind) -> u32 {
        self[kind]
    }

    /// Increment the counter of `kind` by one.
    pub fn increment(&mut self, kind: PrimitiveKind) {
        self[kind] += 1;
    }

    /// Sum of all instanced kinds (everything except lines).
    pub fn instances(&self) -> u32 {
        PrimitiveKind::PACKING_ORDER
            .iter()
            .map(|&kind| self[kind])
            .sum()
    }

    /// Number of line vertices needed for the counted line segments.
    pub fn line_vertices(&self) -> u32 {
        self.lines * 2
    }

    /// True when every counter is zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::ZERO
    }

    fn zip_with(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let mut out = Self::ZERO;
        for kind in PrimitiveKind::ALL {
            out[kind] = f(self[kind], rhs[kind]);
        }
        out
    }
}

impl Index<PrimitiveKind> for PrimitiveCounts {
    type Output = u32;

    fn index(&self, kind: PrimitiveKind) -> &u32 {
        match kind {
            PrimitiveKind::Quad => &self.quads,
            PrimitiveKind::Circle => &self.circles,
            PrimitiveKind::Line => &self.lines,
            PrimitiveKind::Cube => &self.cubes,
            PrimitiveKind::Sphere => &self.spheres,
            PrimitiveKind::HalfSphere => &self.half_spheres,
            PrimitiveKind::Capsule => &self.capsules,
            PrimitiveKind::Cylinder => &self.cylinders,
            PrimitiveKind::Cone => &self.cones,
        }
    }
}

impl IndexMut<PrimitiveKind> for PrimitiveCounts {
    fn index_mut(&mut self, kind: PrimitiveKind) -> &mut u32 {
        match kind {
            PrimitiveKind::Quad => &mut self.quads,
            PrimitiveKind::Circle => &mut self.circles,
            PrimitiveKind::Line => &mut self.lines,
            PrimitiveKind::Cube => &mut self.cubes,
            PrimitiveKind::Sphere => &mut self.spheres,
            PrimitiveKind::HalfSphere => &mut self.half_spheres,
            PrimitiveKind::Capsule => &mut self.capsules,
            PrimitiveKind::Cylinder => &mut self.cylinders,
            PrimitiveKind::Cone => &mut self.cones,
        }
    }
}

impl Add for PrimitiveCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl AddAssign for PrimitiveCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Saturates at zero per kind.
impl Sub for PrimitiveCounts {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, u32::saturating_sub)
    }
}

impl SubAssign for PrimitiveCounts {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
