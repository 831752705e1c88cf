//! Configuration for the debug shape subsystem.

/// Tessellation of one round shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTessellation {
    /// Segments around the shape (and pole to pole for spheres and capsules).
    pub tessellation: u32,
    /// Number of marked wireframe lines; must divide `tessellation`. Zero disables them.
    pub uv_splits: u32,
}

impl ShapeTessellation {
    pub const fn new(tessellation: u32, uv_splits: u32) -> Self {
        Self {
            tessellation,
            uv_splits,
        }
    }
}

/// Tessellation of every round canonical mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationSettings {
    pub circle: ShapeTessellation,
    /// Also drives half-spheres, so the tessellation must be even.
    pub sphere: ShapeTessellation,
    pub capsule: ShapeTessellation,
    pub cylinder: ShapeTessellation,
    pub cone: ShapeTessellation,
}

impl Default for TessellationSettings {
    fn default() -> Self {
        Self {
            circle: ShapeTessellation::new(16, 4),
            sphere: ShapeTessellation::new(16, 4),
            capsule: ShapeTessellation::new(8, 2),
            cylinder: ShapeTessellation::new(16, 4),
            cone: ShapeTessellation::new(16, 4),
        }
    }
}

/// Settings for [`DebugShapes`](crate::DebugShapes) and
/// [`DebugShapeRenderer`](crate::DebugShapeRenderer).
///
/// # Example
///
/// ```
/// use redlilium_debug_shapes::DebugShapesConfig;
///
/// let config = DebugShapesConfig::new()
///     .with_max_primitives_with_lifetime(256)
///     .with_wireframe_line_width(1.5);
/// assert_eq!(config.max_primitives_with_lifetime, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugShapesConfig {
    /// Cap on single-frame shapes waiting in the persistent queue.
    pub max_primitives: usize,
    /// Cap on shapes with a positive lifetime.
    pub max_primitives_with_lifetime: usize,
    /// Line-width multiplier used for wireframe buckets.
    pub wireframe_line_width: f32,
    /// Line-width multiplier used for solid buckets; large enough to cover every fragment.
    pub solid_line_width_multiplier: f32,
    pub tessellation: TessellationSettings,
}

impl Default for DebugShapesConfig {
    fn default() -> Self {
        Self {
            max_primitives: 16384,
            max_primitives_with_lifetime: 4096,
            wireframe_line_width: 1.0,
            solid_line_width_multiplier: 10000.0,
            tessellation: TessellationSettings::default(),
        }
    }
}

impl DebugShapesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_primitives(mut self, max: usize) -> Self {
        self.max_primitives = max;
        self
    }

    pub fn with_max_primitives_with_lifetime(mut self, max: usize) -> Self {
        self.max_primitives_with_lifetime = max;
        self
    }

    pub fn with_wireframe_line_width(mut self, width: f32) -> Self {
        self.wireframe_line_width = width;
        self
    }

    pub fn with_solid_line_width_multiplier(mut self, multiplier: f32) -> Self {
        self.solid_line_width_multiplier = multiplier;
        self
    }

    pub fn with_tessellation(mut self, tessellation: TessellationSettings) -> Self {
        self.tessellation = tessellation;
        self
    }
}
