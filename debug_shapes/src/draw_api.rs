use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Quat, Vec3};

use crate::color::Color;
use crate::drawer::DebugShapesContext;

/// Edges of a hexahedron whose corners are two quads `[0..4]` and `[4..8]`.
const BOX_EDGES: [(usize, usize); 12] = [
    // First face
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // Second face
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    // Connecting edges
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

const RING_SEGMENTS: usize = 32;

impl DebugShapesContext<'_> {
    fn draw_box_edges(&mut self, corners: &[Vec3; 8], color: Color) {
        for (a, b) in BOX_EDGES {
            self.draw_line(corners[a], corners[b], color);
        }
    }

    /// Draw an axis-aligned bounding box from min to max corners (12 edges).
    pub fn draw_aabb(&mut self, min: Vec3, max: Vec3, color: Color) {
        let corners = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        self.draw_box_edges(&corners, color);
    }

    /// Draw the edges of an oriented box given center, half-extents, and rotation.
    pub fn draw_box(&mut self, center: Vec3, half_extents: Vec3, rotation: Quat, color: Color) {
        let corner = |sx: f32, sy: f32, sz: f32| {
            center + rotation * (half_extents * Vec3::new(sx, sy, sz))
        };
        let corners = [
            corner(-1.0, -1.0, -1.0),
            corner(1.0, -1.0, -1.0),
            corner(1.0, 1.0, -1.0),
            corner(-1.0, 1.0, -1.0),
            corner(-1.0, -1.0, 1.0),
            corner(1.0, -1.0, 1.0),
            corner(1.0, 1.0, 1.0),
            corner(-1.0, 1.0, 1.0),
        ];
        self.draw_box_edges(&corners, color);
    }

    /// Outline of [`draw_circle`](Self::draw_circle): a ring in the local
    /// XZ plane, `RING_SEGMENTS` segments long.
    pub fn draw_ring(&mut self, center: Vec3, rotation: Quat, radius: f32, color: Color) {
        let point = |i: usize| {
            let (sin, cos) = (i as f32 * TAU / RING_SEGMENTS as f32).sin_cos();
            center + rotation * Vec3::new(cos * radius, 0.0, sin * radius)
        };
        for i in 0..RING_SEGMENTS {
            self.draw_line(point(i), point(i + 1), color);
        }
    }

    /// Three great circles, one per principal plane.
    pub fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, color: Color) {
        for rotation in [
            Quat::IDENTITY,
            Quat::from_rotation_x(FRAC_PI_2),
            Quat::from_rotation_z(FRAC_PI_2),
        ] {
            self.draw_ring(center, rotation, radius, color);
        }
    }

    /// Draw a cross marker at a point (3 axis-aligned lines).
    pub fn draw_cross(&mut self, center: Vec3, size: f32, color: Color) {
        let half = size * 0.5;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            self.draw_line(center - axis * half, center + axis * half, color);
        }
    }

    /// Draw a ray from origin in a direction with a given length.
    pub fn draw_ray(&mut self, origin: Vec3, direction: Vec3, length: f32, color: Color) {
        self.draw_line(origin, origin + direction * length, color);
    }

    /// Draw coordinate axes gizmo (R=X, G=Y, B=Z).
    pub fn draw_axes(&mut self, center: Vec3, size: f32) {
        self.draw_ray(center, Vec3::X, size, Color::RED);
        self.draw_ray(center, Vec3::Y, size, Color::GREEN);
        self.draw_ray(center, Vec3::Z, size, Color::BLUE);
    }

    /// Draw the edges of a frustum from 8 corners.
    ///
    /// Corner order: near plane `[TL, TR, BR, BL]`, far plane `[TL, TR, BR, BL]`.
    pub fn draw_frustum(&mut self, corners: &[Vec3; 8], color: Color) {
        self.draw_box_edges(corners, color);
    }

    /// Square grid on the XZ plane, `2 * half_count` cells across.
    pub fn draw_grid(&mut self, center: Vec3, cell_size: f32, half_count: u32, color: Color) {
        let extent = cell_size * half_count as f32;
        let n = half_count as i32;
        for (along, across) in [(Vec3::Z, Vec3::X), (Vec3::X, Vec3::Z)] {
            for i in -n..=n {
                let mid = center + across * (i as f32 * cell_size);
                self.draw_line(mid - along * extent, mid + along * extent, color);
            }
        }
    }

    /// Draw an arrow from `start` to `end`: a shaft line and a cone head.
    ///
    /// The head is `head_length` long (clamped to the arrow length) and
    /// `head_radius` wide. A zero-length arrow draws nothing.
    pub fn draw_arrow(
        &mut self,
        start: Vec3,
        end: Vec3,
        head_length: f32,
        head_radius: f32,
        color: Color,
    ) {
        let delta = end - start;
        let length = delta.length();
        if length <= f32::EPSILON {
            return;
        }
        let direction = delta / length;
        let head_length = head_length.min(length);
        let head_base = end - direction * head_length;

        self.draw_line(start, head_base, color);
        self.draw_cone(
            head_base + direction * (head_length * 0.5),
            Quat::from_rotation_arc(Vec3::Y, direction),
            head_length,
            head_radius,
            color,
        );
    }
}
