//! Mesh generators for the canonical debug shapes.
//!
//! Every generator produces a [`MeshData`] with [`ShapeVertex`] vertices and
//! u32 indices, counter-clockwise front faces, Y up. The uv channel holds the
//! wireframe-edge markers described in the [module docs](super).

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Quat, Vec3};

use crate::error::MeshError;
use crate::vertex::ShapeVertex;

/// Edge marker used on even split lines and on "low" borders.
pub const UV_EDGE_LOW: f32 = 0.0;
/// Edge marker used on odd split lines and on "high" borders.
pub const UV_EDGE_HIGH: f32 = 1.0;
/// Marker for vertices that lie on no wireframe-visible edge.
pub const UV_INTERIOR: f32 = 0.5;

const EDGE_VALUES: [f32; 2] = [UV_EDGE_LOW, UV_EDGE_HIGH];

/// CPU-side vertices and indices of one generated shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Append `other`, rebasing its indices onto this mesh's vertices.
    pub fn append(&mut self, other: MeshData) {
        let base = self.vertex_count();
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    /// Rotate positions and normals in place.
    pub fn rotate(&mut self, rotation: Quat) {
        for vertex in &mut self.vertices {
            vertex.position = (rotation * Vec3::from(vertex.position)).to_array();
            vertex.normal = (rotation * Vec3::from(vertex.normal)).to_array();
        }
    }

    /// Scale positions in place. Normals follow the inverse scale.
    pub fn scale(&mut self, scale: Vec3) {
        for vertex in &mut self.vertices {
            vertex.position = (scale * Vec3::from(vertex.position)).to_array();
            vertex.normal = (Vec3::from(vertex.normal) / scale)
                .normalize_or_zero()
                .to_array();
        }
    }

    fn add_vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let index = self.vertex_count();
        self.vertices
            .push(ShapeVertex::new(position.to_array(), normal.to_array(), uv));
        index
    }

    fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }
}

/// Which segment boundaries carry an edge marker.
#[derive(Debug, Clone, Copy)]
struct Splits {
    /// Segments per split; zero when splitting is disabled.
    per_split: u32,
    offset: u32,
}

impl Splits {
    fn new(segments: u32, uv_splits: u32, offset: u32) -> Result<Self, MeshError> {
        if uv_splits == 0 {
            return Ok(Self {
                per_split: 0,
                offset,
            });
        }
        if segments % uv_splits != 0 {
            return Err(MeshError::UvSplitsMustDivide {
                tessellation: segments,
                uv_splits,
            });
        }
        Ok(Self {
            per_split: segments / uv_splits,
            offset,
        })
    }

    fn is_active(&self) -> bool {
        self.per_split > 0
    }

    /// Parity of the split line at `boundary`, if it is one.
    fn marker(&self, boundary: u32) -> Option<usize> {
        if self.per_split == 0 {
            return None;
        }
        let shifted = boundary + self.offset;
        if shifted % self.per_split != 0 {
            return None;
        }
        Some(((shifted / self.per_split) % 2) as usize)
    }

    fn uv(&self, boundary: u32) -> f32 {
        self.marker(boundary)
            .map_or(UV_INTERIOR, |parity| EDGE_VALUES[parity])
    }
}

/// Interior apex plus one marked copy per edge value.
#[derive(Debug, Clone, Copy)]
struct Apex {
    plain: u32,
    marked: Option<[u32; 2]>,
}

impl Apex {
    fn add(mesh: &mut MeshData, position: Vec3, normal: Vec3, splits: &Splits) -> Self {
        let plain = mesh.add_vertex(position, normal, [UV_INTERIOR, UV_INTERIOR]);
        let marked = splits.is_active().then(|| {
            EDGE_VALUES.map(|value| mesh.add_vertex(position, normal, [value, UV_INTERIOR]))
        });
        Self { plain, marked }
    }

    /// The apex copy for the fan triangle spanning `segment..segment + 1`.
    fn for_segment(&self, splits: &Splits, segment: u32, segments: u32) -> u32 {
        let marker = splits
            .marker(segment)
            .or_else(|| splits.marker((segment + 1) % segments));
        match (self.marked, marker) {
            (Some(marked), Some(parity)) => marked[parity],
            _ => self.plain,
        }
    }
}

fn clamp_tessellation(tessellation: u32, shape: &str) -> u32 {
    if tessellation < 3 {
        log::debug!("{shape}: tessellation {tessellation} raised to 3");
        3
    } else {
        tessellation
    }
}

/// Generate a filled circle in the XZ plane as a triangle fan.
///
/// The circle faces +Y, or -Y when `flipped`. With `uv_splits > 0`, every
/// `tessellation / uv_splits`-th spoke (shifted by `uv_offset`) is marked as
/// a wireframe edge, and the center is duplicated for the triangles along
/// those spokes. The rim is always an edge.
///
/// # Errors
///
/// [`MeshError::UvSplitsMustDivide`] when `uv_splits` does not divide the
/// (clamped) tessellation.
pub fn generate_circle(
    radius: f32,
    tessellation: u32,
    uv_splits: u32,
    y_offset: f32,
    flipped: bool,
    uv_offset: u32,
) -> Result<MeshData, MeshError> {
    circle_fan(radius, tessellation, uv_splits, y_offset, flipped, uv_offset, None)
}

/// Circle fan whose center may be lifted to `apex_y`, turning it into a cone side.
fn circle_fan(
    radius: f32,
    tessellation: u32,
    uv_splits: u32,
    y_offset: f32,
    flipped: bool,
    uv_offset: u32,
    apex_y: Option<f32>,
) -> Result<MeshData, MeshError> {
    let tessellation = clamp_tessellation(tessellation, "circle");
    let splits = Splits::new(tessellation, uv_splits, uv_offset)?;
    let face_normal = if flipped { Vec3::NEG_Y } else { Vec3::Y };

    let mut mesh = MeshData::new();
    let center = Vec3::new(0.0, apex_y.unwrap_or(y_offset), 0.0);
    let apex = Apex::add(&mut mesh, center, face_normal, &splits);

    let first_rim = mesh.vertex_count();
    for i in 0..tessellation {
        let angle = i as f32 * TAU / tessellation as f32;
        let (sin, cos) = angle.sin_cos();
        let normal = match apex_y {
            Some(apex_y) => {
                let height = apex_y - y_offset;
                Vec3::new(cos * height, radius, sin * height).normalize_or_zero()
            }
            None => face_normal,
        };
        mesh.add_vertex(
            Vec3::new(cos * radius, y_offset, sin * radius),
            normal,
            [splits.uv(i), UV_EDGE_HIGH],
        );
    }

    // Built facing -Y; the final reversal turns it to +Y.
    for i in 0..tessellation {
        let next = (i + 1) % tessellation;
        let center = apex.for_segment(&splits, i, tessellation);
        mesh.add_triangle(center, first_rim + i, first_rim + next);
    }
    if !flipped {
        mesh.indices.reverse();
    }

    Ok(mesh)
}

/// One latitude row of a sphere-like grid.
#[derive(Debug, Clone, Copy)]
struct Row {
    y: f32,
    radius: f32,
    /// `(cos(latitude), sin(latitude))` for normals.
    normal: (f32, f32),
    v: f32,
    pole: bool,
}

/// Latitude/longitude grid shared by spheres and capsules.
///
/// Rows go from the bottom pole upward and triangles are emitted in the same
/// order, so with an even `vertical` the first half of the indices covers
/// exactly the lower hemisphere. A non-zero `body_length` splits the grid at
/// the equator and inserts a cylindrical band of that length.
fn lat_long(
    radius: f32,
    vertical: u32,
    horizontal: u32,
    uv_splits: u32,
    body_length: f32,
) -> Result<MeshData, MeshError> {
    let vertical = vertical.max(2);
    let horizontal = clamp_tessellation(horizontal, "sphere");
    let columns = Splits::new(horizontal, uv_splits, 0)?;
    let rings = Splits::new(vertical, uv_splits, 0)?;
    let half_body = body_length * 0.5;

    let mut rows = Vec::with_capacity(vertical as usize + 2);
    for r in 0..=vertical {
        let latitude = -FRAC_PI_2 + PI * r as f32 / vertical as f32;
        let (sin, cos) = latitude.sin_cos();
        let pole = r == 0 || r == vertical;
        let row = Row {
            y: sin * radius,
            radius: if pole { 0.0 } else { cos * radius },
            normal: (cos, sin),
            v: if pole { UV_INTERIOR } else { rings.uv(r) },
            pole,
        };

        if body_length > 0.0 && r * 2 == vertical {
            rows.push(Row {
                y: row.y - half_body,
                v: UV_EDGE_LOW,
                ..row
            });
            rows.push(Row {
                y: row.y + half_body,
                v: UV_EDGE_HIGH,
                ..row
            });
        } else if body_length > 0.0 && r * 2 < vertical {
            rows.push(Row {
                y: row.y - half_body,
                ..row
            });
        } else if body_length > 0.0 {
            rows.push(Row {
                y: row.y + half_body,
                ..row
            });
        } else {
            rows.push(row);
        }
    }

    let mut mesh = MeshData::new();
    let mut row_starts = Vec::with_capacity(rows.len());
    let mut apexes = Vec::with_capacity(rows.len());
    for row in &rows {
        if row.pole {
            let normal = Vec3::new(0.0, row.normal.1, 0.0);
            apexes.push(Some(Apex::add(
                &mut mesh,
                Vec3::new(0.0, row.y, 0.0),
                normal,
                &columns,
            )));
            row_starts.push(0);
            continue;
        }
        apexes.push(None);
        row_starts.push(mesh.vertex_count());
        for j in 0..horizontal {
            let angle = j as f32 * TAU / horizontal as f32;
            let (sin, cos) = angle.sin_cos();
            let normal = Vec3::new(row.normal.0 * cos, row.normal.1, row.normal.0 * sin);
            mesh.add_vertex(
                Vec3::new(cos * row.radius, row.y, sin * row.radius),
                normal,
                [columns.uv(j), row.v],
            );
        }
    }

    for band in 0..rows.len() - 1 {
        let (lower, upper) = (band, band + 1);
        for j in 0..horizontal {
            let next = (j + 1) % horizontal;
            match (apexes[lower], apexes[upper]) {
                (Some(pole), _) => {
                    let p = pole.for_segment(&columns, j, horizontal);
                    let start = row_starts[upper];
                    mesh.add_triangle(p, start + j, start + next);
                }
                (_, Some(pole)) => {
                    let p = pole.for_segment(&columns, j, horizontal);
                    let start = row_starts[lower];
                    mesh.add_triangle(p, start + next, start + j);
                }
                (None, None) => {
                    let a = row_starts[lower] + j;
                    let b = row_starts[lower] + next;
                    let c = row_starts[upper] + j;
                    let d = row_starts[upper] + next;
                    mesh.add_triangle(a, c, d);
                    mesh.add_triangle(a, d, b);
                }
            }
        }
    }

    Ok(mesh)
}

/// Generate a UV sphere centered at the origin.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `vertical_segments` - Number of latitudinal bands, pole to pole
/// * `horizontal_segments` - Number of longitudinal segments (around the equator)
/// * `uv_splits` - Number of marked meridians and parallels; must divide both segment counts
///
/// Poles are single fan points. Triangles are ordered bottom-up; see
/// [`MeshCache`](super::MeshCache) for why that matters.
pub fn generate_sphere(
    radius: f32,
    vertical_segments: u32,
    horizontal_segments: u32,
    uv_splits: u32,
) -> Result<MeshData, MeshError> {
    lat_long(radius, vertical_segments, horizontal_segments, uv_splits, 0.0)
}

/// Generate a capsule along Y: a cylindrical body of `length` capped by two
/// hemispheres of `radius`.
///
/// # Errors
///
/// [`MeshError::OddVerticalSegments`] when `vertical_segments` is odd, since
/// the body is inserted at the equator ring.
pub fn generate_capsule(
    length: f32,
    radius: f32,
    vertical_segments: u32,
    horizontal_segments: u32,
    uv_splits: u32,
) -> Result<MeshData, MeshError> {
    if vertical_segments % 2 != 0 {
        return Err(MeshError::OddVerticalSegments {
            shape: "capsule",
            segments: vertical_segments,
        });
    }
    lat_long(radius, vertical_segments, horizontal_segments, uv_splits, length)
}

/// Generate a closed cylinder along Y, centered at the origin.
///
/// Top and bottom caps come from [`generate_circle`]; the side is one quad per
/// segment, with its bottom and top borders and every split line marked.
pub fn generate_cylinder(
    height: f32,
    radius: f32,
    tessellation: u32,
    uv_splits: u32,
) -> Result<MeshData, MeshError> {
    let tessellation = clamp_tessellation(tessellation, "cylinder");
    let splits = Splits::new(tessellation, uv_splits, 0)?;
    let half = height * 0.5;

    let mut mesh = generate_circle(radius, tessellation, uv_splits, half, false, 0)?;
    mesh.append(generate_circle(radius, tessellation, uv_splits, -half, true, 0)?);

    let base = mesh.vertex_count();
    for j in 0..tessellation {
        let angle = j as f32 * TAU / tessellation as f32;
        let (sin, cos) = angle.sin_cos();
        let normal = Vec3::new(cos, 0.0, sin);
        let u = splits.uv(j);
        mesh.add_vertex(
            Vec3::new(cos * radius, -half, sin * radius),
            normal,
            [u, UV_EDGE_LOW],
        );
        mesh.add_vertex(
            Vec3::new(cos * radius, half, sin * radius),
            normal,
            [u, UV_EDGE_HIGH],
        );
    }
    for j in 0..tessellation {
        let next = (j + 1) % tessellation;
        let a = base + j * 2;
        let b = base + next * 2;
        mesh.add_triangle(a, a + 1, b + 1);
        mesh.add_triangle(a, b + 1, b);
    }

    Ok(mesh)
}

/// Generate a cone along Y: base circle at `-height / 2`, tip at `+height / 2`.
///
/// The side is a circle fan whose center is lifted to the tip, so it marks
/// its split lines exactly like [`generate_circle`].
pub fn generate_cone(
    height: f32,
    radius: f32,
    tessellation: u32,
    uv_splits: u32,
) -> Result<MeshData, MeshError> {
    let half = height * 0.5;
    let mut mesh = circle_fan(radius, tessellation, uv_splits, -half, false, 0, Some(half))?;
    mesh.append(generate_circle(radius, tessellation, uv_splits, -half, true, 0)?);
    Ok(mesh)
}

/// Generate a plane on the XZ plane, facing +Y.
///
/// UV coordinates go from (0,0) to (1,1), so all four borders are edges.
pub fn generate_plane(width: f32, depth: f32) -> MeshData {
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let mut mesh = MeshData::new();
    mesh.add_vertex(Vec3::new(-hw, 0.0, hd), Vec3::Y, [0.0, 0.0]);
    mesh.add_vertex(Vec3::new(hw, 0.0, hd), Vec3::Y, [1.0, 0.0]);
    mesh.add_vertex(Vec3::new(hw, 0.0, -hd), Vec3::Y, [1.0, 1.0]);
    mesh.add_vertex(Vec3::new(-hw, 0.0, -hd), Vec3::Y, [0.0, 1.0]);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

/// Generate a quad on the XY plane, facing +Z.
///
/// This is [`generate_plane`] turned upright.
pub fn generate_quad(width: f32, height: f32) -> MeshData {
    let mut mesh = generate_plane(width, height);
    mesh.rotate(Quat::from_rotation_x(FRAC_PI_2));
    mesh
}

/// Generate an axis-aligned cube centered at the origin.
///
/// 24 vertices (4 per face, flat normals) and 36 indices.
pub fn generate_cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let mut mesh = MeshData::new();

    let mut add_face = |corners: [Vec3; 4], normal: Vec3| {
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let first = mesh.vertex_count();
        for (corner, uv) in corners.into_iter().zip(uvs) {
            mesh.add_vertex(corner, normal, uv);
        }
        mesh.add_triangle(first, first + 1, first + 2);
        mesh.add_triangle(first, first + 2, first + 3);
    };

    // Corners are listed counter-clockwise as seen from outside.
    add_face(
        [
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ],
        Vec3::Z,
    );
    add_face(
        [
            Vec3::new(h, -h, -h),
            Vec3::new(-h, -h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(h, h, -h),
        ],
        Vec3::NEG_Z,
    );
    add_face(
        [
            Vec3::new(-h, h, h),
            Vec3::new(h, h, h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
        ],
        Vec3::Y,
    );
    add_face(
        [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, -h, h),
            Vec3::new(-h, -h, h),
        ],
        Vec3::NEG_Y,
    );
    add_face(
        [
            Vec3::new(h, -h, h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(h, h, h),
        ],
        Vec3::X,
    );
    add_face(
        [
            Vec3::new(-h, -h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(-h, h, h),
            Vec3::new(-h, h, -h),
        ],
        Vec3::NEG_X,
    );

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(mesh: &MeshData, index: u32) -> Vec3 {
        Vec3::from(mesh.vertices[index as usize].position)
    }

    /// Every triangle of a convex mesh containing the origin must face away from it.
    fn assert_outward(mesh: &MeshData, shape: &str) {
        for tri in mesh.indices.chunks(3) {
            let a = position(mesh, tri[0]);
            let b = position(mesh, tri[1]);
            let c = position(mesh, tri[2]);
            let normal = (b - a).cross(c - a);
            if normal.length_squared() < 1e-12 {
                continue;
            }
            let center = (a + b + c) / 3.0;
            assert!(
                normal.dot(center) > 0.0,
                "{shape}: triangle {tri:?} faces inward"
            );
        }
    }

    fn assert_indices_in_range(mesh: &MeshData) {
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| i < mesh.vertex_count()));
    }

    #[test]
    fn test_circle_uv_splits_must_divide_tessellation() {
        assert_eq!(
            generate_circle(0.5, 16, 5, 0.0, false, 0),
            Err(MeshError::UvSplitsMustDivide {
                tessellation: 16,
                uv_splits: 5
            })
        );
        assert!(generate_circle(0.5, 16, 4, 0.0, false, 0).is_ok());
        assert!(generate_circle(0.5, 12, 7, 0.0, false, 0).is_err());
        assert!(generate_circle(0.5, 12, 24, 0.0, false, 0).is_err());
        assert!(generate_circle(0.5, 12, 12, 0.0, false, 0).is_ok());
    }

    #[test]
    fn test_circle_flip_reverses_indices() {
        let front = generate_circle(0.5, 16, 0, 0.0, false, 0).unwrap();
        let back = generate_circle(0.5, 16, 0, 0.0, true, 0).unwrap();
        let mut reversed = front.indices.clone();
        reversed.reverse();
        assert_eq!(reversed, back.indices);
    }

    #[test]
    fn test_circle_counts() {
        let plain = generate_circle(0.5, 16, 0, 0.0, false, 0).unwrap();
        assert_eq!(plain.vertex_count(), 17);
        assert_eq!(plain.index_count(), 48);

        // Two marked copies of the center
        let split = generate_circle(0.5, 16, 4, 0.0, false, 0).unwrap();
        assert_eq!(split.vertex_count(), 19);
        assert_eq!(split.index_count(), 48);
        assert_indices_in_range(&split);
    }

    #[test]
    fn test_circle_tessellation_clamped() {
        let mesh = generate_circle(1.0, 1, 0, 0.0, false, 0).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 9);
    }

    #[test]
    fn test_circle_faces_up_unless_flipped() {
        let up = generate_circle(1.0, 8, 0, 0.0, false, 0).unwrap();
        let tri = &up.indices[0..3];
        let n = (position(&up, tri[1]) - position(&up, tri[0]))
            .cross(position(&up, tri[2]) - position(&up, tri[0]));
        assert!(n.y > 0.0);

        let down = generate_circle(1.0, 8, 0, 0.0, true, 0).unwrap();
        let tri = &down.indices[0..3];
        let n = (position(&down, tri[1]) - position(&down, tri[0]))
            .cross(position(&down, tri[2]) - position(&down, tri[0]));
        assert!(n.y < 0.0);
    }

    #[test]
    fn test_circle_split_spokes_are_marked() {
        let mesh = generate_circle(0.5, 8, 2, 0.0, false, 0).unwrap();
        // Rim starts after the center and its two marked copies
        let rim_u: Vec<f32> = mesh.vertices[3..].iter().map(|v| v.uv[0]).collect();
        assert_eq!(
            rim_u,
            vec![
                UV_EDGE_LOW,
                UV_INTERIOR,
                UV_INTERIOR,
                UV_INTERIOR,
                UV_EDGE_HIGH,
                UV_INTERIOR,
                UV_INTERIOR,
                UV_INTERIOR
            ]
        );
        assert!(mesh.vertices[3..].iter().all(|v| v.uv[1] == UV_EDGE_HIGH));
    }

    #[test]
    fn test_uv_offset_shifts_split_lines() {
        let mesh = generate_circle(0.5, 8, 2, 0.0, false, 1).unwrap();
        assert_eq!(mesh.vertices[3].uv[0], UV_INTERIOR);
        assert_eq!(mesh.vertices[3 + 3].uv[0], UV_EDGE_HIGH);
    }

    #[test]
    fn test_sphere_counts() {
        let mesh = generate_sphere(1.0, 8, 8, 0).unwrap();
        // 2 poles + 7 rings * 8
        assert_eq!(mesh.vertex_count(), 2 + 7 * 8);
        // 2 fans * 8 + 6 bands * 16 triangles
        assert_eq!(mesh.index_count(), (2 * 8 + 6 * 16) * 3);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_sphere_first_half_is_lower_hemisphere() {
        let mesh = generate_sphere(0.5, 16, 16, 4).unwrap();
        let half = mesh.indices.len() / 2;
        assert_eq!(half % 3, 0);
        for &index in &mesh.indices[..half] {
            assert!(position(&mesh, index).y <= 1e-5);
        }
        assert!(
            mesh.indices[half..]
                .iter()
                .any(|&index| position(&mesh, index).y > 0.1)
        );
    }

    #[test]
    fn test_sphere_uv_splits_checked() {
        assert!(generate_sphere(0.5, 16, 16, 5).is_err());
        assert!(generate_sphere(0.5, 12, 16, 8).is_err());
        assert!(generate_sphere(0.5, 16, 16, 8).is_ok());
    }

    #[test]
    fn test_capsule_requires_even_rings() {
        assert_eq!(
            generate_capsule(1.0, 0.5, 7, 8, 0),
            Err(MeshError::OddVerticalSegments {
                shape: "capsule",
                segments: 7
            })
        );
    }

    #[test]
    fn test_capsule_has_body_band() {
        let sphere = generate_sphere(0.5, 8, 8, 0).unwrap();
        let capsule = generate_capsule(1.0, 0.5, 8, 8, 0).unwrap();
        assert_eq!(capsule.vertex_count(), sphere.vertex_count() + 8);
        assert_eq!(capsule.index_count(), sphere.index_count() + 8 * 6);
        let top = capsule
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((top - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_closed_shapes_face_outward() {
        assert_outward(&generate_sphere(0.5, 16, 16, 4).unwrap(), "sphere");
        assert_outward(&generate_capsule(1.0, 0.5, 8, 8, 2).unwrap(), "capsule");
        assert_outward(&generate_cylinder(1.0, 0.5, 16, 4).unwrap(), "cylinder");
        assert_outward(&generate_cone(1.0, 0.5, 16, 4).unwrap(), "cone");
        assert_outward(&generate_cube(1.0), "cube");
    }

    #[test]
    fn test_cylinder_counts() {
        let mesh = generate_cylinder(1.0, 0.5, 16, 0).unwrap();
        // 2 caps (17 each) + 32 side vertices
        assert_eq!(mesh.vertex_count(), 17 * 2 + 32);
        assert_eq!(mesh.index_count(), 48 * 2 + 16 * 6);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_cone_tip() {
        let mesh = generate_cone(1.0, 0.5, 16, 4).unwrap();
        assert_eq!(mesh.vertices[0].position, [0.0, 0.5, 0.0]);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_quad_faces_z() {
        let mesh = generate_quad(1.0, 1.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        for vertex in &mesh.vertices {
            assert!(vertex.position[2].abs() < 1e-6);
            assert!((vertex.normal[2] - 1.0).abs() < 1e-6);
        }
        let origin = position(&mesh, 0);
        let n = (position(&mesh, 1) - origin).cross(position(&mesh, 2) - origin);
        assert!(n.z > 0.0);
    }

    #[test]
    fn test_cube_counts() {
        let mesh = generate_cube(1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
    }
}
