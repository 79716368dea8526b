/// Planar texture coordinate generation
///
/// Both modes project onto the plane perpendicular to the dominant axis of a
/// normal. Per-face mode gives every triangle its own `[0,1]` tile; global mode
/// projects the whole mesh once along the dominant axis of its summed normal.
use nalgebra::{Point3, Vector2, Vector3};

use crate::math::{face_cross, normalize_or_zero, EPSILON};

/// Coordinate axis a normal is most aligned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// How texture coordinates are laid out over a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvMode {
    PerFace,
    Global,
}

/// Largest absolute component; ties resolve X before Y before Z.
pub fn dominant_axis(n: &Vector3<f32>) -> Axis {
    let abs = n.abs();
    let mut axis = Axis::X;
    let mut best = abs.x;
    if abs.y > best {
        axis = Axis::Y;
        best = abs.y;
    }
    if abs.z > best {
        axis = Axis::Z;
    }
    axis
}

/// Drop the `axis` component: X keeps (y, z), Y keeps (x, z), Z keeps (x, y).
pub fn project(p: &Point3<f32>, axis: Axis) -> Vector2<f32> {
    match axis {
        Axis::X => Vector2::new(p.y, p.z),
        Axis::Y => Vector2::new(p.x, p.z),
        Axis::Z => Vector2::new(p.x, p.y),
    }
}

/// Generate one UV per position using `mode`.
pub fn generate(positions: &[Point3<f32>], indices: &[u32], mode: UvMode) -> Vec<Vector2<f32>> {
    match mode {
        UvMode::PerFace => project_per_face(positions, indices),
        UvMode::Global => project_global(positions, indices),
    }
}

/// Each triangle is projected along its own dominant axis and stretched over `[0,1]²`.
///
/// Corners of degenerate triangles keep `(0, 0)`.
pub fn project_per_face(positions: &[Point3<f32>], indices: &[u32]) -> Vec<Vector2<f32>> {
    let mut uvs = vec![Vector2::zeros(); positions.len()];

    for tri in indices.chunks_exact(3) {
        let corners = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let [a, b, c] = corners.map(|i| positions[i]);

        let normal = normalize_or_zero(&face_cross(&a, &b, &c));
        if normal == Vector3::zeros() {
            continue;
        }

        let axis = dominant_axis(&normal);
        let projected = [a, b, c].map(|p| project(&p, axis));
        let (min, extent) = rectangle(projected.iter());

        for (&index, uv) in corners.iter().zip(projected.iter()) {
            uvs[index] = (uv - min).component_div(&extent);
        }
    }
    uvs
}

/// One projection over the whole mesh, rescaled against its overall rectangle and clamped.
pub fn project_global(positions: &[Point3<f32>], indices: &[u32]) -> Vec<Vector2<f32>> {
    let mut uvs = vec![Vector2::zeros(); positions.len()];

    // Unnormalized cross products weight each face by its area
    let mut sum = Vector3::zeros();
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| positions[i as usize]);
        sum += face_cross(&a, &b, &c);
    }
    let axis = if sum.norm() < EPSILON {
        Axis::Z
    } else {
        dominant_axis(&sum)
    };

    let projected: Vec<Vector2<f32>> = positions.iter().map(|p| project(p, axis)).collect();
    let (min, extent) = rectangle(projected.iter());

    for tri in indices.chunks_exact(3) {
        let corners = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let [a, b, c] = corners.map(|i| positions[i]);
        if normalize_or_zero(&face_cross(&a, &b, &c)) == Vector3::zeros() {
            continue;
        }
        for index in corners {
            let uv = (projected[index] - min).component_div(&extent);
            uvs[index] = uv.map(|t| t.clamp(0.0, 1.0));
        }
    }
    uvs
}

/// Minimum corner and extent of a set of 2D points, extent floored to `EPSILON`.
fn rectangle<'a>(points: impl Iterator<Item = &'a Vector2<f32>>) -> (Vector2<f32>, Vector2<f32>) {
    let mut min = Vector2::repeat(f32::INFINITY);
    let mut max = Vector2::repeat(f32::NEG_INFINITY);
    for p in points {
        min = min.inf(p);
        max = max.sup(p);
    }
    if !min.x.is_finite() {
        return (Vector2::zeros(), Vector2::repeat(EPSILON));
    }
    let extent = (max - min).map(|e| e.max(EPSILON));
    (min, extent)
}
