/// Smooth per-vertex normals
use nalgebra::{Point3, Vector3};

use crate::math::{face_normal, normalize_or_zero};

/// Sum the unit normal of every triangle into its corners, then renormalize.
///
/// Faces are not weighted by area or angle. Degenerate faces contribute
/// nothing, and vertices no triangle references stay zero.
pub fn vertex_normals(positions: &[Point3<f32>], indices: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = face_normal(&positions[i0], &positions[i1], &positions[i2]);
        normals[i0] += n;
        normals[i1] += n;
        normals[i2] += n;
    }

    for n in &mut normals {
        *n = normalize_or_zero(n);
    }
    normals
}
