/// Indexed triangle meshes
use nalgebra::Point3;

/// Triangle list over a shared position buffer.
///
/// `indices.len()` is always a multiple of 3 and every index is below
/// `positions.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Point3<f32>>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn add_vertex(&mut self, position: Point3<f32>) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Fan-triangulate a polygon around its first corner: `n` corners give `n - 2` triangles.
    pub fn add_polygon(&mut self, corners: &[u32]) {
        if corners.len() < 3 {
            return;
        }
        let first = corners[0];
        for pair in corners[1..].windows(2) {
            self.add_triangle(first, pair[0], pair[1]);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Give every triangle its own copy of its three corners.
    ///
    /// Index `k` of the result refers to position `k`, so attributes computed
    /// on it are discontinuous across faces.
    pub fn per_face(&self) -> Self {
        let mut mesh = Self::with_capacity(self.indices.len(), self.triangle_count());
        for &index in &self.indices {
            let next = mesh.add_vertex(self.positions[index as usize]);
            mesh.indices.push(next);
        }
        mesh
    }

    /// Axis-aligned cube centered on the origin, two triangles per side.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);
        for &(x, y, z) in &[
            (-h, -h, -h),
            (h, -h, -h),
            (h, h, -h),
            (-h, h, -h),
            (-h, -h, h),
            (h, -h, h),
            (h, h, h),
            (-h, h, h),
        ] {
            mesh.add_vertex(Point3::new(x, y, z));
        }

        // Quads wound counter-clockwise seen from outside
        mesh.add_polygon(&[4, 5, 6, 7]); // front
        mesh.add_polygon(&[1, 0, 3, 2]); // back
        mesh.add_polygon(&[3, 7, 6, 2]); // top
        mesh.add_polygon(&[0, 1, 5, 4]); // bottom
        mesh.add_polygon(&[1, 2, 6, 5]); // right
        mesh.add_polygon(&[0, 4, 7, 3]); // left
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
