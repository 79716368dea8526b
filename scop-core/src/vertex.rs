/// Interleaved vertex buffers ready for upload
use crate::geometry::Mesh;
use crate::normals::vertex_normals;
use crate::obj::ObjModel;
use crate::uv::{self, UvMode};

/// One interleaved vertex: position, texture coordinate, normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

/// Vertex and index data for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl GpuMesh {
    /// Attach generated UVs and accumulated normals to every position of `mesh`.
    ///
    /// On a per-face mesh no position is shared, so the normals come out flat.
    pub fn build(mesh: &Mesh, mode: UvMode) -> Self {
        Self {
            vertices: interleave(mesh, mode),
            indices: mesh.indices.clone(),
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                &self.vertices[t[0] as usize],
                &self.vertices[t[1] as usize],
                &self.vertices[t[2] as usize],
            ]
        })
    }
}

pub fn interleave(mesh: &Mesh, mode: UvMode) -> Vec<Vertex> {
    let uvs = uv::generate(&mesh.positions, &mesh.indices, mode);
    let normals = vertex_normals(&mesh.positions, &mesh.indices);

    mesh.positions
        .iter()
        .zip(uvs.iter().zip(normals.iter()))
        .map(|(p, (uv, n))| Vertex {
            position: [p.x, p.y, p.z],
            tex_coord: [uv.x, uv.y],
            normal: [n.x, n.y, n.z],
        })
        .collect()
}

/// Both shading variants of a model: shared vertices with one global UV
/// projection, and per-face vertices with a UV tile per triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBuffers {
    pub shared: GpuMesh,
    pub per_face: GpuMesh,
}

impl SceneBuffers {
    pub fn build(model: &ObjModel) -> Self {
        Self {
            shared: GpuMesh::build(&model.mesh, UvMode::Global),
            per_face: GpuMesh::build(&model.per_face, UvMode::PerFace),
        }
    }

    pub fn select(&self, per_face: bool) -> &GpuMesh {
        if per_face {
            &self.per_face
        } else {
            &self.shared
        }
    }
}
