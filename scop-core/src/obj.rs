/// Wavefront OBJ reader for the `v` / `f` subset
use nom::{
    bytes::complete::take_till,
    character::complete::{char, space0, space1, u64 as parse_index},
    combinator::opt,
    multi::many0,
    number::complete::float,
    sequence::{pair, preceded, terminated},
    IResult,
};
use nalgebra::Point3;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::geometry::Mesh;
use crate::resource::read_with_fallback;

/// A parsed model: the shared-vertex mesh and its per-face duplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjModel {
    pub mesh: Mesh,
    pub per_face: Mesh,
}

impl ObjModel {
    /// Wrap an existing mesh, deriving its per-face duplicate.
    pub fn from_mesh(mesh: Mesh) -> Self {
        let per_face = mesh.per_face();
        Self { mesh, per_face }
    }
}

/// Read and parse a `.obj` file.
pub fn load_obj(path: impl AsRef<Path>) -> Result<ObjModel> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some("obj") {
        return Err(MeshError::WrongExtension(path.to_path_buf()));
    }

    let (bytes, _) = read_with_fallback(path).map_err(|(failed, e)| match e.kind() {
        ErrorKind::NotFound => MeshError::NotFound(path.to_path_buf()),
        _ => MeshError::Io(failed, e),
    })?;

    // Invalid UTF-8 is replaced, not rejected
    let lines: Vec<Cow<str>> = bytes
        .split(|&b| b == b'\n')
        .map(|line| String::from_utf8_lossy(line.strip_suffix(b"\r").unwrap_or(line)))
        .collect();
    parse_lines(lines.iter().map(|line| &**line))
}

/// Parse OBJ text already in memory.
pub fn parse_obj_str(input: &str) -> Result<ObjModel> {
    parse_lines(input.lines())
}

fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Result<ObjModel> {
    let mut positions = Vec::new();
    let mut faces: Vec<(usize, Vec<u64>)> = Vec::new();

    for (number, line) in lines.enumerate() {
        let line = line.trim_start();
        if let Ok((_, position)) = vertex_line(line) {
            positions.push(position);
        } else if let Ok((_, corners)) = face_line(line) {
            faces.push((number + 1, corners));
        }
    }

    let triangles: usize = faces.iter().map(|(_, c)| c.len().saturating_sub(2)).sum();
    if positions.is_empty() || triangles == 0 {
        return Err(MeshError::EmptyModel);
    }

    let vertex_count = positions.len();
    let mut mesh = Mesh::with_capacity(vertex_count, triangles);
    mesh.positions = positions;

    let mut corners = Vec::new();
    // Faces with fewer than three corners draw nothing, so their indices are never read
    for (line, raw) in faces.into_iter().filter(|(_, raw)| raw.len() >= 3) {
        corners.clear();
        for one_based in raw {
            if one_based == 0 || one_based > vertex_count as u64 {
                return Err(MeshError::IndexOutOfRange {
                    line,
                    index: one_based,
                    vertex_count,
                });
            }
            corners.push((one_based - 1) as u32);
        }
        mesh.add_polygon(&corners);
    }

    Ok(ObjModel::from_mesh(mesh))
}

/// `v x y z`; missing or malformed components read as 0.
fn vertex_line(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = pair(char('v'), space1)(input)?;
    let (input, x) = component(input)?;
    let (input, y) = component(input)?;
    let (input, z) = component(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn component(input: &str) -> IResult<&str, f32> {
    let (input, value) = opt(preceded(space0, float))(input)?;
    Ok((input, value.unwrap_or(0.0)))
}

/// `f i0 i1 ... in`; reading stops at the first token without a leading index.
fn face_line(input: &str) -> IResult<&str, Vec<u64>> {
    let (input, _) = pair(char('f'), space1)(input)?;
    many0(terminated(preceded(space0, parse_index), opt(attribute_refs)))(input)
}

/// The `/vt/vn` tail of a corner reference, which only the position index matters for.
fn attribute_refs(input: &str) -> IResult<&str, &str> {
    preceded(char('/'), take_till(|c: char| c.is_whitespace()))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const QUAD: &str = "\
# a unit quad
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1 2 3 4
";

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scop-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_quad_fans_into_two_triangles() {
        let model = parse_obj_str(QUAD).unwrap();
        assert_eq!(model.mesh.vertex_count(), 4);
        assert_eq!(model.mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_per_face_variant_is_built() {
        let model = parse_obj_str(QUAD).unwrap();
        assert_eq!(model.per_face.vertex_count(), 6);
        assert_eq!(model.per_face.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(model.per_face.positions[4], model.mesh.positions[2]);
    }

    #[test]
    fn test_whitespace_and_attribute_refs() {
        let text = "  v   1.5\t-2   3e1  \nv 0 0 0\nv 0 1 0\n\tf 1/4/1  2//7 3/1\n";
        let model = parse_obj_str(text).unwrap();
        assert_eq!(model.mesh.positions[0], Point3::new(1.5, -2.0, 30.0));
        assert_eq!(model.mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_malformed_components_default_to_zero() {
        let text = "v 1 oops\nv 0 1 0\nv 0 0 1\nf 1 2 3\n";
        let model = parse_obj_str(text).unwrap();
        assert_eq!(model.mesh.positions[0], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_face_reading_stops_at_bad_token() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 x 3 4\nf 1 2 3\n";
        let model = parse_obj_str(text).unwrap();
        assert_eq!(model.mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_short_faces_emit_nothing() {
        let text = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        assert!(matches!(parse_obj_str(text), Err(MeshError::EmptyModel)));

        // A two-corner face is skipped even when it points past the vertex list
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 9\n";
        let model = parse_obj_str(text).unwrap();
        assert_eq!(model.mesh.triangle_count(), 1);
        assert_eq!(model.mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(parse_obj_str(""), Err(MeshError::EmptyModel)));
        assert!(matches!(
            parse_obj_str("v 0 0 0\nv 1 1 1\n"),
            Err(MeshError::EmptyModel)
        ));
    }

    #[test]
    fn test_out_of_range_index_is_fatal() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n";
        match parse_obj_str(text) {
            Err(MeshError::IndexOutOfRange {
                line,
                index,
                vertex_count,
            }) => {
                assert_eq!((line, index, vertex_count), (4, 4, 3));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let zero = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(matches!(
            parse_obj_str(zero),
            Err(MeshError::IndexOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_other_statements_are_ignored() {
        let text = "mtllib x.mtl\nvt 0.5 0.5\nvn 0 0 1\nv 0 0 0\nv 1 0 0\nv 0 1 0\ns off\nusemtl m\nf 1 2 3\n";
        let model = parse_obj_str(text).unwrap();
        assert_eq!(model.mesh.vertex_count(), 3);
        assert_eq!(model.mesh.triangle_count(), 1);
    }

    #[test]
    fn test_load_rejects_wrong_extension() {
        assert!(matches!(
            load_obj("model.stl"),
            Err(MeshError::WrongExtension(_))
        ));
        assert!(matches!(load_obj("model"), Err(MeshError::WrongExtension(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("does-not-exist.obj");
        assert!(matches!(load_obj(&path), Err(MeshError::NotFound(_))));
    }

    #[test]
    fn test_load_is_deterministic() {
        let path = temp_path("quad.obj");
        fs::write(&path, QUAD).unwrap();

        let first = load_obj(&path).unwrap();
        let second = load_obj(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, parse_obj_str(QUAD).unwrap());
    }

    #[test]
    fn test_load_tolerates_non_utf8_comments() {
        let path = temp_path("latin1.obj");
        let mut bytes = b"# cr\xe9\xe9 par Blender\r\n".to_vec();
        bytes.extend_from_slice(QUAD.replace('\n', "\r\n").as_bytes());
        fs::write(&path, &bytes).unwrap();

        let model = load_obj(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(model, parse_obj_str(QUAD).unwrap());
    }
}
