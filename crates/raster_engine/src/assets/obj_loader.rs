//! OBJ-subset loader for mesh files
//!
//! Supports the three record types the renderer consumes: `v x y z` vertex
//! positions, `vn x y z` vertex normals, and `f` triangle faces in either
//! `a b c` or `a//an b//bn c//cn` form. Indices are 1-based as in the OBJ
//! format; the loaded mesh keeps that convention with a reserved dummy entry
//! in slot 0 of each list.

use crate::foundation::math::Vec3;
use crate::render::mesh::{Face, Mesh};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Mesh file loading errors
#[derive(Error, Debug)]
pub enum ObjError {
    /// The file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A record had the right keyword but unparsable numbers
    #[error("parse error: {0}")]
    Parse(String),
    /// A record the loader does not understand, or an index out of range
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// Loader for the OBJ-subset mesh format
pub struct ObjLoader;

impl ObjLoader {
    /// Load a mesh file from disk
    ///
    /// # Errors
    /// Returns [`ObjError::Io`] when the file cannot be opened and the other
    /// variants for malformed content.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::read_obj(BufReader::new(file), path.display().to_string())
    }

    /// Parse a mesh from any buffered reader; `name` tags it for diagnostics
    ///
    /// # Errors
    /// Same contract as [`load_obj`](Self::load_obj).
    pub fn read_obj<R: BufRead>(reader: R, name: String) -> Result<Mesh, ObjError> {
        let mut mesh = Mesh::new(name);

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => mesh.vertices.push(parse_triple(&parts, "vertex")?),
                "vn" => mesh.normals.push(parse_triple(&parts, "normal")?),
                "f" => {
                    let face = parse_face(&parts)?;
                    check_face_bounds(&face, &mesh)?;
                    mesh.faces.push(face);
                }
                other => {
                    return Err(ObjError::InvalidFormat(format!(
                        "record must start with 'v', 'vn', or 'f', got '{other}'"
                    )));
                }
            }
        }

        Ok(mesh)
    }
}

fn parse_triple(parts: &[&str], what: &str) -> Result<Vec3, ObjError> {
    if parts.len() != 4 {
        return Err(ObjError::Parse(format!(
            "{what} expects 3 coordinates, got {}",
            parts.len() - 1
        )));
    }
    let mut coords = [0.0f64; 3];
    for (slot, token) in coords.iter_mut().zip(&parts[1..]) {
        *slot = token
            .parse()
            .map_err(|_| ObjError::Parse(format!("invalid {what} coordinate '{token}'")))?;
    }
    Ok(Vec3::new(coords[0], coords[1], coords[2]))
}

fn parse_face(parts: &[&str]) -> Result<Face, ObjError> {
    if parts.len() != 4 {
        return Err(ObjError::Parse(format!(
            "face expects 3 corners, got {}",
            parts.len() - 1
        )));
    }
    let mut v = [0u32; 3];
    let mut vn = [0u32; 3];
    for (i, token) in parts[1..].iter().enumerate() {
        // Either a bare vertex index or the 'v//vn' form; a missing normal
        // index is recorded as 0, the reserved dummy slot.
        let (v_str, vn_str) = match token.split_once("//") {
            Some((a, b)) => (a, Some(b)),
            None => (*token, None),
        };
        v[i] = parse_index(v_str, "vertex")?;
        if let Some(vn_str) = vn_str {
            vn[i] = parse_index(vn_str, "normal")?;
        }
    }
    Ok(Face { v, vn })
}

fn parse_index(token: &str, what: &str) -> Result<u32, ObjError> {
    token
        .parse()
        .map_err(|_| ObjError::Parse(format!("invalid {what} index '{token}'")))
}

fn check_face_bounds(face: &Face, mesh: &Mesh) -> Result<(), ObjError> {
    for &i in &face.v {
        if i == 0 || i as usize >= mesh.vertices.len() {
            return Err(ObjError::InvalidFormat(format!(
                "face vertex index {i} out of range"
            )));
        }
    }
    for &i in &face.vn {
        // 0 means "no normal" and is always in range.
        if i as usize >= mesh.normals.len() {
            return Err(ObjError::InvalidFormat(format!(
                "face normal index {i} out of range"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const EPSILON: f64 = 1e-12;

    fn read(text: &str) -> Result<Mesh, ObjError> {
        ObjLoader::read_obj(Cursor::new(text), "test.obj".to_string())
    }

    #[test]
    fn loads_vertices_normals_and_faces() {
        let mesh = read(
            "# a single triangle\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             vn 0 0 1\n\
             f 1//1 2//1 3//1\n",
        )
        .unwrap();

        assert_eq!(mesh.vertices.len(), 4); // dummy + 3
        assert_eq!(mesh.normals.len(), 2); // dummy + 1
        assert_eq!(mesh.faces.len(), 1);
        assert!(mesh.has_normals());
        assert_relative_eq!(mesh.vertices[2], Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_eq!(mesh.faces[0], Face { v: [1, 2, 3], vn: [1, 1, 1] });
    }

    #[test]
    fn faces_without_normals_use_the_dummy_slot() {
        let mesh = read("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert!(!mesh.has_normals());
        assert_eq!(mesh.faces[0], Face { v: [1, 2, 3], vn: [0, 0, 0] });
    }

    #[test]
    fn unknown_records_are_rejected() {
        assert!(matches!(
            read("vt 0.5 0.5\n"),
            Err(ObjError::InvalidFormat(_))
        ));
    }

    #[test]
    fn wrong_arity_is_a_parse_error() {
        assert!(matches!(read("v 1 2\n"), Err(ObjError::Parse(_))));
        assert!(matches!(read("v 1 2 3 4\n"), Err(ObjError::Parse(_))));
    }

    #[test]
    fn out_of_range_face_indices_are_rejected() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n";
        assert!(matches!(read(text), Err(ObjError::InvalidFormat(_))));
    }

    #[test]
    fn face_may_not_reference_the_reserved_vertex_slot() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(matches!(read(text), Err(ObjError::InvalidFormat(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            ObjLoader::load_obj("definitely/not/here.obj"),
            Err(ObjError::Io(_))
        ));
    }
}
