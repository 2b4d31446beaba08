//! Mesh representation for the software pipeline
//!
//! Meshes are pure data: vertex and normal lists plus indexed triangle faces.
//! The lists keep the mesh-file convention of being 1-indexed, with a reserved
//! dummy entry in slot 0, so face indices can be used exactly as read.

use crate::foundation::math::Vec3;
use crate::render::material::Material;

/// A triangle face: three vertex indices plus three parallel normal indices
///
/// A face may reference a different normal per corner, which is what makes
/// faceted versus smooth shading possible on the same vertex data. Indices
/// are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices for the three corners
    pub v: [u32; 3],
    /// Normal indices for the three corners
    pub vn: [u32; 3],
}

/// An indexed triangle mesh
///
/// Immutable once loaded; the transform pipeline operates on owned clones,
/// never on shared views.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Source path or name tag, kept for diagnostics
    pub name: String,
    /// Vertex positions; slot 0 is the reserved dummy entry
    pub vertices: Vec<Vec3>,
    /// Vertex normals; slot 0 is the reserved dummy entry. Holds only the
    /// dummy when the source file defines no normals.
    pub normals: Vec<Vec3>,
    /// Triangle faces indexing into `vertices` and `normals`
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Create an empty mesh carrying only the reserved dummy entries
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: vec![Vec3::zeros()],
            normals: vec![Vec3::zeros()],
            faces: Vec::new(),
        }
    }

    /// Whether the mesh carries any real normals beyond the dummy entry
    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.normals.len() > 1
    }
}

/// One placed copy of a base mesh together with its surface material
///
/// Instances own their (already transformed) mesh data; two instances of the
/// same base mesh never share vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInstance {
    /// The transformed copy of the base mesh
    pub mesh: Mesh,
    /// Instance name, `<base>_copyN` for the N-th copy of a base mesh
    pub name: String,
    /// Surface reflectances for shading
    pub material: Material,
}
