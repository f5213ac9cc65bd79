//! Mesh geometry model shared between the viewer GUI and headless tests.
//!
//! Holds the parsed-geometry data model (tagged mesh/group nodes), format
//! detection by filename extension, and the STL/OBJ decoders.

mod obj;
mod stl;

use serde::{Deserialize, Serialize};

pub use obj::parse_obj;
pub use stl::parse_stl;

/// Mesh file format, detected from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Detect the format from a filename.
    ///
    /// The extension is the text after the last `.`, compared
    /// case-insensitively. Anything outside `{stl, obj}`, including a
    /// missing extension, is a [`ParseError::UnsupportedFormat`].
    pub fn detect(file_name: &str) -> Result<Self, ParseError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "stl" => Ok(MeshFormat::Stl),
            "obj" => Ok(MeshFormat::Obj),
            _ => Err(ParseError::UnsupportedFormat { extension }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MeshFormat::Stl => "STL",
            MeshFormat::Obj => "OBJ",
        }
    }
}

/// A single triangle-soup mesh: every 3 consecutive entries of `positions`
/// form one triangle, with a matching per-vertex normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPrimitive {
    /// Group name from the source file, if any (OBJ `o`/`g`).
    pub name: Option<String>,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

impl MeshPrimitive {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Node of the parsed scene graph.
///
/// The variant tag makes the mesh/group distinction explicit; traversal is
/// total over both variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryNode {
    Mesh(MeshPrimitive),
    Group {
        name: Option<String>,
        children: Vec<GeometryNode>,
    },
}

impl GeometryNode {
    /// Depth-first visit of every mesh in the subtree.
    pub fn visit_meshes<'a>(&'a self, visit: &mut impl FnMut(&'a MeshPrimitive)) {
        match self {
            GeometryNode::Mesh(mesh) => visit(mesh),
            GeometryNode::Group { children, .. } => {
                for child in children {
                    child.visit_meshes(visit);
                }
            }
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit_meshes(&mut |_| count += 1);
        count
    }

    pub fn triangle_count(&self) -> usize {
        let mut count = 0;
        self.visit_meshes(&mut |mesh| count += mesh.triangle_count());
        count
    }
}

/// Result of decoding one uploaded file.
///
/// STL yields a single `Mesh` root; OBJ yields a `Group` root with one mesh
/// per named group (or one unnamed mesh when the file declares no groups).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedGeometry {
    pub format: MeshFormat,
    pub root: GeometryNode,
}

/// Decode raw file bytes for a known format.
///
/// The caller drops the buffer after this returns; nothing here retains it.
pub fn parse(format: MeshFormat, bytes: &[u8]) -> Result<ParsedGeometry, ParseError> {
    let root = match format {
        MeshFormat::Stl => parse_stl(bytes)?,
        MeshFormat::Obj => parse_obj(bytes)?,
    };
    Ok(ParsedGeometry { format, root })
}

/// Detect the format from `file_name`, then decode `bytes`.
pub fn parse_named(file_name: &str, bytes: &[u8]) -> Result<ParsedGeometry, ParseError> {
    parse(MeshFormat::detect(file_name)?, bytes)
}

/// Classified decode failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported format \".{extension}\" (expected .stl or .obj)")]
    UnsupportedFormat { extension: String },
    #[error("invalid STL data: {message}")]
    InvalidStl { message: String },
    #[error("invalid OBJ data at line {line}: {message}")]
    InvalidObj { line: usize, message: String },
    #[error("OBJ data is not valid UTF-8")]
    InvalidUtf8,
    #[error("file contains no triangles")]
    EmptyMesh,
}

/// Face normal of a triangle, unit length; +Y when the triangle is degenerate.
pub(crate) fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 1e-12 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 1.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_supported_extensions_case_insensitively() {
        assert_eq!(MeshFormat::detect("cube.stl").unwrap(), MeshFormat::Stl);
        assert_eq!(MeshFormat::detect("CUBE.STL").unwrap(), MeshFormat::Stl);
        assert_eq!(MeshFormat::detect("model.Obj").unwrap(), MeshFormat::Obj);
        assert_eq!(
            MeshFormat::detect("archive.tar.obj").unwrap(),
            MeshFormat::Obj
        );
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = MeshFormat::detect("scene.gltf").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedFormat {
                extension: "gltf".into()
            }
        );
        assert!(MeshFormat::detect("no_extension").is_err());
        assert!(MeshFormat::detect("trailing.").is_err());
    }

    #[test]
    fn traversal_visits_every_mesh_depth_first() {
        let leaf = |name: &str| {
            GeometryNode::Mesh(MeshPrimitive {
                name: Some(name.to_string()),
                positions: vec![[0.0; 3]; 3],
                normals: vec![[0.0, 1.0, 0.0]; 3],
            })
        };
        let root = GeometryNode::Group {
            name: None,
            children: vec![
                leaf("a"),
                GeometryNode::Group {
                    name: Some("inner".into()),
                    children: vec![leaf("b"), leaf("c")],
                },
            ],
        };

        let mut seen = Vec::new();
        root.visit_meshes(&mut |mesh| seen.push(mesh.name.clone().unwrap()));
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(root.mesh_count(), 3);
        assert_eq!(root.triangle_count(), 3);
    }

    #[test]
    fn face_normal_is_unit_length() {
        let n = face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, 1.0]);

        let degenerate = face_normal([1.0; 3], [1.0; 3], [1.0; 3]);
        assert_eq!(degenerate, [0.0, 1.0, 0.0]);
    }
}
