//! STL decoding (binary and ASCII, auto-detected).

use std::io::Cursor;

use crate::{face_normal, GeometryNode, MeshPrimitive, ParseError};

/// Parse an STL buffer into a single mesh node.
///
/// Binary vs ASCII is auto-detected by `stl_io`. STL carries no grouping
/// and no material, so the result is always one anonymous `Mesh`.
pub fn parse_stl(bytes: &[u8]) -> Result<GeometryNode, ParseError> {
    let mut reader = Cursor::new(bytes);
    let indexed = stl_io::read_stl(&mut reader).map_err(|e| ParseError::InvalidStl {
        message: e.to_string(),
    })?;

    if indexed.faces.is_empty() {
        return Err(ParseError::EmptyMesh);
    }

    let mut positions = Vec::with_capacity(indexed.faces.len() * 3);
    let mut normals = Vec::with_capacity(indexed.faces.len() * 3);

    for face in &indexed.faces {
        let corners = [
            vertex_at(&indexed, face.vertices[0])?,
            vertex_at(&indexed, face.vertices[1])?,
            vertex_at(&indexed, face.vertices[2])?,
        ];

        // Files are allowed to leave the facet normal zeroed.
        let stored = [face.normal[0], face.normal[1], face.normal[2]];
        let normal = if stored.iter().any(|c| c.abs() > 1e-12) {
            stored
        } else {
            face_normal(corners[0], corners[1], corners[2])
        };

        for corner in corners {
            positions.push(corner);
            normals.push(normal);
        }
    }

    Ok(GeometryNode::Mesh(MeshPrimitive {
        name: None,
        positions,
        normals,
    }))
}

fn vertex_at(mesh: &stl_io::IndexedMesh, index: usize) -> Result<[f32; 3], ParseError> {
    let vertex = mesh
        .vertices
        .get(index)
        .ok_or_else(|| ParseError::InvalidStl {
            message: format!("face references missing vertex {index}"),
        })?;
    Ok([vertex[0], vertex[1], vertex[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary STL with `triangles`, each (normal, v0, v1, v2).
    fn binary_stl(triangles: &[[[f32; 3]; 4]]) -> Vec<u8> {
        let mut out = vec![0u8; 80];
        out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            for vec in tri {
                for component in vec {
                    out.extend_from_slice(&component.to_le_bytes());
                }
            }
            out.extend_from_slice(&0u16.to_le_bytes());
        }
        out
    }

    #[test]
    fn parses_binary_stl_into_one_mesh() {
        let bytes = binary_stl(&[[
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]);

        let node = parse_stl(&bytes).unwrap();
        let GeometryNode::Mesh(mesh) = node else {
            panic!("STL must parse to a mesh node");
        };
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.name, None);
        assert_eq!(mesh.normals[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn parses_ascii_stl() {
        let text = "\
solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid tri
";
        let node = parse_stl(text.as_bytes()).unwrap();
        assert_eq!(node.triangle_count(), 1);
    }

    #[test]
    fn recomputes_zeroed_facet_normals() {
        let bytes = binary_stl(&[[
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]);

        let GeometryNode::Mesh(mesh) = parse_stl(&bytes).unwrap() else {
            panic!("expected mesh");
        };
        assert_eq!(mesh.normals[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn truncated_binary_stl_is_invalid() {
        let mut bytes = binary_stl(&[[
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]);
        bytes.truncate(bytes.len() - 30);

        assert!(matches!(
            parse_stl(&bytes),
            Err(ParseError::InvalidStl { .. })
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            parse_stl(b"not a mesh at all"),
            Err(ParseError::InvalidStl { .. })
        ));
    }
}
