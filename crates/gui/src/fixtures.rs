//! Factory functions for test model files.
//!
//! Byte-level STL/OBJ fixtures used by unit and integration tests, plus a
//! helper to drop them into the temp directory for end-to-end ingest runs.

use std::path::PathBuf;

/// Binary STL of a unit cube: 12 triangles, axis-aligned normals.
pub fn binary_stl_cube() -> Vec<u8> {
    let mut out = vec![0u8; 80];
    let faces = cube_faces();
    out.extend_from_slice(&(faces.len() as u32).to_le_bytes());
    for (normal, a, b, c) in faces {
        for vec in [normal, a, b, c] {
            for component in vec {
                out.extend_from_slice(&component.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    out
}

/// Binary STL with a triangle count that exceeds the actual payload.
pub fn truncated_stl() -> Vec<u8> {
    let mut bytes = binary_stl_cube();
    bytes.truncate(84 + 5 * 50 + 17);
    bytes
}

/// ASCII STL with a single facet.
pub fn ascii_stl_triangle() -> Vec<u8> {
    b"solid tri
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid tri
"
    .to_vec()
}

/// OBJ with a single quad face (fan-triangulates to 2 triangles), no groups.
pub fn obj_quad() -> Vec<u8> {
    b"v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
"
    .to_vec()
}

/// OBJ with two named groups, one triangle each.
pub fn obj_two_groups() -> Vec<u8> {
    b"o base
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o lid
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
"
    .to_vec()
}

/// OBJ cut off mid-file: the last face references vertices that never appear.
pub fn truncated_obj() -> Vec<u8> {
    b"v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
f 4 5 6
"
    .to_vec()
}

/// Write fixture bytes under the temp directory and return the path.
pub fn write_temp(file_name: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("meshview-{}-{file_name}", std::process::id()));
    std::fs::write(&path, bytes).expect("failed to write fixture file");
    path
}

fn cube_faces() -> Vec<([f32; 3], [f32; 3], [f32; 3], [f32; 3])> {
    // Corners of the unit cube.
    let p = |x: u32, y: u32, z: u32| [x as f32, y as f32, z as f32];
    vec![
        // -Z face
        ([0.0, 0.0, -1.0], p(0, 0, 0), p(0, 1, 0), p(1, 1, 0)),
        ([0.0, 0.0, -1.0], p(0, 0, 0), p(1, 1, 0), p(1, 0, 0)),
        // +Z face
        ([0.0, 0.0, 1.0], p(0, 0, 1), p(1, 0, 1), p(1, 1, 1)),
        ([0.0, 0.0, 1.0], p(0, 0, 1), p(1, 1, 1), p(0, 1, 1)),
        // -Y face
        ([0.0, -1.0, 0.0], p(0, 0, 0), p(1, 0, 0), p(1, 0, 1)),
        ([0.0, -1.0, 0.0], p(0, 0, 0), p(1, 0, 1), p(0, 0, 1)),
        // +Y face
        ([0.0, 1.0, 0.0], p(0, 1, 0), p(0, 1, 1), p(1, 1, 1)),
        ([0.0, 1.0, 0.0], p(0, 1, 0), p(1, 1, 1), p(1, 1, 0)),
        // -X face
        ([-1.0, 0.0, 0.0], p(0, 0, 0), p(0, 0, 1), p(0, 1, 1)),
        ([-1.0, 0.0, 0.0], p(0, 0, 0), p(0, 1, 1), p(0, 1, 0)),
        // +X face
        ([1.0, 0.0, 0.0], p(1, 0, 0), p(1, 1, 0), p(1, 1, 1)),
        ([1.0, 0.0, 0.0], p(1, 0, 0), p(1, 1, 1), p(1, 0, 1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_fixture_has_twelve_triangles() {
        let parsed = shared::parse_named("cube.stl", &binary_stl_cube()).unwrap();
        assert_eq!(parsed.root.triangle_count(), 12);
        assert_eq!(parsed.root.mesh_count(), 1);
    }

    #[test]
    fn truncated_fixtures_fail_to_parse() {
        assert!(shared::parse_named("cube.stl", &truncated_stl()).is_err());
        assert!(shared::parse_named("bad.obj", &truncated_obj()).is_err());
    }
}
