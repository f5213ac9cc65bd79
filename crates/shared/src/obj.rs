//! Wavefront OBJ decoding.
//!
//! Supports `v`, `vn`, `f` (with `v`, `v/vt`, `v//vn` and `v/vt/vn` index
//! forms, 1-based or negative), and `o`/`g` grouping. Faces with more than
//! three corners are fan-triangulated. Statements that carry no geometry
//! (`vt`, `s`, `mtllib`, `usemtl`, comments) are skipped.

use crate::{face_normal, GeometryNode, MeshPrimitive, ParseError};

#[derive(Default)]
struct GroupBuilder {
    name: Option<String>,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
}

impl GroupBuilder {
    fn named(name: Option<String>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn into_mesh(self) -> Option<GeometryNode> {
        if self.positions.is_empty() {
            return None;
        }
        Some(GeometryNode::Mesh(MeshPrimitive {
            name: self.name,
            positions: self.positions,
            normals: self.normals,
        }))
    }
}

/// Parse an OBJ buffer into a group root with one mesh per `o`/`g` group.
///
/// A file without group statements yields a single unnamed mesh under the
/// root. Vertex colors and materials in the source are ignored.
pub fn parse_obj(bytes: &[u8]) -> Result<GeometryNode, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8)?;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut finished: Vec<GeometryNode> = Vec::new();
    let mut current = GroupBuilder::default();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or("");
        let mut parts = content.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => positions.push(parse_vec3(&mut parts, line, "vertex")?),
            "vn" => normals.push(parse_vec3(&mut parts, line, "normal")?),
            "o" | "g" => {
                let name = parts.next().map(str::to_string);
                if let Some(mesh) = std::mem::take(&mut current).into_mesh() {
                    finished.push(mesh);
                }
                current = GroupBuilder::named(name);
            }
            "f" => {
                let corners = parse_face(&mut parts, line, &positions, &normals)?;
                emit_triangles(&mut current, &corners);
            }
            // No geometric content.
            "vt" | "s" | "mtllib" | "usemtl" | "l" | "p" => {}
            _ => {}
        }
    }

    if let Some(mesh) = current.into_mesh() {
        finished.push(mesh);
    }
    if finished.is_empty() {
        return Err(ParseError::EmptyMesh);
    }

    Ok(GeometryNode::Group {
        name: None,
        children: finished,
    })
}

fn parse_vec3<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: &str,
) -> Result<[f32; 3], ParseError> {
    let mut out = [0.0f32; 3];
    for slot in &mut out {
        let token = parts.next().ok_or_else(|| ParseError::InvalidObj {
            line,
            message: format!("{what} needs 3 components"),
        })?;
        *slot = token.parse().map_err(|_| ParseError::InvalidObj {
            line,
            message: format!("{what} component \"{token}\" is not a number"),
        })?;
    }
    Ok(out)
}

/// One face corner: resolved position and, when the file supplies one, a
/// resolved normal.
struct Corner {
    position: [f32; 3],
    normal: Option<[f32; 3]>,
}

fn parse_face<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
) -> Result<Vec<Corner>, ParseError> {
    let mut corners = Vec::new();
    for token in parts {
        let mut fields = token.split('/');
        let position_index = fields.next().unwrap_or("");
        let _texture_index = fields.next();
        let normal_index = fields.next().filter(|s| !s.is_empty());

        let position = *resolve_index(position_index, positions.len(), line)?
            .and_then(|i| positions.get(i))
            .ok_or_else(|| ParseError::InvalidObj {
                line,
                message: format!("face references missing vertex \"{token}\""),
            })?;
        let normal = match normal_index {
            Some(field) => Some(*resolve_index(field, normals.len(), line)?
                .and_then(|i| normals.get(i))
                .ok_or_else(|| ParseError::InvalidObj {
                    line,
                    message: format!("face references missing normal \"{token}\""),
                })?),
            None => None,
        };
        corners.push(Corner { position, normal });
    }

    if corners.len() < 3 {
        return Err(ParseError::InvalidObj {
            line,
            message: format!("face has {} corners, need at least 3", corners.len()),
        });
    }
    Ok(corners)
}

/// OBJ indices are 1-based; negative values count back from the end.
fn resolve_index(field: &str, len: usize, line: usize) -> Result<Option<usize>, ParseError> {
    let value: i64 = field.parse().map_err(|_| ParseError::InvalidObj {
        line,
        message: format!("index \"{field}\" is not an integer"),
    })?;
    let resolved = if value > 0 {
        Some((value - 1) as usize)
    } else if value < 0 {
        (len as i64 + value).try_into().ok().map(|i: u64| i as usize)
    } else {
        None
    };
    Ok(resolved)
}

fn emit_triangles(builder: &mut GroupBuilder, corners: &[Corner]) {
    for i in 1..corners.len() - 1 {
        let tri = [&corners[0], &corners[i], &corners[i + 1]];
        let fallback = face_normal(tri[0].position, tri[1].position, tri[2].position);
        for corner in tri {
            builder.positions.push(corner.position);
            builder.normals.push(corner.normal.unwrap_or(fallback));
        }
    }
}
