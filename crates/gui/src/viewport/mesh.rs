use shared::MeshPrimitive;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    /// Group name carried over from the source file, if any.
    pub name: Option<String>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave a parsed triangle soup with a uniform color.
    pub fn from_primitive(mesh: &MeshPrimitive, color: [f32; 3]) -> Self {
        let mut vertices = Vec::with_capacity(mesh.positions.len() * 9);
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            vertices.extend_from_slice(&[
                position[0],
                position[1],
                position[2],
                normal[0],
                normal[1],
                normal[2],
                color[0],
                color[1],
                color[2],
            ]);
        }
        let indices = (0..mesh.positions.len() as u32).collect();
        MeshData {
            vertices,
            indices,
            name: mesh.name.clone(),
        }
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

// ── Grid and axes ────────────────────────────────────────────

/// Ground-plane line grid on XZ. Every `section_every`-th line is emphasized,
/// and the origin lines are tinted by axis.
pub fn grid(cell_size: f32, range: i32, section_every: i32, opacity: f32) -> LineMeshData {
    let mut vertices = Vec::new();
    let cell_color = [0.25_f32, 0.25, 0.25, opacity * 0.55];
    let section_color = [0.38_f32, 0.38, 0.38, opacity];
    let origin_color_x = [0.5_f32, 0.2, 0.2, opacity * 0.7];
    let origin_color_z = [0.2_f32, 0.2, 0.5, opacity * 0.7];

    let extent = range as f32 * cell_size;
    let section = section_every.max(1);

    for i in -range..=range {
        let f = i as f32 * cell_size;
        let color = if i == 0 {
            origin_color_z
        } else if i % section == 0 {
            section_color
        } else {
            cell_color
        };
        // Line along Z
        push_line_vert(&mut vertices, f, 0.0, -extent, color);
        push_line_vert(&mut vertices, f, 0.0, extent, color);

        let color = if i == 0 {
            origin_color_x
        } else if i % section == 0 {
            section_color
        } else {
            cell_color
        };
        // Line along X
        push_line_vert(&mut vertices, -extent, 0.0, f, color);
        push_line_vert(&mut vertices, extent, 0.0, f, color);
    }

    LineMeshData { vertices }
}

pub fn axes(length: f32) -> LineMeshData {
    let mut vertices = Vec::new();
    let r = [0.9_f32, 0.2, 0.2, 1.0];
    let g = [0.2_f32, 0.8, 0.2, 1.0];
    let b = [0.2_f32, 0.3, 0.9, 1.0];

    // X axis
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, r);
    push_line_vert(&mut vertices, length, 0.0, 0.0, r);
    // Y axis
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, g);
    push_line_vert(&mut vertices, 0.0, length, 0.0, g);
    // Z axis
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, b);
    push_line_vert(&mut vertices, 0.0, 0.0, length, b);

    LineMeshData { vertices }
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_soup_with_uniform_color() {
        let primitive = MeshPrimitive {
            name: Some("lid".into()),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
        };
        let mesh = MeshData::from_primitive(&primitive, [0.1, 0.2, 0.9]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.name.as_deref(), Some("lid"));
        assert_eq!(&mesh.vertices[6..9], &[0.1, 0.2, 0.9]);
        assert_eq!(&mesh.vertices[15..18], &[0.1, 0.2, 0.9]);
    }

    #[test]
    fn grid_line_counts_match_range() {
        let lines = grid(1.0, 5, 15, 0.6);
        // (2*range+1) lines per axis, 2 vertices each, 7 floats per vertex.
        assert_eq!(lines.vertices.len(), 11 * 2 * 2 * 7);
    }
}
