//! The single "currently displayed model" slot.

use std::sync::Arc;

use glam::Vec3;
use shared::ParsedGeometry;

use crate::viewport::mesh::MeshData;

/// Uniform standard material applied to every loaded mesh, overriding
/// whatever material or color the source file embeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [0.15, 0.3, 0.9],
            metalness: 0.5,
            roughness: 0.5,
        }
    }
}

/// Render-ready model: the parsed node tree flattened to interleaved vertex
/// buffers (depth-first order), all carrying the uniform material.
pub struct SceneObject {
    pub file_name: String,
    pub meshes: Vec<MeshData>,
    pub material: Material,
    /// Bounding-box center, for camera focus.
    pub center: Vec3,
}

impl SceneObject {
    pub fn from_geometry(geometry: &ParsedGeometry, file_name: &str, material: Material) -> Self {
        let mut meshes = Vec::new();
        geometry.root.visit_meshes(&mut |primitive| {
            meshes.push(MeshData::from_primitive(primitive, material.base_color));
        });

        Self {
            file_name: file_name.to_string(),
            center: bounds_center(&meshes),
            meshes,
            material,
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(MeshData::triangle_count).sum()
    }
}

fn bounds_center(meshes: &[MeshData]) -> Vec3 {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    let mut any = false;
    for mesh in meshes {
        for vertex in mesh.vertices.chunks_exact(9) {
            let p = Vec3::new(vertex[0], vertex[1], vertex[2]);
            min = min.min(p);
            max = max.max(p);
            any = true;
        }
    }
    if any {
        (min + max) * 0.5
    } else {
        Vec3::ZERO
    }
}

/// Holder of the one current [`SceneObject`].
///
/// Replacement swaps the whole `Arc` and bumps the version, so the render
/// loop sees either the old or the new object on any given frame, never a
/// partially updated one. Rejected ingests never touch the slot.
#[derive(Default)]
pub struct SceneSlot {
    current: Option<Arc<SceneObject>>,
    version: u64,
}

impl SceneSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, object: SceneObject) {
        self.current = Some(Arc::new(object));
        self.version = self.version.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.version = self.version.wrapping_add(1);
        }
    }

    pub fn current(&self) -> Option<&Arc<SceneObject>> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Bumped on every replacement; the GL renderer re-uploads only when
    /// this changes.
    pub fn version(&self) -> u64 {
        self.version
    }
}
