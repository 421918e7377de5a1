//! Mesh loading
//!
//! Model files are read with `tobj`. All models in one file are merged into a
//! single indexed triangle list so that one file becomes one scene object.

use std::path::Path;

use crate::error::LoadError;
use crate::gfx::geometry::GeometryData;

/// Indexed triangle mesh as produced by a loader, before flattening.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    /// Flat `x, y, z` list.
    pub positions: Vec<f32>,
    /// Triangle list indexing into `positions`.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(name: &str, positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            name: name.to_owned(),
            positions,
            indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends another mesh, rebasing its indices past the current vertices.
    pub fn append(&mut self, positions: &[f32], indices: &[u32]) {
        let base = (self.positions.len() / 3) as u32;
        self.positions.extend_from_slice(positions);
        self.indices.extend(indices.iter().map(|i| i + base));
    }
}

impl GeometryData {
    pub fn into_mesh(self, name: &str) -> MeshData {
        let positions = self.vertices.iter().flatten().copied().collect();
        MeshData::new(name, positions, self.indices)
    }
}

/// Loads an OBJ file, triangulated with a single index stream.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<MeshData, LoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| LoadError::Obj {
        path: display.clone(),
        source,
    })?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());

    let mut mesh = MeshData::new(&name, Vec::new(), Vec::new());
    for model in &models {
        log::debug!(
            "'{}': model '{}' with {} positions, {} indices",
            display,
            model.name,
            model.mesh.positions.len() / 3,
            model.mesh.indices.len()
        );
        mesh.append(&model.mesh.positions, &model.mesh.indices);
    }

    if mesh.indices.is_empty() {
        return Err(LoadError::Empty(name));
    }

    Ok(mesh)
}
