//! # Procedural Geometry Generation
//!
//! Position-only shapes used to populate a scene when no model files are
//! given. Everything is generated as an indexed triangle list and converted
//! into [`MeshData`](crate::gfx::scene::MeshData) before it is added to a
//! scene.
//!
//! ```
//! use pathpick::gfx::geometry::{generate_cube, generate_plane};
//!
//! let cube = generate_cube(0.5);
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let ground = generate_plane(4.0, 4.0, 4, 4);
//! assert_eq!(ground.vertex_count(), 25);
//! ```

pub mod primitives;

pub use primitives::*;

/// Indexed triangle geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Moves every vertex by `offset`.
    pub fn translated(mut self, offset: [f32; 3]) -> Self {
        for v in &mut self.vertices {
            v[0] += offset[0];
            v[1] += offset[1];
            v[2] += offset[2];
        }
        self
    }
}
