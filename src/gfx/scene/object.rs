//! # Scene Objects
//!
//! A [`SceneObject`] is one mesh instance: flattened triangle vertices, a
//! flat color, a [`Pose`] and a movable/fixed flag.

use cgmath::{Vector3, Zero};

use crate::config::rgba_from_bytes;
use crate::error::LoadError;

use super::{pose::Pose, vertex::Vertex3D};

/// Whether an object takes part in selection, picking and path animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Selectable, pickable and animatable.
    Movable,
    /// Rendered only.
    Fixed,
}

/// Stable handle of an object inside a [`Scene`](super::Scene).
///
/// Handles are never reused, so a handle held by the selection or by a
/// running path animation keeps pointing at the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub(crate) u32);

impl ObjectHandle {
    /// Raw handle value.
    pub fn index(self) -> u32 {
        self.0
    }

    /// Identifier written into the red channel of the pick buffer, if the
    /// handle fits into 8 bits.
    pub fn pick_id(self) -> Option<u8> {
        u8::try_from(self.0).ok()
    }

    pub fn from_pick_id(id: u8) -> Self {
        Self(u32::from(id))
    }
}

pub struct SceneObject {
    pub name: String,
    vertices: Vec<Vertex3D>,
    pub color: [f32; 4],
    pub kind: ObjectKind,
    pub pose: Pose,
}

impl SceneObject {
    /// Create an object from already flattened triangle vertices
    pub fn new(name: &str, vertices: Vec<Vertex3D>, color: [f32; 4], kind: ObjectKind) -> Self {
        Self {
            name: name.to_owned(),
            vertices,
            color,
            kind,
            pose: Pose::new(),
        }
    }

    /// Builds an object from indexed mesh data.
    ///
    /// `positions` is a flat `x, y, z` list and `indices` a triangle list.
    /// The color uses 0-255 for the color channels and 0-100 for alpha.
    pub fn from_indexed(
        name: &str,
        positions: &[f32],
        indices: &[u32],
        color: [u8; 4],
        kind: ObjectKind,
    ) -> Result<Self, LoadError> {
        let vertices = flatten_triangles(name, positions, indices)?;
        Ok(Self::new(name, vertices, rgba_from_bytes(color), kind))
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_movable(&self) -> bool {
        self.kind == ObjectKind::Movable
    }

    /// Arithmetic mean of the object-local vertex positions.
    ///
    /// The centroid is informational: rotation and scale are applied about
    /// the local origin, not about this point.
    pub fn centroid(&self) -> Vector3<f32> {
        if self.vertices.is_empty() {
            return Vector3::zero();
        }

        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zero(), |acc, v| {
                acc + Vector3::new(v.position[0], v.position[1], v.position[2])
            });
        sum / self.vertices.len() as f32
    }
}

/// Expands an indexed triangle list into one vertex per index.
pub fn flatten_triangles(
    name: &str,
    positions: &[f32],
    indices: &[u32],
) -> Result<Vec<Vertex3D>, LoadError> {
    let vertex_count = positions.len() / 3;
    let mut vertices = Vec::with_capacity(indices.len());

    for &index in indices {
        let i = index as usize;
        if i >= vertex_count {
            return Err(LoadError::IndexOutOfBounds {
                name: name.to_owned(),
                index,
                vertex_count,
            });
        }
        vertices.push(Vertex3D::new(
            positions[i * 3],
            positions[i * 3 + 1],
            positions[i * 3 + 2],
        ));
    }

    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_expands_indices() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
        let indices = [0, 1, 2, 2, 1, 3];
        let vertices = flatten_triangles("quad", &positions, &indices).unwrap();

        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[3], Vertex3D::new(0.0, 1.0, 0.0));
        assert_eq!(vertices[5], Vertex3D::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_flatten_rejects_out_of_range_index() {
        let positions = [0.0, 0.0, 0.0];
        let err = flatten_triangles("broken", &positions, &[0, 0, 4]).unwrap_err();
        assert!(matches!(err, LoadError::IndexOutOfBounds { index: 4, vertex_count: 1, .. }));
    }

    #[test]
    fn test_centroid() {
        let object = SceneObject::new(
            "tri",
            vec![
                Vertex3D::new(0.0, 0.0, 0.0),
                Vertex3D::new(3.0, 0.0, 0.0),
                Vertex3D::new(0.0, 3.0, 3.0),
            ],
            [1.0; 4],
            ObjectKind::Movable,
        );
        assert_eq!(object.centroid(), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_centroid_of_empty_object_is_origin() {
        let object = SceneObject::new("empty", Vec::new(), [1.0; 4], ObjectKind::Fixed);
        assert_eq!(object.centroid(), Vector3::zero());
    }

    #[test]
    fn test_from_indexed_converts_color() {
        let object = SceneObject::from_indexed(
            "tri",
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[0, 1, 2],
            [255, 0, 0, 100],
            ObjectKind::Movable,
        )
        .unwrap();
        assert_eq!(object.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(object.vertex_count(), 3);
    }

    #[test]
    fn test_pick_id_fits_in_a_byte() {
        assert_eq!(ObjectHandle(7).pick_id(), Some(7));
        assert_eq!(ObjectHandle(300).pick_id(), None);
        assert_eq!(ObjectHandle::from_pick_id(9), ObjectHandle(9));
    }
}
