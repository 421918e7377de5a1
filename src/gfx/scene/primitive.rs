//! Scene primitives: untransformed line and triangle geometry drawn in world
//! space, used for the background shapes and for path visualization.

use super::vertex::Vertex3D;

/// How the vertices of a primitive are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Independent triangles, three vertices each.
    Triangles,
    /// Connected polyline.
    LineStrip,
    /// Independent segments, two vertices each.
    LineList,
}

/// What a primitive is used for. Path visualization can be removed as a
/// group without touching other primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveRole {
    Static,
    PathCurve,
    PathMarker,
}

impl PrimitiveRole {
    pub fn is_path_visual(self) -> bool {
        matches!(self, Self::PathCurve | Self::PathMarker)
    }
}

/// Stable handle of a primitive inside a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveHandle(pub(crate) u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub role: PrimitiveRole,
    pub vertices: Vec<Vertex3D>,
    pub color: [f32; 4],
}

impl Primitive {
    pub fn new(shape: Shape, role: PrimitiveRole, vertices: Vec<Vertex3D>, color: [f32; 4]) -> Self {
        Self {
            shape,
            role,
            vertices,
            color,
        }
    }

    pub fn triangle(vertices: [Vertex3D; 3], color: [f32; 4]) -> Self {
        Self::new(Shape::Triangles, PrimitiveRole::Static, vertices.to_vec(), color)
    }

    pub fn line_strip(vertices: Vec<Vertex3D>, color: [f32; 4]) -> Self {
        Self::new(Shape::LineStrip, PrimitiveRole::Static, vertices, color)
    }
}

/// The primitives a fresh scene starts with: an outlined quad and two
/// overlapping triangles at different depths.
pub fn default_primitives() -> Vec<Primitive> {
    vec![
        Primitive::line_strip(
            vec![
                Vertex3D::new(0.2, -0.5, 0.0),
                Vertex3D::new(-1.0, 0.0, 0.0),
                Vertex3D::new(-0.2, 1.0, 0.0),
                Vertex3D::new(0.5, 0.1, 0.0),
                Vertex3D::new(0.2, -0.5, 0.0),
            ],
            [1.0, 0.0, 0.0, 1.0],
        ),
        Primitive::triangle(
            [
                Vertex3D::new(0.0, 0.0, 0.3),
                Vertex3D::new(1.0, 0.0, 0.3),
                Vertex3D::new(0.0, 1.0, 0.3),
            ],
            [0.0, 1.0, 0.0, 1.0],
        ),
        Primitive::triangle(
            [
                Vertex3D::new(-0.5, -0.5, 0.9),
                Vertex3D::new(0.5, -0.2, 0.9),
                Vertex3D::new(-0.5, 1.0, 0.9),
            ],
            [0.0, 0.0, 1.0, 1.0],
        ),
    ]
}
