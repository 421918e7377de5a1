//! Scene primitives that visualize a path: the sampled curve and a cross
//! marker per control point.

use cgmath::Vector3;

use crate::gfx::scene::{Primitive, PrimitiveRole, Shape, Vertex3D};

use super::curve::QuadraticCurve;

/// Polyline through `steps + 1` samples of `curve`.
pub fn curve_polyline(curve: &QuadraticCurve, steps: u32, color: [f32; 4]) -> Primitive {
    let vertices = curve.sample(steps).into_iter().map(Vertex3D::from).collect();
    Primitive::new(Shape::LineStrip, PrimitiveRole::PathCurve, vertices, color)
}

/// Cross marker centered on `point`: an axis-aligned horizontal and
/// vertical segment of half extent `size`, plus two diagonals of half
/// extent `size / 1.5`, all in the XY plane.
pub fn control_point_marker(point: Vector3<f32>, size: f32, color: [f32; 4]) -> Primitive {
    let d = size / 1.5;
    let offsets = [
        (-size, 0.0),
        (size, 0.0),
        (0.0, -size),
        (0.0, size),
        (-d, -d),
        (d, d),
        (-d, d),
        (d, -d),
    ];
    let vertices = offsets
        .iter()
        .map(|&(dx, dy)| Vertex3D::new(point.x + dx, point.y + dy, point.z))
        .collect();
    Primitive::new(Shape::LineList, PrimitiveRole::PathMarker, vertices, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_is_four_segments_around_point() {
        let marker = control_point_marker(Vector3::new(1.0, 2.0, 0.5), 0.15, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(marker.shape, Shape::LineList);
        assert_eq!(marker.role, PrimitiveRole::PathMarker);
        assert_eq!(marker.vertices.len(), 8);

        for pair in marker.vertices.chunks_exact(2) {
            let mid_x = (pair[0].position[0] + pair[1].position[0]) / 2.0;
            let mid_y = (pair[0].position[1] + pair[1].position[1]) / 2.0;
            assert!((mid_x - 1.0).abs() < 1e-6);
            assert!((mid_y - 2.0).abs() < 1e-6);
            assert_eq!(pair[0].position[2], 0.5);
        }
    }

    #[test]
    fn test_polyline_has_one_vertex_per_sample() {
        let curve = QuadraticCurve::fit(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
        );
        let line = curve_polyline(&curve, 50, [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(line.shape, Shape::LineStrip);
        assert_eq!(line.role, PrimitiveRole::PathCurve);
        assert_eq!(line.vertices.len(), 51);
    }
}
