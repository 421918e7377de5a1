//! # Primitive Shape Generation

use super::GeometryData;

/// Axis-aligned cube centered at the origin with edge length `size`.
pub fn generate_cube(size: f32) -> GeometryData {
    let h = size * 0.5;

    let vertices = vec![
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
    ];

    #[rustfmt::skip]
    let indices = vec![
        // Front (+Z)
        0, 1, 2,  2, 3, 0,
        // Back (-Z)
        5, 4, 7,  7, 6, 5,
        // Left (-X)
        4, 0, 3,  3, 7, 4,
        // Right (+X)
        1, 5, 6,  6, 2, 1,
        // Top (+Y)
        3, 2, 6,  6, 7, 3,
        // Bottom (-Y)
        4, 5, 1,  1, 0, 4,
    ];

    GeometryData { vertices, indices }
}

/// Flat plane in the XY plane (z = 0), centered at the origin, facing +Z.
///
/// Segment counts below one are treated as one.
pub fn generate_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    for y in 0..=h_segs {
        let pos_y = (y as f32 / h_segs as f32 - 0.5) * height;
        for x in 0..=w_segs {
            let pos_x = (x as f32 / w_segs as f32 - 0.5) * width;
            data.vertices.push([pos_x, pos_y, 0.0]);
        }
    }

    for y in 0..h_segs {
        for x in 0..w_segs {
            let i = y * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, i + 1, next_row]);
            data.indices.extend_from_slice(&[next_row, i + 1, next_row + 1]);
        }
    }

    data
}

/// Square pyramid with its base centered at the origin in the XY plane and
/// its apex at `(0, 0, height)`.
pub fn generate_pyramid(base: f32, height: f32) -> GeometryData {
    let h = base * 0.5;

    let vertices = vec![
        [-h, -h, 0.0],
        [h, -h, 0.0],
        [h, h, 0.0],
        [-h, h, 0.0],
        [0.0, 0.0, height],
    ];

    #[rustfmt::skip]
    let indices = vec![
        // Base, facing -Z
        0, 2, 1,  2, 0, 3,
        // Sides
        0, 1, 4,
        1, 2, 4,
        2, 3, 4,
        3, 0, 4,
    ];

    GeometryData { vertices, indices }
}
