//! CPU pick target
//!
//! Rasterizes flat-colored triangles into an RGBA8 color buffer with a depth
//! buffer, following the same conventions as the GPU path: wgpu clip space
//! (depth in `[0, 1]`), `Less` depth test, pixel centers at half-integer
//! coordinates and a bottom-left pixel origin.

use cgmath::{Matrix4, SquareMatrix, Vector4};

use crate::error::PickError;
use crate::gfx::scene::Vertex3D;

use super::{quantize_color, PickTarget, RenderState, RenderTargetBinding};

pub struct SoftwarePickTarget {
    width: u32,
    height: u32,
    color: Vec<[u8; 4]>,
    depth: Vec<f32>,
    view_proj: Matrix4<f32>,
    state: RenderState,
}

/// A vertex after projection: pixel position and depth.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    z: f32,
}

impl SoftwarePickTarget {
    pub fn new(width: u32, height: u32) -> Self {
        let mut target = Self {
            width: 0,
            height: 0,
            color: Vec::new(),
            depth: Vec::new(),
            view_proj: Matrix4::identity(),
            state: RenderState::surface([0.0; 4]),
        };
        target.resize(width, height);
        target
    }

    /// Reallocates both buffers for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = width as usize * height as usize;
        self.color = vec![[0; 4]; len];
        self.depth = vec![1.0; len];
    }

    fn project(&self, mvp: &Matrix4<f32>, v: &Vertex3D) -> Option<ScreenVertex> {
        let clip = *mvp * Vector4::new(v.position[0], v.position[1], v.position[2], 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(ScreenVertex {
            x: (ndc_x + 1.0) * 0.5 * self.width as f32,
            y: (ndc_y + 1.0) * 0.5 * self.height as f32,
            z: clip.z / clip.w,
        })
    }

    fn rasterize(&mut self, tri: [ScreenVertex; 3], color: [u8; 4]) {
        let [a, b, c] = tri;
        let area = edge(&a, &b, c.x, c.y);
        if area == 0.0 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).ceil().max(0.0) as u32).min(self.width);
        let max_y = (a.y.max(b.y).max(c.y).ceil().max(0.0) as u32).min(self.height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);

                // Dividing by the signed area makes both windings positive.
                let w0 = edge(&b, &c, cx, cy) / area;
                let w1 = edge(&c, &a, cx, cy) / area;
                let w2 = edge(&a, &b, cx, cy) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                if !(0.0..=1.0).contains(&z) {
                    continue;
                }

                let i = py as usize * self.width as usize + px as usize;
                if z < self.depth[i] {
                    self.depth[i] = z;
                    self.color[i] = color;
                }
            }
        }
    }
}

fn edge(a: &ScreenVertex, b: &ScreenVertex, x: f32, y: f32) -> f32 {
    (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x)
}

impl PickTarget for SoftwarePickTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render_state(&self) -> RenderState {
        self.state
    }

    fn set_render_state(&mut self, state: RenderState) {
        self.state = state;
    }

    fn set_view_projection(&mut self, view_proj: Matrix4<f32>) {
        self.view_proj = view_proj;
    }

    fn clear(&mut self) {
        if self.state.binding != RenderTargetBinding::PickBuffer {
            return;
        }
        let clear = quantize_color(self.state.clear_color);
        self.color.fill(clear);
        self.depth.fill(1.0);
    }

    fn draw(&mut self, vertices: &[Vertex3D], model: &Matrix4<f32>, color: [f32; 4]) {
        if self.state.binding != RenderTargetBinding::PickBuffer {
            return;
        }

        let mvp = self.view_proj * *model;
        let color = quantize_color(color);
        for tri in vertices.chunks_exact(3) {
            let projected = [
                self.project(&mvp, &tri[0]),
                self.project(&mvp, &tri[1]),
                self.project(&mvp, &tri[2]),
            ];
            // Triangles crossing the eye plane are dropped rather than clipped.
            if let [Some(a), Some(b), Some(c)] = projected {
                self.rasterize([a, b, c], color);
            }
        }
    }

    fn read_pixel(&mut self, x: u32, y: u32) -> Result<Option<[u8; 4]>, PickError> {
        if x >= self.width || y >= self.height {
            return Ok(None);
        }
        Ok(Some(self.color[y as usize * self.width as usize + x as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::One;

    fn quad(x0: f32, y0: f32, x1: f32, y1: f32, z: f32) -> Vec<Vertex3D> {
        vec![
            Vertex3D::new(x0, y0, z),
            Vertex3D::new(x1, y0, z),
            Vertex3D::new(x1, y1, z),
            Vertex3D::new(x1, y1, z),
            Vertex3D::new(x0, y1, z),
            Vertex3D::new(x0, y0, z),
        ]
    }

    fn bound(width: u32, height: u32) -> SoftwarePickTarget {
        let mut target = SoftwarePickTarget::new(width, height);
        target.set_render_state(RenderState::pick_buffer());
        target.clear();
        target
    }

    #[test]
    fn test_fills_covered_pixels_only() {
        let mut target = bound(10, 10);
        // Identity projection: the left half of clip space.
        target.draw(&quad(-1.0, -1.0, 0.0, 1.0, 0.5), &Matrix4::one(), [1.0, 0.0, 0.0, 1.0]);

        assert_eq!(target.read_pixel(2, 5).unwrap(), Some([255, 0, 0, 255]));
        assert_eq!(target.read_pixel(7, 5).unwrap(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_nearer_triangle_wins_regardless_of_order() {
        let mut target = bound(8, 8);
        let full = quad(-1.0, -1.0, 1.0, 1.0, 0.0);

        target.draw(&full, &Matrix4::from_translation([0.0, 0.0, 0.2].into()), [0.0, 0.0, 1.0, 1.0]);
        target.draw(&full, &Matrix4::from_translation([0.0, 0.0, 0.6].into()), [1.0, 0.0, 0.0, 1.0]);

        assert_eq!(target.read_pixel(4, 4).unwrap(), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_origin_is_bottom_left() {
        let mut target = bound(4, 4);
        target.draw(&quad(-1.0, -1.0, 1.0, 0.0, 0.5), &Matrix4::one(), [0.0, 1.0, 0.0, 1.0]);

        assert_eq!(target.read_pixel(1, 0).unwrap(), Some([0, 255, 0, 255]));
        assert_eq!(target.read_pixel(1, 3).unwrap(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_draws_are_ignored_while_surface_is_bound() {
        let mut target = SoftwarePickTarget::new(4, 4);
        target.draw(&quad(-1.0, -1.0, 1.0, 1.0, 0.5), &Matrix4::one(), [1.0; 4]);
        assert_eq!(target.read_pixel(2, 2).unwrap(), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_out_of_range_read_is_none() {
        let mut target = bound(4, 4);
        assert_eq!(target.read_pixel(4, 0).unwrap(), None);
        assert_eq!(target.read_pixel(0, 9).unwrap(), None);
    }
}
