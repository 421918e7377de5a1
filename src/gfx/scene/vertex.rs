//! # Vertex Data Structures
//!
//! The editor renders every object with a single flat color, so vertices
//! only carry a position. Objects store their triangles already flattened
//! (three vertices per triangle, no index buffer).

/// A 3D vertex holding only a position.
///
/// `#[repr(C)]` keeps the layout compatible with GPU vertex buffers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
}

impl Vertex3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3) at shader location 0
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

impl From<cgmath::Vector3<f32>> for Vertex3D {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
