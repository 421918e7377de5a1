//! Immediate-mode draw recording
//!
//! A [`DrawBatch`] collects flat-colored draws on the CPU, uploads all their
//! vertices into one vertex buffer and their model/color pairs into one
//! uniform buffer (one 256 byte slot per draw), then replays them inside a
//! render pass.

use std::num::NonZeroU64;

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::gfx::camera::camera_utils::convert_matrix4_to_array;
use crate::gfx::scene::{vertex::Vertex3D, Shape};
use crate::wgpu_utils::{pack_dynamic_slots, DYNAMIC_SLOT_STRIDE};

use super::pipeline::{FlatLayouts, FlatPipelines};

/// Per-draw uniform, must match `DrawUniform` in `flat.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl DrawUniform {
    pub fn new(model: &Matrix4<f32>, color: [f32; 4]) -> Self {
        Self {
            model: convert_matrix4_to_array(*model),
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// CPU side of a batch. Kept separate from the GPU buffers so recording can
/// be exercised without a device.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    vertices: Vec<Vertex3D>,
    uniforms: Vec<DrawUniform>,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.uniforms.clear();
        self.commands.clear();
    }

    /// Records one draw. Empty vertex lists are skipped.
    pub fn push(&mut self, shape: Shape, vertices: &[Vertex3D], model: &Matrix4<f32>, color: [f32; 4]) {
        if vertices.is_empty() {
            return;
        }
        self.commands.push(DrawCommand {
            shape,
            first_vertex: self.vertices.len() as u32,
            vertex_count: vertices.len() as u32,
        });
        self.vertices.extend_from_slice(vertices);
        self.uniforms.push(DrawUniform::new(model, color));
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn uniforms(&self) -> &[DrawUniform] {
        &self.uniforms
    }
}

pub struct DrawBatch {
    label: String,
    pub list: DrawList,
    vertex_buffer: Option<wgpu::Buffer>,
    uniform_buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
}

impl DrawBatch {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            list: DrawList::default(),
            vertex_buffer: None,
            uniform_buffer: None,
            bind_group: None,
        }
    }

    /// Uploads the recorded draws, growing the GPU buffers when needed.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, layouts: &FlatLayouts) {
        if self.list.is_empty() {
            return;
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(self.list.vertices());
        if fits(&self.vertex_buffer, vertex_bytes.len()) {
            if let Some(buffer) = &self.vertex_buffer {
                queue.write_buffer(buffer, 0, vertex_bytes);
            }
        } else {
            self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertices", self.label)),
                contents: vertex_bytes,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            }));
        }

        let uniform_bytes = pack_dynamic_slots(self.list.uniforms());
        if fits(&self.uniform_buffer, uniform_bytes.len()) {
            if let Some(buffer) = &self.uniform_buffer {
                queue.write_buffer(buffer, 0, &uniform_bytes);
            }
            return;
        }

        // The bind group references the buffer, so both are replaced together.
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Uniforms", self.label)),
            contents: &uniform_bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Draw Bind Group", self.label)),
            layout: &layouts.draw,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<DrawUniform>() as u64),
                }),
            }],
        }));
        self.uniform_buffer = Some(buffer);
    }

    /// Replays the uploaded draws. Group 0 (camera) must already be bound.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipelines: &FlatPipelines) {
        let (Some(vertex_buffer), Some(bind_group)) = (&self.vertex_buffer, &self.bind_group) else {
            return;
        };

        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        for (slot, command) in self.list.commands().iter().enumerate() {
            let offset = (slot as u64 * DYNAMIC_SLOT_STRIDE) as u32;
            pass.set_pipeline(pipelines.get(command.shape));
            pass.set_bind_group(1, bind_group, &[offset]);
            pass.draw(
                command.first_vertex..command.first_vertex + command.vertex_count,
                0..1,
            );
        }
    }
}

fn fits(buffer: &Option<wgpu::Buffer>, len: usize) -> bool {
    buffer.as_ref().is_some_and(|b| b.size() >= len as u64)
}
