//! GPU pick target
//!
//! Renders into an off-screen `Rgba8Unorm` color texture plus a depth
//! texture, both sized to the viewport, then copies the pixel under the
//! cursor into a mapped staging buffer.

use cgmath::{Matrix4, SquareMatrix};

use crate::error::{PickError, SetupError};
use crate::gfx::camera::camera_utils::{convert_matrix4_to_array, CameraUniform};
use crate::gfx::rendering::draw_batch::DrawBatch;
use crate::gfx::rendering::pipeline::{CameraBinding, FlatLayouts, FlatPipelines, PipelineConfig};
use crate::gfx::rendering::texture_resource::TextureResource;
use crate::gfx::scene::{Shape, Vertex3D};

use super::{PickTarget, RenderState, RenderTargetBinding};

pub const PICK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Row pitch of the single-row readback, `COPY_BYTES_PER_ROW_ALIGNMENT`.
const READBACK_ROW_BYTES: u32 = 256;

pub struct GpuPicker {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layouts: FlatLayouts,
    pipelines: FlatPipelines,
    camera: CameraBinding,
    batch: DrawBatch,
    color: TextureResource,
    depth: TextureResource,
    staging_buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    state: RenderState,
    view_proj: Matrix4<f32>,
    pending_clear: bool,
}

impl GpuPicker {
    /// Allocates the pick target. Failure here is a setup error.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
    ) -> Result<Self, SetupError> {
        let (color, depth) = Self::allocate_targets(device, width, height)?;

        let layouts = FlatLayouts::new(device);
        let pipelines = FlatPipelines::new(
            device,
            &layouts,
            &PipelineConfig::default()
                .with_label("Pick Pipeline")
                .with_color_format(PICK_FORMAT)
                .with_blend(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT),
        );
        let camera = CameraBinding::new(device, &layouts, "Pick Camera Bind Group");

        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pick Staging Buffer"),
            size: READBACK_ROW_BYTES as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        log::info!("pick target allocated at {}x{}", width, height);

        Ok(Self {
            device: device.clone(),
            queue: queue.clone(),
            layouts,
            pipelines,
            camera,
            batch: DrawBatch::new("Pick"),
            color,
            depth,
            staging_buffer,
            width,
            height,
            state: RenderState::surface([0.0; 4]),
            view_proj: Matrix4::identity(),
            pending_clear: false,
        })
    }

    /// Reallocates the color and depth targets to match a new viewport.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SetupError> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        let (color, depth) = Self::allocate_targets(&self.device, width, height)?;
        self.color = color;
        self.depth = depth;
        self.width = width;
        self.height = height;
        log::debug!("pick target resized to {}x{}", width, height);
        Ok(())
    }

    fn allocate_targets(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> Result<(TextureResource, TextureResource), SetupError> {
        let max = device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max || height > max {
            return Err(SetupError::PickTarget {
                width,
                height,
                reason: format!("size must be between 1 and {max} in each dimension"),
            });
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let color = TextureResource::create_render_target(
            device,
            width,
            height,
            PICK_FORMAT,
            wgpu::TextureUsages::COPY_SRC,
            "Pick Color Texture",
        );
        let depth = TextureResource::create_depth_texture(device, width, height, "Pick Depth Texture");

        let out_of_memory = pollster::block_on(device.pop_error_scope());
        let invalid = pollster::block_on(device.pop_error_scope());
        if let Some(error) = out_of_memory.or(invalid) {
            return Err(SetupError::PickTarget {
                width,
                height,
                reason: error.to_string(),
            });
        }

        Ok((color, depth))
    }

    /// Renders the recorded draws into the pick texture.
    fn flush(&mut self, encoder: &mut wgpu::CommandEncoder) {
        self.camera.update(
            &self.queue,
            CameraUniform {
                view_position: [0.0; 4],
                view_proj: convert_matrix4_to_array(self.view_proj),
            },
        );
        self.batch.upload(&self.device, &self.queue, &self.layouts);

        let [r, g, b, a] = self.state.clear_color.map(f64::from);
        let (color_load, depth_load) = if self.pending_clear {
            (
                wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                wgpu::LoadOp::Clear(1.0),
            )
        } else {
            (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Pick Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.color.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_bind_group(0, self.camera.bind_group(), &[]);
        self.batch.draw(&mut pass, &self.pipelines);
        drop(pass);

        self.batch.list.clear();
        self.pending_clear = false;
    }

    fn map_staging(&self) -> Result<[u8; 4], PickError> {
        let slice = self.staging_buffer.slice(..4);
        let (tx, rx) = futures::channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        if let Err(e) = self.device.poll(wgpu::PollType::Wait) {
            return Err(PickError::Readback(e.to_string()));
        }

        match futures::executor::block_on(rx) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(PickError::Readback(e.to_string())),
            Err(_) => return Err(PickError::Readback("map callback dropped".to_owned())),
        }

        let pixel = {
            let data = slice.get_mapped_range();
            [data[0], data[1], data[2], data[3]]
        };
        self.staging_buffer.unmap();
        Ok(pixel)
    }
}

impl PickTarget for GpuPicker {
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
        self.batch.list.clear();
        self.pending_clear = true;
    }

    fn draw(&mut self, vertices: &[Vertex3D], model: &Matrix4<f32>, color: [f32; 4]) {
        if self.state.binding != RenderTargetBinding::PickBuffer {
            return;
        }
        self.batch.list.push(Shape::Triangles, vertices, model, color);
    }

    fn read_pixel(&mut self, x: u32, y: u32) -> Result<Option<[u8; 4]>, PickError> {
        if x >= self.width || y >= self.height {
            return Ok(None);
        }

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Pick Encoder"),
        });
        self.flush(&mut encoder);

        // Texture rows run top to bottom; pick coordinates are bottom-left based.
        let row = self.height - 1 - y;
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.color.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y: row, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.staging_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(READBACK_ROW_BYTES),
                    rows_per_image: Some(1),
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        self.map_staging().map(Some)
    }
}
