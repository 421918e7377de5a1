//! WGPU-based rendering engine for the editor
//!
//! Owns the surface, device and queue, draws the scene draw list with the
//! flat pipelines and hosts the GPU pick target so both share one device.

use crate::error::SetupError;
use crate::gfx::{
    camera::camera_utils::CameraUniform,
    picking::GpuPicker,
    scene::Scene,
};

use super::draw_batch::DrawBatch;
use super::pipeline::{CameraBinding, FlatLayouts, FlatPipelines, PipelineConfig};
use super::texture_resource::TextureResource;

/// Core rendering engine managing GPU resources and draw calls
///
/// The RenderEngine handles:
/// - Surface and device management
/// - Depth buffer handling
/// - Camera uniform updates
/// - The off-screen pick target
/// - UI overlay rendering
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    layouts: FlatLayouts,
    pipelines: FlatPipelines,
    camera: CameraBinding,
    batch: DrawBatch,
    picker: GpuPicker,
}

impl RenderEngine {
    /// Creates the surface, device, pipelines and pick target.
    ///
    /// Any failure is fatal for the editor and reported as a [`SetupError`].
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, SetupError> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        check_surface_size(width, height, device.limits().max_texture_dimension_2d)?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(SetupError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = TextureResource::create_depth_texture(&device, width, height, "depth_texture");

        let layouts = FlatLayouts::new(&device);
        let pipelines = FlatPipelines::new(
            &device,
            &layouts,
            &PipelineConfig::default()
                .with_label("Scene Pipeline")
                .with_color_format(format)
                .with_depth_format(TextureResource::DEPTH_FORMAT),
        );
        let camera = CameraBinding::new(&device, &layouts, "Camera Bind Group");
        let picker = GpuPicker::new(&device, &queue, width, height)?;

        log::info!("render engine ready: {:?} {}x{}", format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            layouts,
            pipelines,
            camera,
            batch: DrawBatch::new("Scene"),
            picker,
        })
    }

    /// Renders one frame: the scene draw list followed by an optional UI
    /// overlay.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    /// Other surface errors are returned to the caller.
    pub fn render_frame<F>(
        &mut self,
        scene: &Scene,
        camera_uniform: CameraUniform,
        clear_color: [f32; 4],
        ui_callback: Option<F>,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.camera.update(&self.queue, camera_uniform);

        self.batch.list.clear();
        for item in scene.draw_list() {
            self.batch.list.push(item.shape, item.vertices, &item.model, item.color);
        }
        self.batch.upload(&self.device, &self.queue, &self.layouts);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b, a] = clear_color.map(f64::from);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.camera.bind_group(), &[]);
            self.batch.draw(&mut render_pass, &self.pipelines);
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Handles window resize
    ///
    /// Zero-sized resizes (minimized windows) are ignored. Sizes beyond the
    /// device texture limit are refused and the surface keeps its previous
    /// size. Otherwise the depth texture and the pick target are recreated
    /// to match the new surface size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SetupError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        check_surface_size(width, height, self.device.limits().max_texture_dimension_2d)?;

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, width, height, "depth_texture");
        self.picker.resize(width, height)
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Pick target sharing this engine's device.
    pub fn picker_mut(&mut self) -> &mut GpuPicker {
        &mut self.picker
    }
}

/// Refuses surface sizes the device cannot back with textures.
fn check_surface_size(width: u32, height: u32, max_dimension: u32) -> Result<(), SetupError> {
    if width > max_dimension || height > max_dimension {
        return Err(SetupError::SurfaceSize {
            width,
            height,
            max_dimension,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_within_limit() {
        assert!(check_surface_size(500, 500, 4096).is_ok());
        assert!(check_surface_size(4096, 1, 4096).is_ok());
    }

    #[test]
    fn test_oversized_surface_is_refused() {
        let result = check_surface_size(2560, 1440, 2048);
        assert!(matches!(
            result,
            Err(SetupError::SurfaceSize {
                width: 2560,
                height: 1440,
                max_dimension: 2048
            })
        ));
        assert!(check_surface_size(100, 5000, 4096).is_err());
    }
}
