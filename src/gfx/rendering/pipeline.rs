//! Flat-color render pipelines
//!
//! Every draw in the editor is position-only geometry filled with a single
//! color, so one shader serves three topologies. [`FlatPipelines`] builds the
//! set for a given color target format, once for the surface and once for
//! the pick buffer.

use wgpu::*;

use crate::gfx::camera::camera_utils::CameraUniform;
use crate::gfx::scene::{vertex::Vertex3D, Shape};
use crate::wgpu_utils::{dynamic_uniform, single_uniform_layout, uniform, UniformBuffer};

use super::draw_batch::DrawUniform;

const FLAT_SHADER: &str = include_str!("flat.wgsl");

/// Configuration for creating a render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub color_format: TextureFormat,
    pub blend: Option<BlendState>,
    pub depth_format: Option<TextureFormat>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Flat Pipeline".to_string(),
            primitive_topology: PrimitiveTopology::TriangleList,
            // Imported meshes have arbitrary winding.
            cull_mode: None,
            color_format: TextureFormat::Bgra8Unorm,
            blend: Some(BlendState::REPLACE),
            depth_format: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_topology = topology;
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn with_blend(mut self, blend: Option<BlendState>) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }
}

pub fn topology_for(shape: Shape) -> PrimitiveTopology {
    match shape {
        Shape::Triangles => PrimitiveTopology::TriangleList,
        Shape::LineStrip => PrimitiveTopology::LineStrip,
        Shape::LineList => PrimitiveTopology::LineList,
    }
}

/// Bind group layouts shared by all flat pipelines.
///
/// Group 0 holds the camera, group 1 the per-draw model matrix and color
/// addressed with a dynamic offset.
pub struct FlatLayouts {
    pub camera: BindGroupLayout,
    pub draw: BindGroupLayout,
}

impl FlatLayouts {
    pub fn new(device: &Device) -> Self {
        Self {
            camera: single_uniform_layout(
                device,
                "Camera Bind Group Layout",
                ShaderStages::VERTEX,
                uniform(),
            ),
            draw: single_uniform_layout(
                device,
                "Draw Bind Group Layout",
                ShaderStages::VERTEX | ShaderStages::FRAGMENT,
                dynamic_uniform(std::mem::size_of::<DrawUniform>() as u64),
            ),
        }
    }
}

/// Creates a render pipeline running the flat shader
pub fn create_flat_pipeline(
    device: &Device,
    shader: &ShaderModule,
    layout: &PipelineLayout,
    config: &PipelineConfig,
) -> RenderPipeline {
    let color_targets = [Some(ColorTargetState {
        format: config.color_format,
        blend: config.blend,
        write_mask: ColorWrites::ALL,
    })];

    let depth_stencil = config.depth_format.map(|format| DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: CompareFunction::Less,
        stencil: StencilState::default(),
        bias: DepthBiasState::default(),
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(&config.label),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &color_targets,
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState {
            topology: config.primitive_topology,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: config.cull_mode,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// One flat pipeline per [`Shape`] for a single color target format.
pub struct FlatPipelines {
    triangles: RenderPipeline,
    line_list: RenderPipeline,
    line_strip: RenderPipeline,
}

impl FlatPipelines {
    pub fn new(device: &Device, layouts: &FlatLayouts, base: &PipelineConfig) -> Self {
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Flat Shader"),
            source: ShaderSource::Wgsl(FLAT_SHADER.into()),
        });

        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", base.label)),
            bind_group_layouts: &[&layouts.camera, &layouts.draw],
            push_constant_ranges: &[],
        });

        let build = |shape: Shape| {
            let config = base
                .clone()
                .with_label(&format!("{} ({:?})", base.label, shape))
                .with_primitive_topology(topology_for(shape));
            create_flat_pipeline(device, &shader, &layout, &config)
        };

        Self {
            triangles: build(Shape::Triangles),
            line_list: build(Shape::LineList),
            line_strip: build(Shape::LineStrip),
        }
    }

    pub fn get(&self, shape: Shape) -> &RenderPipeline {
        match shape {
            Shape::Triangles => &self.triangles,
            Shape::LineList => &self.line_list,
            Shape::LineStrip => &self.line_strip,
        }
    }
}

/// Camera uniform buffer with its bind group.
pub struct CameraBinding {
    buffer: UniformBuffer<CameraUniform>,
    bind_group: BindGroup,
}

impl CameraBinding {
    pub fn new(device: &Device, layouts: &FlatLayouts, label: &str) -> Self {
        let buffer = UniformBuffer::new(device);
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some(label),
            layout: &layouts.camera,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffer.binding_resource(),
            }],
        });
        Self { buffer, bind_group }
    }

    pub fn update(&mut self, queue: &Queue, uniform: CameraUniform) {
        self.buffer.update_content(queue, uniform);
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }
}
