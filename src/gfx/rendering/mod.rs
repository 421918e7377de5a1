//! Core rendering functionality
//!
//! Flat-color pipelines, per-frame draw batching, render targets and the
//! frame loop of the [`RenderEngine`].

pub mod draw_batch;
pub mod pipeline;
pub mod render_engine;
pub mod texture_resource;

pub use draw_batch::{DrawBatch, DrawCommand, DrawList, DrawUniform};
pub use pipeline::{CameraBinding, FlatLayouts, FlatPipelines, PipelineConfig};
pub use render_engine::RenderEngine;
pub use texture_resource::TextureResource;
