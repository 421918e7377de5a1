//! # Graphics Module
//!
//! Everything between the editor state and the GPU.
//!
//! ## Architecture Overview
//!
//! - **Scene** ([`scene`]) - Objects with poses, world-space primitives and
//!   the selection
//! - **Camera** ([`camera`]) - Orbit and top-down views plus drag control
//! - **Geometry** ([`geometry`]) - Procedural meshes for demo scenes
//! - **Rendering** ([`rendering`]) - Flat-color pipelines and the frame loop
//! - **Picking** ([`picking`]) - Color-ID object picking on the GPU or CPU
//!
//! ## Usage
//!
//! The graphics system is primarily used through the [`RenderEngine`] and
//! [`Scene`] types:
//!
//! ```no_run
//! use pathpick::gfx::scene::Scene;
//!
//! // The render engine is created by EditorApp once the window exists
//! // let render_engine = RenderEngine::new(window, width, height).await?;
//! let scene = Scene::new([1.0, 0.6, 0.0, 1.0]);
//! assert_eq!(scene.object_count(), 0);
//! ```
//!
//! [`Scene`]: scene::Scene

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod scene;

// Re-export commonly used types
pub use camera::view_camera::ViewCamera;
pub use rendering::render_engine::RenderEngine;
