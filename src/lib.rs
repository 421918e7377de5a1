//! pathpick
//!
//! An interactive 3D scene editor built on wgpu and winit. Objects carry a
//! quaternion pose, are picked by rendering color-coded IDs off-screen, and
//! can be animated along a quadratic path through three clicked points.
//!
//! The [`Editor`] holds all editor state and exposes one handler per input;
//! [`EditorApp`] wires it to a window, the GPU and an imgui panel.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod gfx;
pub mod input;
pub mod path;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{init_logging, EditorApp};
pub use config::EditorConfig;
pub use editor::Editor;

/// Creates an editor application with the default configuration over `scene`.
pub fn default(scene: gfx::scene::Scene) -> Result<EditorApp, error::SetupError> {
    EditorApp::new(EditorConfig::default(), scene)
}
