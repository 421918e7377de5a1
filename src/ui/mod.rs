//! # User Interface Module
//!
//! Dear ImGui control panel for the editor.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, input capture
//!   and per-frame rendering
//! - [`panel`] - the editor panel: view buttons, orbit slider, translate
//!   inputs and a status readout
//!
//! The panel returns [`PanelAction`]s instead of mutating editor state, so
//! all input still reaches the editor through explicit handler calls.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{apply_panel_actions, editor_panel, PanelAction, PanelState};
