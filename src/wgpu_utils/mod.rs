//! WGPU utility functions and helpers
//!
//! Small wrappers for the buffer and binding boilerplate shared by the
//! on-screen renderer and the GPU pick target.

pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use binding_types::*;
pub use uniform_buffer::{pack_dynamic_slots, UniformBuffer, DYNAMIC_SLOT_STRIDE};
