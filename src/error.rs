//! Error types for the pathpick editor
//!
//! Setup failures are fatal and surface once while the window and GPU
//! resources are created. Load and pick errors are recoverable: the editor
//! logs them and keeps running.

use thiserror::Error;

/// Fatal errors raised while bringing up the window, GPU device or the
/// off-screen pick target.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create the window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create a rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to acquire a graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("surface of {width}x{height} exceeds the device limit of {max_dimension}")]
    SurfaceSize {
        width: u32,
        height: u32,
        max_dimension: u32,
    },

    #[error("pick target of {width}x{height} cannot be allocated: {reason}")]
    PickTarget {
        width: u32,
        height: u32,
        reason: String,
    },
}

/// Errors produced while turning a model file into scene objects.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load mesh '{path}': {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("mesh '{name}' references vertex {index} but only has {vertex_count} vertices")]
    IndexOutOfBounds {
        name: String,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh '{0}' contains no triangles")]
    Empty(String),
}

/// Errors produced by a single pick query.
#[derive(Debug, Error)]
pub enum PickError {
    #[error("pick target is {target:?} but the viewport is {viewport:?}")]
    StaleTarget {
        target: (u32, u32),
        viewport: (u32, u32),
    },

    #[error("pixel readback failed: {0}")]
    Readback(String),
}
