//! # Object Picking System
//!
//! Color-ID picking: every movable object is drawn into an off-screen target
//! with a flat color whose red channel encodes its handle, then the single
//! pixel under the cursor is read back.
//!
//! ## Encoding
//!
//! Object `id` is drawn as `[id / 255, 0, 0, 1]`. The target is cleared to
//! `[0, 0, 0, 0]`, so an all-zero pixel means "nothing here". Because alpha
//! is always 1 for drawn objects, id 0 is distinguishable from the
//! background.
//!
//! ## Targets
//!
//! The protocol is written against [`PickTarget`]. [`GpuPicker`] renders with
//! wgpu; [`SoftwarePickTarget`] rasterizes on the CPU and is used where no
//! GPU is available.
//!
//! ```
//! use pathpick::gfx::picking::{decode_pixel, pick_color};
//!
//! assert_eq!(pick_color(51), [0.2, 0.0, 0.0, 1.0]);
//! assert_eq!(decode_pixel([51, 0, 0, 255]), Some(51));
//! assert_eq!(decode_pixel([0, 0, 0, 0]), None);
//! ```

pub mod gpu_picker;
pub mod software;

pub use gpu_picker::GpuPicker;
pub use software::SoftwarePickTarget;

use cgmath::Matrix4;

use crate::error::PickError;
use crate::gfx::scene::{ObjectHandle, Scene, Vertex3D};

/// Value the pick buffer is cleared to before a pick.
pub const PICK_CLEAR_COLOR: [f32; 4] = [0.0; 4];

/// Flat color an object with pick id `id` is drawn with.
pub fn pick_color(id: u8) -> [f32; 4] {
    [id as f32 / 255.0, 0.0, 0.0, 1.0]
}

/// Decodes a read back pixel into a pick id.
pub fn decode_pixel(pixel: [u8; 4]) -> Option<u8> {
    if pixel == [0, 0, 0, 0] {
        None
    } else {
        Some(pixel[0])
    }
}

/// Converts a floating point color into the 8-bit value stored by an
/// `Rgba8Unorm` target.
pub fn quantize_color(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Which framebuffer draws currently land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTargetBinding {
    Surface,
    PickBuffer,
}

/// Rendering state a pick temporarily overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub binding: RenderTargetBinding,
    pub clear_color: [f32; 4],
}

impl RenderState {
    pub fn surface(clear_color: [f32; 4]) -> Self {
        Self {
            binding: RenderTargetBinding::Surface,
            clear_color,
        }
    }

    pub fn pick_buffer() -> Self {
        Self {
            binding: RenderTargetBinding::PickBuffer,
            clear_color: PICK_CLEAR_COLOR,
        }
    }
}

/// Off-screen target the picking protocol renders into.
///
/// Draws only reach the pick buffer while the bound target is
/// [`RenderTargetBinding::PickBuffer`]. Pixel coordinates have their origin
/// at the bottom-left corner.
pub trait PickTarget {
    /// Current target size in pixels.
    fn size(&self) -> (u32, u32);

    fn render_state(&self) -> RenderState;

    fn set_render_state(&mut self, state: RenderState);

    fn set_view_projection(&mut self, view_proj: Matrix4<f32>);

    /// Clears color to the current clear color and depth to the far plane.
    fn clear(&mut self);

    /// Draws a flat-colored triangle list with depth testing.
    fn draw(&mut self, vertices: &[Vertex3D], model: &Matrix4<f32>, color: [f32; 4]);

    /// Reads one pixel. Returns `None` for coordinates outside the target.
    fn read_pixel(&mut self, x: u32, y: u32) -> Result<Option<[u8; 4]>, PickError>;
}

/// Resolves screen coordinates to scene objects through a [`PickTarget`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectPicker;

impl ObjectPicker {
    pub fn new() -> Self {
        Self
    }

    /// Renders the movable objects of `scene` into `target` and returns the
    /// object under `(x, y_inverted)`, a bottom-left based pixel coordinate.
    ///
    /// The target's render state is restored before returning, also on
    /// error. A target whose size differs from `viewport` is rejected.
    pub fn pick<T: PickTarget + ?Sized>(
        &self,
        target: &mut T,
        scene: &Scene,
        view_proj: Matrix4<f32>,
        viewport: (u32, u32),
        x: u32,
        y_inverted: u32,
    ) -> Result<Option<ObjectHandle>, PickError> {
        let size = target.size();
        if size != viewport {
            return Err(PickError::StaleTarget {
                target: size,
                viewport,
            });
        }

        let saved = target.render_state();
        target.set_render_state(RenderState::pick_buffer());
        let pixel = Self::render_and_read(target, scene, view_proj, x, y_inverted);
        target.set_render_state(saved);

        let pixel = pixel?;
        log::debug!("pick at ({}, {}) read {:?}", x, y_inverted, pixel);
        Ok(pixel.and_then(|pixel| Self::resolve(scene, pixel)))
    }

    fn render_and_read<T: PickTarget + ?Sized>(
        target: &mut T,
        scene: &Scene,
        view_proj: Matrix4<f32>,
        x: u32,
        y: u32,
    ) -> Result<Option<[u8; 4]>, PickError> {
        target.set_view_projection(view_proj);
        target.clear();

        for (handle, object) in scene.movable_objects() {
            let Some(id) = handle.pick_id() else {
                continue;
            };
            target.draw(object.vertices(), &object.pose.model_matrix(), pick_color(id));
        }

        target.read_pixel(x, y)
    }

    fn resolve(scene: &Scene, pixel: [u8; 4]) -> Option<ObjectHandle> {
        let id = decode_pixel(pixel)?;
        let handle = ObjectHandle::from_pick_id(id);
        if scene.is_movable(handle) {
            Some(handle)
        } else {
            log::warn!("pick buffer returned id {} which is not a movable object", id);
            None
        }
    }
}
