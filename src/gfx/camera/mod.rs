pub mod camera_controller;
pub mod camera_utils;
pub mod view_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{Camera, CameraUniform, Projection};
pub use view_camera::{wrap_degrees, ViewCamera, ViewMode};
