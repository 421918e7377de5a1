//! # View Camera
//!
//! Camera with two fixed view modes. In orbit mode the eye is a fixed
//! reference position rotated about the vertical (Y) axis; in top-down mode
//! the eye sits on the Z axis. Both modes always look at the origin.

use cgmath::{Deg, EuclideanSpace, Matrix3, Matrix4, Point3, Vector3};

use crate::config::CameraConfig;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform, Projection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Eye revolves around the origin.
    Orbit,
    /// Eye looks straight down the Z axis. Picking and path definition only
    /// work in this mode.
    TopDown,
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ViewCamera {
    mode: ViewMode,
    /// Stored orbit azimuth in degrees, always in `[0, 360)`.
    orbit_angle: f32,
    eye: Vector3<f32>,
    target: Vector3<f32>,
    up: Vector3<f32>,
    orbit_eye: Vector3<f32>,
    top_eye: Vector3<f32>,
    pub projection: Projection,
    uniform: CameraUniform,
}

impl Camera for ViewCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection.calc_matrix() * self.view_matrix()
    }
}

impl ViewCamera {
    /// Creates a camera in orbit mode at angle zero.
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            mode: ViewMode::Orbit,
            orbit_angle: 0.0,
            eye: config.orbit_eye,
            target: Vector3::new(0.0, 0.0, 0.0),
            up: config.up,
            orbit_eye: config.orbit_eye,
            top_eye: config.top_eye,
            projection: Projection::new(width, height, config.fovy, config.znear, config.zfar),
            uniform: CameraUniform::default(),
        };
        camera.set_mode_orbit();
        camera
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    pub fn eye(&self) -> Vector3<f32> {
        self.eye
    }

    /// Switches to orbit mode and re-applies the stored orbit angle.
    pub fn set_mode_orbit(&mut self) {
        if self.mode != ViewMode::Orbit {
            log::info!("view mode: orbit ({:.1} deg)", self.orbit_angle);
        }
        self.rotate(self.orbit_angle);
    }

    /// Switches to the top-down view.
    pub fn set_mode_top(&mut self) {
        if self.mode != ViewMode::TopDown {
            log::info!("view mode: top-down");
        }
        self.mode = ViewMode::TopDown;
        self.eye = self.top_eye;
        self.update_view_proj();
    }

    /// Places the eye at the orbit reference position rotated by `angle`
    /// degrees about the Y axis. Forces orbit mode; does not change the
    /// stored orbit angle.
    pub fn rotate(&mut self, angle: f32) {
        self.mode = ViewMode::Orbit;
        self.eye = Matrix3::from_angle_y(Deg(angle)) * self.orbit_eye;
        self.update_view_proj();
    }

    /// Stores `angle` (wrapped into `[0, 360)`) and rotates to it.
    pub fn set_orbit_angle(&mut self, angle: f32) {
        self.orbit_angle = wrap_degrees(angle);
        self.rotate(self.orbit_angle);
    }

    /// Applies a horizontal drag of `delta_x` pixels. The drag direction is
    /// inverted so that dragging right turns the scene right.
    pub fn add_orbit_drag(&mut self, delta_x: f32, sensitivity: f32) {
        self.set_orbit_angle(self.orbit_angle - delta_x * sensitivity);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            self.up,
        )
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.update_view_proj();
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }

    pub fn uniform(&self) -> CameraUniform {
        self.uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{assert_relative_eq, InnerSpace, Vector4};

    fn camera() -> ViewCamera {
        ViewCamera::new(&CameraConfig::default(), 500, 500)
    }

    #[test]
    fn test_starts_in_orbit_at_reference_eye() {
        let camera = camera();
        assert_eq!(camera.mode(), ViewMode::Orbit);
        assert_relative_eq!(camera.eye(), Vector3::new(2.0, 2.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_top_view_is_idempotent() {
        let mut once = camera();
        once.set_mode_top();

        let mut twice = camera();
        twice.set_mode_top();
        twice.set_mode_top();

        assert_eq!(once.view_matrix(), twice.view_matrix());
        assert_eq!(twice.eye(), Vector3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_top_view_projects_plane_points() {
        let mut camera = camera();
        camera.set_mode_top();
        let view_proj = camera.build_view_projection_matrix();

        let origin = view_proj * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin.w, 4.0, epsilon = 1e-5);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-6);

        let corner = view_proj * Vector4::new(1.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(corner.x / corner.w, 0.6036, epsilon = 1e-4);
        assert_relative_eq!(corner.y / corner.w, 0.6036, epsilon = 1e-4);

        // The uploaded uniform carries the same matrix.
        let uniform: Matrix4<f32> = camera.uniform().view_proj.into();
        assert_relative_eq!(uniform, view_proj, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_keeps_radius_and_height() {
        let mut camera = camera();
        camera.rotate(90.0);

        // A quarter turn about Y maps (2, 2, 2) to (2, 2, -2).
        assert_relative_eq!(camera.eye(), Vector3::new(2.0, 2.0, -2.0), epsilon = 1e-5);
        assert_relative_eq!(camera.eye().magnitude(), 12f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_forces_orbit_mode() {
        let mut camera = camera();
        camera.set_mode_top();
        camera.rotate(30.0);
        assert_eq!(camera.mode(), ViewMode::Orbit);
    }

    #[test]
    fn test_orbit_mode_restores_stored_angle() {
        let mut camera = camera();
        camera.set_orbit_angle(90.0);
        let orbit_eye = camera.eye();

        camera.set_mode_top();
        camera.set_mode_orbit();
        assert_relative_eq!(camera.eye(), orbit_eye, epsilon = 1e-5);
    }

    #[test]
    fn test_drag_wraps_angle() {
        let mut camera = camera();
        // 74 moves of -10 px at 0.5 deg/px accumulate +370 degrees.
        for _ in 0..74 {
            camera.add_orbit_drag(-10.0, 0.5);
        }
        assert_eq!(camera.orbit_angle(), 10.0);
    }

    #[test]
    fn test_negative_angles_wrap() {
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        let tiny = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }
}
