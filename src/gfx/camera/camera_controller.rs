use super::view_camera::{ViewCamera, ViewMode};

/// Turns horizontal mouse drags into orbit rotation.
///
/// Dragging is only active in orbit mode; presses in top-down mode are
/// ignored so that clicks there stay available for picking.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Degrees of orbit per pixel of horizontal movement.
    pub rotate_speed: f32,
    is_dragging: bool,
    last_x: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32) -> Self {
        Self {
            rotate_speed,
            is_dragging: false,
            last_x: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn mouse_down(&mut self, x: f32, camera: &ViewCamera) {
        if camera.mode() != ViewMode::Orbit {
            return;
        }
        self.is_dragging = true;
        self.last_x = x;
    }

    /// Returns true if the camera moved.
    pub fn mouse_move(&mut self, x: f32, camera: &mut ViewCamera) -> bool {
        if !self.is_dragging || camera.mode() != ViewMode::Orbit {
            return false;
        }

        let delta_x = x - self.last_x;
        self.last_x = x;
        if delta_x == 0.0 {
            return false;
        }

        camera.add_orbit_drag(delta_x, self.rotate_speed);
        true
    }

    /// Ends a drag. Also used when the cursor leaves the window.
    pub fn mouse_up(&mut self) {
        self.is_dragging = false;
    }
}
