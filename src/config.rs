//! Editor configuration
//!
//! All tunable constants of the editor live here. Every struct has a
//! `Default` tuned for a 500x500 window and a set of `with_*` builder
//! methods for overriding individual values.
//!
//! ```
//! use pathpick::config::{EditorConfig, PathConfig};
//!
//! let config = EditorConfig::default()
//!     .with_title("My scene")
//!     .with_path(PathConfig::default().with_initial_speed(0.02));
//! assert_eq!(config.path.initial_speed, 0.02);
//! ```

use cgmath::{Deg, Vector3};

/// Converts an RGBA color given as 0-255 per color channel and 0-100 alpha
/// into normalized floats.
pub fn rgba_from_bytes(color: [u8; 4]) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        color[3] as f32 / 100.0,
    ]
}

/// Camera placement for both view modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Eye position the orbit rotation is applied to.
    pub orbit_eye: Vector3<f32>,
    /// Eye position of the top-down view.
    pub top_eye: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    /// Degrees of orbit per pixel of horizontal mouse drag.
    pub drag_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_eye: Vector3::new(2.0, 2.0, 2.0),
            top_eye: Vector3::new(0.0, 0.0, 4.0),
            up: Vector3::unit_y(),
            fovy: Deg(45.0),
            znear: 0.1,
            zfar: 100.0,
            drag_sensitivity: 0.5,
        }
    }
}

impl CameraConfig {
    pub fn with_orbit_eye(mut self, eye: Vector3<f32>) -> Self {
        self.orbit_eye = eye;
        self
    }

    pub fn with_top_eye(mut self, eye: Vector3<f32>) -> Self {
        self.top_eye = eye;
        self
    }

    pub fn with_drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }
}

/// Path definition and animation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathConfig {
    pub initial_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Multiplier applied by the speed-up control.
    pub speed_up_factor: f32,
    /// Multiplier applied by the slow-down control.
    pub slow_down_factor: f32,
    /// Scale from normalized device coordinates to world units on the
    /// top-down picking plane.
    pub unproject_scale: f32,
    /// World Z assigned to unprojected control points.
    pub plane_depth: f32,
    /// Number of segments of the sampled curve polyline.
    pub polyline_steps: u32,
    /// Half extent of a control point marker.
    pub marker_size: f32,
    pub curve_color: [f32; 4],
    /// Marker colors by collection order.
    pub marker_colors: [[f32; 4]; 3],
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            initial_speed: 0.01,
            min_speed: 0.001,
            max_speed: 0.05,
            speed_up_factor: 1.2,
            slow_down_factor: 0.8,
            unproject_scale: 2.0,
            plane_depth: 0.5,
            polyline_steps: 50,
            marker_size: 0.15,
            curve_color: [1.0, 1.0, 0.0, 1.0],
            marker_colors: [
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 1.0],
            ],
        }
    }
}

impl PathConfig {
    pub fn with_initial_speed(mut self, speed: f32) -> Self {
        self.initial_speed = speed.clamp(self.min_speed, self.max_speed);
        self
    }

    pub fn with_speed_bounds(mut self, min_speed: f32, max_speed: f32) -> Self {
        self.min_speed = min_speed;
        self.max_speed = max_speed;
        self.initial_speed = self.initial_speed.clamp(min_speed, max_speed);
        self
    }

    pub fn with_polyline_steps(mut self, steps: u32) -> Self {
        self.polyline_steps = steps.max(1);
        self
    }
}

/// Step sizes of the keyboard edit commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditStep {
    /// Rotation per key press, in radians.
    pub rotation: f32,
    pub scale_up: f32,
    pub scale_down: f32,
}

impl Default for EditStep {
    fn default() -> Self {
        Self {
            rotation: std::f32::consts::PI / 18.0,
            scale_up: 1.1,
            scale_down: 0.9,
        }
    }
}

/// Top level editor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Background clear color, normalized.
    pub clear_color: [f32; 4],
    /// Color the selected object is drawn with.
    pub highlight_color: [f32; 4],
    pub camera: CameraConfig,
    pub path: PathConfig,
    pub edit: EditStep,
    /// Show the imgui control panel.
    pub show_panel: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: "pathpick".to_string(),
            width: 500,
            height: 500,
            clear_color: rgba_from_bytes([200, 200, 200, 100]),
            highlight_color: [1.0, 0.6, 0.0, 1.0],
            camera: CameraConfig::default(),
            path: PathConfig::default(),
            edit: EditStep::default(),
            show_panel: true,
        }
    }
}

impl EditorConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_highlight_color(mut self, color: [f32; 4]) -> Self {
        self.highlight_color = color;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_path(mut self, path: PathConfig) -> Self {
        self.path = path;
        self
    }

    pub fn with_edit_step(mut self, edit: EditStep) -> Self {
        self.edit = edit;
        self
    }

    pub fn with_panel(mut self, show: bool) -> Self {
        self.show_panel = show;
        self
    }
}
