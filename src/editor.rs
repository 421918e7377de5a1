//! # Editor Core
//!
//! [`Editor`] ties the scene, the view camera and the path engine together
//! and exposes one handler per input. It never touches a window or a GPU
//! directly: picking goes through any [`PickTarget`], and rendering reads
//! [`Editor::scene`] and [`Editor::camera_uniform`].
//!
//! Manual edits, path definition and path animation exclude each other:
//! edits need a selection while the path engine is idle, and clicks are
//! routed to the path engine while it is collecting points.

use cgmath::{Matrix4, Vector3};

use crate::config::EditorConfig;
use crate::error::PickError;
use crate::gfx::camera::{Camera, CameraController, CameraUniform, ViewCamera, ViewMode};
use crate::gfx::picking::{ObjectPicker, PickTarget};
use crate::gfx::scene::{ObjectHandle, Pose, Scene};
use crate::input::{ClickTracker, EditorKey, InputEvent};
use crate::path::{PathEngine, PathState, PointOutcome, StepOutcome};

const MODE_MISMATCH_NOTICE: &str = "Switch to the top view to pick objects";
const DEFINE_PATH_NOTICE: &str = "Click two more points to define the path";

/// What a canvas click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Clicks only pick in the top-down view.
    ModeMismatch,
    /// The click was consumed by path definition.
    PathPoint(PointOutcome),
    Selected(ObjectHandle),
    Deselected(ObjectHandle),
    /// Nothing pickable under the cursor.
    Missed,
    /// Clicks are ignored while a path is animating.
    Ignored,
}

/// Snapshot of the editor state for display.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorStatus {
    pub view_mode: ViewMode,
    pub orbit_angle: f32,
    pub selected: Option<ObjectHandle>,
    pub selected_name: Option<String>,
    pub path_state: PathState,
    pub speed: f32,
    pub notice: Option<&'static str>,
}

/// Axis a rotation key turns the selection about, in object space.
fn rotation_axis(key: char) -> Option<Vector3<f32>> {
    match key.to_ascii_lowercase() {
        'x' => Some(Vector3::unit_x()),
        'y' => Some(Vector3::unit_y()),
        'z' => Some(Vector3::unit_z()),
        _ => None,
    }
}

pub struct Editor {
    config: EditorConfig,
    scene: Scene,
    camera: ViewCamera,
    controller: CameraController,
    clicks: ClickTracker,
    path: PathEngine,
    picker: ObjectPicker,
    viewport: (u32, u32),
    translate_input: Vector3<f32>,
    notice: Option<&'static str>,
}

impl Editor {
    /// Creates an editor over `scene` with a viewport of the configured
    /// window size. The camera starts in orbit mode at angle 0.
    pub fn new(config: EditorConfig, scene: Scene) -> Self {
        let viewport = (config.width.max(1), config.height.max(1));
        Self {
            camera: ViewCamera::new(&config.camera, viewport.0, viewport.1),
            controller: CameraController::new(config.camera.drag_sensitivity),
            clicks: ClickTracker::default(),
            path: PathEngine::new(config.path),
            picker: ObjectPicker::new(),
            viewport,
            translate_input: Vector3::new(0.0, 0.0, 0.0),
            notice: None,
            scene,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    pub fn path(&self) -> &PathEngine {
        &self.path
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera.uniform()
    }

    /// Manual edits need a selection and an idle path engine.
    pub fn can_edit(&self) -> bool {
        self.scene.selected().is_some() && self.path.state() == PathState::Idle
    }

    pub fn status(&self) -> EditorStatus {
        let selected = self.scene.selected();
        EditorStatus {
            view_mode: self.camera.mode(),
            orbit_angle: self.camera.orbit_angle(),
            selected,
            selected_name: selected
                .and_then(|h| self.scene.object(h))
                .map(|o| o.name.clone()),
            path_state: self.path.state(),
            speed: self.path.speed(),
            notice: self.notice,
        }
    }

    // --- frame ---

    /// Advances a running path animation by one step. Call once per frame
    /// before rendering.
    pub fn update(&mut self) -> StepOutcome {
        self.path.tick(&mut self.scene)
    }

    /// Follows a viewport resize. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.resize_projection(width, height);
    }

    // --- input ---

    /// Dispatches one input event.
    ///
    /// A release close to its press is a click and picks through `target`;
    /// the click's outcome is returned. Pick errors are logged and yield
    /// `None`.
    pub fn handle_input<T: PickTarget + ?Sized>(
        &mut self,
        event: InputEvent,
        target: &mut T,
    ) -> Option<ClickOutcome> {
        match event {
            InputEvent::KeyPressed(key) => {
                self.handle_key(key);
                None
            }
            InputEvent::MouseDown { x, y } => {
                self.mouse_down(x);
                self.clicks.press(x, y);
                None
            }
            InputEvent::MouseMove { x, .. } => {
                self.mouse_move(x);
                None
            }
            InputEvent::MouseUp { x, y } => {
                self.mouse_up();
                let (x, y) = self.clicks.release(x, y)?;
                match self.handle_click(target, x, y) {
                    Ok(outcome) => Some(outcome),
                    Err(e) => {
                        log::error!("pick failed: {}", e);
                        None
                    }
                }
            }
            InputEvent::CursorLeft => {
                self.mouse_up();
                self.clicks.cancel();
                None
            }
        }
    }

    /// Applies a key binding. Returns whether the key changed anything.
    pub fn handle_key(&mut self, key: EditorKey) -> bool {
        match key {
            EditorKey::Char('V') => {
                self.set_view_orbit();
                true
            }
            EditorKey::Char('v') => {
                self.set_view_top();
                true
            }
            EditorKey::Char('t') => self.apply_translate(),
            EditorKey::Char('p') => self.start_path(),
            EditorKey::ArrowLeft => {
                let factor = self.config.edit.scale_down;
                self.edit_selection(|pose| pose.scale_object(factor))
            }
            EditorKey::ArrowRight => {
                let factor = self.config.edit.scale_up;
                self.edit_selection(|pose| pose.scale_object(factor))
            }
            EditorKey::ArrowUp => self.path.speed_up(),
            EditorKey::ArrowDown => self.path.slow_down(),
            EditorKey::Escape => self.path.cancel(&mut self.scene),
            EditorKey::Char(c) => match rotation_axis(c) {
                Some(axis) => {
                    let clockwise = c.is_ascii_uppercase();
                    let step = self.config.edit.rotation;
                    self.edit_selection(|pose| pose.rotate_around_axis(axis, step, clockwise))
                }
                None => false,
            },
        }
    }

    fn edit_selection<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut Pose),
    {
        if !self.can_edit() {
            log::debug!("edit ignored: selection {:?}, path {:?}", self.scene.selected(), self.path.state());
            return false;
        }
        match self.scene.selected_object_mut() {
            Some(object) => {
                edit(&mut object.pose);
                true
            }
            None => false,
        }
    }

    /// Starts path definition for the selection.
    pub fn start_path(&mut self) -> bool {
        if !self.can_edit() {
            log::debug!("path start ignored");
            return false;
        }
        let started = self.path.start(&mut self.scene);
        if started {
            self.notice = Some(DEFINE_PATH_NOTICE);
        }
        started
    }

    /// Handles a click at canvas coordinates `(x, y)` (top-left origin).
    ///
    /// In the top-down view a click either adds a path point or toggles the
    /// selection of the movable object under the cursor. Background clicks
    /// leave the selection unchanged.
    pub fn handle_click<T: PickTarget + ?Sized>(
        &mut self,
        target: &mut T,
        x: f32,
        y: f32,
    ) -> Result<ClickOutcome, PickError> {
        if self.camera.mode() != ViewMode::TopDown {
            log::info!("{}", MODE_MISMATCH_NOTICE);
            self.notice = Some(MODE_MISMATCH_NOTICE);
            return Ok(ClickOutcome::ModeMismatch);
        }
        self.notice = None;

        if self.path.is_defining() {
            let outcome = self.path.add_screen_point(&mut self.scene, x, y, self.viewport);
            return Ok(ClickOutcome::PathPoint(outcome));
        }
        if self.path.is_animating() {
            log::debug!("click ignored while animating");
            return Ok(ClickOutcome::Ignored);
        }

        let Some((px, py)) = self.pick_pixel(x, y) else {
            return Ok(ClickOutcome::Missed);
        };
        let picked = self.picker.pick(
            target,
            &self.scene,
            self.view_projection(),
            self.viewport,
            px,
            py,
        )?;

        Ok(match picked {
            Some(handle) => match self.scene.toggle_selection(handle) {
                Some(selected) if selected == handle => ClickOutcome::Selected(handle),
                _ => ClickOutcome::Deselected(handle),
            },
            None => ClickOutcome::Missed,
        })
    }

    /// Pixel under a canvas position, with the row counted from the bottom.
    fn pick_pixel(&self, x: f32, y: f32) -> Option<(u32, u32)> {
        let (w, h) = self.viewport;
        if !(0.0..w as f32).contains(&x) || !(0.0..h as f32).contains(&y) {
            return None;
        }
        let row_from_top = y.floor() as u32;
        Some((x.floor() as u32, h - 1 - row_from_top))
    }

    pub fn mouse_down(&mut self, x: f32) {
        self.controller.mouse_down(x, &self.camera);
    }

    /// Returns true if the drag rotated the camera.
    pub fn mouse_move(&mut self, x: f32) -> bool {
        self.controller.mouse_move(x, &mut self.camera)
    }

    pub fn mouse_up(&mut self) {
        self.controller.mouse_up();
    }

    // --- UI controls ---

    pub fn set_view_orbit(&mut self) {
        self.camera.set_mode_orbit();
    }

    pub fn set_view_top(&mut self) {
        self.camera.set_mode_top();
    }

    /// Orbit slider: the stored angle becomes `-value`, then the camera
    /// rotates to it.
    pub fn set_orbit_slider(&mut self, value: f32) {
        self.camera.set_orbit_angle(-value);
    }

    pub fn translate_input(&self) -> Vector3<f32> {
        self.translate_input
    }

    pub fn set_translate_input(&mut self, delta: Vector3<f32>) {
        self.translate_input = delta;
    }

    /// Moves the selection by the translate input, in object space.
    pub fn apply_translate(&mut self) -> bool {
        let delta = self.translate_input;
        self.edit_selection(|pose| pose.translate_object(delta))
    }
}
