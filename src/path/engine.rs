use cgmath::Vector3;

use crate::config::PathConfig;
use crate::gfx::scene::{ObjectHandle, Scene};

use super::curve::QuadraticCurve;
use super::visual::{control_point_marker, curve_polyline};

/// Number of control points a path is fitted through.
pub const CONTROL_POINTS: usize = 3;

/// Where the path engine is in its `Idle → Defining → Animating → Idle` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Idle,
    /// Collecting control points; `collected` is between 1 and 2.
    Defining { collected: usize },
    Animating,
}

/// Result of feeding a screen point to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointOutcome {
    /// Not defining a path; the point was dropped.
    Ignored,
    /// Point stored; `collected` points are now known.
    Collected { collected: usize, world: Vector3<f32> },
    /// Third point stored, curve fitted and animation started.
    Started { world: Vector3<f32> },
}

/// Result of one animation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Nothing is animating.
    Idle,
    /// The object was moved; `t` is the parameter for the next step.
    Moved { t: f32 },
    /// The parameter reached 1 and the animation ended.
    Finished,
}

/// Maps a canvas pixel (top-left origin) to a point on the top-down
/// picking plane.
pub fn screen_to_world(x: f32, y: f32, viewport: (u32, u32), config: &PathConfig) -> Vector3<f32> {
    let (w, h) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);
    let ndc_x = (x / w) * 2.0 - 1.0;
    let ndc_y = ((h - y) / h) * 2.0 - 1.0;
    Vector3::new(
        ndc_x * config.unproject_scale,
        ndc_y * config.unproject_scale,
        config.plane_depth,
    )
}

/// Three point quadratic path definition and animation of one object.
///
/// The engine owns the transient path: the control points, the fitted
/// curve, the animation parameter and the handle of the moving object. It
/// mutates the [`Scene`] passed to each call to add markers and the
/// polyline, move the object and clear the selection when done.
#[derive(Debug, Clone)]
pub struct PathEngine {
    config: PathConfig,
    state: PathState,
    points: Vec<Vector3<f32>>,
    curve: Option<QuadraticCurve>,
    moving: Option<ObjectHandle>,
    t: f32,
    speed: f32,
}

impl PathEngine {
    pub fn new(config: PathConfig) -> Self {
        Self {
            speed: config.initial_speed,
            config,
            state: PathState::Idle,
            points: Vec::with_capacity(CONTROL_POINTS),
            curve: None,
            moving: None,
            t: 0.0,
        }
    }

    pub fn state(&self) -> PathState {
        self.state
    }

    pub fn is_defining(&self) -> bool {
        matches!(self.state, PathState::Defining { .. })
    }

    pub fn is_animating(&self) -> bool {
        self.state == PathState::Animating
    }

    pub fn points(&self) -> &[Vector3<f32>] {
        &self.points
    }

    pub fn curve(&self) -> Option<&QuadraticCurve> {
        self.curve.as_ref()
    }

    pub fn moving_object(&self) -> Option<ObjectHandle> {
        self.moving
    }

    /// Current animation parameter.
    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Sets the speed, clamped to the configured bounds.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(self.config.min_speed, self.config.max_speed);
    }

    /// Multiplies the speed by the speed-up factor. Only while animating.
    pub fn speed_up(&mut self) -> bool {
        self.adjust_speed(self.config.speed_up_factor)
    }

    /// Multiplies the speed by the slow-down factor. Only while animating.
    pub fn slow_down(&mut self) -> bool {
        self.adjust_speed(self.config.slow_down_factor)
    }

    fn adjust_speed(&mut self, factor: f32) -> bool {
        if !self.is_animating() {
            log::debug!("speed change ignored, nothing is animating");
            return false;
        }
        self.set_speed(self.speed * factor);
        log::info!("path speed set to {:.4}", self.speed);
        true
    }

    /// Starts defining a path for the selected object. Its current position
    /// becomes the first control point.
    ///
    /// Requires a selection and an idle engine; otherwise returns `false`.
    pub fn start(&mut self, scene: &mut Scene) -> bool {
        if self.state != PathState::Idle {
            log::debug!("path start ignored in state {:?}", self.state);
            return false;
        }
        let Some(handle) = scene.selected() else {
            log::debug!("path start ignored, nothing selected");
            return false;
        };
        let Some(object) = scene.object(handle) else {
            return false;
        };

        let p0 = object.pose.translate();
        self.points.clear();
        self.curve = None;
        self.push_point(scene, p0);
        self.state = PathState::Defining { collected: 1 };
        log::info!("path definition started at {:?}, click {} more points", p0, CONTROL_POINTS - 1);
        true
    }

    /// Unprojects a canvas pixel and appends it as the next control point.
    /// The third point fits the curve and starts the animation.
    pub fn add_screen_point(
        &mut self,
        scene: &mut Scene,
        x: f32,
        y: f32,
        viewport: (u32, u32),
    ) -> PointOutcome {
        if !self.is_defining() {
            log::debug!("path point ignored in state {:?}", self.state);
            return PointOutcome::Ignored;
        }

        let world = screen_to_world(x, y, viewport, &self.config);
        self.push_point(scene, world);
        let collected = self.points.len();

        if collected < CONTROL_POINTS {
            self.state = PathState::Defining { collected };
            log::info!("path point {} at {:?}", collected, world);
            return PointOutcome::Collected { collected, world };
        }

        self.begin_animation(scene);
        PointOutcome::Started { world }
    }

    fn push_point(&mut self, scene: &mut Scene, point: Vector3<f32>) {
        let color = self.config.marker_colors[self.points.len().min(CONTROL_POINTS - 1)];
        scene.add_primitive(control_point_marker(point, self.config.marker_size, color));
        self.points.push(point);
    }

    fn begin_animation(&mut self, scene: &mut Scene) {
        let curve = QuadraticCurve::fit(self.points[0], self.points[1], self.points[2]);
        scene.add_primitive(curve_polyline(&curve, self.config.polyline_steps, self.config.curve_color));

        self.curve = Some(curve);
        self.moving = scene.selected();
        self.t = 0.0;
        self.state = PathState::Animating;
        log::info!("path animation started for {:?}", self.moving);
    }

    /// Cancels a path definition, dropping the collected points and removing
    /// all path markers and curves from the scene.
    ///
    /// Has no effect while idle or animating.
    pub fn cancel(&mut self, scene: &mut Scene) -> bool {
        if !self.is_defining() {
            log::debug!("path cancel ignored in state {:?}", self.state);
            return false;
        }
        self.points.clear();
        self.curve = None;
        self.state = PathState::Idle;
        let removed = scene.remove_path_visuals();
        log::info!("path definition cancelled, removed {} primitives", removed);
        true
    }

    /// Advances the animation by one frame.
    ///
    /// The moving object is placed at `curve(t)`, then `t` grows by the
    /// current speed. Once `t` reaches 1 the selection and the path are
    /// cleared; the drawn curve stays in the scene.
    pub fn tick(&mut self, scene: &mut Scene) -> StepOutcome {
        if !self.is_animating() {
            return StepOutcome::Idle;
        }

        let (Some(curve), Some(handle)) = (self.curve, self.moving) else {
            log::warn!("animation state without curve or object, stopping");
            self.finish(scene);
            return StepOutcome::Finished;
        };
        let Some(object) = scene.object_mut(handle) else {
            log::warn!("moving object {:?} no longer exists, stopping", handle);
            self.finish(scene);
            return StepOutcome::Finished;
        };

        object.pose.set_translate(curve.evaluate(self.t));
        self.t += self.speed;

        if self.t >= 1.0 {
            self.finish(scene);
            return StepOutcome::Finished;
        }
        StepOutcome::Moved { t: self.t }
    }

    fn finish(&mut self, scene: &mut Scene) {
        scene.clear_selection();
        self.moving = None;
        self.points.clear();
        self.curve = None;
        self.state = PathState::Idle;
        log::info!("path animation finished");
    }
}
