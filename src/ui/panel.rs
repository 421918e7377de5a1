//! Editor control panel
//!
//! The panel never touches the editor directly. It reads an
//! [`EditorStatus`] snapshot and returns the [`PanelAction`]s the user
//! triggered this frame, which [`apply_panel_actions`] then feeds to the
//! [`Editor`].

use cgmath::Vector3;

use crate::editor::{Editor, EditorStatus};
use crate::gfx::camera::{wrap_degrees, ViewMode};
use crate::path::PathState;

/// A control the user activated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    ViewOrbit,
    ViewTop,
    /// Orbit slider moved to this value, in degrees.
    OrbitSlider(f32),
    /// An axis input was edited; the `t` key translates by these values.
    TranslateInput(Vector3<f32>),
    /// Translate button pressed with these axis inputs.
    Translate(Vector3<f32>),
}

/// Values held by the panel widgets between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelState {
    pub slider: f32,
    pub translate: [f32; 3],
    /// Orbit angle the slider last agreed with.
    synced_angle: f32,
}

impl PanelState {
    /// Moves the slider to follow orbit angle changes made outside the
    /// panel, such as mouse drags. Angles the slider produced itself are
    /// left alone so the handle does not jump while it is being dragged.
    pub fn sync_orbit_angle(&mut self, orbit_angle: f32) {
        if orbit_angle != self.synced_angle {
            self.slider = orbit_angle;
            self.synced_angle = orbit_angle;
        }
    }

    fn translate_vector(&self) -> Vector3<f32> {
        let [x, y, z] = self.translate;
        Vector3::new(x, y, z)
    }
}

/// Draws the editor panel and returns the actions triggered this frame.
pub fn editor_panel(ui: &imgui::Ui, status: &EditorStatus, state: &mut PanelState) -> Vec<PanelAction> {
    let mut actions = Vec::new();

    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return actions;
    }
    state.sync_orbit_angle(status.orbit_angle);

    ui.window("Editor")
        .size([260.0, 320.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .build(|| {
            render_view_controls(ui, state, &mut actions);
            ui.separator();
            render_translate_controls(ui, state, &mut actions);
            ui.separator();
            render_status(ui, status);
        });

    actions
}

fn render_view_controls(ui: &imgui::Ui, state: &mut PanelState, actions: &mut Vec<PanelAction>) {
    ui.text("View");
    if ui.button("3D View") {
        actions.push(PanelAction::ViewOrbit);
    }
    ui.same_line();
    if ui.button("Top View") {
        actions.push(PanelAction::ViewTop);
    }

    if ui.slider("Rotate", 0.0, 360.0, &mut state.slider) {
        state.synced_angle = wrap_degrees(-state.slider);
        actions.push(PanelAction::OrbitSlider(state.slider));
    }
}

fn render_translate_controls(ui: &imgui::Ui, state: &mut PanelState, actions: &mut Vec<PanelAction>) {
    ui.text("Translate");
    let mut edited = false;
    for (label, value) in ["X", "Y", "Z"].iter().zip(state.translate.iter_mut()) {
        ui.set_next_item_width(120.0);
        edited |= ui.input_float(label, value).step(0.1).build();
    }
    if edited {
        actions.push(PanelAction::TranslateInput(state.translate_vector()));
    }
    if ui.button("Translate") {
        actions.push(PanelAction::Translate(state.translate_vector()));
    }
}

fn render_status(ui: &imgui::Ui, status: &EditorStatus) {
    let mode = match status.view_mode {
        ViewMode::Orbit => format!("3D ({:.0} deg)", status.orbit_angle),
        ViewMode::TopDown => "Top".to_string(),
    };
    ui.text(format!("View: {}", mode));

    match &status.selected_name {
        Some(name) => ui.text(format!("Selected: {}", name)),
        None => ui.text("Selected: none"),
    }

    let path = match status.path_state {
        PathState::Idle => "idle".to_string(),
        PathState::Defining { collected } => format!("defining ({}/3)", collected),
        PathState::Animating => "animating".to_string(),
    };
    ui.text(format!("Path: {}", path));
    ui.text(format!("Speed: {:.4}", status.speed));

    if let Some(notice) = status.notice {
        ui.separator();
        ui.text_wrapped(notice);
    }
}

/// Applies panel actions to the editor in order.
pub fn apply_panel_actions(editor: &mut Editor, actions: &[PanelAction]) {
    for action in actions {
        match *action {
            PanelAction::ViewOrbit => editor.set_view_orbit(),
            PanelAction::ViewTop => editor.set_view_top(),
            PanelAction::OrbitSlider(value) => editor.set_orbit_slider(value),
            PanelAction::TranslateInput(delta) => editor.set_translate_input(delta),
            PanelAction::Translate(delta) => {
                editor.set_translate_input(delta);
                if !editor.apply_translate() {
                    log::debug!("translate ignored, no editable selection");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::gfx::scene::{ObjectHandle, ObjectKind, Scene, SceneObject, Vertex3D};
    use crate::input::EditorKey;

    fn editor_with_selection() -> (Editor, ObjectHandle) {
        let config = EditorConfig::default();
        let mut scene = Scene::new(config.highlight_color);
        let handle = scene.add_object(SceneObject::new(
            "tri",
            vec![
                Vertex3D::new(0.0, 0.0, 0.0),
                Vertex3D::new(1.0, 0.0, 0.0),
                Vertex3D::new(0.0, 1.0, 0.0),
            ],
            [1.0; 4],
            ObjectKind::Movable,
        ));
        scene.toggle_selection(handle);
        (Editor::new(config, scene), handle)
    }

    #[test]
    fn test_actions_drive_editor() {
        let (mut editor, handle) = editor_with_selection();

        apply_panel_actions(
            &mut editor,
            &[
                PanelAction::ViewTop,
                PanelAction::Translate(Vector3::new(1.0, 2.0, 3.0)),
            ],
        );
        assert_eq!(editor.camera().mode(), ViewMode::TopDown);
        assert_eq!(
            editor.scene().object(handle).map(|o| o.pose.translate()),
            Some(Vector3::new(1.0, 2.0, 3.0))
        );

        apply_panel_actions(&mut editor, &[PanelAction::OrbitSlider(30.0)]);
        assert_eq!(editor.camera().mode(), ViewMode::Orbit);
        assert!((editor.camera().orbit_angle() - 330.0).abs() < 1e-4);
    }

    #[test]
    fn test_t_key_uses_edited_axis_inputs() {
        let (mut editor, handle) = editor_with_selection();

        // Edit the fields without pressing the Translate button.
        apply_panel_actions(
            &mut editor,
            &[PanelAction::TranslateInput(Vector3::new(1.0, 0.0, 0.0))],
        );
        assert_eq!(
            editor.scene().object(handle).map(|o| o.pose.translate()),
            Some(Vector3::new(0.0, 0.0, 0.0))
        );

        assert!(editor.handle_key(EditorKey::Char('t')));
        assert_eq!(
            editor.scene().object(handle).map(|o| o.pose.translate()),
            Some(Vector3::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_slider_follows_external_orbit_changes() {
        let (mut editor, _) = editor_with_selection();
        let mut state = PanelState::default();

        // A drag of 80 px to the left turns the orbit to 40 degrees.
        editor.mouse_down(100.0);
        editor.mouse_move(20.0);
        editor.mouse_up();
        state.sync_orbit_angle(editor.status().orbit_angle);
        assert_eq!(state.slider, 40.0);

        // Angles produced by the slider itself leave the handle in place.
        state.slider = 30.0;
        state.synced_angle = wrap_degrees(-state.slider);
        apply_panel_actions(&mut editor, &[PanelAction::OrbitSlider(state.slider)]);
        state.sync_orbit_angle(editor.status().orbit_angle);
        assert_eq!(state.slider, 30.0);
    }
}
