use cgmath::{InnerSpace, Vector3};
use pathpick::prelude::*;

const VIEWPORT: u32 = 500;

fn square(half: f32) -> Vec<Vertex3D> {
    vec![
        Vertex3D::new(-half, -half, 0.0),
        Vertex3D::new(half, -half, 0.0),
        Vertex3D::new(half, half, 0.0),
        Vertex3D::new(half, half, 0.0),
        Vertex3D::new(-half, half, 0.0),
        Vertex3D::new(-half, -half, 0.0),
    ]
}

/// Three movable squares on the X axis and a fixed ground plane below them.
fn three_object_editor() -> (Editor, [ObjectHandle; 3], ObjectHandle) {
    let config = EditorConfig::default().with_size(VIEWPORT, VIEWPORT);
    let mut scene = Scene::new(config.highlight_color);

    let handles = [-1.0, 0.0, 1.0].map(|x| {
        let mut object = SceneObject::new("square", square(0.3), [0.2, 0.2, 0.8, 1.0], ObjectKind::Movable);
        object.pose.set_translate(Vector3::new(x, 0.0, 0.0));
        scene.add_object(object)
    });

    let ground = generate_plane(6.0, 6.0, 1, 1)
        .translated([0.0, 0.0, -0.5])
        .into_mesh("ground");
    let ground = scene.add_mesh(&ground, [100, 100, 100, 100], ObjectKind::Fixed).unwrap();

    let mut editor = Editor::new(config, scene);
    editor.handle_key(EditorKey::Char('v'));
    (editor, handles, ground)
}

#[test]
fn picks_the_object_under_the_cursor() {
    let (editor, handles, _) = three_object_editor();
    let mut target = SoftwarePickTarget::new(VIEWPORT, VIEWPORT);
    let picker = ObjectPicker::new();

    let picked = picker
        .pick(&mut target, editor.scene(), editor.view_projection(), editor.viewport(), 250, 250)
        .unwrap();
    assert_eq!(picked, Some(handles[1]));
    assert_eq!(picked.map(ObjectHandle::index), Some(1));

    let left = picker
        .pick(&mut target, editor.scene(), editor.view_projection(), editor.viewport(), 99, 250)
        .unwrap();
    assert_eq!(left, Some(handles[0]));

    // Above the row of squares only the fixed ground is visible.
    let background = picker
        .pick(&mut target, editor.scene(), editor.view_projection(), editor.viewport(), 250, 450)
        .unwrap();
    assert_eq!(background, None);
}

#[test]
fn pick_restores_render_state() {
    let (editor, _, _) = three_object_editor();
    let mut target = SoftwarePickTarget::new(VIEWPORT, VIEWPORT);
    let before = target.render_state();

    ObjectPicker::new()
        .pick(&mut target, editor.scene(), editor.view_projection(), editor.viewport(), 250, 250)
        .unwrap();
    assert_eq!(target.render_state(), before);
}

#[test]
fn stale_pick_target_is_rejected() {
    let (mut editor, _, _) = three_object_editor();
    let mut target = SoftwarePickTarget::new(VIEWPORT, VIEWPORT);
    editor.resize(640, 480);

    let result = editor.handle_click(&mut target, 320.0, 240.0);
    assert!(matches!(result, Err(PickError::StaleTarget { .. })));

    target.resize(640, 480);
    assert!(editor.handle_click(&mut target, 320.0, 240.0).is_ok());
}

#[test]
fn fixed_objects_are_never_selected() {
    let (mut editor, _, ground) = three_object_editor();
    let mut target = SoftwarePickTarget::new(VIEWPORT, VIEWPORT);

    let outcome = editor.handle_click(&mut target, 250.0, 50.0).unwrap();
    assert_eq!(outcome, ClickOutcome::Missed);
    assert_eq!(editor.scene().selected(), None);
    assert_eq!(editor.scene_mut().toggle_selection(ground), None);
}

#[test]
fn select_edit_and_animate_along_path() {
    let (mut editor, handles, _) = three_object_editor();
    let mut target = SoftwarePickTarget::new(VIEWPORT, VIEWPORT);

    // Select the middle square.
    assert_eq!(
        editor.handle_click(&mut target, 250.0, 250.0).unwrap(),
        ClickOutcome::Selected(handles[1])
    );

    // Rotate, scale up twice and down once.
    assert!(editor.handle_key(EditorKey::Char('z')));
    assert!(editor.handle_key(EditorKey::ArrowRight));
    assert!(editor.handle_key(EditorKey::ArrowRight));
    assert!(editor.handle_key(EditorKey::ArrowLeft));
    {
        let pose = &editor.scene().object(handles[1]).unwrap().pose;
        assert!((pose.rotation().magnitude() - 1.0).abs() < 1e-5);
        assert!((pose.scale().x - 1.1 * 1.1 * 0.9).abs() < 1e-5);
    }

    // Define a path: start at the object, then two clicks.
    assert!(editor.handle_key(EditorKey::Char('p')));
    assert_eq!(editor.path().state(), PathState::Defining { collected: 1 });
    assert!(!editor.handle_key(EditorKey::Char('x')));

    let first = editor.handle_click(&mut target, 375.0, 125.0).unwrap();
    assert!(matches!(first, ClickOutcome::PathPoint(_)));
    let second = editor.handle_click(&mut target, 500.0, 250.0).unwrap();
    assert!(matches!(second, ClickOutcome::PathPoint(_)));
    assert_eq!(editor.path().state(), PathState::Animating);

    // Clicks, edits and cancel are ignored while animating.
    assert_eq!(
        editor.handle_click(&mut target, 250.0, 250.0).unwrap(),
        ClickOutcome::Ignored
    );
    assert!(!editor.handle_key(EditorKey::ArrowRight));
    assert!(!editor.handle_key(EditorKey::Escape));

    let mut steps = 0;
    while editor.update() != StepOutcome::Finished {
        steps += 1;
        assert!(steps <= 101, "animation did not finish");
    }

    assert_eq!(editor.scene().selected(), None);
    assert_eq!(editor.path().moving_object(), None);
    assert_eq!(editor.path().state(), PathState::Idle);

    let end = editor.scene().object(handles[1]).unwrap().pose.translate();
    assert!((end - Vector3::new(2.0, 0.0, 0.5)).magnitude() < 0.1);

    let curves = editor
        .scene()
        .primitives()
        .filter(|(_, p)| p.role == PrimitiveRole::PathCurve)
        .count();
    assert_eq!(curves, 1);
}

#[test]
fn speed_changes_apply_only_while_animating() {
    let (mut editor, handles, _) = three_object_editor();
    let mut target = SoftwarePickTarget::new(VIEWPORT, VIEWPORT);

    assert!(!editor.handle_key(EditorKey::ArrowUp));
    assert_eq!(editor.path().speed(), 0.01);

    editor.handle_click(&mut target, 250.0, 250.0).unwrap();
    assert_eq!(editor.scene().selected(), Some(handles[1]));
    editor.handle_key(EditorKey::Char('p'));
    editor.handle_click(&mut target, 300.0, 200.0).unwrap();
    editor.handle_click(&mut target, 350.0, 250.0).unwrap();

    assert!(editor.handle_key(EditorKey::ArrowUp));
    assert!((editor.path().speed() - 0.012).abs() < 1e-6);
    assert!(editor.handle_key(EditorKey::ArrowDown));
    assert!((editor.path().speed() - 0.0096).abs() < 1e-6);
}
