//! Interactive editor demo.
//!
//! ```text
//! cargo run --example editor                     # procedural scene
//! cargo run --example editor -- a.obj b.obj      # movable OBJ models
//! ```
//!
//! Keys: `v` top view, `V` 3D view, click to select (top view), `x/y/z`
//! rotate (shift for clockwise), arrow left/right scale, `t` translate, `p`
//! start a path then click two points, arrow up/down change path speed,
//! `Escape` cancel path definition.

use anyhow::Context;
use cgmath::Vector3;
use pathpick::prelude::*;

const MODEL_COLORS: [[u8; 4]; 4] = [
    [40, 90, 220, 100],
    [220, 60, 60, 100],
    [60, 170, 80, 100],
    [200, 120, 30, 100],
];

fn procedural_scene(scene: &mut Scene) -> anyhow::Result<()> {
    let cube = generate_cube(0.4).into_mesh("cube");
    let pyramid = generate_pyramid(0.5, 0.4).into_mesh("pyramid");
    let ground = generate_plane(3.0, 3.0, 6, 6)
        .translated([0.0, 0.0, -0.3])
        .into_mesh("ground");

    let cube = scene.add_mesh(&cube, MODEL_COLORS[0], ObjectKind::Movable)?;
    let pyramid = scene.add_mesh(&pyramid, MODEL_COLORS[1], ObjectKind::Movable)?;
    scene.add_mesh(&ground, [120, 120, 120, 100], ObjectKind::Fixed)?;

    if let Some(object) = scene.object_mut(cube) {
        object.pose.set_translate(Vector3::new(-0.8, 0.4, 0.0));
    }
    if let Some(object) = scene.object_mut(pyramid) {
        object.pose.set_translate(Vector3::new(0.7, -0.5, 0.0));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = EditorConfig::default()
        .with_title("pathpick editor")
        .with_size(800, 800);
    let mut scene = Scene::new(config.highlight_color);
    for primitive in default_primitives() {
        scene.add_primitive(primitive);
    }

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        procedural_scene(&mut scene)?;
    } else {
        for (i, path) in paths.iter().enumerate() {
            let color = MODEL_COLORS[i % MODEL_COLORS.len()];
            scene
                .load_model(path, color, ObjectKind::Movable)
                .with_context(|| format!("loading {}", path))?;
        }
    }

    let app = EditorApp::new(config, scene)?;
    app.run()?;
    Ok(())
}
