//! # pathpick Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use pathpick::prelude::*;
//!
//! let config = EditorConfig::default();
//! let mut scene = Scene::new(config.highlight_color);
//! let cube = generate_cube(0.5).into_mesh("cube");
//! let handle = scene.add_mesh(&cube, [0, 0, 255, 100], ObjectKind::Movable).unwrap();
//!
//! let mut editor = Editor::new(config, scene);
//! editor.scene_mut().toggle_selection(handle);
//! assert!(editor.handle_key(EditorKey::ArrowRight));
//! ```

pub use crate::app::{init_logging, EditorApp};
pub use crate::config::{CameraConfig, EditStep, EditorConfig, PathConfig};
pub use crate::editor::{ClickOutcome, Editor, EditorStatus};
pub use crate::error::{LoadError, PickError, SetupError};
pub use crate::gfx::camera::{ViewCamera, ViewMode};
pub use crate::gfx::geometry::{
    primitives::{generate_cube, generate_plane, generate_pyramid},
    GeometryData,
};
pub use crate::gfx::picking::{GpuPicker, ObjectPicker, PickTarget, SoftwarePickTarget};
pub use crate::gfx::scene::{
    default_primitives, load_obj, MeshData, ObjectHandle, ObjectKind, Pose, Primitive, PrimitiveRole,
    Scene, SceneObject, Shape, Vertex3D,
};
pub use crate::input::{EditorKey, InputEvent};
pub use crate::path::{PathEngine, PathState, QuadraticCurve, StepOutcome};
