//! # Scene Management Module
//!
//! Objects, world-space primitives and the selection state of the editor.
//!
//! ## Key Components
//!
//! - [`Scene`] - arena-backed container of objects and primitives
//! - [`SceneObject`] - one mesh instance with a flat color and a [`Pose`]
//! - [`Pose`] - quaternion based translate / rotation / scale state
//! - [`Primitive`] - untransformed line and triangle geometry
//! - [`Vertex3D`] - position-only vertex
//!
//! ## Usage
//!
//! ```
//! use pathpick::gfx::scene::{MeshData, ObjectKind, Scene};
//!
//! let mut scene = Scene::new([1.0, 0.6, 0.0, 1.0]);
//! let mesh = MeshData::new(
//!     "triangle",
//!     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
//!     vec![0, 1, 2],
//! );
//! let handle = scene.add_mesh(&mesh, [255, 0, 0, 100], ObjectKind::Movable).unwrap();
//! assert_eq!(scene.toggle_selection(handle), Some(handle));
//! ```

pub mod arena;
pub mod loader;
pub mod object;
pub mod pose;
pub mod primitive;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use loader::{load_obj, MeshData};
pub use object::{ObjectHandle, ObjectKind, SceneObject};
pub use pose::Pose;
pub use primitive::{default_primitives, Primitive, PrimitiveHandle, PrimitiveRole, Shape};
pub use scene::{DrawItem, Scene};
pub use vertex::Vertex3D;
