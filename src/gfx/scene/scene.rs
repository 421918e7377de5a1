use std::path::Path;

use cgmath::{Matrix4, One};

use crate::config::rgba_from_bytes;
use crate::error::LoadError;

use super::arena::Arena;
use super::loader::{self, MeshData};
use super::object::{flatten_triangles, ObjectHandle, ObjectKind, SceneObject};
use super::primitive::{Primitive, PrimitiveHandle, Shape};
use super::vertex::Vertex3D;

/// One entry of the per-frame draw list.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub shape: Shape,
    pub vertices: &'a [Vertex3D],
    pub model: Matrix4<f32>,
    pub color: [f32; 4],
}

/// Main scene: objects, world-space primitives and the current selection.
///
/// Objects and primitives live in arenas, so handles stay valid when other
/// entries are removed.
pub struct Scene {
    objects: Arena<SceneObject>,
    primitives: Arena<Primitive>,
    selected: Option<ObjectHandle>,
    pub highlight_color: [f32; 4],
}

impl Scene {
    /// Creates an empty scene
    pub fn new(highlight_color: [f32; 4]) -> Self {
        Self {
            objects: Arena::new(),
            primitives: Arena::new(),
            selected: None,
            highlight_color,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectHandle {
        let name = object.name.clone();
        let vertex_count = object.vertex_count();
        let kind = object.kind;
        let handle = ObjectHandle(self.objects.insert(object));

        if kind == ObjectKind::Movable && handle.pick_id().is_none() {
            log::warn!(
                "object '{}' has handle {} which cannot be encoded for picking",
                name,
                handle.index()
            );
        }
        log::info!(
            "added {:?} object '{}' ({} vertices) as {:?}",
            kind,
            name,
            vertex_count,
            handle
        );
        handle
    }

    /// Flattens `mesh` and adds it with a 0-255 / 0-100 RGBA color.
    pub fn add_mesh(
        &mut self,
        mesh: &MeshData,
        color: [u8; 4],
        kind: ObjectKind,
    ) -> Result<ObjectHandle, LoadError> {
        if mesh.indices.is_empty() {
            return Err(LoadError::Empty(mesh.name.clone()));
        }
        let vertices = flatten_triangles(&mesh.name, &mesh.positions, &mesh.indices)?;
        let object = SceneObject::new(&mesh.name, vertices, rgba_from_bytes(color), kind);
        Ok(self.add_object(object))
    }

    /// Loads an OBJ file and adds it as a single object.
    pub fn load_model<P: AsRef<Path>>(
        &mut self,
        path: P,
        color: [u8; 4],
        kind: ObjectKind,
    ) -> Result<ObjectHandle, LoadError> {
        let mesh = loader::load_obj(path)?;
        self.add_mesh(&mesh, color, kind)
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0)
    }

    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.objects.iter().map(|(i, o)| (ObjectHandle(i), o))
    }

    pub fn movable_objects(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.objects().filter(|(_, o)| o.is_movable())
    }

    pub fn fixed_objects(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.objects().filter(|(_, o)| !o.is_movable())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// True if `handle` refers to a live movable object.
    pub fn is_movable(&self, handle: ObjectHandle) -> bool {
        self.object(handle).is_some_and(SceneObject::is_movable)
    }

    // --- selection ---

    pub fn selected(&self) -> Option<ObjectHandle> {
        self.selected
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        let handle = self.selected?;
        self.objects.get_mut(handle.0)
    }

    /// Selects `handle`, or clears the selection if it is already selected.
    ///
    /// Fixed or unknown objects are never selected; the selection is left
    /// untouched for them. Returns the selection after the call.
    pub fn toggle_selection(&mut self, handle: ObjectHandle) -> Option<ObjectHandle> {
        if !self.is_movable(handle) {
            log::debug!("ignoring selection of non-movable {:?}", handle);
            return self.selected;
        }

        self.selected = if self.selected == Some(handle) {
            None
        } else {
            Some(handle)
        };
        log::info!("selection changed to {:?}", self.selected);
        self.selected
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            log::info!("selection cleared");
        }
    }

    // --- primitives ---

    pub fn add_primitive(&mut self, primitive: Primitive) -> PrimitiveHandle {
        PrimitiveHandle(self.primitives.insert(primitive))
    }

    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveHandle, &Primitive)> {
        self.primitives.iter().map(|(i, p)| (PrimitiveHandle(i), p))
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Removes all path curves and control point markers.
    pub fn remove_path_visuals(&mut self) -> usize {
        self.primitives.retain(|p| !p.role.is_path_visual())
    }

    /// Everything to draw this frame: primitives first, then movable objects
    /// (the selection in the highlight color), then fixed objects.
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::with_capacity(self.primitives.len() + self.objects.len());

        items.extend(self.primitives.iter().map(|(_, p)| DrawItem {
            shape: p.shape,
            vertices: &p.vertices,
            model: Matrix4::one(),
            color: p.color,
        }));

        items.extend(self.movable_objects().map(|(handle, o)| DrawItem {
            shape: Shape::Triangles,
            vertices: o.vertices(),
            model: o.pose.model_matrix(),
            color: if self.selected == Some(handle) {
                self.highlight_color
            } else {
                o.color
            },
        }));

        items.extend(self.fixed_objects().map(|(_, o)| DrawItem {
            shape: Shape::Triangles,
            vertices: o.vertices(),
            model: o.pose.model_matrix(),
            color: o.color,
        }));

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::primitive::{default_primitives, PrimitiveRole};

    const HIGHLIGHT: [f32; 4] = [1.0, 0.6, 0.0, 1.0];

    fn triangle(name: &str, kind: ObjectKind, color: [f32; 4]) -> SceneObject {
        SceneObject::new(
            name,
            vec![
                Vertex3D::new(0.0, 0.0, 0.0),
                Vertex3D::new(1.0, 0.0, 0.0),
                Vertex3D::new(0.0, 1.0, 0.0),
            ],
            color,
            kind,
        )
    }

    #[test]
    fn test_toggle_selection() {
        let mut scene = Scene::new(HIGHLIGHT);
        let a = scene.add_object(triangle("a", ObjectKind::Movable, [1.0; 4]));
        let b = scene.add_object(triangle("b", ObjectKind::Movable, [1.0; 4]));

        assert_eq!(scene.toggle_selection(a), Some(a));
        assert_eq!(scene.toggle_selection(b), Some(b));
        assert_eq!(scene.toggle_selection(b), None);
        assert_eq!(scene.selected(), None);
    }

    #[test]
    fn test_fixed_objects_are_never_selected() {
        let mut scene = Scene::new(HIGHLIGHT);
        let movable = scene.add_object(triangle("m", ObjectKind::Movable, [1.0; 4]));
        let fixed = scene.add_object(triangle("f", ObjectKind::Fixed, [1.0; 4]));

        scene.toggle_selection(movable);
        assert_eq!(scene.toggle_selection(fixed), Some(movable));
        assert_eq!(scene.toggle_selection(ObjectHandle(42)), Some(movable));
    }

    #[test]
    fn test_draw_order_and_highlight() {
        let mut scene = Scene::new(HIGHLIGHT);
        let fixed = scene.add_object(triangle("ground", ObjectKind::Fixed, [0.2, 0.2, 0.2, 1.0]));
        let a = scene.add_object(triangle("a", ObjectKind::Movable, [0.0, 1.0, 0.0, 1.0]));
        let _b = scene.add_object(triangle("b", ObjectKind::Movable, [0.0, 0.0, 1.0, 1.0]));
        for primitive in default_primitives() {
            scene.add_primitive(primitive);
        }
        scene.toggle_selection(a);

        let items = scene.draw_list();
        assert_eq!(items.len(), 6);

        // Three primitives come first.
        assert_eq!(items[0].shape, Shape::LineStrip);
        assert_eq!(items[1].shape, Shape::Triangles);
        assert_eq!(items[2].color, [0.0, 0.0, 1.0, 1.0]);

        // Then movable objects, with the selection highlighted.
        assert_eq!(items[3].color, HIGHLIGHT);
        assert_eq!(items[4].color, [0.0, 0.0, 1.0, 1.0]);

        // Fixed objects are drawn last even though this one was added first.
        assert_eq!(items[5].color, scene.object(fixed).unwrap().color);
    }

    #[test]
    fn test_remove_path_visuals_keeps_static_primitives() {
        let mut scene = Scene::new(HIGHLIGHT);
        for primitive in default_primitives() {
            scene.add_primitive(primitive);
        }
        scene.add_primitive(Primitive::new(
            Shape::LineStrip,
            PrimitiveRole::PathCurve,
            vec![Vertex3D::new(0.0, 0.0, 0.0), Vertex3D::new(1.0, 1.0, 0.0)],
            [1.0, 1.0, 0.0, 1.0],
        ));
        scene.add_primitive(Primitive::new(
            Shape::LineList,
            PrimitiveRole::PathMarker,
            vec![Vertex3D::new(0.0, 0.0, 0.0), Vertex3D::new(1.0, 0.0, 0.0)],
            [1.0, 0.0, 0.0, 1.0],
        ));

        assert_eq!(scene.remove_path_visuals(), 2);
        assert_eq!(scene.primitive_count(), 3);
        assert!(scene.primitives().all(|(_, p)| p.role == PrimitiveRole::Static));
    }

    #[test]
    fn test_add_mesh_rejects_empty_mesh() {
        let mut scene = Scene::new(HIGHLIGHT);
        let mesh = MeshData::new("nothing", vec![0.0, 0.0, 0.0], Vec::new());
        let err = scene.add_mesh(&mesh, [255, 255, 255, 100], ObjectKind::Movable);
        assert!(matches!(err, Err(LoadError::Empty(_))));
        assert_eq!(scene.object_count(), 0);
    }
}
