//! Screen rectangle rendered from one camera

use super::{RenderError, RenderManager, RenderResult, RenderStateId};
use crate::foundation::collections::ObjectId;
use crate::scene::Scene;

/// Rectangle of the render target with an optional camera
///
/// The camera's aspect ratio follows the rectangle whenever either changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
    camera: Option<ObjectId>,
}

impl Viewport {
    /// Viewport without a camera
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            camera: None,
        }
    }

    /// Left edge in pixels
    pub const fn left(&self) -> i32 {
        self.left
    }

    /// Move the left edge
    pub fn set_left(&mut self, left: i32) {
        self.left = left;
    }

    /// Top edge in pixels
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// Move the top edge
    pub fn set_top(&mut self, top: i32) {
        self.top = top;
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Camera rendered by this viewport
    pub const fn camera(&self) -> Option<ObjectId> {
        self.camera
    }

    #[allow(clippy::cast_precision_loss)]
    fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Render from `camera` and match its aspect ratio to this viewport
    ///
    /// # Errors
    /// [`RenderError::InvalidCamera`] when the handle is missing or not a camera.
    pub fn set_camera(&mut self, scene: &mut Scene, camera: ObjectId) -> RenderResult<()> {
        let aspect_ratio = self.aspect_ratio();
        scene
            .camera_mut(camera)
            .map_err(|_| RenderError::InvalidCamera(camera))?
            .set_aspect_ratio(aspect_ratio);
        self.camera = Some(camera);
        Ok(())
    }

    /// Change the size, updating the camera's aspect ratio
    ///
    /// # Errors
    /// [`RenderError::InvalidCamera`] when the current camera no longer exists.
    pub fn resize(&mut self, scene: &mut Scene, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        log::debug!("Viewport resized to {width}x{height}");
        match self.camera {
            Some(camera) => self.set_camera(scene, camera),
            None => Ok(()),
        }
    }

    /// Render the scene from the geometry pass
    ///
    /// Does nothing while no camera is set or the camera is not attached to
    /// a node.
    ///
    /// # Errors
    /// Propagates [`RenderManager::update`] failures.
    pub fn update(&self, manager: &mut RenderManager, scene: &Scene) -> RenderResult<()> {
        let Some(camera) = self.camera else {
            return Ok(());
        };
        let object = scene.object(camera)?;
        if object.parent().is_none() {
            return Ok(());
        }

        manager.set_render_state(RenderStateId::Geometry);
        manager.update(scene, camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Mesh, UniformBuffer};
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct CountingMesh {
        draws: Cell<usize>,
    }

    impl Mesh for CountingMesh {
        fn render(&self) {
            self.draws.set(self.draws.get() + 1);
        }
    }

    #[derive(Debug)]
    struct NullBuffer;

    impl UniformBuffer for NullBuffer {
        fn upload(&self, _bytes: &[u8]) {}

        fn bind(&self, _bind_point: u32) {}
    }

    #[test]
    fn test_camera_aspect_follows_viewport() {
        let mut scene = Scene::default();
        let camera = scene.create_camera("camera");
        let mut viewport = Viewport::new(0, 0, 800, 600);

        viewport.set_camera(&mut scene, camera).unwrap();
        assert_relative_eq!(scene.camera(camera).unwrap().aspect_ratio(), 800.0 / 600.0, epsilon = 1e-6);

        viewport.resize(&mut scene, 1024, 512).unwrap();
        assert_relative_eq!(scene.camera(camera).unwrap().aspect_ratio(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_set_camera_rejects_other_objects() {
        let mut scene = Scene::default();
        let entity = scene.create_entity("box");
        let mut viewport = Viewport::new(0, 0, 640, 480);
        assert!(matches!(
            viewport.set_camera(&mut scene, entity),
            Err(RenderError::InvalidCamera(id)) if id == entity
        ));
        assert!(viewport.camera().is_none());
    }

    #[test]
    fn test_update_skips_detached_camera() {
        let mut scene = Scene::default();
        let camera = scene.create_camera("camera");
        let mut manager = RenderManager::new(Rc::new(CountingMesh::default()), Rc::new(NullBuffer));
        let mut viewport = Viewport::new(0, 0, 640, 480);

        viewport.update(&mut manager, &scene).unwrap();
        viewport.set_camera(&mut scene, camera).unwrap();
        viewport.update(&mut manager, &scene).unwrap();
        assert_eq!(manager.current_state(), RenderStateId::None);
    }

    #[test]
    fn test_update_runs_geometry_pass() {
        let mut scene = Scene::default();
        let root = scene.root_node();
        let camera = scene.create_camera("camera");
        scene.attach_object(root, camera).unwrap();
        let mut manager = RenderManager::new(Rc::new(CountingMesh::default()), Rc::new(NullBuffer));
        let mut viewport = Viewport::new(0, 0, 640, 480);
        viewport.set_camera(&mut scene, camera).unwrap();

        let result = viewport.update(&mut manager, &scene);
        assert!(matches!(result, Err(RenderError::MissingShader(RenderStateId::Geometry))));
    }
}
