//! Scene objects: entities, lights and cameras behind one handle type

use super::{Camera, Entity, Light};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Vec3;
use crate::transform::{Movable, Rotatable, Scalable, TransformError, TransformState, Transformable};

/// Concrete object variant
#[derive(Debug, Clone)]
pub enum ObjectKind {
    /// Renderable mesh holder
    Entity(Entity),
    /// Light source
    Light(Light),
    /// Viewpoint
    Camera(Camera),
}

/// Named object stored in the scene arena
///
/// Transform operations are forwarded to the variant so that cameras and
/// lights keep their own rotation behaviour when driven through an `Object`.
#[derive(Debug, Clone)]
pub struct Object {
    name: String,
    parent: Option<NodeId>,
    kind: ObjectKind,
}

impl Object {
    /// Detached object
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            parent: None,
            kind,
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node this object is attached to
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    /// Kind with its payload
    pub const fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Entity payload, if this is an entity
    pub const fn as_entity(&self) -> Option<&Entity> {
        match &self.kind {
            ObjectKind::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Mutable entity payload
    pub fn as_entity_mut(&mut self) -> Option<&mut Entity> {
        match &mut self.kind {
            ObjectKind::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Light payload, if this is a light
    pub const fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            ObjectKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Mutable light payload
    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        match &mut self.kind {
            ObjectKind::Light(light) => Some(light),
            _ => None,
        }
    }

    /// Camera payload, if this is a camera
    pub const fn as_camera(&self) -> Option<&Camera> {
        match &self.kind {
            ObjectKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Mutable camera payload
    pub fn as_camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.kind {
            ObjectKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    fn rotatable_mut(&mut self) -> &mut dyn Rotatable {
        match &mut self.kind {
            ObjectKind::Entity(entity) => entity,
            ObjectKind::Light(light) => light,
            ObjectKind::Camera(camera) => camera,
        }
    }
}

impl Transformable for Object {
    fn transform(&self) -> &TransformState {
        match &self.kind {
            ObjectKind::Entity(entity) => entity.transform(),
            ObjectKind::Light(light) => light.transform(),
            ObjectKind::Camera(camera) => camera.transform(),
        }
    }

    fn transform_mut(&mut self) -> &mut TransformState {
        match &mut self.kind {
            ObjectKind::Entity(entity) => entity.transform_mut(),
            ObjectKind::Light(light) => light.transform_mut(),
            ObjectKind::Camera(camera) => camera.transform_mut(),
        }
    }
}

impl Rotatable for Object {
    fn rotate(&mut self, axis: Vec3, angle: f32) -> Result<(), TransformError> {
        self.rotatable_mut().rotate(axis, angle)
    }

    fn roll(&mut self, angle: f32) -> Result<(), TransformError> {
        self.rotatable_mut().roll(angle)
    }

    fn yaw(&mut self, angle: f32) -> Result<(), TransformError> {
        self.rotatable_mut().yaw(angle)
    }

    fn pitch(&mut self, angle: f32) -> Result<(), TransformError> {
        self.rotatable_mut().pitch(angle)
    }

    fn target_at(&mut self, point: Vec3) -> Result<(), TransformError> {
        self.rotatable_mut().target_at(point)
    }
}

impl Movable for Object {}
impl Scalable for Object {}

impl From<Entity> for ObjectKind {
    fn from(entity: Entity) -> Self {
        Self::Entity(entity)
    }
}

impl From<Light> for ObjectKind {
    fn from(light: Light) -> Self {
        Self::Light(light)
    }
}

impl From<Camera> for ObjectKind {
    fn from(camera: Camera) -> Self {
        Self::Camera(camera)
    }
}
