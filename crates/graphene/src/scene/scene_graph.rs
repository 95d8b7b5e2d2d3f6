//! Scene arena and structural operations
//!
//! Node transforms are never changed directly by callers; the propagating
//! operations here keep every descendant in place relative to the node.

use super::{Camera, Entity, Light, Object, SceneError, SceneNode, SceneResult};
use crate::foundation::collections::{NodeArena, NodeId, ObjectArena, ObjectId};
use crate::foundation::math::{Mat3, Vec3};
use crate::transform::{validate_factors, Movable, Rotatable, Scalable, TransformError, Transformable};

/// Scene graph with node and object arenas
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    pub(super) nodes: NodeArena<SceneNode>,
    pub(super) objects: ObjectArena<Object>,
    root: Option<NodeId>,
    skybox: Option<ObjectId>,
    ambient_color: Vec3,
    ambient_energy: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("")
    }
}

impl Scene {
    /// Empty scene, the root node is created on first access
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: NodeArena::with_key(),
            objects: ObjectArena::with_key(),
            root: None,
            skybox: None,
            ambient_color: Vec3::new(1.0, 1.0, 1.0),
            ambient_energy: 1.0,
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Root node, created on first call
    pub fn root_node(&mut self) -> NodeId {
        match self.root {
            Some(root) => root,
            None => {
                let root = self.create_node("root");
                self.root = Some(root);
                root
            }
        }
    }

    /// Root node if it has been created
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Ambient light colour
    pub const fn ambient_color(&self) -> Vec3 {
        self.ambient_color
    }

    /// Set the ambient light colour
    pub fn set_ambient_color(&mut self, color: Vec3) {
        self.ambient_color = color;
    }

    /// Ambient light energy
    pub const fn ambient_energy(&self) -> f32 {
        self.ambient_energy
    }

    /// Set the ambient light energy
    ///
    /// # Errors
    /// [`SceneError::NegativeAmbientEnergy`] when `energy < 0`.
    pub fn set_ambient_energy(&mut self, energy: f32) -> SceneResult<()> {
        if energy < 0.0 {
            log::warn!("Rejected ambient energy {energy}");
            return Err(SceneError::NegativeAmbientEnergy(energy));
        }
        self.ambient_energy = energy;
        Ok(())
    }

    /// Skybox entity drawn by the skybox pass
    pub const fn skybox(&self) -> Option<ObjectId> {
        self.skybox
    }

    /// Use `entity` as the skybox
    ///
    /// # Errors
    /// Fails when the handle is invalid or not an entity.
    pub fn set_skybox(&mut self, entity: ObjectId) -> SceneResult<()> {
        self.entity(entity)?;
        self.skybox = Some(entity);
        Ok(())
    }

    /// Create a detached node
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.nodes.insert(SceneNode::new(name))
    }

    /// Add a detached object
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.insert(object)
    }

    /// Add a detached default entity
    pub fn create_entity(&mut self, name: impl Into<String>) -> ObjectId {
        self.add_object(Object::new(name, Entity::new().into()))
    }

    /// Add a detached light
    pub fn create_light(&mut self, name: impl Into<String>, light: Light) -> ObjectId {
        self.add_object(Object::new(name, light.into()))
    }

    /// Add a detached default camera
    pub fn create_camera(&mut self, name: impl Into<String>) -> ObjectId {
        self.add_object(Object::new(name, Camera::new().into()))
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> SceneResult<&SceneNode> {
        self.nodes.get(id).ok_or(SceneError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.nodes.get_mut(id).ok_or(SceneError::InvalidNode(id))
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> SceneResult<&Object> {
        self.objects.get(id).ok_or(SceneError::InvalidObject(id))
    }

    /// Mutable object access for direct transform calls
    pub fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut Object> {
        self.objects.get_mut(id).ok_or(SceneError::InvalidObject(id))
    }

    /// Look up an object that must be an entity
    pub fn entity(&self, id: ObjectId) -> SceneResult<&Entity> {
        self.object(id)?.as_entity().ok_or(SceneError::NotAnEntity(id))
    }

    /// Mutable entity lookup
    pub fn entity_mut(&mut self, id: ObjectId) -> SceneResult<&mut Entity> {
        self.object_mut(id)?.as_entity_mut().ok_or(SceneError::NotAnEntity(id))
    }

    /// Light payload of an object, `None` for other kinds
    pub fn light(&self, id: ObjectId) -> SceneResult<Option<&Light>> {
        Ok(self.object(id)?.as_light())
    }

    /// Mutable light payload of an object
    pub fn light_mut(&mut self, id: ObjectId) -> SceneResult<Option<&mut Light>> {
        Ok(self.object_mut(id)?.as_light_mut())
    }

    /// Look up an object that must be a camera
    pub fn camera(&self, id: ObjectId) -> SceneResult<&Camera> {
        self.object(id)?.as_camera().ok_or(SceneError::NotACamera(id))
    }

    /// Mutable camera lookup
    pub fn camera_mut(&mut self, id: ObjectId) -> SceneResult<&mut Camera> {
        self.object_mut(id)?.as_camera_mut().ok_or(SceneError::NotACamera(id))
    }

    /// Number of nodes including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of objects, attached or not
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Attach `child` beneath `parent`
    ///
    /// Attaching a node to its current parent is a no-op.
    ///
    /// # Errors
    /// Fails on invalid handles, when `child` already has another parent, or
    /// when `child` is `parent` or one of its ancestors.
    pub fn attach_node(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.node(parent)?;
        let current = self.node(child)?.parent();
        if current == Some(parent) {
            return Ok(());
        }
        if current.is_some() {
            return Err(SceneError::AlreadyParented);
        }

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                log::warn!("Rejected attaching {child:?} beneath its own descendant {parent:?}");
                return Err(SceneError::Cycle(child));
            }
            cursor = self.nodes.get(ancestor).and_then(SceneNode::parent);
        }

        self.node_mut(parent)?.push_node(child);
        self.node_mut(child)?.set_parent(parent);
        log::debug!("Attached node {child:?} to {parent:?}");
        Ok(())
    }

    /// Attach `object` to `parent`
    ///
    /// Attaching an object to its current node is a no-op.
    ///
    /// # Errors
    /// Fails on invalid handles or when `object` is attached elsewhere.
    pub fn attach_object(&mut self, parent: NodeId, object: ObjectId) -> SceneResult<()> {
        self.node(parent)?;
        let current = self.object(object)?.parent();
        if current == Some(parent) {
            return Ok(());
        }
        if current.is_some() {
            return Err(SceneError::AlreadyParented);
        }

        self.node_mut(parent)?.push_object(object);
        self.object_mut(object)?.set_parent(parent);
        log::debug!("Attached object {object:?} to {parent:?}");
        Ok(())
    }

    /// Rotate a node and its subtree about the node's position
    ///
    /// # Errors
    /// Fails on an invalid handle or a zero axis.
    pub fn rotate_node(&mut self, node: NodeId, axis: Vec3, angle: f32) -> SceneResult<()> {
        self.node(node)?;
        if axis == Vec3::ZERO {
            return Err(TransformError::ZeroAxis.into());
        }
        self.rotate_subtree(node, axis, angle)
    }

    /// Rotate a node subtree about the world X axis
    pub fn roll_node(&mut self, node: NodeId, angle: f32) -> SceneResult<()> {
        self.rotate_node(node, Vec3::UNIT_X, angle)
    }

    /// Rotate a node subtree about the world Y axis
    pub fn yaw_node(&mut self, node: NodeId, angle: f32) -> SceneResult<()> {
        self.rotate_node(node, Vec3::UNIT_Y, angle)
    }

    /// Rotate a node subtree about the world Z axis
    pub fn pitch_node(&mut self, node: NodeId, angle: f32) -> SceneResult<()> {
        self.rotate_node(node, Vec3::UNIT_Z, angle)
    }

    fn rotate_subtree(&mut self, node: NodeId, axis: Vec3, angle: f32) -> SceneResult<()> {
        let scene_node = self.node_mut(node)?;
        let pivot = scene_node.transform().position();
        let rotation = scene_node.transform_mut().rotate(axis, angle)?;
        let children = scene_node.nodes().to_vec();
        let objects = scene_node.objects().to_vec();

        // Child subtrees move rigidly before turning about their new position.
        for child in children {
            let position = self.node(child)?.transform().position();
            self.move_node(child, pivot + rotation * (position - pivot) - position)?;
            self.rotate_subtree(child, axis, angle)?;
        }

        for id in objects {
            let object = self.object_mut(id)?;
            let position = object.position();
            object.translate(pivot + rotation * (position - pivot));
            object.rotate(axis, angle)?;
        }

        Ok(())
    }

    /// Scale a node and its subtree away from the node's position
    ///
    /// # Errors
    /// Fails on an invalid handle or a non-positive factor.
    pub fn scale_node(&mut self, node: NodeId, factors: Vec3) -> SceneResult<()> {
        self.node(node)?;
        validate_factors(factors)?;
        self.scale_subtree(node, factors)
    }

    fn scale_subtree(&mut self, node: NodeId, factors: Vec3) -> SceneResult<()> {
        let scaling = Mat3::from_scale(factors);
        let scene_node = self.node_mut(node)?;
        let pivot = scene_node.transform().position();
        scene_node.transform_mut().scale(factors)?;
        let children = scene_node.nodes().to_vec();
        let objects = scene_node.objects().to_vec();

        for child in children {
            let position = self.node(child)?.transform().position();
            self.move_node(child, pivot + scaling * (position - pivot) - position)?;
            self.scale_subtree(child, factors)?;
        }

        for id in objects {
            let object = self.object_mut(id)?;
            let position = object.position();
            object.translate(pivot + scaling * (position - pivot));
            object.scale(factors)?;
        }

        Ok(())
    }

    /// Place a node at `position`, shifting its subtree along
    pub fn translate_node(&mut self, node: NodeId, position: Vec3) -> SceneResult<()> {
        let delta = position - self.node(node)?.transform().position();
        self.move_node(node, delta)
    }

    /// Shift a node and every descendant by `delta`
    pub fn move_node(&mut self, node: NodeId, delta: Vec3) -> SceneResult<()> {
        let scene_node = self.node_mut(node)?;
        scene_node.transform_mut().move_by(delta);
        let children = scene_node.nodes().to_vec();
        let objects = scene_node.objects().to_vec();

        for child in children {
            self.move_node(child, delta)?;
        }
        for id in objects {
            self.object_mut(id)?.move_by(delta);
        }

        log::trace!("Moved node {node:?} by {delta:?}");
        Ok(())
    }
}
