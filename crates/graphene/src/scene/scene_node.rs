//! Scene graph node

use crate::foundation::collections::{NodeId, ObjectId};
use crate::transform::{TransformState, Transformable};

/// Grouping node with its own transform
///
/// Child node and object lists keep insertion order and never contain
/// duplicates. Structure is only changed through [`Scene`](super::Scene).
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    name: String,
    transform: TransformState,
    parent: Option<NodeId>,
    nodes: Vec<NodeId>,
    objects: Vec<ObjectId>,
}

impl SceneNode {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node, `None` for the root and detached nodes
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in attachment order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Attached objects in attachment order
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_node(&mut self, node: NodeId) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub(crate) fn push_object(&mut self, object: ObjectId) {
        if !self.objects.contains(&object) {
            self.objects.push(object);
        }
    }
}

impl Transformable for SceneNode {
    fn transform(&self) -> &TransformState {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }
}
