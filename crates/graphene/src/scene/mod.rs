//! Scene graph
//!
//! Arena-backed hierarchy of [`SceneNode`]s with attached [`Object`]s.
//!
//! ## Architecture
//!
//! ```text
//! Scene
//!  ├── nodes:   SlotMap<NodeId, SceneNode>
//!  └── objects: SlotMap<ObjectId, Object>
//!                 └── ObjectKind::{Entity, Light, Camera}
//! ```
//!
//! Nodes and objects refer to each other through stable slotmap handles, a
//! child stores its parent handle and a node stores its child handle lists.
//! Every structural change and every propagated transform goes through
//! [`Scene`], which validates handles and rejects cycles.
//!
//! Traversal composes node transforms root-first: a node's world matrix is
//! `parent · T · R · S`. Rotating or scaling a node moves its descendants
//! around the node's position so the subtree keeps its shape.

mod camera;
mod entity;
mod light;
mod object;
mod scene_graph;
mod scene_node;
mod traversal;

pub use camera::{Camera, ProjectionType};
pub use entity::Entity;
pub use light::{Light, LightBlock, LightType};
pub use object::{Object, ObjectKind};
pub use scene_graph::Scene;
pub use scene_node::SceneNode;

use crate::foundation::collections::{NodeId, ObjectId};
use crate::transform::TransformError;

/// Errors raised by scene graph operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Node handle does not belong to this scene
    #[error("Invalid node handle {0:?}")]
    InvalidNode(NodeId),

    /// Object handle does not belong to this scene
    #[error("Invalid object handle {0:?}")]
    InvalidObject(ObjectId),

    /// Object exists but is not a camera
    #[error("Object {0:?} is not a camera")]
    NotACamera(ObjectId),

    /// Object exists but is not an entity
    #[error("Object {0:?} is not an entity")]
    NotAnEntity(ObjectId),

    /// Ambient energy below zero
    #[error("Ambient energy is less than 0.0: {0}")]
    NegativeAmbientEnergy(f32),

    /// Child already has a different parent
    #[error("Child is already attached to another node")]
    AlreadyParented,

    /// Attaching would make a node its own ancestor
    #[error("Attaching node {0:?} would create a cycle")]
    Cycle(NodeId),

    /// Transform contract violated
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
