//! Arena handles for scene graph storage

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle of a scene node
    pub struct NodeId;

    /// Stable handle of an attached object (entity, light or camera)
    pub struct ObjectId;
}

/// Arena of scene nodes
pub type NodeArena<T> = SlotMap<NodeId, T>;

/// Arena of scene objects
pub type ObjectArena<T> = SlotMap<ObjectId, T>;
