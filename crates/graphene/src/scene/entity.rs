//! Renderable scene object

use crate::render::GraphicsComponent;
use crate::transform::{Movable, Rotatable, Scalable, TransformState, Transformable};
use std::rc::Rc;

/// Mesh holder drawn by the geometry and skybox passes
#[derive(Debug, Clone)]
pub struct Entity {
    transform: TransformState,
    visible: bool,
    components: Vec<Rc<dyn GraphicsComponent>>,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity {
    /// Visible entity without graphics components
    pub fn new() -> Self {
        Self {
            transform: TransformState::new(),
            visible: true,
            components: Vec::new(),
        }
    }

    /// Whether traversal reports this entity
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the entity
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Append a drawable component
    pub fn add_component(&mut self, component: Rc<dyn GraphicsComponent>) {
        self.components.push(component);
    }

    /// Drawable components in insertion order
    pub fn components(&self) -> &[Rc<dyn GraphicsComponent>] {
        &self.components
    }

    /// Render every component
    pub fn render(&self) {
        for component in &self.components {
            component.render();
        }
    }
}

impl Transformable for Entity {
    fn transform(&self) -> &TransformState {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }
}

impl Rotatable for Entity {}
impl Movable for Entity {}
impl Scalable for Entity {}
