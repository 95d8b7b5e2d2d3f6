//! Render state registry entries

use super::Shader;
use crate::scene::Object;
use std::fmt;
use std::rc::Rc;

/// Per-object hook invoked before each draw of a state
pub type RenderStateCallback = Box<dyn FnMut(RenderStateId, Option<&Object>)>;

/// Closed set of deferred rendering passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStateId {
    /// Fill the geometry buffer with every visible entity
    Geometry,
    /// Draw the skybox entity
    Skybox,
    /// Ambient pass over the fullscreen quad
    Frame,
    /// Reserved shadow pass
    Shadows,
    /// One additive fullscreen draw per light
    Lights,
    /// Terminal state
    None,
}

impl RenderStateId {
    /// Number of states in the registry
    pub const COUNT: usize = 6;

    /// Every state in registry order
    pub const ALL: [Self; Self::COUNT] =
        [Self::Geometry, Self::Skybox, Self::Frame, Self::Shadows, Self::Lights, Self::None];

    /// Registry slot
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Shader and callback of one pass
#[derive(Default)]
pub struct RenderState {
    shader: Option<Rc<dyn Shader>>,
    callback: Option<RenderStateCallback>,
}

impl fmt::Debug for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderState")
            .field("shader", &self.shader)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl RenderState {
    /// Shader enabled when the pass starts
    pub fn shader(&self) -> Option<&Rc<dyn Shader>> {
        self.shader.as_ref()
    }

    /// Use `shader` for this pass
    pub fn set_shader(&mut self, shader: Rc<dyn Shader>) {
        self.shader = Some(shader);
    }

    /// Install the per-object hook, replacing any previous one
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(RenderStateId, Option<&Object>) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Remove the per-object hook
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    pub(super) fn parts_mut(&mut self) -> (Option<&Rc<dyn Shader>>, &mut Option<RenderStateCallback>) {
        (self.shader.as_ref(), &mut self.callback)
    }
}

/// Run the callback if one is installed
pub(super) fn notify(callback: &mut Option<RenderStateCallback>, id: RenderStateId, object: Option<&Object>) {
    if let Some(callback) = callback {
        callback(id, object);
    }
}
