//! # Rendering System
//!
//! Deferred render state machine on top of backend-agnostic collaborator
//! traits.
//!
//! ## Architecture
//!
//! - **Backend traits**: [`Shader`], [`Mesh`], [`GraphicsComponent`] and
//!   [`UniformBuffer`] are implemented by a GPU backend
//! - **Render states**: an enum-indexed registry of passes, each with an
//!   optional shader and per-object callback
//! - **Render manager**: runs the passes for one camera and owns the
//!   fullscreen quad and light uniform buffer
//! - **Viewport**: screen rectangle that keeps its camera's aspect ratio in
//!   sync and starts the geometry pass
//!
//! ## Pass Order
//!
//! | State    | Next                                             |
//! |----------|--------------------------------------------------|
//! | Geometry | Skybox                                           |
//! | Skybox   | None                                             |
//! | Frame    | Shadows, else Lights, else None (by pass flags)  |
//! | Shadows  | Lights if the light pass is enabled, else None   |
//! | Lights   | None                                             |

pub mod backend;
pub mod frame;
mod render_manager;
mod render_state;
mod viewport;

pub use backend::{GraphicsComponent, Mesh, Shader, UniformBuffer, UniformValue};
pub use frame::{FrameGeometry, TextureUnit, BIND_LIGHT, BIND_MATERIAL};
pub use render_manager::{RenderManager, RenderPasses};
pub use render_state::{RenderState, RenderStateCallback, RenderStateId};
pub use viewport::Viewport;

use crate::foundation::collections::ObjectId;
use crate::scene::SceneError;
use thiserror::Error;

/// High-level rendering error types
#[derive(Error, Debug)]
pub enum RenderError {
    /// Camera handle is missing from the scene or is not a camera
    #[error("Invalid camera handle {0:?}")]
    InvalidCamera(ObjectId),

    /// A drawing state was entered without a shader
    #[error("Render state {0:?} has no shader")]
    MissingShader(RenderStateId),

    /// The terminal state was asked to render
    #[error("RenderNone state cannot be updated")]
    NoneStateUpdate,

    /// Scene lookup failed during a pass
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
