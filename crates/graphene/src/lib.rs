//! # Graphene
//!
//! Scene graph, transform kernel and deferred render state machine for a
//! real-time 3D engine.
//!
//! ## Features
//!
//! - **Math**: vectors, square matrices and quaternions with OpenGL conventions
//! - **Transforms**: rotation, translation and scaling with cached inverses
//! - **Scene Graph**: arena-backed nodes carrying entities, lights and cameras
//! - **Deferred Rendering**: pass state machine over backend-agnostic traits
//! - **Configuration**: TOML and RON settings for engine, renderer and scene
//!
//! ## Quick Start
//!
//! ```rust
//! use graphene::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::new("demo");
//!     let root = scene.root_node();
//!     let pivot = scene.create_node("pivot");
//!     scene.attach_node(root, pivot)?;
//!
//!     let cube = scene.create_entity("cube");
//!     scene.attach_object(pivot, cube)?;
//!     scene.translate_node(pivot, Vec3::new(0.0, 0.0, -5.0))?;
//!     scene.yaw_node(pivot, 45.0)?;
//!
//!     let camera = scene.create_camera("camera");
//!     scene.attach_object(root, camera)?;
//!     let mut visible = 0;
//!     scene.iterate_entities(|_, _, _, _| visible += 1);
//!     assert_eq!(visible, 1);
//!     let _view = scene.calculate_model_view(camera)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

// Scene and rendering
pub mod transform;
pub mod scene;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, Config, EngineConfig, RendererConfig, SceneConfig},
        foundation::{
            collections::{NodeId, ObjectId},
            math::{Mat3, Mat4, Quaternion, Vec3, Vec4},
        },
        render::{
            GraphicsComponent, Mesh, RenderError, RenderManager, RenderPasses, RenderStateId, Shader,
            UniformBuffer, UniformValue, Viewport,
        },
        scene::{Camera, Entity, Light, LightType, Object, ObjectKind, ProjectionType, Scene, SceneError},
        transform::{Movable, Rotatable, Scalable, TransformError, Transformable},
    };
}
