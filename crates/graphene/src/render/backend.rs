//! Backend abstraction traits for the deferred renderer
//!
//! The render state machine never talks to a graphics API directly. GPU
//! backends implement these traits and hand shared instances to the
//! [`RenderManager`](crate::render::RenderManager) and to scene entities.

use crate::foundation::math::{Mat3, Mat4, Vec3, Vec4};
use std::fmt::Debug;

/// Value assigned to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `vec3` uniform
    Vec3(Vec3),
    /// `vec4` uniform
    Vec4(Vec4),
    /// `mat3` uniform, row-major
    Mat3(Mat3),
    /// `mat4` uniform, row-major
    Mat4(Mat4),
    /// `float` uniform
    Float(f32),
    /// `int` uniform, also used for sampler texture units
    Int(i32),
}

/// Compiled shader program
pub trait Shader: Debug {
    /// Make this program current
    fn enable(&self);

    /// Assign a named uniform
    fn set_uniform(&self, name: &str, value: UniformValue);

    /// Bind a named uniform block to `bind_point`
    fn set_uniform_block(&self, name: &str, bind_point: u32);
}

/// Drawable piece of an entity (a mesh with its material)
pub trait GraphicsComponent: Debug {
    /// Issue the draw call
    fn render(&self);
}

/// Fullscreen geometry drawn by the frame and light passes
pub trait Mesh: Debug {
    /// Issue the draw call
    fn render(&self);
}

/// GPU uniform buffer holding one block
pub trait UniformBuffer: Debug {
    /// Replace the buffer contents
    fn upload(&self, bytes: &[u8]);

    /// Bind the buffer to `bind_point`
    fn bind(&self, bind_point: u32);
}
