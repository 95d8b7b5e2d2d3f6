//! Math utilities and types
//!
//! Provides the linear algebra kernel every transform in the engine is built on:
//! vectors, row-major matrices and rotation quaternions.
//!
//! All types are plain `f32` value types. Numeric edge cases (normalizing a
//! zero vector, inverting a singular matrix, extracting Euler angles at
//! gimbal lock) produce NaN or infinity instead of errors.

mod mat3;
mod mat4;
mod matrix;
mod quaternion;
mod vec3;
mod vec4;

pub use mat3::Mat3;
pub use mat4::Mat4;
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants::PI;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * PI / 180.0
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * 180.0 / PI
    }
}
