//! Rotation quaternion
//!
//! [`Quaternion::extract_mat4`] writes `m[0][2] = 2xy + 2yw`. The basis
//! vectors maintained by the transform traits are derived from this matrix
//! and depend on that entry.

use super::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Quaternion `(x, y, z, w)`, identity by default
///
/// Construction never normalizes; call [`Quaternion::normalize`] before
/// extracting a rotation from a quaternion of unknown length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    data: [f32; 4],
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Quaternion {
    /// Index of the X component
    pub const X: usize = 0;
    /// Index of the Y component
    pub const Y: usize = 1;
    /// Index of the Z component
    pub const Z: usize = 2;
    /// Index of the W component
    pub const W: usize = 3;

    /// Create a quaternion from raw components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// The axis is used as given, pass a unit vector to get a unit quaternion.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle / 2.0;
        let sin = half.sin();
        Self::new(axis.x() * sin, axis.y() * sin, axis.z() * sin, half.cos())
    }

    /// Component at `index`, NaN when out of range
    pub fn get(&self, index: usize) -> f32 {
        self.data.get(index).copied().unwrap_or(f32::NAN)
    }

    /// Set component at `index`, ignored when out of range
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = value;
        }
    }

    /// Raw components in `x, y, z, w` order
    pub const fn data(&self) -> &[f32; 4] {
        &self.data
    }

    /// Euclidean length of the four components
    pub fn length(&self) -> f32 {
        let [x, y, z, w] = self.data;
        (x * x + y * y + z * z + w * w).sqrt()
    }

    /// Normalize in place, a zero quaternion turns into NaN
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.length();
        for value in &mut self.data {
            *value /= length;
        }
        self
    }

    /// Rotation matrix for this quaternion
    pub fn extract_mat4(&self) -> Mat4 {
        let [x, y, z, w] = self.data;
        Mat4::from_rows([
            [
                1.0 - 2.0 * y * y - 2.0 * z * z,
                2.0 * x * y - 2.0 * z * w,
                2.0 * x * y + 2.0 * y * w,
                0.0,
            ],
            [
                2.0 * x * y + 2.0 * z * w,
                1.0 - 2.0 * x * x - 2.0 * z * z,
                2.0 * y * z - 2.0 * x * w,
                0.0,
            ],
            [
                2.0 * x * z - 2.0 * y * w,
                2.0 * y * z + 2.0 * x * w,
                1.0 - 2.0 * x * x - 2.0 * y * y,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Euler angles `(x, y, z)` in radians
    ///
    /// The Z angle comes from `asin` and is NaN once its argument leaves
    /// `[-1, 1]`, which happens at (and through rounding, around) a 90°
    /// rotation about Z.
    pub fn extract_euler_angles(&self) -> Vec3 {
        let [x, y, z, w] = self.data;
        let x_angle = (2.0 * (x * w - y * z)).atan2(1.0 - 2.0 * (x * x - z * z));
        let y_angle = (2.0 * (y * w - x * z)).atan2(1.0 - 2.0 * (y * y - z * z));
        let z_angle = (2.0 * (x * y + z * w)).asin();
        Vec3::new(x_angle, y_angle, z_angle)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product, normalized
    fn mul(self, rhs: Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = rhs.data;
        let mut result = Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by + ay * bw + az * bx - ax * bz,
            aw * bz + az * bw + ax * by - ay * bx,
            aw * bw - ax * bx - ay * by - az * bz,
        );
        result.normalize();
        result
    }
}

impl approx::AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl approx::RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
