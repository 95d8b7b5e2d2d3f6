//! Four component vector

use super::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Homogeneous 4D vector
///
/// Defaults to the point `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    data: [f32; 4],
}

impl Default for Vec4 {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Vec4 {
    /// Index of the X component
    pub const X: usize = 0;
    /// Index of the Y component
    pub const Y: usize = 1;
    /// Index of the Z component
    pub const Z: usize = 2;
    /// Index of the W component
    pub const W: usize = 3;

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a vector from its components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Extend a 3D vector with a `w` component
    pub const fn from_vec3(vector: Vec3, w: f32) -> Self {
        let [x, y, z] = *vector.data();
        Self::new(x, y, z, w)
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

    /// Raw component slice
    pub const fn data(&self) -> &[f32; 4] {
        &self.data
    }

    /// Drop the `w` component
    pub const fn extract_vec3(&self) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Dot product over all four components
    pub fn dot(&self, other: &Self) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Squared Euclidean length
    pub fn square_length(&self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.square_length().sqrt()
    }

    /// Normalize in place, a zero vector turns into NaN
    pub fn normalize(&mut self) -> Self {
        let length = self.length();
        for value in &mut self.data {
            *value /= length;
        }
        *self
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(data: [f32; 4]) -> Self {
        Self { data }
    }
}

impl Add for Vec4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut result = self;
        for (value, other) in result.data.iter_mut().zip(rhs.data) {
            *value += other;
        }
        result
    }
}

impl AddAssign for Vec4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl SubAssign for Vec4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vec4 {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f32> for Vec4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        let mut result = self;
        for value in &mut result.data {
            *value *= rhs;
        }
        result
    }
}

impl approx::AbsDiffEq for Vec4 {
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

impl approx::RelativeEq for Vec4 {
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
