//! Three component vector

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 3D vector of `f32` components
///
/// Components are addressed through the axis constants [`Vec3::X`],
/// [`Vec3::Y`] and [`Vec3::Z`]. Reading an axis outside that range yields
/// NaN and writing one is ignored, so a bad index never aborts a frame.
///
/// Equality is exact component comparison. Use the `approx` traits for
/// tolerance based comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// Index of the X component
    pub const X: usize = 0;
    /// Index of the Y component
    pub const Y: usize = 1;
    /// Index of the Z component
    pub const Z: usize = 2;

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along X
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along Y
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along Z
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a vector from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
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

    /// X component
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// Raw component slice
    pub const fn data(&self) -> &[f32; 3] {
        &self.data
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Cross product `self × other`
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Squared Euclidean length
    pub fn square_length(&self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.square_length().sqrt()
    }

    /// Normalize in place and return the result
    ///
    /// A zero vector divides by zero and comes back as NaN components.
    pub fn normalize(&mut self) -> Self {
        let length = self.length();
        for value in &mut self.data {
            *value /= length;
        }
        *self
    }

    /// Normalized copy, leaves `self` untouched
    pub fn normalized(&self) -> Self {
        let mut copy = *self;
        copy.normalize()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(data: [f32; 3]) -> Self {
        Self { data }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vector: Vec3) -> Self {
        vector.data
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.data[0] + rhs.data[0], self.data[1] + rhs.data[1], self.data[2] + rhs.data[2])
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.data[0] - rhs.data[0], self.data[1] - rhs.data[1], self.data[2] - rhs.data[2])
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.data[0], -self.data[1], -self.data[2])
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.data[0] * rhs, self.data[1] * rhs, self.data[2] * rhs)
    }
}

impl approx::AbsDiffEq for Vec3 {
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

impl approx::RelativeEq for Vec3 {
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_out_of_range_access() {
        let mut vector = Vec3::new(1.0, 2.0, 3.0);
        assert!(vector.get(3).is_nan());
        vector.set(7, 42.0);
        assert_eq!(vector, Vec3::new(1.0, 2.0, 3.0));
        vector.set(Vec3::Y, -2.0);
        assert_eq!(vector.get(Vec3::Y), -2.0);
    }

    #[test]
    fn test_cross_product_is_right_handed() {
        assert_eq!(Vec3::UNIT_X.cross(&Vec3::UNIT_Y), Vec3::UNIT_Z);
        assert_eq!(Vec3::UNIT_Y.cross(&Vec3::UNIT_Z), Vec3::UNIT_X);
        assert_eq!(Vec3::UNIT_Z.cross(&Vec3::UNIT_X), Vec3::UNIT_Y);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vec3::new(1.0, -2.0, 0.5);
        let b = Vec3::new(0.5, 4.0, 2.0);
        assert_eq!(a + b, Vec3::new(1.5, 2.0, 2.5));
        assert_eq!(a - b, Vec3::new(0.5, -6.0, -1.5));
        assert_eq!(-a, Vec3::new(-1.0, 2.0, -0.5));
        assert_eq!(a * 2.0, Vec3::new(2.0, -4.0, 1.0));
        assert_relative_eq!(a.dot(&b), -6.5, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize() {
        let mut vector = Vec3::new(3.0, 0.0, 4.0);
        let normalized = vector.normalize();
        assert_relative_eq!(normalized, Vec3::new(0.6, 0.0, 0.8), epsilon = EPSILON);
        assert_relative_eq!(vector.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_zero_vector_is_nan() {
        let normalized = Vec3::ZERO.normalized();
        assert!(normalized.x().is_nan());
        assert!(normalized.y().is_nan());
        assert!(normalized.z().is_nan());
    }
}
