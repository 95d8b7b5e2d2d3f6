//! 3x3 matrix specifics

use super::{Matrix, Vec3};
use std::ops::Mul;

/// 3x3 row-major matrix, used for rotation and scale blocks
pub type Mat3 = Matrix<3>;

impl Mat3 {
    /// Build a matrix whose rows are `right`, `up` and `target`
    pub const fn from_basis(right: Vec3, up: Vec3, target: Vec3) -> Self {
        Self::from_rows([*right.data(), *up.data(), *target.data()])
    }

    /// Diagonal matrix from a vector of factors
    pub fn from_scale(factors: Vec3) -> Self {
        Self::from_diagonal(*factors.data())
    }

    /// Row `index` as a vector, NaN components when out of range
    pub fn row_vec3(&self, index: usize) -> Vec3 {
        self.row(index).map_or(Vec3::new(f32::NAN, f32::NAN, f32::NAN), Vec3::from)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3::from(self.mul_array(rhs.data()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_vector_product() {
        let matrix = Mat3::from_rows([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(matrix * Vec3::UNIT_X, Vec3::UNIT_Y);
        assert_eq!(matrix * Vec3::UNIT_Y, -Vec3::UNIT_X);
    }

    #[test]
    fn test_basis_rows() {
        let matrix = Mat3::from_basis(Vec3::UNIT_Z, Vec3::UNIT_Y, -Vec3::UNIT_X);
        assert_eq!(matrix.row_vec3(0), Vec3::UNIT_Z);
        assert_eq!(matrix.row_vec3(2), -Vec3::UNIT_X);
        assert!(matrix.row_vec3(3).x().is_nan());
    }

    #[test]
    fn test_scale_matrix() {
        let matrix = Mat3::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(matrix * Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 3.0, 4.0));
    }
}
