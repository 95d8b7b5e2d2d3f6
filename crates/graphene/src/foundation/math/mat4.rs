//! 4x4 matrix specifics

use super::{Mat3, Matrix, Vec3, Vec4};
use std::ops::Mul;

/// 4x4 row-major homogeneous transform matrix
pub type Mat4 = Matrix<4>;

impl Mat4 {
    /// Translation matrix with `position` in the last column
    pub fn from_translation(position: Vec3) -> Self {
        let mut matrix = Self::identity();
        matrix.set_translation(position);
        matrix
    }

    /// Diagonal scaling matrix, `w` stays 1
    pub fn from_scale(factors: Vec3) -> Self {
        let [x, y, z] = *factors.data();
        Self::from_diagonal([x, y, z, 1.0])
    }

    /// Embed a 3x3 block into the upper-left corner of an identity
    pub fn from_mat3(block: &Mat3) -> Self {
        let mut matrix = Self::identity();
        for (row, values) in block.rows().iter().enumerate() {
            for (column, value) in values.iter().enumerate() {
                matrix.set(row, column, *value);
            }
        }
        matrix
    }

    /// Upper-left 3x3 block
    pub fn extract_mat3(&self) -> Mat3 {
        let mut block = Mat3::zero();
        for row in 0..3 {
            for column in 0..3 {
                block.set(row, column, self.get(row, column));
            }
        }
        block
    }

    /// First three entries of the last column
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.get(0, 3), self.get(1, 3), self.get(2, 3))
    }

    /// Overwrite the first three entries of the last column
    pub fn set_translation(&mut self, position: Vec3) {
        self.set(0, 3, position.x());
        self.set(1, 3, position.y());
        self.set(2, 3, position.z());
    }

    /// Upper-left 3x3 diagonal
    pub fn diagonal3(&self) -> Vec3 {
        Vec3::new(self.get(0, 0), self.get(1, 1), self.get(2, 2))
    }

    /// First three entries of row `index`
    pub fn row_vec3(&self, index: usize) -> Vec3 {
        Vec3::new(self.get(index, 0), self.get(index, 1), self.get(index, 2))
    }

    /// Overwrite the first three entries of row `index`
    pub fn set_row_vec3(&mut self, index: usize, vector: Vec3) {
        self.set(index, 0, vector.x());
        self.set(index, 1, vector.y());
        self.set(index, 2, vector.z());
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        Vec4::from(self.mul_array(rhs.data()))
    }
}
