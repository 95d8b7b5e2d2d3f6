//! Row-major square matrices
//!
//! [`Matrix`] carries everything that does not depend on the dimension:
//! element access, arithmetic, transposition and the LU based inversion.
//! The dimension specific parts (vector products, block extraction) live in
//! the `mat3` and `mat4` modules.
//!
//! ## Inversion
//!
//! Inversion uses a Doolittle LU factorization without pivoting followed by
//! one forward and one backward substitution per identity column. Singular or
//! badly conditioned input is not detected: the divisions simply produce
//! NaN or infinity, which callers are expected to tolerate.

#![allow(clippy::needless_range_loop)]

use std::ops::{Add, Mul, Sub};

/// Row-major `N`×`N` matrix of `f32`
///
/// The default value is the identity. Out-of-range element reads yield NaN
/// and out-of-range writes are ignored. Equality is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize> {
    data: [[f32; N]; N],
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> Matrix<N> {
    /// Identity matrix
    pub fn identity() -> Self {
        let mut data = [[0.0; N]; N];
        for i in 0..N {
            data[i][i] = 1.0;
        }
        Self { data }
    }

    /// Matrix with every element set to zero
    pub const fn zero() -> Self {
        Self { data: [[0.0; N]; N] }
    }

    /// Build from row arrays
    pub const fn from_rows(data: [[f32; N]; N]) -> Self {
        Self { data }
    }

    /// Diagonal matrix with the given diagonal entries
    pub fn from_diagonal(diagonal: [f32; N]) -> Self {
        let mut matrix = Self::zero();
        for i in 0..N {
            matrix.data[i][i] = diagonal[i];
        }
        matrix
    }

    /// Element at (`row`, `column`), NaN when out of range
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.data
            .get(row)
            .and_then(|values| values.get(column))
            .copied()
            .unwrap_or(f32::NAN)
    }

    /// Set element at (`row`, `column`), ignored when out of range
    pub fn set(&mut self, row: usize, column: usize, value: f32) {
        if let Some(slot) = self.data.get_mut(row).and_then(|values| values.get_mut(column)) {
            *slot = value;
        }
    }

    /// Rows of the matrix
    pub const fn rows(&self) -> &[[f32; N]; N] {
        &self.data
    }

    /// Copy of row `index`, `None` when out of range
    pub fn row(&self, index: usize) -> Option<[f32; N]> {
        self.data.get(index).copied()
    }

    /// Copy of column `index`, `None` when out of range
    pub fn column(&self, index: usize) -> Option<[f32; N]> {
        if index >= N {
            return None;
        }
        let mut column = [0.0; N];
        for (row, value) in column.iter_mut().enumerate() {
            *value = self.data[row][index];
        }
        Some(column)
    }

    /// Transpose in place
    pub fn transpose(&mut self) -> &mut Self {
        for i in 0..N {
            for j in (i + 1)..N {
                let upper = self.data[i][j];
                self.data[i][j] = self.data[j][i];
                self.data[j][i] = upper;
            }
        }
        self
    }

    /// Doolittle LU decomposition into `(lower, upper)`
    ///
    /// `lower` has a unit diagonal. No pivoting is performed, a zero pivot
    /// propagates NaN/infinity into both factors.
    pub fn decompose(&self) -> (Self, Self) {
        let mut lower = Self::identity();
        let mut upper = Self::zero();

        for i in 0..N {
            for j in i..N {
                let mut sum = 0.0;
                for k in 0..i {
                    sum += lower.data[i][k] * upper.data[k][j];
                }
                upper.data[i][j] = (self.data[i][j] - sum) / lower.data[i][i];
            }
            for j in (i + 1)..N {
                let mut sum = 0.0;
                for k in 0..i {
                    sum += lower.data[j][k] * upper.data[k][i];
                }
                lower.data[j][i] = (self.data[j][i] - sum) / upper.data[i][i];
            }
        }

        (lower, upper)
    }

    /// Forward substitution, treating `self` as lower triangular
    pub fn solve_l(&self, rhs: &[f32; N]) -> [f32; N] {
        let mut solution = [0.0; N];
        for i in 0..N {
            let mut sum = 0.0;
            for k in 0..i {
                sum += self.data[i][k] * solution[k];
            }
            solution[i] = (rhs[i] - sum) / self.data[i][i];
        }
        solution
    }

    /// Backward substitution, treating `self` as upper triangular
    pub fn solve_u(&self, rhs: &[f32; N]) -> [f32; N] {
        let mut solution = [0.0; N];
        for i in (0..N).rev() {
            let mut sum = 0.0;
            for k in (i + 1)..N {
                sum += self.data[i][k] * solution[k];
            }
            solution[i] = (rhs[i] - sum) / self.data[i][i];
        }
        solution
    }

    /// Invert in place through LU decomposition
    pub fn invert(&mut self) -> &mut Self {
        let (lower, upper) = self.decompose();
        let mut inverse = Self::zero();

        for column in 0..N {
            let mut unit = [0.0; N];
            unit[column] = 1.0;
            let z = lower.solve_l(&unit);
            let x = upper.solve_u(&z);
            for row in 0..N {
                inverse.data[row][column] = x[row];
            }
        }

        *self = inverse;
        self
    }

    /// Inverted copy, leaves `self` untouched
    pub fn inverted(&self) -> Self {
        let mut copy = *self;
        copy.invert();
        copy
    }

    pub(crate) fn mul_array(&self, vector: &[f32; N]) -> [f32; N] {
        let mut result = [0.0; N];
        for i in 0..N {
            for k in 0..N {
                result[i] += self.data[i][k] * vector[k];
            }
        }
        result
    }
}

impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::zero();
        for i in 0..N {
            for j in 0..N {
                let mut sum = 0.0;
                for k in 0..N {
                    sum += self.data[i][k] * rhs.data[k][j];
                }
                result.data[i][j] = sum;
            }
        }
        result
    }
}

impl<const N: usize> Mul<f32> for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        let mut result = self;
        for row in &mut result.data {
            for value in row.iter_mut() {
                *value *= rhs;
            }
        }
        result
    }
}

impl<const N: usize> Add for Matrix<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut result = self;
        for (row, other) in result.data.iter_mut().zip(rhs.data.iter()) {
            for (value, addend) in row.iter_mut().zip(other.iter()) {
                *value += addend;
            }
        }
        result
    }
}

impl<const N: usize> Sub for Matrix<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs * -1.0
    }
}

impl<const N: usize> approx::AbsDiffEq for Matrix<N> {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> approx::RelativeEq for Matrix<N> {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
