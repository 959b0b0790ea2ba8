//! Linear algebra over the owned types
//!
//! Validated, allocating wrappers around the [`kernels`](crate::kernels):
//!
//! - **Products**: Strassen-gated matrix multiplication
//! - **Elimination**: rank, determinant, inverse, adjugate
//! - **Derived**: trace, first minor, cofactor, integer power
//! - **Decompositions**: LUP with its solve/extract consumers
//!
//! Rank uses fraction-free elimination while determinant and inverse divide
//! by the pivot; both search for the first exactly non-zero pivot. The LUP
//! factorization alone pivots by maximum magnitude.

mod decompositions;
pub mod helpers;
mod matmul;
mod matrix_ops;

pub use decompositions::LupDecomposition;
pub(crate) use matmul::matmul_impl;

use crate::error::Result;
use crate::matrix::Matrix;

impl Matrix {
    /// Row rank
    ///
    /// Zero tests are exact, so a matrix that is only numerically
    /// rank-deficient reports full rank.
    pub fn rank(&self) -> usize {
        matrix_ops::rank_impl(self)
    }

    /// Determinant (requires square)
    pub fn determinant(&self) -> Result<f64> {
        matrix_ops::determinant_impl(self)
    }

    /// Inverse (requires square; [`Error::Singular`](crate::Error::Singular)
    /// when no pivot is found)
    ///
    /// # Example
    ///
    /// ```
    /// use fastmat::prelude::*;
    ///
    /// let a = Matrix::from_rows(&[&[4.0, 3.0], &[6.0, 3.0]])?;
    /// let inv = a.inverse()?.round(3);
    /// assert_eq!(inv, Matrix::from_rows(&[&[-0.5, 0.5], &[1.0, -0.667]])?);
    /// # Ok::<(), fastmat::Error>(())
    /// ```
    pub fn inverse(&self) -> Result<Matrix> {
        matrix_ops::inverse_impl(self)
    }

    /// Adjugate, `inverse * determinant`
    pub fn adjugate(&self) -> Result<Matrix> {
        matrix_ops::adjugate_impl(self)
    }

    /// Sum of the diagonal (requires square)
    pub fn trace(&self) -> Result<f64> {
        matrix_ops::trace_impl(self)
    }

    /// Matrix without row `row` and column `col`
    pub fn first_minor(&self, row: usize, col: usize) -> Result<Matrix> {
        matrix_ops::first_minor_impl(self, row, col)
    }

    /// Signed minor determinant `(-1)^(row + col) * det(first_minor)`
    pub fn cofactor(&self, row: usize, col: usize) -> Result<f64> {
        matrix_ops::cofactor_impl(self, row, col)
    }

    /// Integer power; negative exponents go through the inverse
    pub fn power(&self, d: i64) -> Result<Matrix> {
        matrix_ops::power_impl(self, d)
    }

    /// LUP factorization (requires square)
    pub fn lup(&self) -> Result<LupDecomposition> {
        decompositions::lup_impl(self)
    }
}
