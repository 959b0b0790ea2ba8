//! Elementwise arithmetic, comparison and products for Matrix

use super::Matrix;
use crate::error::{Error, Result};
use crate::kernels::{MatmulOptions, buffer, matmul};
use crate::linalg::helpers::validate_same_shape;
use crate::linalg::matmul_impl;
use crate::vector::Vector;
use std::ops::Neg;

impl Matrix {
    fn zip_with(&self, other: &Matrix, op: fn(&[f64], &[f64], &mut [f64])) -> Result<Matrix> {
        validate_same_shape(self.shape(), other.shape())?;
        let mut out = vec![0.0; self.len()];
        op(self.as_slice(), other.as_slice(), &mut out);
        Ok(Matrix::from_raw(self.rows(), self.cols(), out))
    }

    fn map_into(&self, op: impl FnOnce(&[f64], &mut [f64])) -> Matrix {
        let mut out = vec![0.0; self.len()];
        op(self.as_slice(), &mut out);
        Matrix::from_raw(self.rows(), self.cols(), out)
    }

    /// Elementwise sum
    pub fn checked_add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, buffer::add_into)
    }

    /// Elementwise difference
    pub fn checked_sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, buffer::sub_into)
    }

    /// Fold equally-shaped matrices elementwise with `f`
    ///
    /// The result starts as a copy of the first matrix; each later matrix
    /// `m` replaces every element `r` with `f(r, m[i][j])`. A single matrix
    /// is returned unchanged.
    ///
    /// ```
    /// use fastmat::Matrix;
    ///
    /// let x = Matrix::from_rows(&[&[6.0, 6.0], &[4.0, 4.0]]).unwrap();
    /// let y = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
    /// let d = Matrix::combine(&[&x, &y], |a, b| a - b).unwrap();
    /// assert_eq!(d, Matrix::from_rows(&[&[5.0, 4.0], &[1.0, 0.0]]).unwrap());
    /// ```
    pub fn combine(matrices: &[&Matrix], mut f: impl FnMut(f64, f64) -> f64) -> Result<Matrix> {
        let (first, rest) = matrices
            .split_first()
            .ok_or_else(|| Error::invalid_argument("matrices", "at least one matrix required"))?;
        let mut out = first.as_slice().to_vec();
        for m in rest {
            validate_same_shape(first.shape(), m.shape())?;
            for (r, &x) in out.iter_mut().zip(m.as_slice()) {
                *r = f(*r, x);
            }
        }
        Ok(Matrix::from_raw(first.rows(), first.cols(), out))
    }

    /// Elementwise product
    pub fn hadamard_product(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, buffer::mul_into)
    }

    /// `self += other`
    pub fn add_in_place(&mut self, other: &Matrix) -> Result<()> {
        self.ensure_mutable()?;
        validate_same_shape(self.shape(), other.shape())?;
        buffer::add_assign(self.as_mut_slice()?, other.as_slice());
        Ok(())
    }

    /// `self -= other`
    pub fn sub_in_place(&mut self, other: &Matrix) -> Result<()> {
        self.ensure_mutable()?;
        validate_same_shape(self.shape(), other.shape())?;
        buffer::sub_assign(self.as_mut_slice()?, other.as_slice());
        Ok(())
    }

    /// Multiply every element by `value`
    pub fn scale(&self, value: f64) -> Matrix {
        self.map_into(|a, out| buffer::scale_into(a, value, out))
    }

    /// Elementwise absolute value
    pub fn abs(&self) -> Matrix {
        self.map_into(buffer::abs_into)
    }

    /// Round every element to `digits` decimal places
    pub fn round(&self, digits: i32) -> Matrix {
        self.map_into(|a, out| buffer::round_into(a, digits, out))
    }

    /// `cols × rows` transpose
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = self.shape();
        let mut out = vec![0.0; self.len()];
        matmul::transpose(self.as_slice(), &mut out, rows, cols);
        Matrix::from_raw(cols, rows, out)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    fn compare(&self, other: &Matrix, op: fn(&[f64], &[f64]) -> bool) -> Result<bool> {
        validate_same_shape(self.shape(), other.shape())?;
        Ok(op(self.as_slice(), other.as_slice()))
    }

    /// True iff `self[i][j] >= other[i][j]` everywhere
    pub fn all_ge(&self, other: &Matrix) -> Result<bool> {
        self.compare(other, buffer::all_ge)
    }

    /// True iff `self[i][j] > other[i][j]` everywhere
    pub fn all_gt(&self, other: &Matrix) -> Result<bool> {
        self.compare(other, buffer::all_gt)
    }

    /// True iff `self[i][j] <= other[i][j]` everywhere
    pub fn all_le(&self, other: &Matrix) -> Result<bool> {
        self.compare(other, buffer::all_le)
    }

    /// True iff `self[i][j] < other[i][j]` everywhere
    pub fn all_lt(&self, other: &Matrix) -> Result<bool> {
        self.compare(other, buffer::all_lt)
    }

    /// True iff every element is exactly zero
    pub fn is_zero(&self) -> bool {
        buffer::is_zero(self.as_slice())
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Matrix product with the default Strassen gate
    ///
    /// # Example
    ///
    /// ```
    /// use fastmat::prelude::*;
    ///
    /// let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]])?;
    /// let b = Matrix::identity(2)?;
    /// assert_eq!(a.matmul(&b)?, a);
    /// # Ok::<(), fastmat::Error>(())
    /// ```
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        matmul_impl(self, other, &MatmulOptions::default())
    }

    /// Matrix product with explicit gate options
    pub fn matmul_with(&self, other: &Matrix, opts: &MatmulOptions) -> Result<Matrix> {
        matmul_impl(self, other, opts)
    }

    /// Matrix product using only the triple loop
    pub fn matmul_naive(&self, other: &Matrix) -> Result<Matrix> {
        matmul_impl(self, other, &MatmulOptions::naive())
    }

    /// Matrix times column vector
    pub fn mul_vector(&self, v: &Vector) -> Result<Vector> {
        if self.cols() != v.len() {
            return Err(Error::shape_mismatch(&[self.cols()], &[v.len()]));
        }
        let mut out = vec![0.0; self.rows()];
        matmul::matvec(self.as_slice(), v.as_slice(), &mut out, self.rows(), self.cols());
        Ok(Vector::from_raw(out))
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scale(-1.0)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -&self
    }
}
