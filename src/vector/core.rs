//! Core Vector type

use crate::error::{Error, Result};
use crate::kernels::{buffer, matmul};
use crate::linalg::helpers::{checked_index, normalize_index};
use crate::matrix::Matrix;
use std::fmt;
use std::ops::Neg;

/// Dense vector of `f64` with at least one element
///
/// Follows the same ownership and freezing rules as
/// [`Matrix`](crate::Matrix).
#[derive(Clone, Debug)]
pub struct Vector {
    data: Vec<f64>,
    frozen: bool,
}

fn validate_len(n: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::invalid_argument("len", "must be positive"));
    }
    Ok(())
}

impl Vector {
    pub(crate) fn from_raw(data: Vec<f64>) -> Self {
        debug_assert!(!data.is_empty());
        Self {
            data,
            frozen: false,
        }
    }

    /// Zero-filled vector of length `n`
    pub fn new(n: usize) -> Result<Self> {
        validate_len(n)?;
        Ok(Self::from_raw(vec![0.0; n]))
    }

    /// Take ownership of `data`
    pub fn from_vec(data: Vec<f64>) -> Result<Self> {
        validate_len(data.len())?;
        Ok(Self::from_raw(data))
    }

    /// Copy `data` into a new vector
    pub fn from_slice(data: &[f64]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a vector has at least one element
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable elements; fails when frozen
    pub fn as_mut_slice(&mut self) -> Result<&mut [f64]> {
        self.ensure_mutable()?;
        Ok(&mut self.data)
    }

    /// Consume the vector, returning its buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Native-endian bytes of the buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Create a vector from native-endian `f64` bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let width = std::mem::size_of::<f64>();
        if bytes.len() % width != 0 {
            return Err(Error::invalid_argument(
                "bytes",
                format!("length {} is not a multiple of {width}", bytes.len()),
            ));
        }
        Self::from_vec(
            bytes
                .chunks_exact(width)
                .map(bytemuck::pod_read_unaligned::<f64>)
                .collect(),
        )
    }

    /// Mark the vector immutable
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Whether the vector is frozen
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen { entity: "vector" });
        }
        Ok(())
    }

    /// Element `i`; negative indices count from the end
    pub fn get(&self, i: isize) -> Option<f64> {
        normalize_index(i, self.len()).map(|i| self.data[i])
    }

    /// Assign element `i`; negative indices count from the end
    pub fn set(&mut self, i: isize, value: f64) -> Result<()> {
        self.ensure_mutable()?;
        let i = checked_index(i, self.len())?;
        self.data[i] = value;
        Ok(())
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    fn zip_with(&self, other: &Vector, op: fn(&[f64], &[f64], &mut [f64])) -> Result<Vector> {
        if self.len() != other.len() {
            return Err(Error::shape_mismatch(&[self.len()], &[other.len()]));
        }
        let mut out = vec![0.0; self.len()];
        op(&self.data, &other.data, &mut out);
        Ok(Vector::from_raw(out))
    }

    /// Elementwise sum
    pub fn checked_add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, buffer::add_into)
    }

    /// Elementwise difference
    pub fn checked_sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, buffer::sub_into)
    }

    /// `self += other`
    pub fn add_in_place(&mut self, other: &Vector) -> Result<()> {
        self.ensure_mutable()?;
        if self.len() != other.len() {
            return Err(Error::shape_mismatch(&[self.len()], &[other.len()]));
        }
        buffer::add_assign(&mut self.data, &other.data);
        Ok(())
    }

    /// `self -= other`
    pub fn sub_in_place(&mut self, other: &Vector) -> Result<()> {
        self.ensure_mutable()?;
        if self.len() != other.len() {
            return Err(Error::shape_mismatch(&[self.len()], &[other.len()]));
        }
        buffer::sub_assign(&mut self.data, &other.data);
        Ok(())
    }

    /// Fill every element with `value`
    pub fn fill(&mut self, value: f64) -> Result<()> {
        buffer::fill(self.as_mut_slice()?, value);
        Ok(())
    }

    /// Multiply every element by `value`
    pub fn scale(&self, value: f64) -> Vector {
        let mut out = vec![0.0; self.len()];
        buffer::scale_into(&self.data, value, &mut out);
        Vector::from_raw(out)
    }

    /// Round every element to `digits` decimal places
    pub fn round(&self, digits: i32) -> Vector {
        let mut out = vec![0.0; self.len()];
        buffer::round_into(&self.data, digits, &mut out);
        Vector::from_raw(out)
    }

    /// True iff every element is exactly zero
    pub fn is_zero(&self) -> bool {
        buffer::is_zero(&self.data)
    }

    /// Scale by the single element of a length-1 vector
    pub fn scale_by_vector(&self, other: &Vector) -> Result<Vector> {
        match other.data.as_slice() {
            [value] => Ok(self.scale(*value)),
            _ => Err(Error::shape_mismatch(&[1], &[other.len()])),
        }
    }

    /// Outer product with a `1 × m` matrix, giving an `n × m` matrix
    pub fn outer_with_row(&self, row: &Matrix) -> Result<Matrix> {
        if row.rows() != 1 {
            return Err(Error::shape_mismatch(&[1, row.cols()], &[row.rows(), row.cols()]));
        }
        let (n, m) = (self.len(), row.cols());
        let mut out = vec![0.0; n * m];
        matmul::outer(&self.data, row.as_slice(), &mut out, n, m);
        Ok(Matrix::from_raw(n, m, out))
    }

    /// `n × 1` column matrix
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_raw(self.len(), 1, self.data.clone())
    }

    /// `1 × n` row matrix
    pub fn covector(&self) -> Matrix {
        Matrix::from_raw(1, self.len(), self.data.clone())
    }
}

impl PartialEq for Vector {
    /// Bit-exact comparison; vectors of different length are never equal
    fn eq(&self, other: &Self) -> bool {
        buffer::equal(&self.data, &other.data)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v:?}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(data: &[f64]) -> Vector {
        Vector::from_slice(data).unwrap()
    }

    #[test]
    fn test_constructors() {
        assert!(Vector::new(0).is_err());
        assert!(Vector::from_vec(vec![]).is_err());
        assert_eq!(Vector::new(3).unwrap().as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_get_set() {
        let mut a = v(&[1.0, 2.0, 3.0]);
        assert_eq!(a.get(-1), Some(3.0));
        assert_eq!(a.get(3), None);
        a.set(-3, 7.0).unwrap();
        assert_eq!(a.get(0), Some(7.0));
        assert_eq!(a.set(4, 0.0), Err(Error::IndexOutOfBounds { index: 4, size: 3 }));

        a.freeze();
        assert_eq!(a.set(0, 0.0), Err(Error::Frozen { entity: "vector" }));
        assert_eq!(a.fill(0.0), Err(Error::Frozen { entity: "vector" }));

        // Frozen wins over a length mismatch
        let short = v(&[1.0]);
        assert_eq!(a.add_in_place(&short), Err(Error::Frozen { entity: "vector" }));
        assert_eq!(a.sub_in_place(&short), Err(Error::Frozen { entity: "vector" }));
    }

    #[test]
    fn test_arithmetic() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[3.0, 5.0]);
        assert_eq!(a.checked_add(&b).unwrap(), v(&[4.0, 7.0]));
        assert_eq!(b.checked_sub(&a).unwrap(), v(&[2.0, 3.0]));
        assert!(a.checked_add(&v(&[1.0])).is_err());
        assert!(a.checked_add(&-&a).unwrap().is_zero());

        let mut c = a.clone();
        c.add_in_place(&b).unwrap();
        c.sub_in_place(&a).unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn test_scale_by_vector() {
        let a = v(&[1.0, -2.0]);
        assert_eq!(a.scale_by_vector(&v(&[3.0])).unwrap(), v(&[3.0, -6.0]));
        assert!(a.scale_by_vector(&v(&[1.0, 2.0])).is_err());
    }

    #[test]
    fn test_matrix_views() {
        let a = v(&[1.0, 2.0]);
        assert_eq!(a.to_matrix().shape(), (2, 1));
        assert_eq!(a.covector().shape(), (1, 2));

        let row = Matrix::row_vector(&[3.0, 4.0, 5.0]).unwrap();
        let outer = a.outer_with_row(&row).unwrap();
        assert_eq!(outer.shape(), (2, 3));
        assert_eq!(outer.as_slice(), &[3.0, 4.0, 5.0, 6.0, 8.0, 10.0]);

        let tall = Matrix::identity(2).unwrap();
        assert!(a.outer_with_row(&tall).is_err());
    }

    #[test]
    fn test_bytes_and_display() {
        let a = v(&[0.5, -1.0, 2.0]);
        assert_eq!(Vector::from_bytes(a.as_bytes()).unwrap(), a);
        assert!(Vector::from_bytes(&[0u8; 7]).is_err());
        assert_eq!(a.to_string(), "Vector[0.5, -1.0, 2.0]");
    }
}
