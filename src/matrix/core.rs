//! Core Matrix type

use crate::error::{Error, Result};
use crate::kernels::buffer;
use crate::linalg::helpers::{checked_index, normalize_index, validate_dims};
use crate::vector::Vector;
use std::fmt;

/// Dense row-major matrix of `f64`
///
/// A `Matrix` owns its buffer exclusively: element `(row, col)` lives at
/// `col + cols * row`, both dimensions are non-zero, and the buffer length is
/// always `rows * cols`. Every operation that changes shape or content returns
/// a new matrix, except the explicitly in-place ones (`add_in_place`,
/// `sub_in_place`, `fill`, `set`), which fail with [`Error::Frozen`] once the
/// matrix has been [frozen](Matrix::freeze).
///
/// # Example
///
/// ```
/// use fastmat::prelude::*;
///
/// let a = Matrix::from_rows(&[&[4.0, 3.0], &[6.0, 3.0]])?;
/// assert_eq!(a.determinant()?, -6.0);
/// # Ok::<(), fastmat::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    frozen: bool,
}

/// Which elements [`Matrix::iter_elements`] visits, relative to the main
/// diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every element
    #[default]
    All,
    /// `i == j`
    Diagonal,
    /// `i != j`
    OffDiagonal,
    /// `j <= i`
    Lower,
    /// `j < i`
    StrictLower,
    /// `j > i`
    StrictUpper,
    /// `j >= i`
    Upper,
}

impl Selection {
    /// Whether element `(row, col)` belongs to the selection
    #[inline]
    pub fn contains(self, row: usize, col: usize) -> bool {
        match self {
            Selection::All => true,
            Selection::Diagonal => col == row,
            Selection::OffDiagonal => col != row,
            Selection::Lower => col <= row,
            Selection::StrictLower => col < row,
            Selection::StrictUpper => col > row,
            Selection::Upper => col >= row,
        }
    }
}

impl Matrix {
    /// Wrap a buffer whose length is already known to be `rows * cols`
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            data,
            rows,
            cols,
            frozen: false,
        }
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a zero-filled `rows × cols` matrix
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = validate_dims(rows, cols)?;
        Ok(Self::from_raw(rows, cols, vec![0.0; len]))
    }

    /// Create a matrix from a row-major buffer
    ///
    /// Returns an error if `data.len()` does not equal `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let len = validate_dims(rows, cols)?;
        if data.len() != len {
            return Err(Error::shape_mismatch(&[len], &[data.len()]));
        }
        Ok(Self::from_raw(rows, cols, data))
    }

    /// Create a matrix from a slice of equal-length rows
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        let len = validate_dims(rows.len(), cols)?;

        let mut data = Vec::with_capacity(len);
        for row in rows {
            if row.len() != cols {
                return Err(Error::shape_mismatch(&[cols], &[row.len()]));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_raw(rows.len(), cols, data))
    }

    /// Create a matrix from a slice of equal-length columns
    pub fn from_columns(columns: &[&[f64]]) -> Result<Self> {
        let rows = columns.first().map_or(0, |c| c.len());
        let cols = columns.len();
        let len = validate_dims(rows, cols)?;

        let mut data = vec![0.0; len];
        for (j, column) in columns.iter().enumerate() {
            if column.len() != rows {
                return Err(Error::shape_mismatch(&[rows], &[column.len()]));
            }
            for (i, &v) in column.iter().enumerate() {
                data[i * cols + j] = v;
            }
        }
        Ok(Self::from_raw(rows, cols, data))
    }

    /// Create a matrix whose element `(i, j)` is `f(i, j)`
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self> {
        let len = validate_dims(rows, cols)?;
        let mut data = Vec::with_capacity(len);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Ok(Self::from_raw(rows, cols, data))
    }

    /// `n × n` matrix with `value` on the diagonal and zeros elsewhere
    pub fn scalar(n: usize, value: f64) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = value;
        }
        Ok(m)
    }

    /// `n × n` identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        Self::scalar(n, 1.0)
    }

    /// `n × n` zero matrix
    pub fn zero(n: usize) -> Result<Self> {
        Self::new(n, n)
    }

    /// Square matrix with `values` on the diagonal
    pub fn diagonal(values: &[f64]) -> Result<Self> {
        let n = values.len();
        let mut m = Self::new(n, n)?;
        for (i, &v) in values.iter().enumerate() {
            m.data[i * n + i] = v;
        }
        Ok(m)
    }

    /// `1 × n` matrix
    pub fn row_vector(values: &[f64]) -> Result<Self> {
        Self::from_vec(1, values.len(), values.to_vec())
    }

    /// `n × 1` matrix
    pub fn column_vector(values: &[f64]) -> Result<Self> {
        Self::from_vec(values.len(), 1, values.to_vec())
    }

    /// Stack matrices on top of each other (column counts must agree)
    pub fn vstack(matrices: &[&Matrix]) -> Result<Self> {
        let first = matrices
            .first()
            .ok_or_else(|| Error::invalid_argument("matrices", "at least one matrix required"))?;
        let cols = first.cols;

        let mut rows = 0;
        for m in matrices {
            if m.cols != cols {
                return Err(Error::shape_mismatch(&[m.rows, cols], &[m.rows, m.cols]));
            }
            rows += m.rows;
        }

        let mut data = Vec::with_capacity(validate_dims(rows, cols)?);
        for m in matrices {
            data.extend_from_slice(&m.data);
        }
        Ok(Self::from_raw(rows, cols, data))
    }

    /// Place matrices side by side (row counts must agree)
    pub fn hstack(matrices: &[&Matrix]) -> Result<Self> {
        let first = matrices
            .first()
            .ok_or_else(|| Error::invalid_argument("matrices", "at least one matrix required"))?;
        let rows = first.rows;

        let mut cols = 0;
        for m in matrices {
            if m.rows != rows {
                return Err(Error::shape_mismatch(&[rows, m.cols], &[m.rows, m.cols]));
            }
            cols += m.cols;
        }

        let mut data = Vec::with_capacity(validate_dims(rows, cols)?);
        for i in 0..rows {
            for m in matrices {
                data.extend_from_slice(&m.data[i * m.cols..(i + 1) * m.cols]);
            }
        }
        Ok(Self::from_raw(rows, cols, data))
    }

    // ========================================================================
    // Shape and storage
    // ========================================================================

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a matrix has at least one element
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True iff `rows == cols`
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major view of the buffer
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of the buffer
    pub fn as_mut_slice(&mut self) -> Result<&mut [f64]> {
        self.ensure_mutable()?;
        Ok(&mut self.data)
    }

    /// Consume the matrix, returning its row-major buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Native-endian bytes of the row-major buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Create a matrix from native-endian `f64` bytes
    ///
    /// `bytes` need not be aligned; its length must be `rows * cols * 8`.
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self> {
        let expected = validate_dims(rows, cols)?
            .checked_mul(std::mem::size_of::<f64>())
            .ok_or_else(|| Error::invalid_argument("cols", "byte length overflows usize"))?;
        if bytes.len() != expected {
            return Err(Error::shape_mismatch(&[expected], &[bytes.len()]));
        }
        let data = bytes
            .chunks_exact(std::mem::size_of::<f64>())
            .map(bytemuck::pod_read_unaligned::<f64>)
            .collect();
        Ok(Self::from_raw(rows, cols, data))
    }

    // ========================================================================
    // Mutability
    // ========================================================================

    /// Mark the matrix immutable; later in-place operations fail
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Whether [`freeze`](Self::freeze) has been called
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            return Err(Error::Frozen { entity: "matrix" });
        }
        Ok(())
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Element at `(row, col)`; negative indices count from the end
    pub fn get(&self, row: isize, col: isize) -> Option<f64> {
        let i = normalize_index(row, self.rows)?;
        let j = normalize_index(col, self.cols)?;
        Some(self.data[i * self.cols + j])
    }

    /// Assign element at `(row, col)`; negative indices count from the end
    pub fn set(&mut self, row: isize, col: isize, value: f64) -> Result<()> {
        self.ensure_mutable()?;
        let i = checked_index(row, self.rows)?;
        let j = checked_index(col, self.cols)?;
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    /// Copy of row `i`
    pub fn row(&self, i: isize) -> Option<Vector> {
        let i = normalize_index(i, self.rows)?;
        Some(Vector::from_raw(
            self.data[i * self.cols..(i + 1) * self.cols].to_vec(),
        ))
    }

    /// Copy of column `j`
    pub fn column(&self, j: isize) -> Option<Vector> {
        let j = normalize_index(j, self.cols)?;
        Some(Vector::from_raw(
            self.data.iter().skip(j).step_by(self.cols).copied().collect(),
        ))
    }

    /// Iterator over rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    /// Row-major iterator over the elements picked by `which`
    ///
    /// ```
    /// use fastmat::{Matrix, Selection};
    ///
    /// let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
    /// let upper: Vec<f64> = a.iter_elements(Selection::Upper).collect();
    /// assert_eq!(upper, [1.0, 2.0, 4.0]);
    /// ```
    pub fn iter_elements(&self, which: Selection) -> impl Iterator<Item = f64> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(move |&(idx, _)| which.contains(idx / cols, idx % cols))
            .map(|(_, &x)| x)
    }

    /// Fill every element with `value` in place
    pub fn fill(&mut self, value: f64) -> Result<()> {
        self.ensure_mutable()?;
        buffer::fill(&mut self.data, value);
        Ok(())
    }
}

impl PartialEq for Matrix {
    /// Bit-exact comparison; matrices of different shape are never equal
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && buffer::equal(&self.data, &other.data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix[")?;
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v:?}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_reject_empty() {
        assert!(Matrix::new(0, 3).is_err());
        assert!(Matrix::new(3, 0).is_err());
        assert!(Matrix::from_rows(&[]).is_err());
        assert!(Matrix::diagonal(&[]).is_err());
        assert!(Matrix::vstack(&[]).is_err());
    }

    #[test]
    fn test_iter_elements() {
        let a = Matrix::from_fn(3, 2, |i, j| (10 * i + j) as f64).unwrap();
        let pick = |which| a.iter_elements(which).collect::<Vec<_>>();
        assert_eq!(pick(Selection::All), [0.0, 1.0, 10.0, 11.0, 20.0, 21.0]);
        assert_eq!(pick(Selection::Diagonal), [0.0, 11.0]);
        assert_eq!(pick(Selection::OffDiagonal), [1.0, 10.0, 20.0, 21.0]);
        assert_eq!(pick(Selection::Lower), [0.0, 10.0, 11.0, 20.0, 21.0]);
        assert_eq!(pick(Selection::StrictLower), [10.0, 20.0, 21.0]);
        assert_eq!(pick(Selection::StrictUpper), [1.0]);
        assert_eq!(pick(Selection::Upper), [0.0, 1.0, 11.0]);
    }

    #[test]
    fn test_constructors_reject_overflowing_shape() {
        let huge = usize::MAX / 2 + 1;
        assert!(matches!(
            Matrix::new(huge, 3),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            Matrix::from_vec(huge, 3, vec![]),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            Matrix::from_fn(huge, 3, |_, _| 0.0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            Matrix::from_bytes(usize::MAX, 2, &[]),
            Err(Error::InvalidArgument { .. })
        ));
        // Element count fits but the byte length does not
        assert!(matches!(
            Matrix::from_bytes(usize::MAX / 4, 1, &[]),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_from_rows_and_columns_agree() {
        let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_columns(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), (2, 3));

        let ragged = Matrix::from_rows(&[&[1.0, 2.0], &[3.0]]);
        assert!(matches!(ragged, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(Matrix::from_vec(2, 2, vec![1.0; 3]).is_err());
        assert!(Matrix::from_vec(2, 2, vec![1.0; 4]).is_ok());
    }

    #[test]
    fn test_get_set_negative_indices() {
        let mut m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        assert_eq!(m.get(-1, -1), Some(4.0));
        assert_eq!(m.get(0, -2), Some(1.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(-3, 0), None);

        m.set(-1, 0, 9.0).unwrap();
        assert_eq!(m.get(1, 0), Some(9.0));
        assert_eq!(
            m.set(0, 5, 1.0),
            Err(Error::IndexOutOfBounds { index: 5, size: 2 })
        );
    }

    #[test]
    fn test_frozen_rejects_mutation() {
        let mut m = Matrix::identity(2).unwrap();
        m.freeze();
        assert!(m.is_frozen());
        assert_eq!(m.fill(1.0), Err(Error::Frozen { entity: "matrix" }));
        assert_eq!(m.set(0, 0, 2.0), Err(Error::Frozen { entity: "matrix" }));
        assert!(m.as_mut_slice().is_err());
        assert_eq!(m, Matrix::identity(2).unwrap());
    }

    #[test]
    fn test_row_and_column() {
        let m = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.row(1).unwrap().as_slice(), &[4.0, 5.0, 6.0]);
        assert_eq!(m.column(-1).unwrap().as_slice(), &[3.0, 6.0]);
        assert!(m.row(2).is_none());
    }

    #[test]
    fn test_stacking() {
        let a = Matrix::from_rows(&[&[1.0, 2.0]]).unwrap();
        let b = Matrix::from_rows(&[&[3.0, 4.0], &[5.0, 6.0]]).unwrap();
        let v = Matrix::vstack(&[&a, &b]).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let c = Matrix::column_vector(&[7.0, 8.0]).unwrap();
        let h = Matrix::hstack(&[&b, &c]).unwrap();
        assert_eq!(h.as_slice(), &[3.0, 4.0, 7.0, 5.0, 6.0, 8.0]);

        assert!(Matrix::hstack(&[&a, &b]).is_err());
    }

    #[test]
    fn test_bytes_exchange() {
        let m = Matrix::from_rows(&[&[1.5, -2.0], &[0.25, 8.0]]).unwrap();
        let bytes = m.as_bytes().to_vec();
        assert_eq!(bytes.len(), 32);
        let back = Matrix::from_bytes(2, 2, &bytes).unwrap();
        assert_eq!(back, m);
        assert!(Matrix::from_bytes(2, 2, &bytes[..31]).is_err());
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(&[&[1.0, 2.5], &[-3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "Matrix[[1.0, 2.5], [-3.0, 4.0]]");
    }
}
