//! Helper functions for linear algebra operations
//!
//! Validation utilities shared by the matrix, vector and decomposition types.

use crate::error::{Error, Result};

/// Validate the dimensions of a new matrix, returning its element count
///
/// Both dimensions must be non-zero and `rows * cols` must fit in `usize`.
pub fn validate_dims(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 {
        return Err(Error::invalid_argument("rows", "must be positive"));
    }
    if cols == 0 {
        return Err(Error::invalid_argument("cols", "must be positive"));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        Error::invalid_argument("cols", format!("{rows} x {cols} elements overflow usize"))
    })
}

/// Validate matrix is square, returning `n`
pub fn validate_square_matrix(rows: usize, cols: usize) -> Result<usize> {
    if rows != cols {
        return Err(Error::not_square(rows, cols));
    }
    Ok(rows)
}

/// Validate two shapes are identical
pub fn validate_same_shape(expected: (usize, usize), got: (usize, usize)) -> Result<()> {
    if expected != got {
        return Err(Error::shape_mismatch(&[expected.0, expected.1], &[got.0, got.1]));
    }
    Ok(())
}

/// Validate `C = A @ B` is well-formed, returning `(m, k, n)`
///
/// On mismatch the error compares the shape `B` would need (`[k, n]`) with
/// the shape it has.
pub fn validate_matmul_shapes(
    a: (usize, usize),
    b: (usize, usize),
) -> Result<(usize, usize, usize)> {
    let (m, k) = a;
    let (k2, n) = b;
    if k != k2 {
        return Err(Error::shape_mismatch(&[k, n], &[k2, n]));
    }
    Ok((m, k, n))
}

/// Map a possibly-negative index into `0..size`
///
/// `-1` addresses the last element. Returns `None` when the index is out of
/// range after normalization.
#[inline]
pub fn normalize_index(index: isize, size: usize) -> Option<usize> {
    let idx = if index < 0 {
        size.checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    (idx < size).then_some(idx)
}

/// Like [`normalize_index`] but reports out-of-range as an error
#[inline]
pub fn checked_index(index: isize, size: usize) -> Result<usize> {
    normalize_index(index, size).ok_or(Error::index_out_of_bounds(index, size))
}
