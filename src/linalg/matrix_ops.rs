//! Elimination-based matrix quantities (rank, det, inverse, adjugate, trace,
//! minors, integer powers)

use super::helpers::validate_square_matrix;
use super::matmul::matmul_impl;
use crate::error::{Error, Result};
use crate::kernels::{MatmulOptions, elimination};
use crate::matrix::Matrix;

/// Row rank by fraction-free elimination with exact-zero pivots
pub fn rank_impl(a: &Matrix) -> usize {
    let mut scratch = a.as_slice().to_vec();
    elimination::rank(&mut scratch, a.rows(), a.cols())
}

/// Determinant by division-based elimination
pub fn determinant_impl(a: &Matrix) -> Result<f64> {
    let n = validate_square_matrix(a.rows(), a.cols())?;
    let mut scratch = a.as_slice().to_vec();
    Ok(elimination::determinant(&mut scratch, n))
}

/// Inverse by Gauss-Jordan elimination on `[A | I]`
pub fn inverse_impl(a: &Matrix) -> Result<Matrix> {
    let n = validate_square_matrix(a.rows(), a.cols())?;
    let mut out = vec![0.0; n * n];
    if !elimination::inverse(a.as_slice(), &mut out, n) {
        log::debug!("inverse: no usable pivot in {n}x{n} matrix");
        return Err(Error::Singular { op: "inverse" });
    }
    Ok(Matrix::from_raw(n, n, out))
}

/// Adjugate as `inverse(A) * det(A)`
pub fn adjugate_impl(a: &Matrix) -> Result<Matrix> {
    let n = validate_square_matrix(a.rows(), a.cols())?;
    let mut out = vec![0.0; n * n];
    if !elimination::adjugate(a.as_slice(), &mut out, n) {
        log::debug!("adjugate: no usable pivot in {n}x{n} matrix");
        return Err(Error::Singular { op: "adjugate" });
    }
    Ok(Matrix::from_raw(n, n, out))
}

/// Sum of the diagonal
pub fn trace_impl(a: &Matrix) -> Result<f64> {
    let n = validate_square_matrix(a.rows(), a.cols())?;
    let data = a.as_slice();
    Ok((0..n).map(|i| data[i * n + i]).sum())
}

/// Copy of `a` without row `row` and column `col`
pub fn first_minor_impl(a: &Matrix, row: usize, col: usize) -> Result<Matrix> {
    let (rows, cols) = a.shape();
    if row >= rows {
        return Err(Error::index_out_of_bounds(row as isize, rows));
    }
    if col >= cols {
        return Err(Error::index_out_of_bounds(col as isize, cols));
    }
    if rows < 2 || cols < 2 {
        return Err(Error::invalid_argument(
            "matrix",
            format!("{rows}x{cols} matrix has no non-empty minor"),
        ));
    }

    let data: Vec<f64> = a
        .iter_rows()
        .enumerate()
        .filter(|&(i, _)| i != row)
        .flat_map(|(_, r)| {
            r.iter()
                .enumerate()
                .filter(|&(j, _)| j != col)
                .map(|(_, &x)| x)
        })
        .collect();
    Ok(Matrix::from_raw(rows - 1, cols - 1, data))
}

/// `(-1)^(row + col) * det(first_minor(row, col))`
pub fn cofactor_impl(a: &Matrix, row: usize, col: usize) -> Result<f64> {
    let n = validate_square_matrix(a.rows(), a.cols())?;
    let det = if n == 1 {
        if row != 0 {
            return Err(Error::index_out_of_bounds(row as isize, 1));
        }
        if col != 0 {
            return Err(Error::index_out_of_bounds(col as isize, 1));
        }
        1.0
    } else {
        determinant_impl(&first_minor_impl(a, row, col)?)?
    };
    let sign = if (row + col) % 2 == 1 { -1.0 } else { 1.0 };
    Ok(sign * det)
}

/// Integer power by recursive squaring
///
/// `d == 1` copies any shape; every other exponent needs a square matrix.
/// Negative exponents invert first and fail with [`Error::Singular`] when the
/// matrix has no inverse.
pub fn power_impl(a: &Matrix, d: i64) -> Result<Matrix> {
    if d == 1 {
        return Ok(Matrix::from_raw(a.rows(), a.cols(), a.as_slice().to_vec()));
    }
    let n = validate_square_matrix(a.rows(), a.cols())?;
    let opts = MatmulOptions::default();

    match d {
        0 => Matrix::identity(n),
        -1 => inverse_impl(a),
        d if d > 1 => power_recursive(a, d.unsigned_abs(), &opts),
        d => power_recursive(&inverse_impl(a)?, d.unsigned_abs(), &opts),
    }
}

fn power_recursive(a: &Matrix, d: u64, opts: &MatmulOptions) -> Result<Matrix> {
    match d {
        1 => Ok(a.clone()),
        2 => matmul_impl(a, a, opts),
        3 => {
            let c = matmul_impl(a, a, opts)?;
            matmul_impl(a, &c, opts)
        }
        _ => {
            let c = power_recursive(a, d / 2, opts)?;
            let squared = matmul_impl(&c, &c, opts)?;
            if d % 2 == 0 {
                Ok(squared)
            } else {
                matmul_impl(a, &squared, opts)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_trace() {
        let a = m(&[&[1.5, 2.0], &[3.0, 2.25]]);
        assert_eq!(trace_impl(&a).unwrap(), 3.75);
        assert!(trace_impl(&m(&[&[1.0, 2.0]])).is_err());
    }

    #[test]
    fn test_first_minor() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        let minor = first_minor_impl(&a, 1, 0).unwrap();
        assert_eq!(minor, m(&[&[2.0, 3.0], &[8.0, 9.0]]));

        assert!(matches!(
            first_minor_impl(&a, 3, 0),
            Err(Error::IndexOutOfBounds { index: 3, size: 3 })
        ));
        assert!(matches!(
            first_minor_impl(&m(&[&[1.0, 2.0]]), 0, 0),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_cofactor() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(cofactor_impl(&a, 0, 0).unwrap(), 4.0);
        assert_eq!(cofactor_impl(&a, 0, 1).unwrap(), -3.0);
        assert_eq!(cofactor_impl(&a, 1, 0).unwrap(), -2.0);
        assert_eq!(cofactor_impl(&m(&[&[5.0]]), 0, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_power_small_exponents() {
        let a = m(&[&[1.0, 1.0], &[1.0, 0.0]]);
        // Fibonacci: A^n = [[F(n+1), F(n)], [F(n), F(n-1)]]
        assert_eq!(power_impl(&a, 0).unwrap(), Matrix::identity(2).unwrap());
        assert_eq!(power_impl(&a, 1).unwrap(), a);
        assert_eq!(power_impl(&a, 2).unwrap(), m(&[&[2.0, 1.0], &[1.0, 1.0]]));
        assert_eq!(power_impl(&a, 3).unwrap(), m(&[&[3.0, 2.0], &[2.0, 1.0]]));
        assert_eq!(power_impl(&a, 10).unwrap(), m(&[&[89.0, 55.0], &[55.0, 34.0]]));
        assert_eq!(power_impl(&a, 11).unwrap(), m(&[&[144.0, 89.0], &[89.0, 55.0]]));
    }

    #[test]
    fn test_power_negative() {
        let a = m(&[&[2.0, 0.0], &[0.0, 4.0]]);
        assert_eq!(power_impl(&a, -1).unwrap(), m(&[&[0.5, 0.0], &[0.0, 0.25]]));
        assert_eq!(
            power_impl(&a, -2).unwrap(),
            m(&[&[0.25, 0.0], &[0.0, 0.0625]])
        );

        let singular = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(
            power_impl(&singular, -3),
            Err(Error::Singular { op: "inverse" })
        );
    }

    #[test]
    fn test_power_shape_rules() {
        let wide = m(&[&[1.0, 2.0, 3.0]]);
        assert_eq!(power_impl(&wide, 1).unwrap(), wide);
        assert_eq!(power_impl(&wide, 0), Err(Error::not_square(1, 3)));
        assert_eq!(power_impl(&wide, 2), Err(Error::not_square(1, 3)));
    }
}
