//! LUP decomposition and its consumers

use super::helpers::validate_square_matrix;
use crate::error::{Error, Result};
use crate::kernels::lup;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// LU decomposition with row pivoting: `P * A = L * U`
///
/// Stores the combined buffer (strict lower triangle holds the `L`
/// multipliers, the upper triangle holds `U`), the row permutation and the
/// sign of that permutation. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LupDecomposition {
    /// Combined `n × n` LU buffer, row-major
    lu: Vec<f64>,

    /// `permutation[i]` is the source row now at factored row `i`
    permutation: Vec<usize>,

    /// `(-1)^(number of row swaps)`
    pivot_sign: f64,

    /// Some diagonal pivot of `U` is exactly zero
    singular: bool,

    n: usize,
}

/// Factor a square matrix with maximum-magnitude partial pivoting
///
/// A singular input still factors; the result reports
/// [`is_singular`](LupDecomposition::is_singular) and refuses to solve.
pub fn lup_impl(a: &Matrix) -> Result<LupDecomposition> {
    let n = validate_square_matrix(a.rows(), a.cols())?;
    let mut lu = a.as_slice().to_vec();
    let mut permutation = vec![0; n];
    let info = lup::factor(&mut lu, &mut permutation, n);

    if info.singular {
        log::debug!("lup: {n}x{n} matrix is singular");
    }

    Ok(LupDecomposition {
        lu,
        permutation,
        pivot_sign: info.pivot_sign,
        singular: info.singular,
        n,
    })
}

impl LupDecomposition {
    /// Dimension `n` of the factored matrix
    pub fn size(&self) -> usize {
        self.n
    }

    /// Unit lower-triangular factor
    pub fn l(&self) -> Matrix {
        let mut out = vec![0.0; self.n * self.n];
        lup::extract_l(&self.lu, &mut out, self.n);
        Matrix::from_raw(self.n, self.n, out)
    }

    /// Upper-triangular factor
    pub fn u(&self) -> Matrix {
        let mut out = vec![0.0; self.n * self.n];
        lup::extract_u(&self.lu, &mut out, self.n);
        Matrix::from_raw(self.n, self.n, out)
    }

    /// Permutation matrix, one `1` at `(i, pivots()[i])` per row
    pub fn p(&self) -> Matrix {
        let mut out = vec![0.0; self.n * self.n];
        lup::extract_p(&self.permutation, &mut out, self.n);
        Matrix::from_raw(self.n, self.n, out)
    }

    /// `(L, U, P)`
    pub fn to_parts(&self) -> (Matrix, Matrix, Matrix) {
        (self.l(), self.u(), self.p())
    }

    /// Determinant of the factored matrix
    pub fn determinant(&self) -> f64 {
        lup::determinant(&self.lu, self.n, self.pivot_sign)
    }

    /// Whether some pivot was exactly zero
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Row permutation
    pub fn pivots(&self) -> &[usize] {
        &self.permutation
    }

    /// Combined LU buffer, row-major
    pub fn as_slice(&self) -> &[f64] {
        &self.lu
    }

    /// Solve `A * X = B` for `B` with `n` rows
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        self.ensure_solvable(b.rows())?;
        let m = b.cols();
        let mut out = vec![0.0; self.n * m];
        lup::solve(&self.lu, &self.permutation, b.as_slice(), &mut out, self.n, m);
        Ok(Matrix::from_raw(self.n, m, out))
    }

    /// Solve `A * x = b` for a vector of length `n`
    pub fn solve_vector(&self, b: &Vector) -> Result<Vector> {
        self.ensure_solvable(b.len())?;
        let mut out = vec![0.0; self.n];
        lup::solve(&self.lu, &self.permutation, b.as_slice(), &mut out, self.n, 1);
        Ok(Vector::from_raw(out))
    }

    fn ensure_solvable(&self, rows: usize) -> Result<()> {
        if self.singular {
            return Err(Error::Singular { op: "solve" });
        }
        if rows != self.n {
            return Err(Error::shape_mismatch(&[self.n], &[rows]));
        }
        Ok(())
    }
}
