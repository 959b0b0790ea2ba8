//! Structural predicates over square matrices
//!
//! All comparisons are exact. Every predicate fails with
//! [`Error::NotSquare`](crate::Error::NotSquare) on a non-square matrix.

use super::{Matrix, Selection};
use crate::error::Result;
use crate::linalg::helpers::validate_square_matrix;

impl Matrix {
    /// True iff `pred(i, j, a[i][j], a[j][i])` holds for every pair
    fn all_pairs(&self, pred: impl Fn(usize, usize, f64, f64) -> bool) -> Result<bool> {
        let n = validate_square_matrix(self.rows(), self.cols())?;
        let a = self.as_slice();
        for i in 0..n {
            for j in 0..n {
                if !pred(i, j, a[i * n + j], a[j * n + i]) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn selection_is_zero(&self, which: Selection) -> Result<bool> {
        validate_square_matrix(self.rows(), self.cols())?;
        Ok(self.iter_elements(which).all(|x| x == 0.0))
    }

    /// `A == Aᵀ`
    pub fn is_symmetric(&self) -> Result<bool> {
        self.all_pairs(|_, _, x, y| x == y)
    }

    /// `A == -Aᵀ`
    pub fn is_antisymmetric(&self) -> Result<bool> {
        self.all_pairs(|_, _, x, y| x == -y)
    }

    /// Every off-diagonal element is zero
    pub fn is_diagonal(&self) -> Result<bool> {
        self.selection_is_zero(Selection::OffDiagonal)
    }

    /// Every element above the diagonal is zero
    pub fn is_lower_triangular(&self) -> Result<bool> {
        self.selection_is_zero(Selection::StrictUpper)
    }

    /// Every element below the diagonal is zero
    pub fn is_upper_triangular(&self) -> Result<bool> {
        self.selection_is_zero(Selection::StrictLower)
    }

    /// Diagonal with every diagonal element equal to one
    pub fn is_identity(&self) -> Result<bool> {
        self.all_pairs(|i, j, x, _| if i == j { x == 1.0 } else { x == 0.0 })
    }

    /// Exactly one `1` in every row and column, zeros elsewhere
    pub fn is_permutation(&self) -> Result<bool> {
        let n = validate_square_matrix(self.rows(), self.cols())?;
        let mut seen_in_col = vec![false; n];
        for row in self.iter_rows() {
            let mut seen_in_row = false;
            for (j, &x) in row.iter().enumerate() {
                if x == 1.0 {
                    if seen_in_row || seen_in_col[j] {
                        return Ok(false);
                    }
                    seen_in_row = true;
                    seen_in_col[j] = true;
                } else if x != 0.0 {
                    return Ok(false);
                }
            }
            if !seen_in_row {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `A * Aᵀ` is exactly the identity
    pub fn is_orthogonal(&self) -> Result<bool> {
        validate_square_matrix(self.rows(), self.cols())?;
        self.matmul(&self.transpose())?.is_identity()
    }
}
