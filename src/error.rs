//! Error types for fastmat

use thiserror::Error;

/// Result type alias using fastmat's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fastmat operations
///
/// Every variant is a logical precondition violation detected before any
/// numeric work starts (or, for [`Error::Singular`], when elimination runs
/// out of usable pivots). Nothing here is transient and nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Operand dimensions are incompatible
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Operation requires a square matrix
    #[error("Expected square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Row count of the offending matrix
        rows: usize,
        /// Column count of the offending matrix
        cols: usize,
    },

    /// Elimination or factorization found no usable pivot
    #[error("Matrix is singular: '{op}' requires an invertible matrix")]
    Singular {
        /// The operation that needed an invertible matrix
        op: &'static str,
    },

    /// Index out of bounds after negative-index normalization
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index, as given by the caller
        index: isize,
        /// Size of the dimension
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// In-place mutation attempted on a frozen entity
    #[error("Can't modify frozen {entity}")]
    Frozen {
        /// Kind of entity ("matrix" or "vector")
        entity: &'static str,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a not-square error
    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::NotSquare { rows, cols }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: isize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::shape_mismatch(&[2, 3], &[3, 2]).to_string(),
            "Shape mismatch: expected [2, 3], got [3, 2]"
        );
        assert_eq!(
            Error::not_square(2, 3).to_string(),
            "Expected square matrix, got 2x3"
        );
        assert_eq!(
            Error::index_out_of_bounds(-4, 3).to_string(),
            "Index -4 out of bounds for dimension of size 3"
        );
        assert_eq!(
            Error::Frozen { entity: "matrix" }.to_string(),
            "Can't modify frozen matrix"
        );
    }

    #[test]
    fn test_invalid_argument_accepts_owned_and_borrowed() {
        let a = Error::invalid_argument("rows", "must be positive");
        let b = Error::invalid_argument("rows", String::from("must be positive"));
        assert_eq!(a, b);
    }
}
