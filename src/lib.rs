//! # fastmat
//!
//! **Dense `f64` matrices and vectors with exact-pivot elimination and
//! Strassen multiplication.**
//!
//! fastmat is a small numeric kernel: row-major matrices and vectors of
//! doubles, a size-gated Strassen multiply, Gauss-elimination rank,
//! determinant, inverse and adjugate, integer matrix powers, an LUP
//! factorization with solve, and vector-space operations including the
//! generalized n-dimensional cross product.
//!
//! ## Layers
//!
//! - [`kernels`]: raw-buffer routines; no validation, no allocation of owned
//!   types, no failure
//! - [`Matrix`], [`Vector`], [`LupDecomposition`]: owned types that check
//!   preconditions and return [`Result`]
//!
//! ## Quick Start
//!
//! ```rust
//! use fastmat::prelude::*;
//!
//! let a = Matrix::from_rows(&[&[4.0, 3.0], &[6.0, 3.0]])?;
//! assert_eq!(a.determinant()?, -6.0);
//!
//! let b = Matrix::from_rows(&[&[1.0, 2.0], &[4.0, 3.0]])?;
//! let (l, u, p) = b.lup()?.to_parts();
//! assert_eq!(p.matmul(&b)?, l.matmul(&u)?);
//!
//! let x = Vector::from_slice(&[1.0, 0.0, 0.0])?;
//! let y = Vector::from_slice(&[0.0, 1.0, 0.0])?;
//! assert_eq!(Vector::cross_product(&[&x, &y])?, Vector::from_slice(&[0.0, 0.0, 1.0])?);
//! # Ok::<(), fastmat::Error>(())
//! ```
//!
//! ## Logging
//!
//! The owned layer reports multiply dispatch at `trace` level (target
//! `fastmat_perf`) and singular eliminations at `debug` level through the
//! [`log`](https://docs.rs/log) facade. Kernels never log.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod kernels;
pub mod linalg;
pub mod matrix;
pub mod vector;

pub use error::{Error, Result};
pub use kernels::MatmulOptions;
pub use linalg::LupDecomposition;
pub use matrix::{Matrix, Selection};
pub use vector::Vector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::kernels::MatmulOptions;
    pub use crate::linalg::LupDecomposition;
    pub use crate::matrix::{Matrix, Selection};
    pub use crate::vector::Vector;
}
