//! Raw-buffer numeric kernels
//!
//! Everything here operates on row-major `f64` slices plus explicit
//! dimensions: element `(row, col)` of a `rows × cols` buffer lives at
//! `col + cols * row`. Kernels do not validate shapes, do not fail, and do
//! not log; the owned [`Matrix`](crate::Matrix) and
//! [`Vector`](crate::Vector) types check preconditions before calling in.
//!
//! - [`buffer`]: fill, scale, elementwise arithmetic, comparison, rounding
//! - [`matmul`]: naive and Strassen-gated multiplication
//! - [`elimination`]: rank, determinant, inverse, adjugate, cross product
//! - [`lup`]: LUP factorization and its consumers

pub mod buffer;
pub mod elimination;
pub mod lup;
pub mod matmul;

pub use matmul::MatmulOptions;
