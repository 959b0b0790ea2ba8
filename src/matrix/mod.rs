//! Owned dense matrix
//!
//! Construction, element access and host exchange live in `core`;
//! elementwise arithmetic and products in `arithmetic`; structural checks
//! in `predicates`. Elimination-based quantities (rank, determinant,
//! inverse, power, LUP) are implemented in [`crate::linalg`].

mod arithmetic;
mod core;
mod predicates;

pub use self::core::{Matrix, Selection};
