//! Owned dense vector and vector-space algebra

mod algebra;
mod core;

pub use self::core::Vector;
