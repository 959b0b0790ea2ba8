//! Common test utilities
#![allow(dead_code)]

use fastmat::{Matrix, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator so failures reproduce
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `rows × cols` matrix of small integers in `-range..=range`
///
/// Integer-valued entries keep sums and products exact, so different
/// evaluation orders can be compared with `==`.
pub fn random_int_matrix(rng: &mut StdRng, rows: usize, cols: usize, range: i32) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| f64::from(rng.random_range(-range..=range)))
        .expect("non-empty shape")
}

/// Vector of small integers in `-range..=range`
pub fn random_int_vector(rng: &mut StdRng, n: usize, range: i32) -> Vector {
    let data = (0..n)
        .map(|_| f64::from(rng.random_range(-range..=range)))
        .collect();
    Vector::from_vec(data).expect("non-empty vector")
}

/// Build a matrix from row literals
pub fn mat(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(rows).expect("valid rows")
}

/// Build a vector from a literal
pub fn vec_of(data: &[f64]) -> Vector {
    Vector::from_slice(data).expect("non-empty vector")
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert a square matrix is the identity within `tol`
pub fn assert_near_identity(m: &Matrix, tol: f64, msg: &str) {
    let n = m.rows();
    assert_eq!(m.cols(), n, "{}: not square", msg);
    for i in 0..n {
        for j in 0..n {
            let expected = if i == j { 1.0 } else { 0.0 };
            let actual = m.as_slice()[i * n + j];
            let diff = (actual - expected).abs();
            assert!(
                diff <= tol,
                "{}: element [{},{}] differs: {} vs {} (diff={})",
                msg,
                i,
                j,
                actual,
                expected,
                diff
            );
        }
    }
}
