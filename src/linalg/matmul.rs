//! Matrix product dispatch over the multiply kernels

use super::helpers::validate_matmul_shapes;
use crate::error::Result;
use crate::kernels::{MatmulOptions, matmul};
use crate::matrix::Matrix;

/// `a @ b`, routed through the Strassen gate described by `opts`
pub fn matmul_impl(a: &Matrix, b: &Matrix, opts: &MatmulOptions) -> Result<Matrix> {
    let (m, k, n) = validate_matmul_shapes(a.shape(), b.shape())?;
    let mut out = vec![0.0; m * n];

    if opts.use_strassen(m, k, n) {
        log::trace!(
            target: "fastmat_perf",
            "matmul {m}x{k}x{n}: strassen, scratch {} elements",
            matmul::strassen_scratch_len(m, k, n, opts)
        );
        matmul::matmul_strassen(a.as_slice(), b.as_slice(), &mut out, m, k, n, opts);
    } else {
        log::trace!(target: "fastmat_perf", "matmul {m}x{k}x{n}: naive");
        matmul::matmul_naive(a.as_slice(), b.as_slice(), &mut out, m, k, n);
    }

    Ok(Matrix::from_raw(m, n, out))
}
