//! Matrix multiplication kernels
//!
//! Two engines over row-major buffers:
//! - [`matmul_naive`]: triple loop, skips zero scalars of `A`
//! - [`matmul_strassen`]: size-gated recursive Strassen with odd-dimension
//!   padding, falling back to the naive loop below the gate
//!
//! Dimension naming follows `C (m × n) = A (m × k) @ B (k × n)`.

/// Configuration for the Strassen gate
#[derive(Debug, Clone, PartialEq)]
pub struct MatmulOptions {
    /// Recursion only happens when `m * n * k` is strictly greater than this
    /// (default: 1_000_000)
    pub strassen_threshold: f64,

    /// Every dimension must be at least this large to recurse (default: 3)
    pub strassen_min_dim: usize,
}

impl Default for MatmulOptions {
    fn default() -> Self {
        Self {
            strassen_threshold: 1_000_000.0,
            strassen_min_dim: 3,
        }
    }
}

impl MatmulOptions {
    /// Options that never take the recursive path
    pub fn naive() -> Self {
        Self {
            strassen_threshold: f64::INFINITY,
            ..Default::default()
        }
    }

    /// Options that recurse whenever every dimension reaches `min_dim`
    pub fn always_strassen(min_dim: usize) -> Self {
        Self {
            strassen_threshold: 0.0,
            strassen_min_dim: min_dim,
        }
    }

    /// Gate deciding whether `(m, k, n)` recurses or uses the naive loop
    #[inline]
    pub fn use_strassen(&self, m: usize, k: usize, n: usize) -> bool {
        m >= self.strassen_min_dim
            && n >= self.strassen_min_dim
            && k >= self.strassen_min_dim
            && (m as f64) * (n as f64) * (k as f64) > self.strassen_threshold
    }
}

/// Naive matrix multiplication: C = A @ B
///
/// `out` is zero-initialized first. Rows of `B` are skipped whenever the `A`
/// scalar is exactly zero, so `0 * NaN` from `B` never reaches `C`.
#[inline]
pub fn matmul_naive(a: &[f64], b: &[f64], out: &mut [f64], m: usize, k: usize, n: usize) {
    out[..m * n].fill(0.0);

    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        let c_row = &mut out[i * n..(i + 1) * n];
        for (kk, &a_val) in a_row.iter().enumerate() {
            if a_val != 0.0 {
                let b_row = &b[kk * n..(kk + 1) * n];
                for (c, &b_val) in c_row.iter_mut().zip(b_row) {
                    *c += a_val * b_val;
                }
            }
        }
    }
}

/// Matrix-vector product: out[i] = sum_j M[i, j] * v[j]
#[inline]
pub fn matvec(m_data: &[f64], v: &[f64], out: &mut [f64], rows: usize, cols: usize) {
    for (i, o) in out[..rows].iter_mut().enumerate() {
        let row = &m_data[i * cols..(i + 1) * cols];
        let mut sum = 0.0;
        for (&x, &y) in v.iter().zip(row) {
            sum += y * x;
        }
        *o = sum;
    }
}

/// Outer product of a column `v` (length `rows`) and a row `w` (length `cols`)
#[inline]
pub fn outer(v: &[f64], w: &[f64], out: &mut [f64], rows: usize, cols: usize) {
    for (j, &v_val) in v[..rows].iter().enumerate() {
        let row = &mut out[j * cols..(j + 1) * cols];
        for (o, &w_val) in row.iter_mut().zip(w) {
            *o = v_val * w_val;
        }
    }
}

/// Transpose a `rows × cols` buffer into a `cols × rows` buffer
#[inline]
pub fn transpose(a: &[f64], out: &mut [f64], rows: usize, cols: usize) {
    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = a[i * cols + j];
        }
    }
}

/// Split a dimension into halves; the first half absorbs the odd remainder
#[inline]
fn halves(d: usize) -> (usize, usize) {
    let d2 = d / 2;
    (d - d2, d2)
}

/// Total scratch length needed by [`matmul_strassen`] for `(m, k, n)`
///
/// Each recursion level needs `termA (m1 × k1)`, `termB (k1 × n1)` and seven
/// `m1 × n1` products; the seven sub-products run one after another so a
/// single region per depth is enough.
pub fn strassen_scratch_len(m: usize, k: usize, n: usize, opts: &MatmulOptions) -> usize {
    if !opts.use_strassen(m, k, n) {
        return 0;
    }
    let (m1, _) = halves(m);
    let (k1, _) = halves(k);
    let (n1, _) = halves(n);
    m1 * k1 + k1 * n1 + 7 * m1 * n1 + strassen_scratch_len(m1, k1, n1, opts)
}

/// Strassen-gated matrix multiplication: C = A @ B
///
/// Allocates one scratch arena sized by [`strassen_scratch_len`] and recurses
/// through it. Below the gate this is exactly [`matmul_naive`].
pub fn matmul_strassen(
    a: &[f64],
    b: &[f64],
    out: &mut [f64],
    m: usize,
    k: usize,
    n: usize,
    opts: &MatmulOptions,
) {
    let mut scratch = vec![0.0; strassen_scratch_len(m, k, n, opts)];
    strassen_recursive(a, b, out, m, k, n, &mut scratch, opts);
}

/// dst[r, c] = src[r, c] for a `rows × cols` block
#[inline]
fn copy_block(
    src: &[f64],
    src_stride: usize,
    dst: &mut [f64],
    dst_stride: usize,
    rows: usize,
    cols: usize,
) {
    for r in 0..rows {
        dst[r * dst_stride..r * dst_stride + cols]
            .copy_from_slice(&src[r * src_stride..r * src_stride + cols]);
    }
}

/// Like [`copy_block`] but optionally appends one zero column (`right`) and
/// one zero row (`down`), growing the block to the padded quadrant size
#[allow(clippy::too_many_arguments)]
#[inline]
fn copy_block_padded(
    src: &[f64],
    src_stride: usize,
    dst: &mut [f64],
    dst_stride: usize,
    rows: usize,
    cols: usize,
    right: bool,
    down: bool,
) {
    for r in 0..rows {
        let row = &mut dst[r * dst_stride..];
        row[..cols].copy_from_slice(&src[r * src_stride..r * src_stride + cols]);
        if right {
            row[cols] = 0.0;
        }
    }
    if down {
        let width = if right { cols + 1 } else { cols };
        dst[rows * dst_stride..rows * dst_stride + width].fill(0.0);
    }
}

/// dst[r, c] += src[r, c] for a `rows × cols` block
#[inline]
fn add_block(
    dst: &mut [f64],
    dst_stride: usize,
    src: &[f64],
    src_stride: usize,
    rows: usize,
    cols: usize,
) {
    for r in 0..rows {
        let d = &mut dst[r * dst_stride..r * dst_stride + cols];
        let s = &src[r * src_stride..r * src_stride + cols];
        for (x, &y) in d.iter_mut().zip(s) {
            *x += y;
        }
    }
}

/// dst[r, c] -= src[r, c] for a `rows × cols` block
#[inline]
fn sub_block(
    dst: &mut [f64],
    dst_stride: usize,
    src: &[f64],
    src_stride: usize,
    rows: usize,
    cols: usize,
) {
    for r in 0..rows {
        let d = &mut dst[r * dst_stride..r * dst_stride + cols];
        let s = &src[r * src_stride..r * src_stride + cols];
        for (x, &y) in d.iter_mut().zip(s) {
            *x -= y;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn strassen_recursive(
    a: &[f64],
    b: &[f64],
    out: &mut [f64],
    m: usize,
    k: usize,
    n: usize,
    scratch: &mut [f64],
    opts: &MatmulOptions,
) {
    if !opts.use_strassen(m, k, n) {
        matmul_naive(a, b, out, m, k, n);
        return;
    }

    let (m1, m2) = halves(m);
    let (k1, k2) = halves(k);
    let (n1, n2) = halves(n);
    let (pad_m, pad_k, pad_n) = (m1 != m2, k1 != k2, n1 != n2);

    let (ta, rest) = scratch.split_at_mut(m1 * k1);
    let (tb, rest) = rest.split_at_mut(k1 * n1);
    let plen = m1 * n1;
    let (products, rest) = rest.split_at_mut(7 * plen);
    products.fill(0.0);

    // Quadrant offsets
    let a12 = k1;
    let a21 = k * m1;
    let a22 = k1 + k * m1;
    let b12 = n1;
    let b21 = n * k1;
    let b22 = n1 + n * k1;

    // P1 = (A11 + A22)(B11 + B22)
    copy_block(a, k, ta, k1, m1, k1);
    add_block(ta, k1, &a[a22..], k, m2, k2);
    copy_block(b, n, tb, n1, k1, n1);
    add_block(tb, n1, &b[b22..], n, k2, n2);
    strassen_recursive(ta, tb, &mut products[0..plen], m1, k1, n1, rest, opts);

    // P2 = (A21 + A22) B11
    copy_block_padded(&a[a21..], k, ta, k1, m2, k1, false, pad_m);
    add_block(ta, k1, &a[a22..], k, m2, k2);
    copy_block(b, n, tb, n1, k1, n1);
    strassen_recursive(ta, tb, &mut products[plen..2 * plen], m1, k1, n1, rest, opts);

    // P3 = A11 (B12 - B22)
    copy_block(a, k, ta, k1, m1, k1);
    copy_block_padded(&b[b12..], n, tb, n1, k1, n2, pad_n, false);
    sub_block(tb, n1, &b[b22..], n, k2, n2);
    strassen_recursive(ta, tb, &mut products[2 * plen..3 * plen], m1, k1, n1, rest, opts);

    // P4 = A22 (B21 - B11)
    copy_block_padded(&a[a22..], k, ta, k1, m2, k2, pad_k, pad_m);
    copy_block_padded(&b[b21..], n, tb, n1, k2, n1, false, pad_k);
    sub_block(tb, n1, b, n, k1, n1);
    strassen_recursive(ta, tb, &mut products[3 * plen..4 * plen], m1, k1, n1, rest, opts);

    // P5 = (A11 + A12) B22
    copy_block(a, k, ta, k1, m1, k1);
    add_block(ta, k1, &a[a12..], k, m1, k2);
    copy_block_padded(&b[b22..], n, tb, n1, k2, n2, pad_n, pad_k);
    strassen_recursive(ta, tb, &mut products[4 * plen..5 * plen], m1, k1, n1, rest, opts);

    // P6 = (A21 - A11)(B11 + B12)
    copy_block_padded(&a[a21..], k, ta, k1, m2, k1, false, pad_m);
    sub_block(ta, k1, a, k, m1, k1);
    copy_block(b, n, tb, n1, k1, n1);
    add_block(tb, n1, &b[b12..], n, k1, n2);
    strassen_recursive(ta, tb, &mut products[5 * plen..6 * plen], m1, k1, n1, rest, opts);

    // P7 = (A12 - A22)(B21 + B22)
    copy_block_padded(&a[a12..], k, ta, k1, m1, k2, pad_k, false);
    sub_block(ta, k1, &a[a22..], k, m2, k2);
    copy_block_padded(&b[b21..], n, tb, n1, k2, n1, false, pad_k);
    add_block(tb, n1, &b[b22..], n, k2, n2);
    strassen_recursive(ta, tb, &mut products[6 * plen..7 * plen], m1, k1, n1, rest, opts);

    let p = |i: usize| &products[i * plen..(i + 1) * plen];

    // C11 = P1 + P4 - P5 + P7
    copy_block(p(0), n1, out, n, m1, n1);
    add_block(out, n, p(3), n1, m1, n1);
    sub_block(out, n, p(4), n1, m1, n1);
    add_block(out, n, p(6), n1, m1, n1);

    // C12 = P3 + P5
    let c12 = &mut out[n1..];
    copy_block(p(2), n1, c12, n, m1, n2);
    add_block(c12, n, p(4), n1, m1, n2);

    // C21 = P2 + P4
    let c21 = &mut out[n * m1..];
    copy_block(p(1), n1, c21, n, m2, n1);
    add_block(c21, n, p(3), n1, m2, n1);

    // C22 = P1 - P2 + P3 + P6
    let c22 = &mut out[n1 + n * m1..];
    copy_block(p(0), n1, c22, n, m2, n2);
    sub_block(c22, n, p(1), n1, m2, n2);
    add_block(c22, n, p(2), n1, m2, n2);
    add_block(c22, n, p(5), n1, m2, n2);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(len: usize, f: impl Fn(usize) -> f64) -> Vec<f64> {
        (0..len).map(f).collect()
    }

    #[test]
    fn test_naive_2x3_3x2() {
        // A = [[1, 2, 3], [4, 5, 6]], B = [[7, 8], [9, 10], [11, 12]]
        // C = [[58, 64], [139, 154]]
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [f64::NAN; 4];
        matmul_naive(&a, &b, &mut c, 2, 3, 2);
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_naive_skips_zero_scalars() {
        // A row of zeros must not pick up the NaN in B
        let a = [0.0, 1.0, 0.0, 0.0];
        let b = [f64::NAN, 1.0, 2.0, 3.0];
        let mut c = [0.0; 4];
        matmul_naive(&a, &b, &mut c, 2, 2, 2);
        assert_eq!(c[0], 2.0);
        assert_eq!(c[1], 3.0);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 0.0);
    }

    #[test]
    fn test_gate_defaults() {
        let opts = MatmulOptions::default();
        assert!(!opts.use_strassen(100, 100, 100));
        assert!(opts.use_strassen(101, 100, 100));
        assert!(!opts.use_strassen(2, 1_000_000, 1_000_000));
        assert!(!MatmulOptions::naive().use_strassen(4096, 4096, 4096));
    }

    #[test]
    fn test_scratch_len_below_gate_is_zero() {
        let opts = MatmulOptions::default();
        assert_eq!(strassen_scratch_len(10, 10, 10, &opts), 0);

        let opts = MatmulOptions::always_strassen(3);
        // 5x5x5: m1 = k1 = n1 = 3 -> 9 + 9 + 63, then 3x3x3 -> 2 halves stop
        assert_eq!(strassen_scratch_len(5, 5, 5, &opts), 81 + 4 + 4 + 28);
    }

    #[test]
    fn test_strassen_matches_naive_on_odd_shapes() {
        let opts = MatmulOptions::always_strassen(3);
        for &(m, k, n) in &[(3, 3, 3), (5, 5, 5), (7, 3, 5), (4, 6, 8), (9, 7, 3), (16, 16, 16)] {
            let a = seq(m * k, |i| ((i * 7 + 3) % 11) as f64 - 5.0);
            let b = seq(k * n, |i| ((i * 5 + 1) % 13) as f64 - 6.0);

            let mut naive = vec![0.0; m * n];
            let mut fast = vec![f64::NAN; m * n];
            matmul_naive(&a, &b, &mut naive, m, k, n);
            matmul_strassen(&a, &b, &mut fast, m, k, n, &opts);

            assert_eq!(naive, fast, "shape {m}x{k}x{n}");
        }
    }

    #[test]
    fn test_matvec_and_outer() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut out = [0.0; 2];
        matvec(&m, &[1.0, 0.0, -1.0], &mut out, 2, 3);
        assert_eq!(out, [-2.0, -2.0]);

        let mut outer_out = [0.0; 6];
        outer(&[1.0, 2.0], &[3.0, 4.0, 5.0], &mut outer_out, 2, 3);
        assert_eq!(outer_out, [3.0, 4.0, 5.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_transpose() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut t = [0.0; 6];
        transpose(&a, &mut t, 2, 3);
        assert_eq!(t, [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }
}
