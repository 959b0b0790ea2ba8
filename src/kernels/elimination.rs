//! Gaussian elimination kernels (rank, determinant, inverse, adjugate)
//!
//! Every kernel takes ownership of a scratch copy of its input and reduces it
//! in place. No magnitude-based selection happens here (see [`super::lup`]
//! for that). When a diagonal entry is zero, `rank` swaps in the first
//! non-zero row below it, while `determinant` and `inverse` swap with every
//! non-zero row below in turn, so the last one ends up as the pivot row.

use super::buffer::swap_row_tails;

/// Find the first row `j >= from` whose entry in `col` is non-zero
#[inline]
fn find_nonzero_pivot(
    buf: &[f64],
    width: usize,
    from: usize,
    rows: usize,
    col: usize,
) -> Option<usize> {
    (from..rows).find(|&j| buf[j * width + col] != 0.0)
}

/// Swap row `row` with each later row whose entry in `col` is non-zero
///
/// Returns the number of swaps performed.
fn rotate_nonzero_rows(
    buf: &mut [f64],
    width: usize,
    row: usize,
    rows: usize,
    col: usize,
) -> usize {
    let mut swaps = 0;
    for j in row + 1..rows {
        if buf[j * width + col] != 0.0 {
            swap_row_tails(buf, width, row, j, col);
            swaps += 1;
        }
    }
    swaps
}

/// Row rank of a `rows × cols` buffer via fraction-free elimination
///
/// Rows below the pivot are combined as `val * target - mul * pivot_row`
/// rather than divided, so exact-integer inputs stay exact longer.
pub fn rank(buf: &mut [f64], rows: usize, cols: usize) -> usize {
    let mut i = 0;
    let mut c = 0;
    while i < rows && c < cols {
        if buf[i * cols + c] == 0.0 {
            match find_nonzero_pivot(buf, cols, i + 1, rows, c) {
                Some(j) => swap_row_tails(buf, cols, i, j, c),
                None => {
                    c += 1;
                    continue;
                }
            }
        }

        let val = buf[i * cols + c];
        let (head, tail) = buf.split_at_mut((i + 1) * cols);
        let line = &head[i * cols + c..(i + 1) * cols];
        for target in tail.chunks_exact_mut(cols) {
            let target = &mut target[c..];
            let mul = target[0];
            if mul == 0.0 {
                continue;
            }
            for (t, &l) in target.iter_mut().zip(line).skip(1) {
                *t = val * *t - mul * l;
            }
        }

        c += 1;
        i += 1;
    }
    i
}

/// Determinant of an `n × n` buffer by division-based elimination
///
/// Each row swap flips the sign. Returns exactly 0 as soon as a column has no
/// non-zero pivot at or below the diagonal. An empty matrix has determinant 1.
pub fn determinant(buf: &mut [f64], n: usize) -> f64 {
    let mut det = 1.0;
    for i in 0..n {
        if buf[i * n + i] == 0.0 {
            if rotate_nonzero_rows(buf, n, i, n, i) % 2 == 1 {
                det = -det;
            }
            if buf[i * n + i] == 0.0 {
                return 0.0;
            }
        }

        let cur = buf[i * n + i];
        det *= cur;

        let (head, tail) = buf.split_at_mut((i + 1) * n);
        let line = &head[i * n + i..(i + 1) * n];
        for row in tail.chunks_exact_mut(n) {
            let row = &mut row[i..];
            let head_val = row[0];
            for (r, &l) in row.iter_mut().zip(line).skip(1) {
                *r -= (l * head_val) / cur;
            }
        }
    }
    det
}

/// Inverse of an `n × n` matrix by Gauss-Jordan elimination on `[A | I]`
///
/// Writes the inverse into `out` and returns `true`, or returns `false`
/// (leaving `out` unspecified) when a column has no non-zero pivot.
pub fn inverse(a: &[f64], out: &mut [f64], n: usize) -> bool {
    let width = 2 * n;
    let mut aug = vec![0.0; n * width];
    for i in 0..n {
        aug[i * width..i * width + n].copy_from_slice(&a[i * n..(i + 1) * n]);
        aug[i * width + n + i] = 1.0;
    }

    for i in 0..n {
        if aug[i * width + i] == 0.0 {
            rotate_nonzero_rows(&mut aug, width, i, n, i);
            if aug[i * width + i] == 0.0 {
                return false;
            }
        }

        let cur = aug[i * width + i];
        let line: Vec<f64> = aug[i * width + i..(i + 1) * width].to_vec();
        for j in (0..n).filter(|&j| j != i) {
            let row = &mut aug[j * width + i..(j + 1) * width];
            let head_val = row[0];
            if head_val == 0.0 {
                continue;
            }
            for (r, &l) in row.iter_mut().zip(&line).skip(1) {
                *r -= (l * head_val) / cur;
            }
        }

        for x in &mut aug[i * width + i + 1..(i + 1) * width] {
            *x /= cur;
        }
    }

    for i in 0..n {
        out[i * n..(i + 1) * n].copy_from_slice(&aug[i * width + n..(i + 1) * width]);
    }
    true
}

/// Adjugate of an `n × n` matrix as `inverse * determinant`
///
/// Fails exactly when [`inverse`] fails.
pub fn adjugate(a: &[f64], out: &mut [f64], n: usize) -> bool {
    if !inverse(a, out, n) {
        return false;
    }
    let mut scratch = a[..n * n].to_vec();
    let det = determinant(&mut scratch, n);
    for x in &mut out[..n * n] {
        *x *= det;
    }
    true
}

/// Generalized cross product of `n - 1` vectors in `n` dimensions
///
/// `coords` holds the vectors column-wise as an `n × (n - 1)` buffer
/// (`coords[j * k + i]` is coordinate `j` of vector `i`). Entry `i` of the
/// result is the signed minor obtained by deleting row `i`.
pub fn cross_product(coords: &[f64], out: &mut [f64], n: usize) {
    let k = n - 1;
    let mut minor = coords[k..k + k * k].to_vec();
    let mut scratch = vec![0.0; k * k];
    let mut sign = if k % 2 == 0 { 1.0 } else { -1.0 };

    for (i, o) in out[..n].iter_mut().enumerate() {
        scratch.copy_from_slice(&minor);
        *o = determinant(&mut scratch, k) * sign;
        sign = -sign;
        if i + 1 == n {
            break;
        }
        // Swap row i of the minor back in, dropping row i + 1 instead
        minor[i * k..(i + 1) * k].copy_from_slice(&coords[i * k..(i + 1) * k]);
    }
}
