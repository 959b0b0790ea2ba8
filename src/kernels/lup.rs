//! LUP factorization kernels
//!
//! The combined buffer packs `U` in the upper triangle (diagonal included)
//! and the multipliers of `L` in the strict lower triangle. `L` has an
//! implicit unit diagonal.

/// Outcome of [`factor`] besides the buffer itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorInfo {
    /// `(-1)^(number of row swaps)`
    pub pivot_sign: f64,
    /// True iff some diagonal pivot of `U` is exactly zero
    pub singular: bool,
}

/// Factor an `n × n` buffer in place with maximum-magnitude partial pivoting
///
/// `perm` receives the permutation: `perm[i]` is the original row now at
/// factored row `i`. Among rows with equal magnitude the first one wins. A
/// column with no non-zero candidate marks the factorization singular and is
/// skipped; elimination continues on the remaining columns.
pub fn factor(lu: &mut [f64], perm: &mut [usize], n: usize) -> FactorInfo {
    for (i, p) in perm[..n].iter_mut().enumerate() {
        *p = i;
    }

    let mut info = FactorInfo {
        pivot_sign: 1.0,
        singular: false,
    };

    for col in 0..n {
        let mut pivot_row = col;
        let mut max_val = lu[col * n + col].abs();
        for row in (col + 1)..n {
            let val = lu[row * n + col].abs();
            if val > max_val {
                max_val = val;
                pivot_row = row;
            }
        }

        if max_val == 0.0 {
            info.singular = true;
            continue;
        }

        if pivot_row != col {
            let (head, tail) = lu.split_at_mut(pivot_row * n);
            head[col * n..(col + 1) * n].swap_with_slice(&mut tail[..n]);
            perm.swap(col, pivot_row);
            info.pivot_sign = -info.pivot_sign;
        }

        let pivot = lu[col * n + col];
        let (head, tail) = lu.split_at_mut((col + 1) * n);
        let pivot_line = &head[col * n..];
        for row in tail.chunks_exact_mut(n) {
            let multiplier = row[col] / pivot;
            row[col] = multiplier;
            if multiplier == 0.0 {
                continue;
            }
            for (r, &u) in row[col + 1..].iter_mut().zip(&pivot_line[col + 1..]) {
                *r -= multiplier * u;
            }
        }
    }

    info
}

/// Unit lower-triangular factor `L`
pub fn extract_l(lu: &[f64], out: &mut [f64], n: usize) {
    for i in 0..n {
        for j in 0..n {
            out[i * n + j] = match i.cmp(&j) {
                std::cmp::Ordering::Less => 0.0,
                std::cmp::Ordering::Equal => 1.0,
                std::cmp::Ordering::Greater => lu[i * n + j],
            };
        }
    }
}

/// Upper-triangular factor `U`
pub fn extract_u(lu: &[f64], out: &mut [f64], n: usize) {
    for i in 0..n {
        for j in 0..n {
            out[i * n + j] = if i > j { 0.0 } else { lu[i * n + j] };
        }
    }
}

/// Permutation matrix `P` with `P[i][perm[i]] = 1`, so that `P * A = L * U`
pub fn extract_p(perm: &[usize], out: &mut [f64], n: usize) {
    out[..n * n].fill(0.0);
    for (i, &p) in perm[..n].iter().enumerate() {
        out[i * n + p] = 1.0;
    }
}

/// `pivot_sign * prod(U[i][i])`
pub fn determinant(lu: &[f64], n: usize, pivot_sign: f64) -> f64 {
    let mut det = pivot_sign;
    for i in 0..n {
        det *= lu[i * n + i];
    }
    det
}

/// Solve `A * X = B` for an `n × m` right-hand side
///
/// Gathers the rows of `B` by the permutation, then runs forward
/// substitution with unit-diagonal `L` and back substitution with `U`. The
/// factorization must not be singular.
pub fn solve(lu: &[f64], perm: &[usize], b: &[f64], out: &mut [f64], n: usize, m: usize) {
    for (i, &p) in perm[..n].iter().enumerate() {
        out[i * m..(i + 1) * m].copy_from_slice(&b[p * m..(p + 1) * m]);
    }

    // Forward: L * Y = P * B
    for i in 1..n {
        let (done, rest) = out.split_at_mut(i * m);
        let target = &mut rest[..m];
        for k in 0..i {
            let l = lu[i * n + k];
            if l == 0.0 {
                continue;
            }
            for (t, &y) in target.iter_mut().zip(&done[k * m..(k + 1) * m]) {
                *t -= l * y;
            }
        }
    }

    // Backward: U * X = Y
    for k in (0..n).rev() {
        let (above, rest) = out.split_at_mut(k * m);
        let line = &mut rest[..m];
        let diag = lu[k * n + k];
        for x in line.iter_mut() {
            *x /= diag;
        }
        for i in 0..k {
            let u = lu[i * n + k];
            for (t, &x) in above[i * m..(i + 1) * m].iter_mut().zip(line.iter()) {
                *t -= x * u;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_2x2() {
        let mut lu = [1.0, 2.0, 4.0, 3.0];
        let mut perm = [0; 2];
        let info = factor(&mut lu, &mut perm, 2);

        assert_eq!(perm, [1, 0]);
        assert_eq!(info.pivot_sign, -1.0);
        assert!(!info.singular);

        let mut l = [0.0; 4];
        let mut u = [0.0; 4];
        let mut p = [0.0; 4];
        extract_l(&lu, &mut l, 2);
        extract_u(&lu, &mut u, 2);
        extract_p(&perm, &mut p, 2);
        assert_eq!(l, [1.0, 0.0, 0.25, 1.0]);
        assert_eq!(u, [4.0, 3.0, 0.0, 1.25]);
        assert_eq!(p, [0.0, 1.0, 1.0, 0.0]);
        assert_eq!(determinant(&lu, 2, info.pivot_sign), -5.0);
    }

    #[test]
    fn test_factor_3x3_permutation() {
        let mut lu = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0];
        let mut perm = [0; 3];
        let info = factor(&mut lu, &mut perm, 3);
        assert_eq!(perm, [2, 0, 1]);
        assert!(!info.singular);
        assert!((determinant(&lu, 3, info.pivot_sign) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_factor_singular() {
        let mut lu = [1.0, 2.0, 3.0, 1.0, 2.0, 4.0, 2.0, 4.0, 5.0];
        let mut perm = [0; 3];
        let info = factor(&mut lu, &mut perm, 3);
        assert!(info.singular);
        assert_eq!(determinant(&lu, 3, info.pivot_sign), 0.0);
    }

    #[test]
    fn test_factor_zero_matrix() {
        let mut lu = [0.0; 4];
        let mut perm = [0; 2];
        let info = factor(&mut lu, &mut perm, 2);
        assert!(info.singular);
        assert_eq!(perm, [0, 1]);
        assert_eq!(info.pivot_sign, 1.0);
    }

    #[test]
    fn test_solve() {
        // [[2, 1], [1, 3]] x = [3, 5] -> x = [0.8, 1.4]
        let mut lu = [2.0, 1.0, 1.0, 3.0];
        let mut perm = [0; 2];
        factor(&mut lu, &mut perm, 2);

        let mut x = [0.0; 2];
        solve(&lu, &perm, &[3.0, 5.0], &mut x, 2, 1);
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_solve_multiple_rhs_with_pivoting() {
        // A = [[0, 1], [1, 0]], B = I -> X = A^-1 = A
        let mut lu = [0.0, 1.0, 1.0, 0.0];
        let mut perm = [0; 2];
        factor(&mut lu, &mut perm, 2);

        let mut x = [0.0; 4];
        solve(&lu, &perm, &[1.0, 0.0, 0.0, 1.0], &mut x, 2, 2);
        assert_eq!(x, [0.0, 1.0, 1.0, 0.0]);
    }
}
