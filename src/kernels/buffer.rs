//! Dense buffer kernels (fill, scale, elementwise arithmetic, compare, round)
//!
//! All kernels work on flat `f64` slices of equal length. Output buffers are
//! always explicit parameters; nothing here allocates or fails. Callers are
//! responsible for passing slices of matching length (kernels iterate over
//! the output length and index the inputs with it).

/// Fill buffer with a constant value
#[inline]
pub fn fill(out: &mut [f64], value: f64) {
    out.fill(value);
}

/// Multiply every element by `value` in place
#[inline]
pub fn scale(a: &mut [f64], value: f64) {
    for x in a.iter_mut() {
        *x *= value;
    }
}

/// out[i] = a[i] * value
#[inline]
pub fn scale_into(a: &[f64], value: f64, out: &mut [f64]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = x * value;
    }
}

/// out[i] = a[i] * b[i]
#[inline]
pub fn mul_into(a: &[f64], b: &[f64], out: &mut [f64]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x * y;
    }
}

/// out[i] = a[i] + b[i]
#[inline]
pub fn add_into(a: &[f64], b: &[f64], out: &mut [f64]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x + y;
    }
}

/// a[i] += b[i]
#[inline]
pub fn add_assign(a: &mut [f64], b: &[f64]) {
    for (x, &y) in a.iter_mut().zip(b) {
        *x += y;
    }
}

/// out[i] = a[i] - b[i]
#[inline]
pub fn sub_into(a: &[f64], b: &[f64], out: &mut [f64]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = x - y;
    }
}

/// a[i] -= b[i]
#[inline]
pub fn sub_assign(a: &mut [f64], b: &[f64]) {
    for (x, &y) in a.iter_mut().zip(b) {
        *x -= y;
    }
}

/// Bit-exact elementwise equality, no tolerance (NaN never equals NaN)
#[inline]
pub fn equal(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// out[i] = |a[i]|
#[inline]
pub fn abs_into(a: &[f64], out: &mut [f64]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = x.abs();
    }
}

/// True iff a[i] >= b[i] for every position
#[inline]
pub fn all_ge(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x >= y)
}

/// True iff a[i] > b[i] for every position
#[inline]
pub fn all_gt(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x > y)
}

/// True iff a[i] <= b[i] for every position
#[inline]
pub fn all_le(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x <= y)
}

/// True iff a[i] < b[i] for every position
#[inline]
pub fn all_lt(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x < y)
}

/// True iff every element is exactly zero
#[inline]
pub fn is_zero(a: &[f64]) -> bool {
    a.iter().all(|&x| x == 0.0)
}

/// Swap the contents of two equal-length ranges
#[inline]
pub fn swap(a: &mut [f64], b: &mut [f64]) {
    a.swap_with_slice(b);
}

/// Swap the tails of two rows of a row-major buffer, starting at `from_col`
///
/// `r1` and `r2` must differ.
#[inline]
pub fn swap_row_tails(buf: &mut [f64], width: usize, r1: usize, r2: usize, from_col: usize) {
    let (lo, hi) = if r1 < r2 { (r1, r2) } else { (r2, r1) };
    let (head, tail) = buf.split_at_mut(hi * width);
    swap(
        &mut head[lo * width + from_col..(lo + 1) * width],
        &mut tail[from_col..width],
    );
}

/// Round to `digits` decimal places: out[i] = roundf(a[i] * 10^d) / 10^d
///
/// The scaled value goes through single precision before rounding half away
/// from zero, then is promoted back to double.
#[inline]
pub fn round_into(a: &[f64], digits: i32, out: &mut [f64]) {
    let scale = 10f64.powi(digits);
    for (o, &x) in out.iter_mut().zip(a) {
        *o = f64::from(((x * scale) as f32).round()) / scale;
    }
}
