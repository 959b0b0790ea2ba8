//! Vector-space operations: norms, inner/cross products, independence

use super::Vector;
use crate::error::{Error, Result};
use crate::kernels::elimination;

impl Vector {
    /// Euclidean norm
    pub fn magnitude(&self) -> f64 {
        self.as_slice().iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// `self / |self|`
    ///
    /// A zero vector yields non-finite elements; nothing guards against it.
    pub fn normalize(&self) -> Vector {
        let m = self.magnitude();
        Vector::from_raw(self.as_slice().iter().map(|x| x / m).collect())
    }

    /// Normalize in place
    pub fn normalize_in_place(&mut self) -> Result<()> {
        let m = self.magnitude();
        for x in self.as_mut_slice()? {
            *x /= m;
        }
        Ok(())
    }

    /// Dot product
    pub fn inner_product(&self, other: &Vector) -> Result<f64> {
        if self.len() != other.len() {
            return Err(Error::shape_mismatch(&[self.len()], &[other.len()]));
        }
        Ok(self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Angle in radians: `acos(<a, b> / (|a| * |b|))`
    pub fn angle_with(&self, other: &Vector) -> Result<f64> {
        let d = self.inner_product(other)?;
        Ok((d / (self.magnitude() * other.magnitude())).acos())
    }

    /// Generalized cross product of `n - 1` vectors of length `n`
    ///
    /// Each output coordinate is a signed `(n-1) × (n-1)` minor determinant.
    /// With no inputs the result is the one-dimensional `[1.0]`.
    ///
    /// # Example
    ///
    /// ```
    /// use fastmat::prelude::*;
    ///
    /// let x = Vector::from_slice(&[1.0, 0.0, 0.0])?;
    /// let y = Vector::from_slice(&[0.0, 1.0, 0.0])?;
    /// assert_eq!(Vector::cross_product(&[&x, &y])?.as_slice(), &[0.0, 0.0, 1.0]);
    /// # Ok::<(), fastmat::Error>(())
    /// ```
    pub fn cross_product(vectors: &[&Vector]) -> Result<Vector> {
        let k = vectors.len();
        let n = k + 1;
        for v in vectors {
            if v.len() != n {
                return Err(Error::shape_mismatch(&[n], &[v.len()]));
            }
        }

        let mut coords = vec![0.0; n * k];
        for (i, v) in vectors.iter().enumerate() {
            for (j, &x) in v.as_slice().iter().enumerate() {
                coords[j * k + i] = x;
            }
        }

        let mut out = vec![0.0; n];
        elimination::cross_product(&coords, &mut out, n);
        Ok(Vector::from_raw(out))
    }

    /// Whether the vectors are linearly independent (`rank == count`)
    ///
    /// An empty set is independent. Vectors of unequal length are rejected.
    pub fn independent(vectors: &[&Vector]) -> Result<bool> {
        let Some(first) = vectors.first() else {
            return Ok(true);
        };
        let n = first.len();
        let k = vectors.len();

        let mut rows = Vec::with_capacity(k * n);
        for v in vectors {
            if v.len() != n {
                return Err(Error::shape_mismatch(&[n], &[v.len()]));
            }
            rows.extend_from_slice(v.as_slice());
        }

        Ok(elimination::rank(&mut rows, k, n) == k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(data: &[f64]) -> Vector {
        Vector::from_slice(data).unwrap()
    }

    #[test]
    fn test_magnitude_and_normalize() {
        let mut a = v(&[3.0, 4.0]);
        assert_eq!(a.magnitude(), 5.0);
        assert_eq!(a.normalize(), v(&[0.6, 0.8]));
        a.normalize_in_place().unwrap();
        assert_eq!(a, v(&[0.6, 0.8]));

        a.freeze();
        assert!(a.normalize_in_place().is_err());
    }

    #[test]
    fn test_inner_product_and_angle() {
        let a = v(&[1.0, 0.0]);
        let b = v(&[0.0, 2.0]);
        assert_eq!(a.inner_product(&b).unwrap(), 0.0);
        assert!((a.angle_with(&b).unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(a.inner_product(&v(&[1.0])).is_err());
    }

    #[test]
    fn test_cross_product_shape_checks() {
        let a = v(&[1.0, 0.0, 0.0]);
        let b = v(&[0.0, 1.0]);
        assert!(Vector::cross_product(&[&a, &b]).is_err());
        assert!(Vector::cross_product(&[&a]).is_err());
        assert_eq!(Vector::cross_product(&[]).unwrap(), v(&[1.0]));
    }

    #[test]
    fn test_independent() {
        let e1 = v(&[1.0, 0.0]);
        let e2 = v(&[0.0, 1.0]);
        let twice = v(&[2.0, 0.0]);
        assert!(Vector::independent(&[&e1, &e2]).unwrap());
        assert!(!Vector::independent(&[&e1, &twice]).unwrap());
        assert!(Vector::independent(&[]).unwrap());
        assert!(!Vector::independent(&[&e1, &e2, &twice]).unwrap());
        assert!(Vector::independent(&[&e1, &v(&[1.0, 2.0, 3.0])]).is_err());
    }
}
