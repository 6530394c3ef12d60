//! Per-vector statistics used by the similarity metrics.
//!
//! All helpers operate on plain `f64` slices so they can be applied to rows
//! of an [`ItemMatrix`](crate::ItemMatrix) or to extracted triangle vectors
//! without copying.
//!
//! Anything that squares or sums first divides by the vector's largest
//! absolute value, so finite inputs near `f64::MAX` do not overflow and
//! inputs near the subnormal range do not underflow to zero.

/// Largest absolute entry, 0.0 for an empty slice
#[inline]
pub fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc, x| acc.max(x.abs()))
}

/// Arithmetic mean. Returns 0.0 for an empty slice.
#[inline]
pub fn mean(v: &[f64]) -> f64 {
    let scale = max_abs(v);
    if v.is_empty() || scale == 0.0 {
        return 0.0;
    }
    scale * (v.iter().map(|x| x / scale).sum::<f64>() / v.len() as f64)
}

/// Dot product over the common prefix of `a` and `b`
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean norm
#[inline]
pub fn norm(v: &[f64]) -> f64 {
    let scale = max_abs(v);
    if scale == 0.0 {
        return 0.0;
    }
    scale * v.iter().map(|x| (x / scale) * (x / scale)).sum::<f64>().sqrt()
}

/// L2 distance. Infinite only when the true distance exceeds `f64::MAX`.
#[inline]
pub fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    let scale = max_abs(a).max(max_abs(b));
    if scale == 0.0 {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x / scale - y / scale;
            d * d
        })
        .sum();
    scale * sum.sqrt()
}

/// True when every entry equals the first one (also true for empty slices).
#[inline]
pub fn is_constant(v: &[f64]) -> bool {
    match v.first() {
        Some(first) => v.iter().all(|x| x == first),
        None => true,
    }
}

/// True when every entry is exactly zero
#[inline]
pub fn is_zero(v: &[f64]) -> bool {
    v.iter().all(|&x| x == 0.0)
}

/// A vector divided by its largest absolute entry, with the norm of the result.
///
/// Cosine is invariant to positive scaling, so it can be computed entirely
/// in these units. The norm lies in [1, sqrt(len)] unless the vector is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaled {
    pub values: Vec<f64>,
    pub norm: f64,
}

impl Scaled {
    pub fn new(v: &[f64]) -> Self {
        let scale = max_abs(v);
        let values: Vec<f64> = if scale == 0.0 {
            vec![0.0; v.len()]
        } else {
            v.iter().map(|x| x / scale).collect()
        };
        let norm = values.iter().map(|x| x * x).sum::<f64>().sqrt();
        Self { values, norm }
    }

    /// Zero vector: it has no direction.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.norm <= 0.0
    }
}

/// A mean-centred copy of a vector together with its centred norm.
///
/// Correlation between two vectors is the dot product of their centred
/// forms divided by the product of the centred norms, so computing this once
/// per item keeps the pairwise loop to a single dot product. Values are
/// centred after dividing by the largest absolute entry; correlation does
/// not depend on that scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Centered {
    pub values: Vec<f64>,
    pub norm: f64,
}

impl Centered {
    pub fn new(v: &[f64]) -> Self {
        let scaled = Scaled::new(v).values;
        let m = if scaled.is_empty() {
            0.0
        } else {
            scaled.iter().sum::<f64>() / scaled.len() as f64
        };
        let values: Vec<f64> = scaled.iter().map(|x| x - m).collect();
        let norm = values.iter().map(|x| x * x).sum::<f64>().sqrt();
        Self { values, norm }
    }

    /// Centred sum of squares is zero: correlation with this vector is undefined.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.norm <= 0.0
    }
}

/// Clamp to [-1, 1] and turn -0.0 into 0.0
#[inline]
fn unit_interval(x: f64) -> f64 {
    x.clamp(-1.0, 1.0) + 0.0
}

/// Pearson product-moment correlation between two precomputed centred vectors.
///
/// The caller must have rejected degenerate vectors. The result is clamped to
/// [-1, 1] to absorb rounding.
#[inline]
pub fn centered_correlation(a: &Centered, b: &Centered) -> f64 {
    unit_interval(dot(&a.values, &b.values) / (a.norm * b.norm))
}

/// Cosine of the angle between two non-zero scaled vectors.
#[inline]
pub fn cosine(a: &Scaled, b: &Scaled) -> f64 {
    unit_interval(dot(&a.values, &b.values) / (a.norm * b.norm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_norm() {
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(norm(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_extreme_magnitudes() {
        assert_eq!(mean(&[f64::MAX, f64::MAX]), f64::MAX);
        let big = norm(&[3e300, 4e300]);
        assert!((big / 5e300 - 1.0).abs() < 1e-12);
        let tiny = norm(&[3e-200, 4e-200]);
        assert!((tiny / 5e-200 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_l2_distance() {
        assert!((l2_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        let d = l2_distance(&[1e300, 0.0], &[-2e300, 4e300]);
        assert!((d / 5e300 - 1.0).abs() < 1e-12);
        assert!(l2_distance(&[1e308], &[-1e308]).is_infinite());
    }

    #[test]
    fn test_centered() {
        let c = Centered::new(&[1.0, 3.0, 2.0]);
        let expected = [-1.0 / 3.0, 1.0 / 3.0, 0.0];
        for (v, e) in c.values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-12);
        }
        assert!(Centered::new(&[2.0, 2.0, 2.0]).is_degenerate());
        assert!(!Centered::new(&[1e-300, 2e-300]).is_degenerate());
    }

    #[test]
    fn test_centered_correlation() {
        let a = Centered::new(&[1.0, 2.0, 3.0]);
        let b = Centered::new(&[-0.5, -1.0, -1.5]);
        assert!((centered_correlation(&a, &b) + 1.0).abs() < 1e-12);

        let huge = Centered::new(&[1e200, -1e200, 0.0]);
        let small = Centered::new(&[0.0, 1.0, 2.0]);
        assert!((centered_correlation(&huge, &small) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_ignores_scale() {
        let a = Scaled::new(&[1e-200, 2e-200]);
        let b = Scaled::new(&[2e-200, 1e-200]);
        assert!(!a.is_degenerate());
        assert!((cosine(&a, &b) - 0.8).abs() < 1e-12);

        let c = Scaled::new(&[1e200, 1e200]);
        let d = Scaled::new(&[1e200, 0.0]);
        assert!((cosine(&c, &d) - 0.5f64.sqrt()).abs() < 1e-12);
        assert!(Scaled::new(&[0.0, 0.0]).is_degenerate());
    }

    #[test]
    fn test_negative_zero_normalised() {
        let a = Centered::new(&[1.0, -1.0, 0.0]);
        let b = Centered::new(&[0.0, 0.0, 1.0]);
        let r = centered_correlation(&a, &b);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[0.1, 0.1, 0.1]));
        assert!(!is_constant(&[0.1, 0.2]));
        assert!(is_zero(&[0.0, -0.0]));
        assert!(!is_zero(&[0.0, 1e-320]));
    }
}
