//! Triangle correlator
//!
//! Compares two similarity matrices over the same items by correlating their
//! strict lower triangles. Both triangles are extracted in the same row-major
//! order so that the k-th entries always refer to the same item pair.

use crate::correlation::{correlate_slices, CorrelationMethod, CorrelationResult};
use crate::triangle::aligned_triangles;
use reprsim_core::{Error, Result, SimilarityMatrix};
use tracing::debug;

/// Fewest items for which a triangle correlation is computed (3 pairs)
pub const MIN_CORRELATION_ITEMS: usize = 3;

/// Stateless comparator for pairs of similarity matrices
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleCorrelator;

impl TriangleCorrelator {
    pub fn new() -> Self {
        Self
    }

    /// Correlate the lower triangles of `a` and `b` with one method.
    ///
    /// # Errors
    /// * `DimensionMismatch` - the matrices differ in size
    /// * `InsufficientData` - fewer than three items
    /// * `ZeroVariance` - either triangle is constant
    /// * `NonFiniteEntry` - either triangle holds NaN or an infinity
    pub fn correlate(
        &self,
        a: &SimilarityMatrix,
        b: &SimilarityMatrix,
        method: CorrelationMethod,
    ) -> Result<f64> {
        let (ta, tb) = aligned_triangles(a, b)?;
        check_size(a.size())?;

        let value =
            correlate_slices(ta.as_slice(), tb.as_slice(), method).map_err(|e| match e {
                Error::ZeroVariance("first") => Error::ZeroVariance("first matrix's"),
                Error::ZeroVariance("second") => Error::ZeroVariance("second matrix's"),
                Error::NonFiniteEntry { sequence: "first", index } => Error::NonFiniteEntry {
                    sequence: "first matrix's",
                    index,
                },
                Error::NonFiniteEntry { sequence: "second", index } => Error::NonFiniteEntry {
                    sequence: "second matrix's",
                    index,
                },
                other => other,
            })?;

        debug!(items = a.size(), pairs = ta.len(), %method, value, "triangle correlation");
        Ok(value)
    }

    /// Correlate with every method in `methods`, in order
    pub fn correlate_with(
        &self,
        a: &SimilarityMatrix,
        b: &SimilarityMatrix,
        methods: &[CorrelationMethod],
    ) -> Result<CorrelationResult> {
        let mut result = CorrelationResult::default();
        for &method in methods {
            result.set(method, self.correlate(a, b, method)?);
        }
        Ok(result)
    }

    /// Correlate with both Pearson and Spearman
    pub fn correlate_all(
        &self,
        a: &SimilarityMatrix,
        b: &SimilarityMatrix,
    ) -> Result<CorrelationResult> {
        self.correlate_with(a, b, &CorrelationMethod::ALL)
    }
}

fn check_size(size: usize) -> Result<()> {
    if size < MIN_CORRELATION_ITEMS {
        return Err(Error::InsufficientData {
            required: MIN_CORRELATION_ITEMS,
            actual: size,
        });
    }
    Ok(())
}

/// Correlate two matrices with a default correlator
pub fn correlate(
    a: &SimilarityMatrix,
    b: &SimilarityMatrix,
    method: CorrelationMethod,
) -> Result<f64> {
    TriangleCorrelator::new().correlate(a, b, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    fn sample() -> SimilarityMatrix {
        matrix(vec![
            vec![1.0, 0.8, 0.1, 0.3],
            vec![0.8, 1.0, 0.4, 0.2],
            vec![0.1, 0.4, 1.0, 0.9],
            vec![0.3, 0.2, 0.9, 1.0],
        ])
    }

    #[test]
    fn test_self_correlation_is_one() {
        let s = sample();
        let result = TriangleCorrelator::new().correlate_all(&s, &s).unwrap();
        assert!((result.pearson.unwrap() - 1.0).abs() < 1e-12);
        assert!((result.spearman.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_matrix() {
        let s = sample();
        let inverted = s.map(|x| 1.0 - x);
        let r = correlate(&s, &inverted, CorrelationMethod::Pearson).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_ignored() {
        let s = sample();
        let mut rows = s.to_rows();
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 42.0 + i as f64;
        }
        let r = correlate(&s, &matrix(rows), CorrelationMethod::Pearson).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_size_mismatch() {
        let small = matrix(vec![
            vec![1.0, 0.5, 0.2],
            vec![0.5, 1.0, 0.3],
            vec![0.2, 0.3, 1.0],
        ]);
        assert!(matches!(
            correlate(&sample(), &small, CorrelationMethod::Spearman),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_insufficient_items() {
        let two = matrix(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        assert!(matches!(
            correlate(&two, &two, CorrelationMethod::Pearson),
            Err(Error::InsufficientData { required: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_constant_triangle() {
        let flat = matrix(vec![
            vec![1.0, 0.5, 0.5],
            vec![0.5, 1.0, 0.5],
            vec![0.5, 0.5, 1.0],
        ]);
        let varied = matrix(vec![
            vec![1.0, 0.1, 0.2],
            vec![0.1, 1.0, 0.3],
            vec![0.2, 0.3, 1.0],
        ]);
        assert!(matches!(
            correlate(&varied, &flat, CorrelationMethod::Pearson),
            Err(Error::ZeroVariance("second matrix's"))
        ));
    }

    #[test]
    fn test_non_finite_triangle() {
        let s = sample();
        let broken = s.map(|x| if x == 0.4 { f64::NAN } else { x });
        for method in CorrelationMethod::ALL {
            assert!(matches!(
                correlate(&s, &broken, method),
                Err(Error::NonFiniteEntry { sequence: "second matrix's", index: 2 })
            ));
        }
    }

    #[test]
    fn test_correlate_with_subset() {
        let s = sample();
        let result = TriangleCorrelator::new()
            .correlate_with(&s, &s, &[CorrelationMethod::Spearman])
            .unwrap();
        assert!(result.pearson.is_none());
        assert!(result.spearman.is_some());
    }
}
