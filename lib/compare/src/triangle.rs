//! Lower-triangle extraction

use reprsim_core::{Error, Result, SimilarityMatrix};

/// Entries strictly below the diagonal of a [`SimilarityMatrix`], in
/// row-major order: (1,0), (2,0), (2,1), (3,0), ...
#[derive(Debug, Clone, PartialEq)]
pub struct LowerTriangleVector {
    size: usize,
    values: Vec<f64>,
}

impl LowerTriangleVector {
    pub fn from_matrix(matrix: &SimilarityMatrix) -> Self {
        Self {
            size: matrix.size(),
            values: matrix.lower_triangle(),
        }
    }

    /// Size of the matrix the triangle came from
    #[inline]
    pub fn matrix_size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Item pair `(i, j)` with `i > j` for position `k`
    pub fn pair_at(&self, k: usize) -> Option<(usize, usize)> {
        if k >= self.values.len() {
            return None;
        }
        // Row i starts at i * (i - 1) / 2
        let mut i = 1;
        while (i + 1) * i / 2 <= k {
            i += 1;
        }
        Some((i, k - i * (i - 1) / 2))
    }
}

/// Extract the lower triangles of two matrices with aligned pairings.
///
/// Fails with `DimensionMismatch` when the matrices differ in size.
pub fn aligned_triangles(
    a: &SimilarityMatrix,
    b: &SimilarityMatrix,
) -> Result<(LowerTriangleVector, LowerTriangleVector)> {
    if a.size() != b.size() {
        return Err(Error::DimensionMismatch(format!(
            "cannot compare {}x{} matrix with {}x{} matrix",
            a.size(),
            a.size(),
            b.size(),
            b.size()
        )));
    }
    Ok((LowerTriangleVector::from_matrix(a), LowerTriangleVector::from_matrix(b)))
}
