//! Pairwise similarity engine
//!
//! Turns an [`ItemMatrix`] into a [`SimilarityMatrix`] by evaluating one
//! [`MetricKind`] over every pair of items. Per-item quantities (centred
//! vectors, norms) are computed once and degenerate items are rejected before
//! any division happens.
//!
//! Large inputs are split across rayon's thread pool by row. Each entry is
//! computed by the same code on either path, so parallel and sequential
//! results are identical.

use crate::metric::rescale_dissimilarity;
use crate::vector::{
    centered_correlation, cosine, is_constant, is_zero, l2_distance, Centered, Scaled,
};
use crate::{Error, ItemMatrix, MetricKind, Result, SimilarityMatrix};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Minimum number of items for a pairwise matrix
pub const MIN_ITEMS: usize = 2;

/// Configuration for the similarity engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Allow row-parallel computation
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Item count at which the parallel path is taken
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    256
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl EngineConfig {
    /// Always compute on the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

/// Per-item data prepared once before the pairwise loop
enum Prepared<'a> {
    Centered(Vec<Centered>),
    Scaled(Vec<Scaled>),
    Raw(&'a ItemMatrix),
}

/// Stateless engine computing pairwise similarity matrices
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: EngineConfig,
}

impl SimilarityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the N x N matrix of `metric` between all pairs of rows.
    ///
    /// # Errors
    /// * `DimensionMismatch` - fewer than two items or no features
    /// * `DegenerateVector` - an item has zero variance (correlation metrics)
    ///   or zero magnitude (cosine metrics)
    /// * `NonFiniteResult` - a pair's value is not representable, e.g. a
    ///   Euclidean distance beyond `f64::MAX`
    pub fn compute(&self, matrix: &ItemMatrix, metric: MetricKind) -> Result<SimilarityMatrix> {
        let n = matrix.n_items();
        if n < MIN_ITEMS {
            return Err(Error::DimensionMismatch(format!(
                "need at least {} items, got {}",
                MIN_ITEMS, n
            )));
        }
        if matrix.n_features() == 0 {
            return Err(Error::DimensionMismatch("items have no features".to_string()));
        }

        debug!(
            items = n,
            features = matrix.n_features(),
            metric = %metric,
            "computing similarity matrix"
        );

        let prepared = prepare(matrix, metric)?;
        let pair = |i: usize, j: usize| -> Result<f64> {
            let value = match &prepared {
                Prepared::Centered(centered) => {
                    let r = centered_correlation(&centered[i], &centered[j]);
                    if metric.is_similarity() {
                        r
                    } else {
                        rescale_dissimilarity(r)
                    }
                }
                Prepared::Scaled(scaled) => {
                    let c = cosine(&scaled[i], &scaled[j]);
                    if metric.is_similarity() {
                        c
                    } else {
                        rescale_dissimilarity(c)
                    }
                }
                Prepared::Raw(m) => l2_distance(m.row(i), m.row(j)),
            };
            if !value.is_finite() {
                warn!(row = j, col = i, %metric, "pair value is not finite");
                return Err(Error::NonFiniteResult { row: j, col: i });
            }
            Ok(value)
        };

        // Upper triangle, one Vec per row i holding entries j > i
        let upper: Vec<Vec<f64>> = if self.config.parallel && n >= self.config.parallel_threshold {
            (0..n)
                .into_par_iter()
                .map(|i| ((i + 1)..n).map(|j| pair(i, j)).collect::<Result<Vec<f64>>>())
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..n)
                .map(|i| ((i + 1)..n).map(|j| pair(i, j)).collect::<Result<Vec<f64>>>())
                .collect::<Result<Vec<_>>>()?
        };

        let mut data = vec![0.0; n * n];
        for (i, row) in upper.iter().enumerate() {
            data[i * n + i] = metric.diagonal();
            for (offset, &value) in row.iter().enumerate() {
                let j = i + 1 + offset;
                data[i * n + j] = value;
                data[j * n + i] = value;
            }
        }

        Ok(SimilarityMatrix::from_parts(
            n,
            Some(metric),
            matrix.labels().map(|l| l.to_vec()),
            data,
        ))
    }
}

/// Compute a similarity matrix with the default engine configuration
pub fn compute(matrix: &ItemMatrix, metric: MetricKind) -> Result<SimilarityMatrix> {
    SimilarityEngine::default().compute(matrix, metric)
}

fn prepare(matrix: &ItemMatrix, metric: MetricKind) -> Result<Prepared<'_>> {
    if metric.is_correlation() {
        let centered = matrix
            .rows()
            .enumerate()
            .map(|(item, row)| {
                let c = Centered::new(row);
                if is_constant(row) || c.is_degenerate() {
                    warn!(item, "item vector has zero variance");
                    return Err(Error::DegenerateVector {
                        item,
                        reason: "zero variance",
                    });
                }
                Ok(c)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Prepared::Centered(centered))
    } else if metric.is_cosine() {
        let scaled = matrix
            .rows()
            .enumerate()
            .map(|(item, row)| {
                if is_zero(row) {
                    warn!(item, "item vector has zero magnitude");
                    return Err(Error::DegenerateVector {
                        item,
                        reason: "zero magnitude",
                    });
                }
                Ok(Scaled::new(row))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Prepared::Scaled(scaled))
    } else {
        Ok(Prepared::Raw(matrix))
    }
}
