//! Item-by-feature input matrices and the pairwise matrices derived from them.
//!
//! Labels are kept beside the numeric data rather than inside it: a matrix is
//! always a dense rectangle of `f64`, and labels are an optional ordered
//! sequence with one entry per item.

use crate::{Error, MetricKind, Result};
use ahash::{AHashMap, AHashSet};
use serde::Serialize;

/// An ordered set of items, each described by the same number of features.
///
/// Row = item, column = feature. Stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMatrix {
    data: Vec<f64>,
    n_items: usize,
    n_features: usize,
    labels: Option<Vec<String>>,
    label_index: AHashMap<String, usize>,
}

impl ItemMatrix {
    /// Build a matrix from rows. All rows must have the same length and every
    /// value must be finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_items = rows.len();
        let n_features = rows.first().map(|r| r.len()).unwrap_or(0);

        let mut data = Vec::with_capacity(n_items * n_features);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_features {
                return Err(Error::RaggedRows {
                    row: i,
                    expected: n_features,
                    actual: row.len(),
                });
            }
            if let Some(col) = row.iter().position(|x| !x.is_finite()) {
                return Err(Error::NonFiniteValue { row: i, col });
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            n_items,
            n_features,
            labels: None,
            label_index: AHashMap::new(),
        })
    }

    /// Build a matrix from a flat row-major buffer
    pub fn from_flat(data: Vec<f64>, n_items: usize, n_features: usize) -> Result<Self> {
        if n_items.checked_mul(n_features) != Some(data.len()) {
            return Err(Error::DimensionMismatch(format!(
                "buffer of {} values cannot hold {} x {} items",
                data.len(),
                n_items,
                n_features
            )));
        }
        if let Some(pos) = data.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFiniteValue {
                row: pos / n_features,
                col: pos % n_features,
            });
        }
        Ok(Self {
            data,
            n_items,
            n_features,
            labels: None,
            label_index: AHashMap::new(),
        })
    }

    /// Attach one label per item. Labels must be unique.
    pub fn with_labels<S: Into<String>>(mut self, labels: Vec<S>) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.n_items {
            return Err(Error::LabelMismatch {
                expected: self.n_items,
                actual: labels.len(),
            });
        }

        {
            let mut seen = AHashSet::with_capacity(labels.len());
            for label in &labels {
                if !seen.insert(label.as_str()) {
                    return Err(Error::DuplicateLabel(label.clone()));
                }
            }
        }

        self.label_index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        self.labels = Some(labels);
        Ok(self)
    }

    #[inline]
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Feature vector of item `i`
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_features;
        &self.data[start..start + self.n_features]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_items).map(move |i| self.row(i))
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Position of the item with the given label
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }
}

/// A symmetric N x N matrix of pairwise values over one ordering of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    metric: Option<MetricKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
    data: Vec<f64>,
}

/// One off-diagonal cell in flattened form, as consumed by heatmap renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixTriple {
    pub item_a: String,
    pub item_b: String,
    pub value: f64,
}

impl SimilarityMatrix {
    /// Assemble a matrix produced by the engine. `data` is row-major N x N.
    pub(crate) fn from_parts(
        size: usize,
        metric: Option<MetricKind>,
        labels: Option<Vec<String>>,
        data: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(data.len(), size * size);
        Self {
            size,
            metric,
            labels,
            data,
        }
    }

    /// Wrap an externally supplied matrix, such as a hand-written model RSM.
    ///
    /// The rows must form a square, symmetric matrix of finite values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::DimensionMismatch(format!(
                    "row {} has {} columns in a {}-row matrix",
                    i,
                    row.len(),
                    size
                )));
            }
            if let Some(col) = row.iter().position(|x| !x.is_finite()) {
                return Err(Error::NonFiniteValue { row: i, col });
            }
            data.extend(row);
        }

        for i in 0..size {
            for j in 0..i {
                let (a, b) = (data[i * size + j], data[j * size + i]);
                if (a - b).abs() > 1e-12 * a.abs().max(b.abs()).max(1.0) {
                    return Err(Error::Asymmetric { row: i, col: j });
                }
            }
        }

        Ok(Self::from_parts(size, None, None, data))
    }

    /// Attach item labels, replacing any existing ones
    pub fn with_labels<S: Into<String>>(mut self, labels: Vec<S>) -> Result<Self> {
        if labels.len() != self.size {
            return Err(Error::LabelMismatch {
                expected: self.size,
                actual: labels.len(),
            });
        }
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        Ok(self)
    }

    /// Number of items (rows and columns)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Metric that produced this matrix, if it came from the engine
    #[inline]
    pub fn metric(&self) -> Option<MetricKind> {
        self.metric
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }

    /// Strict lower triangle in row-major order: (1,0), (2,0), (2,1), (3,0), ...
    ///
    /// Every matrix uses this order, so the k-th entries of two extracted
    /// triangles always refer to the same item pair.
    pub fn lower_triangle(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.size * self.size.saturating_sub(1) / 2);
        for i in 1..self.size {
            out.extend_from_slice(&self.row(i)[..i]);
        }
        out
    }

    /// Apply `f` to every entry, keeping labels. The result carries no metric
    /// since its values no longer follow one.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            size: self.size,
            metric: None,
            labels: self.labels.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Divide every entry by the largest entry, so the most distant pair reads 1.
    ///
    /// Intended for distance matrices. Returns `ZeroVariance` when the largest
    /// entry is not positive.
    pub fn max_normalized(&self) -> Result<Self> {
        let max = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= 0.0 {
            return Err(Error::ZeroVariance("max-normalised"));
        }
        let mut normalized = self.map(|x| x / max);
        normalized.metric = self.metric;
        Ok(normalized)
    }

    /// Label for item `i`, falling back to its index
    pub fn label(&self, i: usize) -> String {
        match &self.labels {
            Some(labels) => labels[i].clone(),
            None => i.to_string(),
        }
    }

    /// Flatten the strict lower triangle into (item A, item B, value) triples,
    /// in the same order as [`lower_triangle`](Self::lower_triangle).
    pub fn to_triples(&self) -> Vec<MatrixTriple> {
        let mut out = Vec::with_capacity(self.size * self.size.saturating_sub(1) / 2);
        for i in 1..self.size {
            for j in 0..i {
                out.push(MatrixTriple {
                    item_a: self.label(i),
                    item_b: self.label(j),
                    value: self.get(i, j),
                });
            }
        }
        out
    }
}
