//! Pairwise similarity metrics
//!
//! Five metrics are supported. Correlation metrics centre each item vector on
//! its own mean, cosine metrics compare raw directions from the origin, and
//! Euclidean distance works on raw values with no centring or scaling.
//!
//! The two dissimilarity variants use the linear rescaling
//! `(2 - (s + 1)) / 2`, which maps a similarity of 1 to 0 and -1 to 1.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric used to compare two items
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Pearson product-moment correlation, in [-1, 1]
    #[default]
    CorrelationSimilarity,
    /// Rescaled correlation, in [0, 1]
    CorrelationDissimilarity,
    /// Normalised dot product, in [-1, 1]
    CosineSimilarity,
    /// Rescaled cosine, in [0, 1]
    CosineDissimilarity,
    /// Root of summed squared differences, in [0, inf)
    EuclideanDistance,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::CorrelationSimilarity,
        MetricKind::CorrelationDissimilarity,
        MetricKind::CosineSimilarity,
        MetricKind::CosineDissimilarity,
        MetricKind::EuclideanDistance,
    ];

    /// Kebab-case name, as used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::CorrelationSimilarity => "correlation-similarity",
            MetricKind::CorrelationDissimilarity => "correlation-dissimilarity",
            MetricKind::CosineSimilarity => "cosine-similarity",
            MetricKind::CosineDissimilarity => "cosine-dissimilarity",
            MetricKind::EuclideanDistance => "euclidean-distance",
        }
    }

    /// True for metrics where larger values mean more alike
    pub fn is_similarity(&self) -> bool {
        matches!(
            self,
            MetricKind::CorrelationSimilarity | MetricKind::CosineSimilarity
        )
    }

    /// Correlation metrics need per-item mean centring
    pub fn is_correlation(&self) -> bool {
        matches!(
            self,
            MetricKind::CorrelationSimilarity | MetricKind::CorrelationDissimilarity
        )
    }

    pub fn is_cosine(&self) -> bool {
        matches!(
            self,
            MetricKind::CosineSimilarity | MetricKind::CosineDissimilarity
        )
    }

    /// Value every item has with itself
    pub fn diagonal(&self) -> f64 {
        if self.is_similarity() {
            1.0
        } else {
            0.0
        }
    }

    /// Inclusive bounds of the metric's values
    pub fn range(&self) -> (f64, f64) {
        match self {
            MetricKind::CorrelationSimilarity | MetricKind::CosineSimilarity => (-1.0, 1.0),
            MetricKind::CorrelationDissimilarity | MetricKind::CosineDissimilarity => (0.0, 1.0),
            MetricKind::EuclideanDistance => (0.0, f64::INFINITY),
        }
    }
}

/// Map a similarity in [-1, 1] onto a dissimilarity in [0, 1].
///
/// This is `(2 - (s + 1)) / 2`, not `1 - s`.
#[inline]
pub fn rescale_dissimilarity(similarity: f64) -> f64 {
    (2.0 - (similarity + 1.0)) / 2.0
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "correlation-similarity" | "correlation" | "pearson" => {
                Ok(MetricKind::CorrelationSimilarity)
            }
            "correlation-dissimilarity" | "correlation-distance" => {
                Ok(MetricKind::CorrelationDissimilarity)
            }
            "cosine-similarity" | "cosine" => Ok(MetricKind::CosineSimilarity),
            "cosine-dissimilarity" | "cosine-distance" => Ok(MetricKind::CosineDissimilarity),
            "euclidean-distance" | "euclidean" => Ok(MetricKind::EuclideanDistance),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}
