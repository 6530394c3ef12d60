//! Serialisable output of an RSA comparison
//!
//! Reporting and visualisation layers consume this: the coefficients for
//! display, and optionally both matrices in triple form for heatmaps.

use crate::correlation::CorrelationResult;
use reprsim_core::{MatrixTriple, MetricKind, Result, SimilarityMatrix};
use serde::Serialize;

/// Outcome of comparing a model matrix against a neural matrix
#[derive(Debug, Clone, Serialize)]
pub struct RsaReport {
    /// Number of items in each matrix
    pub n_items: usize,
    /// Number of item pairs correlated
    pub n_pairs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_metric: Option<MetricKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neural_metric: Option<MetricKind>,
    pub correlation: CorrelationResult,
    #[serde(skip)]
    model: SimilarityMatrix,
    #[serde(skip)]
    neural: SimilarityMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_triples: Option<Vec<MatrixTriple>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    neural_triples: Option<Vec<MatrixTriple>>,
}

impl RsaReport {
    pub fn new(
        model: SimilarityMatrix,
        neural: SimilarityMatrix,
        correlation: CorrelationResult,
    ) -> Self {
        let n_items = model.size();
        Self {
            n_items,
            n_pairs: n_items * n_items.saturating_sub(1) / 2,
            model_metric: model.metric(),
            neural_metric: neural.metric(),
            correlation,
            model,
            neural,
            model_triples: None,
            neural_triples: None,
        }
    }

    pub fn model_matrix(&self) -> &SimilarityMatrix {
        &self.model
    }

    pub fn neural_matrix(&self) -> &SimilarityMatrix {
        &self.neural
    }

    /// Include both lower triangles as (item A, item B, value) triples when serialised
    pub fn with_triples(mut self) -> Self {
        self.model_triples = Some(self.model.to_triples());
        self.neural_triples = Some(self.neural.to_triples());
        self
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RsaReport {
        let m = SimilarityMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap()
        .with_labels(vec!["a", "b", "c"])
        .unwrap();
        let correlation = CorrelationResult {
            pearson: Some(1.0),
            spearman: None,
        };
        RsaReport::new(m.clone(), m, correlation)
    }

    #[test]
    fn test_report_counts() {
        let r = report();
        assert_eq!(r.n_items, 3);
        assert_eq!(r.n_pairs, 3);
        assert_eq!(r.model_matrix().size(), 3);
        assert_eq!(r.neural_matrix().get(2, 1), 3.0);
    }

    #[test]
    fn test_json_without_triples() {
        let json: serde_json::Value =
            serde_json::from_str(&report().to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["n_pairs"], 3);
        assert_eq!(json["correlation"]["pearson"], 1.0);
        assert!(json.get("model_triples").is_none());
        assert!(json.get("model_metric").is_none());
    }

    #[test]
    fn test_json_with_triples() {
        let json = serde_json::to_value(report().with_triples()).unwrap();
        let triples = json["model_triples"].as_array().unwrap();
        assert_eq!(triples.len(), 3);
        assert_eq!(triples[0]["item_a"], "b");
        assert_eq!(triples[0]["item_b"], "a");
        assert_eq!(triples[0]["value"], 1.0);
    }
}
