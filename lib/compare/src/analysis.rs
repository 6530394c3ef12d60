//! Two-domain RSA pipeline
//!
//! data -> [`SimilarityEngine`] (once per domain) -> [`TriangleCorrelator`]
//! -> coefficients. The model domain is the hypothesised structure (e.g.
//! stimulus features), the neural domain the observed one.

use crate::correlation::CorrelationMethod;
use crate::correlator::TriangleCorrelator;
use crate::report::RsaReport;
use reprsim_core::{
    EngineConfig, Error, ItemMatrix, MetricKind, Result, SimilarityEngine, SimilarityMatrix,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Declarative description of one RSA comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Metric for the model (hypothesised) matrix
    #[serde(default = "default_metric")]
    pub model_metric: MetricKind,
    /// Metric for the neural (observed) matrix
    #[serde(default = "default_metric")]
    pub neural_metric: MetricKind,
    /// Correlation methods to report
    #[serde(default = "default_methods")]
    pub methods: Vec<CorrelationMethod>,
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_metric() -> MetricKind {
    MetricKind::CorrelationDissimilarity
}

fn default_methods() -> Vec<CorrelationMethod> {
    CorrelationMethod::ALL.to_vec()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model_metric: default_metric(),
            neural_metric: default_metric(),
            methods: default_methods(),
            engine: EngineConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Check the configuration and drop repeated methods, keeping first occurrences
    pub fn validate(&mut self) -> Result<()> {
        if self.methods.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one correlation method is required".to_string(),
            ));
        }
        if self.engine.parallel_threshold == 0 {
            return Err(Error::InvalidConfig("parallel_threshold must be positive".to_string()));
        }

        let mut seen = Vec::with_capacity(self.methods.len());
        self.methods.retain(|m| {
            if seen.contains(m) {
                false
            } else {
                seen.push(*m);
                true
            }
        });
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loading analysis config");
        Self::from_json_str(&contents)
    }
}

/// Runs the RSA comparison described by an [`AnalysisConfig`]
#[derive(Debug, Clone)]
pub struct RsaAnalysis {
    config: AnalysisConfig,
    engine: SimilarityEngine,
    correlator: TriangleCorrelator,
}

impl RsaAnalysis {
    pub fn new(mut config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: SimilarityEngine::new(config.engine),
            correlator: TriangleCorrelator::new(),
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build both matrices and correlate them.
    ///
    /// The two inputs must describe the same items in the same order; only
    /// the item count is checked. Feature counts may differ.
    pub fn run(&self, model: &ItemMatrix, neural: &ItemMatrix) -> Result<RsaReport> {
        if model.n_items() != neural.n_items() {
            return Err(Error::DimensionMismatch(format!(
                "model has {} items, neural data has {}",
                model.n_items(),
                neural.n_items()
            )));
        }

        let model_matrix = self.engine.compute(model, self.config.model_metric)?;
        let neural_matrix = self.engine.compute(neural, self.config.neural_metric)?;
        self.compare(model_matrix, neural_matrix)
    }

    /// Correlate two prebuilt matrices, e.g. a hand-specified model matrix
    pub fn compare(&self, model: SimilarityMatrix, neural: SimilarityMatrix) -> Result<RsaReport> {
        let correlation = self
            .correlator
            .correlate_with(&model, &neural, &self.config.methods)?;

        info!(
            items = model.size(),
            model_metric = ?model.metric(),
            neural_metric = ?neural.metric(),
            pearson = ?correlation.pearson,
            spearman = ?correlation.spearman,
            "RSA comparison complete"
        );

        Ok(RsaReport::new(model, neural, correlation))
    }
}
