//! # reprsim
//!
//! Representational Similarity Analysis (RSA) in Rust.
//!
//! RSA compares two domains, such as a hypothesised stimulus-similarity
//! structure and an observed neural-activity structure, by building a
//! pairwise similarity matrix for each and correlating the matrices' strict
//! lower triangles.
//!
//! ## Quick Start
//!
//! ### As a Library
//!
//! ```rust
//! use reprsim::prelude::*;
//!
//! let data = simulate(&SimulationConfig::default()).unwrap();
//!
//! let engine = SimilarityEngine::default();
//! let model = engine.compute(&data.stimulus, MetricKind::CorrelationDissimilarity).unwrap();
//! let neural = engine.compute(&data.neural, MetricKind::CorrelationDissimilarity).unwrap();
//!
//! let rho = TriangleCorrelator::new()
//!     .correlate(&model, &neural, CorrelationMethod::Spearman)
//!     .unwrap();
//! assert!((-1.0..=1.0).contains(&rho));
//! ```
//!
//! ### From the Command Line
//!
//! ```bash
//! reprsim simulate --items 12 --noise 0.3 --method spearman
//! ```
//!
//! ## Crate Structure
//!
//! - [`reprsim-core`](https://docs.rs/reprsim-core) - Item matrices, metrics, similarity engine
//! - [`reprsim-compare`](https://docs.rs/reprsim-compare) - Triangle correlation, analysis pipeline, reports
//!
//! ## Metrics
//!
//! - **Correlation similarity / dissimilarity**: Pearson r over each item's features
//! - **Cosine similarity / dissimilarity**: normalised dot product
//! - **Euclidean distance**: raw root-sum-of-squares difference
//!
//! Dissimilarities use the rescaling `(2 - (s + 1)) / 2`.

pub mod simulate;

// Re-export core types
pub use reprsim_core::{
    rescale_dissimilarity, EngineConfig, Error, ItemMatrix, MatrixTriple, MetricKind, Result,
    SimilarityEngine, SimilarityMatrix,
};

// Re-export comparison types
pub use reprsim_compare::{
    AnalysisConfig, CorrelationMethod, CorrelationResult, LowerTriangleVector, RsaAnalysis,
    RsaReport, TriangleCorrelator,
};

pub use simulate::{broadcast, simulate, SimulatedData, SimulationConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisConfig, CorrelationMethod, CorrelationResult, EngineConfig, Error, ItemMatrix,
        LowerTriangleVector, MetricKind, Result, RsaAnalysis, RsaReport, SimilarityEngine,
        SimilarityMatrix, TriangleCorrelator,
    };
    pub use crate::simulate::{simulate, SimulationConfig};
}
