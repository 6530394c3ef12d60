//! # reprsim Core
//!
//! Core library for reprsim, a toolkit for Representational Similarity
//! Analysis (RSA).
//!
//! This crate provides the data model and the pairwise similarity engine:
//!
//! - [`ItemMatrix`] - Item-by-feature input data with optional item labels
//! - [`SimilarityMatrix`] - Symmetric matrix of pairwise values
//! - [`MetricKind`] - Correlation, cosine and Euclidean metrics
//! - [`SimilarityEngine`] - Computes a [`SimilarityMatrix`] from an [`ItemMatrix`]
//!
//! ## Example
//!
//! ```rust
//! use reprsim_core::{ItemMatrix, MetricKind, SimilarityEngine};
//!
//! let items = ItemMatrix::from_rows(vec![
//!     vec![1.0, 3.0, 2.0],
//!     vec![-3.0, -1.0, -2.0],
//!     vec![0.0, 1.0, 1.0],
//! ])
//! .unwrap()
//! .with_labels(vec!["A", "B", "C"])
//! .unwrap();
//!
//! let engine = SimilarityEngine::default();
//! let rdm = engine.compute(&items, MetricKind::CorrelationDissimilarity).unwrap();
//! assert!(rdm.get(1, 0).abs() < 1e-12);
//! ```

pub mod engine;
pub mod error;
pub mod matrix;
pub mod metric;
pub mod vector;

pub use engine::{compute, EngineConfig, SimilarityEngine, MIN_ITEMS};
pub use error::{Error, Result};
pub use matrix::{ItemMatrix, MatrixTriple, SimilarityMatrix};
pub use metric::{rescale_dissimilarity, MetricKind};
