//! # reprsim Compare
//!
//! Second-order comparison for Representational Similarity Analysis: two
//! similarity matrices over the same items are compared by correlating their
//! strict lower triangles.
//!
//! ## Example
//!
//! ```rust
//! use reprsim_compare::{AnalysisConfig, RsaAnalysis};
//! use reprsim_core::ItemMatrix;
//!
//! let stimulus = ItemMatrix::from_rows(vec![
//!     vec![1.0, 0.0, 2.0],
//!     vec![0.5, 3.0, 1.0],
//!     vec![2.0, 2.5, 0.0],
//!     vec![0.0, 1.0, 4.0],
//! ])
//! .unwrap();
//!
//! let analysis = RsaAnalysis::new(AnalysisConfig::default()).unwrap();
//! let report = analysis.run(&stimulus, &stimulus).unwrap();
//! assert!((report.correlation.spearman.unwrap() - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │   Model     │────>│   Engine    │──┐
//! │  (items)    │     │ (metric A)  │  │    ┌─────────────┐     ┌─────────────┐
//! └─────────────┘     └─────────────┘  ├───>│ Correlator  │────>│   Report    │
//! ┌─────────────┐     ┌─────────────┐  │    │ (triangles) │     │ (r, rho)    │
//! │   Neural    │────>│   Engine    │──┘    └─────────────┘     └─────────────┘
//! │  (items)    │     │ (metric B)  │
//! └─────────────┘     └─────────────┘
//! ```

pub mod analysis;
pub mod correlation;
pub mod correlator;
pub mod rank;
pub mod report;
pub mod triangle;

pub use analysis::{AnalysisConfig, RsaAnalysis};
pub use correlation::{correlate_slices, CorrelationMethod, CorrelationResult};
pub use correlator::{correlate, TriangleCorrelator, MIN_CORRELATION_ITEMS};
pub use rank::average_ranks;
pub use report::RsaReport;
pub use triangle::{aligned_triangles, LowerTriangleVector};
