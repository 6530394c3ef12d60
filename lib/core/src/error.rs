use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Degenerate vector for item {item}: {reason}")]
    DegenerateVector { item: usize, reason: &'static str },

    #[error("Zero variance in {0} lower triangle")]
    ZeroVariance(&'static str),

    #[error("Insufficient data: need at least {required} items, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Non-finite value at row {row}, column {col}")]
    NonFiniteValue { row: usize, col: usize },

    #[error("Value at ({row}, {col}) is not finite")]
    NonFiniteResult { row: usize, col: usize },

    #[error("Non-finite entry {index} in {sequence} sequence")]
    NonFiniteEntry {
        sequence: &'static str,
        index: usize,
    },

    #[error("Ragged rows: row {row} has {actual} features, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Label count mismatch: expected {expected}, got {actual}")]
    LabelMismatch { expected: usize, actual: usize },

    #[error("Duplicate item label: {0}")]
    DuplicateLabel(String),

    #[error("Matrix is not symmetric at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown correlation method: {0}")]
    UnknownMethod(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
