//! Error types for the evaluation service.
//!
//! Startup failures (load, schema, fit) are fatal and abort initialization;
//! evaluation failures are reported per request and leave the process alive.

use thiserror::Error;

/// Reading or parsing the dataset file failed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset is not a JSON array of records: {0}")]
    Json(#[from] serde_json::Error),
}

/// The dataset does not carry the column layout the service expects.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("target column '{0}' not found in dataset")]
    MissingTarget(String),
}

/// Training data is degenerate or cannot be turned into a numeric problem.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("at least one training sample needed")]
    NotEnoughSamples,
    #[error("records have {records} rows but targets have {targets}")]
    ShapeMismatch { records: usize, targets: usize },
    #[error("column '{column}' has no value in record {row}")]
    MissingValue { column: String, row: usize },
    #[error("column '{column}' holds a non-numeric value in record {row}")]
    NonNumeric { column: String, row: usize },
    #[error(transparent)]
    LeastSquares(#[from] linfa_linalg::LinalgError),
}

/// A single evaluation run failed; the model and test set are untouched.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("test partition is empty, nothing to evaluate")]
    EmptyTestSet,
    #[error("model expects {expected} features but test partition has {actual}")]
    FeatureMismatch { expected: usize, actual: usize },
    #[error("failed to write predictions: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize predictions: {0}")]
    Json(#[from] serde_json::Error),
}

/// Umbrella over everything that can go wrong before the server starts.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Fit(#[from] FitError),
}
