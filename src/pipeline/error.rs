//! Error types for the ranking pipeline.
//!
//! Every failure is fatal for the run: the pipeline is all-or-nothing and never
//! emits a partial report.

use thiserror::Error;

/// Errors that can occur while loading, encoding, ranking or validating.
#[derive(Debug, Error)]
pub enum RankError {
    /// Input file is unreadable, has an unsupported format or holds values the
    /// encoder cannot turn into a numeric matrix.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// The target column is absent, so no classification target can be defined.
    #[error("Target column '{column}' not found after cleaning")]
    MissingTarget { column: String },

    /// A rank correlation is undefined, typically because one side is constant.
    #[error("Correlation for feature '{feature}' is undefined: {reason}")]
    UndefinedCorrelation { feature: String, reason: String },

    /// Tree fitting or prediction failed inside the learning library.
    #[error("Model training failed: {0}")]
    Training(String),

    /// A configuration value cannot be honoured for this dataset.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, RankError>;
