//! Error types for the test harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("data source error: {path}: {reason}")]
    DataSource { path: String, reason: String },

    #[error("field not found: {selector}")]
    FieldNotFound { selector: String },

    #[error("no visible candidate for {selector} ({matched} matched, all hidden)")]
    NoVisibleCandidate { selector: String, matched: usize },

    #[error("timeout after {ms}ms waiting for: {condition}")]
    Timeout { condition: String, ms: u64 },

    #[error("{field} mismatch: expected '{expected}', got '{actual}'")]
    AssertionMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("requested {requested} items from a catalog of {available}")]
    CatalogExhausted { requested: usize, available: usize },

    #[error("empty vocabulary category: {category}")]
    EmptyVocabulary { category: String },

    #[error("driver error: {0}")]
    Driver(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
