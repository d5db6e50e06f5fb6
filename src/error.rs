//! Error type shared by the loading layer, configuration, and the CLI/HTTP
//! surfaces. The graph core itself never fails: degenerate selections
//! produce empty results instead of errors.

use thiserror::Error;

/// Every fallible operation in the crate reports one of these.
#[derive(Debug, Error)]
pub enum FlowGraphError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unsupported data source: {0}")]
    UnsupportedSource(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FlowGraphError>;
