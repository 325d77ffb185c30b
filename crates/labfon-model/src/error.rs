use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Document file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level document or a collection had the wrong JSON shape.
    #[error("expected {expected} for {section}, found {found}")]
    InvalidShape {
        section: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A record inside a collection could not be decoded.
    #[error("record {index} in {section} is malformed: {message}")]
    InvalidRecord {
        section: String,
        index: usize,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
