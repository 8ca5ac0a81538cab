use thiserror::Error;

/// Errors produced while reading risk scorecard records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid schema version: {0:?}")]
    InvalidVersion(String),

    #[error("document is not a structured object")]
    NotAnObject,

    #[error("malformed {version} document: {message}")]
    Malformed { version: String, message: String },

    #[error("{format} parse error: {message}")]
    Parse { format: String, message: String },
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
