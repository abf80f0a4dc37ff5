//! Error types for SQLAUDIT

use thiserror::Error;

/// Core error type for SQLAUDIT operations
#[derive(Error, Debug)]
pub enum AuditError {
    /// The requested dialect is not supported. This is the only failure
    /// that is fatal for a whole audit request.
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("Schema error: {0}")]
    Schema(String),

    /// A per-query failure. The aggregator converts this into a single
    /// `PARSE_ERROR` issue instead of failing the batch.
    #[error("Query {index}: {message}")]
    Query { index: usize, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl AuditError {
    /// Wraps a message as a per-query failure at the given input index.
    pub fn query(index: usize, message: impl Into<String>) -> Self {
        Self::Query {
            index,
            message: message.into(),
        }
    }
}

/// Result type alias for SQLAUDIT operations
pub type Result<T> = std::result::Result<T, AuditError>;
