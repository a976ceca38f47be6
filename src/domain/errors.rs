//! Domain errors for the docrag document store.

use thiserror::Error;

/// Domain-level errors that can occur while embedding, storing or searching documents.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Input text is empty after normalization")]
    EmptyInput,

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Document not found: {0}")]
    DocumentNotFound(i64),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
