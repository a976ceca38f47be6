//! Embedding provider port for semantic vector generation.
//!
//! Defines the trait for embedding providers that convert text into
//! dense vector representations for semantic similarity search.
//! Providers receive text that has already been normalized by the
//! embedding service.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Trait for embedding providers (single and batch).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "openai", "hashing").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>>;

    /// Generate embeddings for multiple texts, one vector per input in input order.
    ///
    /// Implementations should handle chunking if the provider has per-request limits,
    /// and must return an error rather than a partial list if any request fails.
    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>>;

    /// Maximum number of texts per single API call.
    fn max_batch_size(&self) -> usize;
}
