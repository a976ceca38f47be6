//! Embedding provider adapters.

pub mod hashing;
pub mod openai;

pub use hashing::HashingEmbeddingProvider;
pub use openai::{OpenAiEmbeddingConfig, OpenAiEmbeddingProvider};

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{EmbeddingConfig, EmbeddingProviderKind};
use crate::domain::ports::EmbeddingProvider;

/// Construct the provider selected by configuration.
pub fn build_provider(config: &EmbeddingConfig) -> DomainResult<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingProviderKind::Openai => {
            Arc::new(OpenAiEmbeddingProvider::new(OpenAiEmbeddingConfig::from(config))?)
        }
        EmbeddingProviderKind::Hashing => Arc::new(HashingEmbeddingProvider::new(config.dimension)?),
    };

    tracing::debug!(provider = provider.name(), dimension = provider.dimension(), "embedding provider ready");
    Ok(provider)
}
