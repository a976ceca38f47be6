//! OpenAI-compatible embedding provider adapter.
//!
//! Supports both single and batch embedding generation via the
//! `/embeddings` endpoint. Works against OpenAI itself and any compatible
//! server (Ollama's `/v1` shim, Azure OpenAI, local inference servers).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::EmbeddingProvider;

/// Configuration for the OpenAI-compatible embedding provider.
#[derive(Debug, Clone)]
pub struct OpenAiEmbeddingConfig {
    /// API key. Falls back to `OPENAI_API_KEY`; no auth header when neither is set.
    pub api_key: Option<String>,
    /// Base URL for the API. Default: `http://localhost:11434/v1` (Ollama).
    pub base_url: String,
    /// Embedding model. Default: `nomic-embed-text:latest`.
    pub model: String,
    /// Expected embedding dimension. Default: 768.
    pub dimension: usize,
    /// Request timeout in seconds. Default: 30.
    pub timeout_secs: u64,
    /// Maximum texts per single API request. Default: 512.
    pub max_batch_size: usize,
}

impl Default for OpenAiEmbeddingConfig {
    fn default() -> Self {
        Self::from(&EmbeddingConfig::default())
    }
}

impl From<&EmbeddingConfig> for OpenAiEmbeddingConfig {
    fn from(config: &EmbeddingConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimension: config.dimension,
            timeout_secs: config.timeout_secs,
            max_batch_size: config.max_batch_size.max(1),
        }
    }
}

impl OpenAiEmbeddingConfig {
    fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.is_empty())
    }
}

/// OpenAI-compatible embedding provider.
pub struct OpenAiEmbeddingProvider {
    config: OpenAiEmbeddingConfig,
    client: Arc<reqwest::Client>,
}

impl OpenAiEmbeddingProvider {
    pub fn new(config: OpenAiEmbeddingConfig) -> DomainResult<Self> {
        if config.max_batch_size == 0 {
            return Err(DomainError::ValidationFailed(
                "max_batch_size must be at least 1".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::EmbeddingProvider(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    pub fn config(&self) -> &OpenAiEmbeddingConfig {
        &self.config
    }

    async fn call_embeddings_api(&self, texts: Vec<String>) -> DomainResult<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.config.base_url);
        let expected = texts.len();

        let request_body = EmbeddingsRequest {
            model: self.config.model.clone(),
            input: texts,
        };

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body);
        if let Some(api_key) = self.config.get_api_key() {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        tracing::debug!(url = %url, model = %self.config.model, inputs = expected, "calling embeddings API");

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::EmbeddingProvider(format!("Embedding API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            tracing::warn!(%status, "embedding API returned an error");
            return Err(DomainError::EmbeddingProvider(format!(
                "Embedding API returned {}: {}",
                status, body
            )));
        }

        let result: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| DomainError::EmbeddingProvider(format!("Failed to parse embedding response: {}", e)))?;

        if result.data.len() != expected {
            return Err(DomainError::EmbeddingProvider(format!(
                "Embedding API returned {} vectors for {} inputs",
                result.data.len(),
                expected
            )));
        }

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        // Every input position must appear exactly once
        if let Some((position, entry)) = data.iter().enumerate().find(|(i, d)| d.index != *i) {
            return Err(DomainError::EmbeddingProvider(format!(
                "Embedding API returned index {} at position {}; indices must cover 0..{}",
                entry.index, position, expected
            )));
        }

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        let results = self.call_embeddings_api(vec![text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::EmbeddingProvider("Empty embedding response".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_vectors = Vec::with_capacity(texts.len());

        // Chunk by max_batch_size; any failed chunk fails the whole batch
        for chunk in texts.chunks(self.config.max_batch_size) {
            let vectors = self.call_embeddings_api(chunk.to_vec()).await?;
            all_vectors.extend(vectors);
        }

        Ok(all_vectors)
    }

    fn max_batch_size(&self) -> usize {
        self.config.max_batch_size
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
