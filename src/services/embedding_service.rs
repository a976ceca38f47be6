//! Embedding service: the single entry point for turning text into vectors.
//!
//! Normalizes text, rejects empty input, delegates to the injected provider
//! and checks every returned vector against the provider's dimension. There
//! is no caching and no retry; every call reaches the provider.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::EmbeddingProvider;

/// Collapse line breaks to spaces and trim surrounding whitespace.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Embedding service wrapping a swappable provider.
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Provider name for diagnostics.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Embedding dimension.
    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    /// Embed a single text.
    pub async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return Err(DomainError::EmptyInput);
        }

        tracing::debug!(provider = self.provider.name(), chars = normalized.len(), "embedding text");
        let vector = self.provider.embed(&normalized).await?;
        self.check_dimension(&vector)?;
        Ok(vector)
    }

    /// Embed many texts with one provider round trip (chunked only by the
    /// provider's request limit).
    ///
    /// The result has one vector per input in input order. Any empty input or
    /// provider failure fails the whole batch.
    pub async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let normalized: Vec<String> = texts.iter().map(|t| normalize_text(t)).collect();
        if normalized.iter().any(String::is_empty) {
            return Err(DomainError::EmptyInput);
        }

        tracing::debug!(provider = self.provider.name(), inputs = normalized.len(), "embedding batch");
        let vectors = self.provider.embed_batch(&normalized).await?;

        if vectors.len() != normalized.len() {
            return Err(DomainError::EmbeddingProvider(format!(
                "Provider returned {} vectors for {} inputs",
                vectors.len(),
                normalized.len()
            )));
        }
        for vector in &vectors {
            self.check_dimension(vector)?;
        }

        Ok(vectors)
    }

    fn check_dimension(&self, vector: &[f32]) -> DomainResult<()> {
        let expected = self.provider.dimension();
        if vector.len() != expected {
            return Err(DomainError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records what reaches the provider; vectors encode the text length.
    #[derive(Default)]
    struct RecordingProvider {
        seen: Mutex<Vec<String>>,
        batch_calls: Mutex<usize>,
        fail: bool,
        width: Option<usize>,
    }

    impl RecordingProvider {
        fn vector_for(&self, text: &str) -> Vec<f32> {
            let mut v = vec![0.0; self.width.unwrap_or(4)];
            v[0] = text.len() as f32;
            v
        }
    }

    #[async_trait]
    impl EmbeddingProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn dimension(&self) -> usize {
            4
        }

        async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
            self.seen.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(DomainError::EmbeddingProvider("quota exceeded".to_string()));
            }
            Ok(self.vector_for(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
            *self.batch_calls.lock().unwrap() += 1;
            self.seen.lock().unwrap().extend(texts.iter().cloned());
            if self.fail {
                return Err(DomainError::EmbeddingProvider("quota exceeded".to_string()));
            }
            Ok(texts.iter().map(|t| self.vector_for(t)).collect())
        }

        fn max_batch_size(&self) -> usize {
            16
        }
    }

    fn service(provider: RecordingProvider) -> (EmbeddingService, Arc<RecordingProvider>) {
        let provider = Arc::new(provider);
        (EmbeddingService::new(provider.clone()), provider)
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hello\nworld  "), "hello world");
        assert_eq!(normalize_text("a\r\nb\rc"), "a b c");
        assert_eq!(normalize_text("\n\n"), "");
        assert_eq!(normalize_text("keep  inner   spacing"), "keep  inner   spacing");
    }

    #[tokio::test]
    async fn test_embed_sends_normalized_text() {
        let (service, provider) = service(RecordingProvider::default());

        let vector = service.embed("\n  line one\nline two \n").await.unwrap();
        assert_eq!(vector.len(), 4);
        assert_eq!(provider.seen.lock().unwrap().as_slice(), ["line one line two"]);
    }

    #[tokio::test]
    async fn test_embed_empty_inputs_fail_without_provider_call() {
        let (service, provider) = service(RecordingProvider::default());

        for text in ["", "   ", "\n\n"] {
            assert!(matches!(service.embed(text).await, Err(DomainError::EmptyInput)));
        }
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_embed_provider_error_is_surfaced() {
        let (service, provider) = service(RecordingProvider {
            fail: true,
            ..Default::default()
        });

        let result = service.embed("hello").await;
        assert!(matches!(result, Err(DomainError::EmbeddingProvider(_))));
        // single attempt, no retry
        assert_eq!(provider.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_embed_wrong_width_rejected() {
        let (service, _) = service(RecordingProvider {
            width: Some(3),
            ..Default::default()
        });

        let result = service.embed("hello").await;
        assert!(matches!(
            result,
            Err(DomainError::DimensionMismatch { expected: 4, actual: 3 })
        ));
    }

    #[tokio::test]
    async fn test_embed_does_not_cache() {
        let (service, provider) = service(RecordingProvider::default());

        service.embed("same").await.unwrap();
        service.embed("same").await.unwrap();
        assert_eq!(provider.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_order_in_one_call() {
        let (service, provider) = service(RecordingProvider::default());

        let texts = vec!["a".to_string(), "bbb".to_string(), "bb\n".to_string()];
        let vectors = service.embed_batch(&texts).await.unwrap();

        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0][0], 1.0);
        assert_eq!(vectors[1][0], 3.0);
        assert_eq!(vectors[2][0], 2.0);
        assert_eq!(*provider.batch_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_embed_batch_empty_item_fails_whole_batch() {
        let (service, provider) = service(RecordingProvider::default());

        let texts = vec!["fine".to_string(), " \n ".to_string()];
        assert!(matches!(service.embed_batch(&texts).await, Err(DomainError::EmptyInput)));
        assert_eq!(*provider.batch_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_embed_batch_failure_is_atomic() {
        let (service, _) = service(RecordingProvider {
            fail: true,
            ..Default::default()
        });

        let texts = vec!["one".to_string(), "two".to_string()];
        assert!(matches!(
            service.embed_batch(&texts).await,
            Err(DomainError::EmbeddingProvider(_))
        ));
    }

    #[tokio::test]
    async fn test_embed_batch_empty_list() {
        let (service, provider) = service(RecordingProvider::default());
        assert!(service.embed_batch(&[]).await.unwrap().is_empty());
        assert_eq!(*provider.batch_calls.lock().unwrap(), 0);
    }
}
