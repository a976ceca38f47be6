//! Deterministic feature-hashing embedding provider.
//!
//! Maps each lowercase alphanumeric token to a signed bucket of a fixed-width
//! vector and L2-normalizes the result. Texts that share words get positive
//! cosine similarity, identical texts get identical vectors, and nothing
//! leaves the process. Useful for offline runs and tests; it captures lexical
//! overlap only, not meaning.

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::EmbeddingProvider;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Offline embedding provider based on the hashing trick.
#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimension: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimension: usize) -> DomainResult<Self> {
        if dimension == 0 {
            return Err(DomainError::ValidationFailed(
                "Hashing embedding dimension must be at least 1".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    /// Compute the embedding for a text. Same text, same vector.
    pub fn generate(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0_f32; self.dimension];

        for token in tokenize(text) {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        // f64 accumulation keeps the norm stable for wide vectors
        let magnitude = embedding
            .iter()
            .map(|x| f64::from(*x) * f64::from(*x))
            .sum::<f64>()
            .sqrt() as f32;

        if magnitude > 1e-10 {
            for val in &mut embedding {
                *val /= magnitude;
            }
        } else {
            // No tokens, or every token cancelled out
            let uniform_val = 1.0 / (self.dimension as f32).sqrt();
            embedding.fill(uniform_val);
        }

        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    fn name(&self) -> &'static str {
        "hashing"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        Ok(self.generate(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.generate(text)).collect())
    }

    fn max_batch_size(&self) -> usize {
        usize::MAX
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}
