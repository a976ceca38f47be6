//! Similarity search over stored document embeddings.
//!
//! Scores every embedded document against the query with cosine similarity,
//! keeps those strictly above the threshold, and returns the best `limit`
//! hits, most similar first.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Document, ScoredDocument, SearchQuery};
use crate::domain::ports::DocumentRepository;
use crate::services::embedding_service::EmbeddingService;

/// Cosine similarity of two equal-length vectors.
///
/// Returns `None` when either vector has zero magnitude, since the angle is
/// undefined. Callers must check lengths first.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    debug_assert_eq!(a.len(), b.len());

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return None;
    }

    Some(dot / (mag_a * mag_b))
}

/// Score, filter, order and truncate candidates against a query vector.
///
/// Candidates are expected in the store's natural order; ties keep that order.
/// Candidates without an embedding are skipped.
pub fn rank_documents(
    query_embedding: &[f32],
    candidates: Vec<Document>,
    limit: usize,
    threshold: f32,
) -> DomainResult<Vec<ScoredDocument>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut scored = Vec::new();
    for document in candidates {
        let Some(embedding) = document.embedding.as_deref() else {
            continue;
        };
        if embedding.len() != query_embedding.len() {
            return Err(DomainError::DimensionMismatch {
                expected: query_embedding.len(),
                actual: embedding.len(),
            });
        }

        match cosine_similarity(query_embedding, embedding) {
            Some(similarity) if similarity > threshold => {
                scored.push(ScoredDocument { document, similarity });
            }
            _ => {}
        }
    }

    // Stable sort keeps natural order among equal scores
    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    scored.truncate(limit);
    Ok(scored)
}

/// Similarity search service.
#[derive(Clone)]
pub struct SearchService {
    repository: Arc<dyn DocumentRepository>,
    embeddings: EmbeddingService,
}

impl SearchService {
    pub fn new(repository: Arc<dyn DocumentRepository>, embeddings: EmbeddingService) -> Self {
        Self {
            repository,
            embeddings,
        }
    }

    /// Find documents similar to the query text.
    pub async fn search(&self, query: &SearchQuery) -> DomainResult<Vec<ScoredDocument>> {
        let query_embedding = self.embeddings.embed(&query.text).await?;
        let candidates = self.repository.list_embedded().await?;
        let candidate_count = candidates.len();

        let results = rank_documents(&query_embedding, candidates, query.limit, query.threshold)?;

        tracing::debug!(
            candidates = candidate_count,
            matched = results.len(),
            limit = query.limit,
            threshold = query.threshold,
            "similarity search complete"
        );
        Ok(results)
    }

    /// Shorthand for [`SearchService::search`] with explicit parameters.
    pub async fn search_text(
        &self,
        text: &str,
        limit: usize,
        threshold: f32,
    ) -> DomainResult<Vec<ScoredDocument>> {
        self.search(&SearchQuery::new(text).with_limit(limit).with_threshold(threshold))
            .await
    }
}
