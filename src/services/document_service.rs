//! Document store service.
//!
//! Owns the rule that a document's embedding always belongs to its current
//! content: embeddings are computed before any write that sets content, and a
//! failed embedding aborts the write.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Document, DocumentUpdate, NewDocument};
use crate::domain::ports::DocumentRepository;
use crate::services::embedding_service::EmbeddingService;

/// Document store combining persistence with embedding generation.
#[derive(Clone)]
pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
    embeddings: EmbeddingService,
}

impl DocumentService {
    pub fn new(repository: Arc<dyn DocumentRepository>, embeddings: EmbeddingService) -> Self {
        Self {
            repository,
            embeddings,
        }
    }

    pub fn embeddings(&self) -> &EmbeddingService {
        &self.embeddings
    }

    /// Embed the content and persist a new document.
    pub async fn insert(&self, document: NewDocument) -> DomainResult<Document> {
        document.validate()?;
        let embedding = self.embeddings.embed(&document.content).await?;
        let stored = self.repository.insert(&document, &embedding).await?;

        tracing::info!(id = stored.id, title = %stored.title, "document inserted");
        Ok(stored)
    }

    /// Embed all contents in one batch and persist the documents together.
    /// Nothing is written unless every document embeds and stores.
    pub async fn insert_many(&self, documents: Vec<NewDocument>) -> DomainResult<Vec<Document>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }
        for document in &documents {
            document.validate()?;
        }

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = self.embeddings.embed_batch(&contents).await?;

        let rows: Vec<(NewDocument, Vec<f32>)> = documents.into_iter().zip(embeddings).collect();
        let stored = self.repository.insert_many(&rows).await?;

        tracing::info!(count = stored.len(), "documents inserted");
        Ok(stored)
    }

    /// All documents, newest first.
    pub async fn get_all(&self) -> DomainResult<Vec<Document>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Option<Document>> {
        self.repository.get(id).await
    }

    /// Delete by id. Deleting an id that does not exist is not an error.
    pub async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        let removed = self.repository.delete(id).await?;
        if removed {
            tracing::info!(id, "document deleted");
        } else {
            tracing::debug!(id, "delete of missing document ignored");
        }
        Ok(())
    }

    /// Apply a partial update. New content is embedded before the write, and
    /// `updated_at` is refreshed even when no field changes.
    pub async fn update(&self, id: i64, update: DocumentUpdate) -> DomainResult<Document> {
        update.validate()?;

        if self.repository.get(id).await?.is_none() {
            return Err(DomainError::DocumentNotFound(id));
        }

        let embedding = match &update.content {
            Some(content) => Some(self.embeddings.embed(content).await?),
            None => None,
        };

        let updated = self
            .repository
            .update(id, &update, embedding.as_deref())
            .await?
            .ok_or(DomainError::DocumentNotFound(id))?;

        tracing::info!(id, reembedded = update.changes_content(), "document updated");
        Ok(updated)
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.repository.count().await
    }
}
