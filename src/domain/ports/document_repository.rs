use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Document, DocumentUpdate, NewDocument};

/// Repository trait for document persistence.
///
/// Implementations store embeddings alongside content and never compute them;
/// callers pass the embedding that belongs to the content being written.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a new document with its embedding.
    ///
    /// Assigns a fresh id and sets `created_at` and `updated_at` to now.
    async fn insert(&self, document: &NewDocument, embedding: &[f32]) -> DomainResult<Document>;

    /// Persist several documents in one transaction. Either all rows are
    /// written or none are.
    async fn insert_many(&self, documents: &[(NewDocument, Vec<f32>)]) -> DomainResult<Vec<Document>>;

    /// Get a document by id.
    async fn get(&self, id: i64) -> DomainResult<Option<Document>>;

    /// All documents, newest first.
    async fn list(&self) -> DomainResult<Vec<Document>>;

    /// Documents that carry an embedding, in id order.
    async fn list_embedded(&self) -> DomainResult<Vec<Document>>;

    /// Apply a partial update in a single write and refresh `updated_at`.
    ///
    /// `embedding` must be supplied exactly when `update.content` is. Returns
    /// `None` if no document has this id.
    async fn update(
        &self,
        id: i64,
        update: &DocumentUpdate,
        embedding: Option<&[f32]>,
    ) -> DomainResult<Option<Document>>;

    /// Delete a document by id. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> DomainResult<bool>;

    /// Number of stored documents.
    async fn count(&self) -> DomainResult<u64>;
}
