//! Document domain model.
//!
//! A document is the only persisted entity: a titled piece of content with an
//! optional source URL and the embedding vector derived from its content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Default number of results returned by a similarity search.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Default similarity a document must exceed to be returned.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.5;

/// A stored document with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier, never reused.
    pub id: i64,
    pub title: String,
    /// Content exactly as supplied by the caller.
    pub content: String,
    pub url: Option<String>,
    /// Embedding of the normalized content. `None` only for rows that never went
    /// through the store's insert path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Width of the stored embedding, if one is present.
    pub fn embedding_dimension(&self) -> Option<usize> {
        self.embedding.as_ref().map(Vec::len)
    }
}

/// Input for inserting a new document. The embedding is computed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl NewDocument {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Check the fields the store does not derive itself.
    pub fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)
    }
}

/// Partial update of a document. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub title: Option<String>,
    /// New content; triggers embedding regeneration.
    pub content: Option<String>,
    /// `Some(None)` clears the URL, `None` leaves it as is.
    pub url: Option<Option<String>>,
}

impl DocumentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(Some(url.into()));
        self
    }

    pub fn clear_url(mut self) -> Self {
        self.url = Some(None);
        self
    }

    pub fn changes_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn validate(&self) -> DomainResult<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

/// A search hit: the document and its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub similarity: f32,
}

/// Parameters of a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub limit: usize,
    /// Exclusive lower bound on similarity.
    pub threshold: f32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::ValidationFailed(
            "Document title cannot be empty".to_string(),
        ));
    }
    Ok(())
}
