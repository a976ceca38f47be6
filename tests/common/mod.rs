//! Common test utilities for integration tests
//!
//! Provides in-memory stores wired to deterministic embedding providers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use docrag::adapters::embeddings::HashingEmbeddingProvider;
use docrag::adapters::sqlite::{create_migrated_test_pool, SqliteDocumentRepository};
use docrag::domain::ports::EmbeddingProvider;
use docrag::{DocumentService, DomainError, DomainResult, EmbeddingService, SearchService};

/// Topic axes for [`KeywordProvider`]; a token counts toward an axis when it
/// starts with one of the axis keywords.
const KEYWORD_AXES: [&[&str]; 4] = [
    &["react", "next", "project", "start", "framework"],
    &["database", "schema", "index", "query", "queries", "normaliz"],
    &["typescript", "type", "interface"],
    &["hook", "state", "usestate", "useeffect"],
];

/// Embeds text as keyword counts per topic axis, plus one "other" axis so the
/// vector is never zero. Similar topics point the same way.
pub struct KeywordProvider;

impl KeywordProvider {
    pub const DIMENSION: usize = KEYWORD_AXES.len() + 1;

    pub fn vector(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; Self::DIMENSION];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            for (axis, keywords) in KEYWORD_AXES.iter().enumerate() {
                if keywords.iter().any(|k| token.starts_with(k)) {
                    vector[axis] += 1.0;
                }
            }
        }
        if vector.iter().all(|v| *v == 0.0) {
            vector[KEYWORD_AXES.len()] = 1.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordProvider {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn max_batch_size(&self) -> usize {
        usize::MAX
    }
}

/// Hashing provider that can be switched into failure mode and counts calls.
pub struct FlakyProvider {
    inner: HashingEmbeddingProvider,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            inner: HashingEmbeddingProvider::new(dimension).expect("non-zero dimension"),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::EmbeddingProvider("provider unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EmbeddingProvider for FlakyProvider {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn embed(&self, text: &str) -> DomainResult<Vec<f32>> {
        self.check()?;
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
        self.check()?;
        self.inner.embed_batch(texts).await
    }

    fn max_batch_size(&self) -> usize {
        self.inner.max_batch_size()
    }
}

/// Document and search services over a fresh in-memory database.
pub struct TestStore {
    pub documents: DocumentService,
    pub search: SearchService,
}

pub async fn setup_store(provider: Arc<dyn EmbeddingProvider>) -> TestStore {
    let pool = create_migrated_test_pool()
        .await
        .expect("failed to create test database");
    let repository = SqliteDocumentRepository::open(pool, provider.dimension())
        .await
        .expect("failed to open document store");
    let repository = Arc::new(repository);
    let embeddings = EmbeddingService::new(provider);

    TestStore {
        documents: DocumentService::new(repository.clone(), embeddings.clone()),
        search: SearchService::new(repository, embeddings),
    }
}

pub async fn setup_hashing_store(dimension: usize) -> TestStore {
    let provider = HashingEmbeddingProvider::new(dimension).expect("non-zero dimension");
    setup_store(Arc::new(provider)).await
}
