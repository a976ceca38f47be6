//! Property-based tests for embedding and search invariants
//!
//! Tests the following properties:
//! 1. Any non-blank text embeds to exactly the configured dimension
//! 2. Whitespace-only text is rejected before reaching the provider
//! 3. Ranked results never exceed the limit, are sorted descending, and
//!    all score strictly above the threshold
//! 4. Cosine similarity is symmetric and bounded by [-1, 1]
//! 5. Deleting twice leaves the store as deleting once

use std::sync::Arc;

use chrono::Utc;
use docrag::adapters::embeddings::HashingEmbeddingProvider;
use docrag::services::{cosine_similarity, rank_documents};
use docrag::{Document, DomainError, EmbeddingService, NewDocument};
use proptest::prelude::*;

mod common;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime")
}

/// Text with at least one visible character
fn non_blank_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \n]{0,3}[a-zA-Z0-9.,!?'-]{1,40}[a-zA-Z0-9 .,!?'\n-]{0,200}")
        .expect("Valid regex")
}

fn blank_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \n\r\t]{0,20}").expect("Valid regex")
}

fn vector_strategy(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0f32, dim..=dim)
}

fn document(id: i64, embedding: Vec<f32>) -> Document {
    let now = Utc::now();
    Document {
        id,
        title: format!("doc {id}"),
        content: format!("content {id}"),
        url: None,
        embedding: Some(embedding),
        created_at: now,
        updated_at: now,
    }
}

proptest! {
    #[test]
    fn proptest_embedding_has_configured_dimension(
        text in non_blank_text_strategy(),
        dim in 1usize..256,
    ) {
        let service = EmbeddingService::new(Arc::new(HashingEmbeddingProvider::new(dim).unwrap()));
        let embedding = runtime().block_on(service.embed(&text)).unwrap();
        prop_assert_eq!(embedding.len(), dim);
    }

    #[test]
    fn proptest_blank_text_is_rejected(text in blank_text_strategy()) {
        let service = EmbeddingService::new(Arc::new(HashingEmbeddingProvider::new(8).unwrap()));
        let result = runtime().block_on(service.embed(&text));
        prop_assert!(matches!(result, Err(DomainError::EmptyInput)));
    }

    #[test]
    fn proptest_ranking_invariants(
        query in vector_strategy(6),
        candidates in prop::collection::vec(vector_strategy(6), 0..30),
        limit in 0usize..10,
        threshold in -1.0f32..1.0f32,
    ) {
        let docs: Vec<Document> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, v)| document(i as i64 + 1, v))
            .collect();

        let results = rank_documents(&query, docs, limit, threshold).unwrap();

        prop_assert!(results.len() <= limit);
        for hit in &results {
            prop_assert!(hit.similarity > threshold);
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
            // equal scores keep ascending id order
            if pair[0].similarity == pair[1].similarity {
                prop_assert!(pair[0].document.id < pair[1].document.id);
            }
        }
    }

    #[test]
    fn proptest_cosine_symmetric_and_bounded(
        a in vector_strategy(12),
        b in vector_strategy(12),
    ) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert_eq!(ab.is_some(), ba.is_some());
        if let (Some(ab), Some(ba)) = (ab, ba) {
            prop_assert!((ab - ba).abs() < 1e-6);
            prop_assert!((-1.0 - 1e-5..=1.0 + 1e-5).contains(&ab));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn proptest_double_delete_equals_single(
        contents in prop::collection::vec("[a-z]{1,12}( [a-z]{1,12}){0,4}", 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        runtime().block_on(async {
            let store = common::setup_hashing_store(16).await;
            let mut ids = Vec::new();
            for content in &contents {
                let doc = store.documents.insert(NewDocument::new("t", content.clone())).await.unwrap();
                ids.push(doc.id);
            }

            let victim = ids[pick.index(ids.len())];
            store.documents.delete_by_id(victim).await.unwrap();
            let after_once = store.documents.get_all().await.unwrap();

            store.documents.delete_by_id(victim).await.unwrap();
            let after_twice = store.documents.get_all().await.unwrap();

            assert_eq!(after_once, after_twice);
            assert_eq!(after_twice.len(), contents.len() - 1);
            assert!(after_twice.iter().all(|d| d.id != victim));
        });
    }
}
