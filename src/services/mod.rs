//! Service layer: embedding generation, the document store, similarity
//! search and seeding.

pub mod document_service;
pub mod embedding_service;
pub mod search_service;
pub mod seed;

pub use document_service::DocumentService;
pub use embedding_service::{normalize_text, EmbeddingService};
pub use search_service::{cosine_similarity, rank_documents, SearchService};
pub use seed::{sample_documents, seed_documents, seed_sample_documents};
