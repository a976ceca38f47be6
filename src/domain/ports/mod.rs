//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - DocumentRepository: Database operations for documents
//! - EmbeddingProvider: Text-to-vector conversion
//!
//! These traits keep the document store and similarity search independent
//! of a specific database or embedding backend.

pub mod document_repository;
pub mod embedding;

pub use document_repository::DocumentRepository;
pub use embedding::EmbeddingProvider;
