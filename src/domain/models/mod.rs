pub mod config;
pub mod document;

pub use config::{
    Config, DatabaseConfig, EmbeddingConfig, EmbeddingProviderKind, LoggingConfig, SearchConfig,
};
pub use document::{
    Document, DocumentUpdate, NewDocument, ScoredDocument, SearchQuery, DEFAULT_SEARCH_LIMIT,
    DEFAULT_SIMILARITY_THRESHOLD,
};
