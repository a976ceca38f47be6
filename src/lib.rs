//! docrag - document store with vector embeddings and similarity retrieval
//!
//! Stores text documents together with an embedding of their content and
//! answers "which stored documents are most similar to this text" queries,
//! the retrieval half of a retrieval-augmented chat system.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the provider/repository ports
//! - **Adapters** (`adapters`): `SQLite` persistence and embedding providers
//! - **Service Layer** (`services`): embedding, document store, search and seeding
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, wiring
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use docrag::infrastructure::{AppContext, ConfigLoader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = AppContext::open(ConfigLoader::load()?).await?;
//!     let hits = ctx.search.search_text("how do I start a React project", 3, 0.3).await?;
//!     for hit in hits {
//!         println!("{:.3} {}", hit.similarity, hit.document.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, Document, DocumentUpdate, EmbeddingConfig, NewDocument, ScoredDocument, SearchQuery,
};
pub use domain::ports::{DocumentRepository, EmbeddingProvider};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{DocumentService, EmbeddingService, SearchService};
