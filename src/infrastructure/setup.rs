//! Project setup and service wiring
//!
//! Handles:
//! - Configuration directory and default config file creation
//! - Database creation with migrations applied
//! - Building the document and search services from a loaded `Config`

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::adapters::embeddings::build_provider;
use crate::adapters::sqlite::{initialize_database, PoolConfig, SqliteDocumentRepository};
use crate::domain::models::Config;
use crate::infrastructure::config::CONFIG_DIR;
use crate::services::{DocumentService, EmbeddingService, SearchService};

/// Default configuration template content
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# docrag configuration
# Override settings by editing this file, adding .docrag/local.yaml, or
# setting environment variables with the DOCRAG_ prefix
#
# Example environment variables:
#   export DOCRAG_DATABASE__PATH=/custom/path/docrag.db
#   export DOCRAG_EMBEDDING__MODEL=text-embedding-3-small
#   export DOCRAG_LOGGING__LEVEL=debug

# Database configuration
database:
  # Path to SQLite database file (project-local)
  path: ".docrag/docrag.db"

  # Maximum number of database connections in pool
  max_connections: 5

# Logging configuration
logging:
  # Log level: trace, debug, info, warn, error
  level: "warn"

  # Log format: json, pretty
  format: "pretty"

  # Directory for daily rolling JSON log files (unset = stderr only)
  # log_dir: ".docrag/logs"

# Embedding provider
embedding:
  # openai: any OpenAI-compatible /embeddings endpoint (OpenAI, Ollama, ...)
  # hashing: deterministic offline embeddings, no network
  provider: "openai"

  base_url: "http://localhost:11434/v1"
  model: "nomic-embed-text:latest"

  # API key; falls back to OPENAI_API_KEY. Leave unset for Ollama.
  # api_key: "sk-..."

  # Vector width of the model. Fixed once documents are stored.
  dimension: 768

  timeout_secs: 30
  max_batch_size: 512

# Similarity search defaults
search:
  default_limit: 5
  default_threshold: 0.5
"#;

/// Setup paths and directories
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub database_file: PathBuf,
}

impl SetupPaths {
    /// Get setup paths for the current directory
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::in_dir(&current_dir))
    }

    /// Setup paths rooted at `root`
    pub fn in_dir(root: &Path) -> Self {
        let config_dir = root.join(CONFIG_DIR);
        Self {
            config_file: config_dir.join("config.yaml"),
            database_file: config_dir.join("docrag.db"),
            config_dir,
        }
    }

    /// Check if the project is already initialized
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists() && self.database_file.exists()
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths) -> Result<()> {
    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")
}

/// Write the default configuration file. Returns whether a file was written.
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<bool> {
    if paths.config_file.exists() && !force {
        return Ok(false);
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE)
        .context("Failed to write config file")?;
    Ok(true)
}

/// Services built from configuration, sharing one pool.
pub struct AppContext {
    pub pool: SqlitePool,
    pub documents: DocumentService,
    pub search: SearchService,
    pub config: Config,
}

impl AppContext {
    /// Open the database, run pending migrations and build the services.
    ///
    /// Fails when the configured dimension differs from the one recorded in
    /// the database.
    pub async fn open(config: Config) -> Result<Self> {
        let pool_config = PoolConfig {
            max_connections: config.database.max_connections,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(3),
        };
        let pool = initialize_database(&config.database.url(), Some(pool_config))
            .await
            .with_context(|| format!("Failed to open database at {}", config.database.path))?;

        Self::with_pool(pool, config).await
    }

    /// Build the services on an existing, migrated pool.
    pub async fn with_pool(pool: SqlitePool, config: Config) -> Result<Self> {
        let repository = SqliteDocumentRepository::open(pool.clone(), config.embedding.dimension)
            .await
            .context("Failed to open document store")?;
        let repository = Arc::new(repository);

        let provider = build_provider(&config.embedding)
            .context("Failed to build embedding provider")?;
        let embeddings = EmbeddingService::new(provider);

        tracing::debug!(
            provider = embeddings.provider_name(),
            dimension = embeddings.dimension(),
            "services initialized"
        );

        Ok(Self {
            documents: DocumentService::new(repository.clone(), embeddings.clone()),
            search: SearchService::new(repository, embeddings),
            pool,
            config,
        })
    }

    /// Close the pool, flushing pending writes.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
