use serde::{Deserialize, Serialize};

use super::document::{DEFAULT_SEARCH_LIMIT, DEFAULT_SIMILARITY_THRESHOLD};

/// Main configuration structure for docrag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Embedding provider configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Similarity search defaults
    #[serde(default)]
    pub search: SearchConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".docrag/docrag.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl DatabaseConfig {
    /// Connection URL understood by sqlx.
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Which embedding backend to construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// Any OpenAI-compatible `/embeddings` endpoint (OpenAI, Ollama, local servers)
    #[default]
    Openai,
    /// Deterministic offline feature hashing
    Hashing,
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProviderKind,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Embedding model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; falls back to `OPENAI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Vector width produced by the model and stored in the schema
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum texts sent in one provider request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_model() -> String {
    "nomic-embed-text:latest".to_string()
}

const fn default_dimension() -> usize {
    768
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_batch_size() -> usize {
    512
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            dimension: default_dimension(),
            timeout_secs: default_timeout_secs(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// Similarity search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,

    #[serde(default = "default_search_threshold")]
    pub default_threshold: f32,
}

const fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

const fn default_search_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
            default_threshold: default_search_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url() {
        let mut db = DatabaseConfig::default();
        assert_eq!(db.url(), "sqlite:.docrag/docrag.db");

        db.path = "sqlite::memory:".to_string();
        assert_eq!(db.url(), "sqlite::memory:");
    }

    #[test]
    fn test_embedding_defaults_target_local_ollama() {
        let embedding = EmbeddingConfig::default();
        assert_eq!(embedding.provider, EmbeddingProviderKind::Openai);
        assert_eq!(embedding.base_url, "http://localhost:11434/v1");
        assert_eq!(embedding.model, "nomic-embed-text:latest");
        assert_eq!(embedding.dimension, 768);
    }

    #[test]
    fn test_provider_kind_yaml() {
        let config: EmbeddingConfig = serde_yaml::from_str("provider: hashing\ndimension: 64").unwrap();
        assert_eq!(config.provider, EmbeddingProviderKind::Hashing);
        assert_eq!(config.dimension, 64);
        assert_eq!(config.timeout_secs, 30);
    }
}
