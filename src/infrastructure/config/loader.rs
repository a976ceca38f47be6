use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::{Config, EmbeddingProviderKind};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    #[error("Invalid max_batch_size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid default_threshold: {0}. Must be between -1 and 1")]
    InvalidThreshold(f32),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Project directory holding config files and the default database.
pub const CONFIG_DIR: &str = ".docrag";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .docrag/config.yaml (project config, created by init)
    /// 3. .docrag/local.yaml (project local overrides, optional)
    /// 4. Environment variables (DOCRAG_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed("DOCRAG_").split("__"))
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("DOCRAG_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Database
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        // Logging
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        // Embedding
        let embedding = &config.embedding;
        if embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(embedding.dimension));
        }

        if embedding.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(embedding.max_batch_size));
        }

        if embedding.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(embedding.timeout_secs));
        }

        if embedding.provider == EmbeddingProviderKind::Openai {
            if embedding.base_url.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "embedding.base_url cannot be empty".to_string(),
                ));
            }
            if embedding.model.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "embedding.model cannot be empty".to_string(),
                ));
            }
        }

        // Search
        let threshold = config.search.default_threshold;
        if !(-1.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, ".docrag/docrag.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.search.default_limit, 5);
        assert!((config.search.default_threshold - 0.5).abs() < f32::EPSILON);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
database:
  path: /custom/path.db
  max_connections: 2
logging:
  level: debug
  format: json
embedding:
  provider: openai
  base_url: https://api.openai.com/v1
  model: text-embedding-3-small
  dimension: 1536
search:
  default_limit: 3
  default_threshold: 0.3
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.database.path, "/custom/path.db");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.embedding.dimension, 1536);
        assert_eq!(config.embedding.timeout_secs, 30);
        assert_eq!(config.search.default_limit, 3);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            _ => panic!("Expected InvalidLogLevel error"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            _ => panic!("Expected InvalidLogFormat error"),
        }
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.database.path = String::new();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDatabasePath)
        ));
    }

    #[test]
    fn test_validate_zero_max_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxConnections(0))
        ));
    }

    #[test]
    fn test_validate_zero_dimension() {
        let mut config = Config::default();
        config.embedding.dimension = 0;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidDimension(0))
        ));
    }

    #[test]
    fn test_validate_zero_batch_and_timeout() {
        let mut config = Config::default();
        config.embedding.max_batch_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBatchSize(0))
        ));

        let mut config = Config::default();
        config.embedding.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_openai_requires_model() {
        let mut config = Config::default();
        config.embedding.model = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ValidationFailed(_))
        ));

        // the hashing provider ignores model and base_url
        config.embedding.provider = EmbeddingProviderKind::Hashing;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut config = Config::default();
        config.search.default_threshold = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidThreshold(_))
        ));

        config.search.default_threshold = -1.0;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_env_override() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "embedding:\n  provider: hashing\n  dimension: 64").unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("DOCRAG_EMBEDDING__DIMENSION", Some("128")),
                ("DOCRAG_LOGGING__LEVEL", Some("debug")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.embedding.provider, EmbeddingProviderKind::Hashing);
                assert_eq!(config.embedding.dimension, 128, "env should win over file");
                assert_eq!(config.logging.level, "debug");
            },
        );
    }

    #[test]
    fn test_hierarchical_merging() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "search:\n  default_limit: 8\nlogging:\n  level: info\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "search:\n  default_limit: 2\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.search.default_limit, 2, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }
}
