//! Command-line interface.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::document::{AddArgs, DeleteArgs, ShowArgs, UpdateArgs};
use crate::cli::commands::embed::EmbedArgs;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::search::SearchArgs;
use crate::cli::commands::seed::SeedArgs;
use crate::domain::DomainError;

#[derive(Parser, Debug)]
#[command(name = "docrag")]
#[command(about = "Document store with embeddings and similarity search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .docrag/
    #[arg(long, global = true, env = "DOCRAG_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default config and create the database
    Init(InitArgs),
    /// Add a document (its content is embedded)
    Add(AddArgs),
    /// List all documents, newest first
    List,
    /// Show one document
    Show(ShowArgs),
    /// Update a document's title, content or URL
    Update(UpdateArgs),
    /// Delete a document
    Delete(DeleteArgs),
    /// Find documents similar to a query
    Search(SearchArgs),
    /// Insert the built-in sample documents
    Seed(SeedArgs),
    /// Embed a text and print the vector
    Embed(EmbedArgs),
}

#[derive(Debug, serde::Serialize)]
struct ErrorOutput {
    error: String,
    kind: &'static str,
}

fn error_kind(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<DomainError>() {
        Some(DomainError::EmptyInput) => "empty_input",
        Some(DomainError::EmbeddingProvider(_)) => "embedding_provider",
        Some(DomainError::DimensionMismatch { .. }) => "dimension_mismatch",
        Some(DomainError::DocumentNotFound(_)) => "not_found",
        Some(DomainError::ValidationFailed(_)) => "validation",
        Some(DomainError::DatabaseError(_)) => "persistence",
        Some(DomainError::SerializationError(_)) => "serialization",
        None => "error",
    }
}

/// Print the error (with its cause chain) and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let out = ErrorOutput {
            error: format!("{err:#}"),
            kind: error_kind(&err),
        };
        eprintln!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from([
            "docrag", "--json", "search", "react project", "--limit", "1", "--threshold", "0.3",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "react project");
                assert_eq!(args.limit, Some(1));
                assert_eq!(args.threshold, Some(0.3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_update_url_conflicts_with_clear() {
        let result = Cli::try_parse_from([
            "docrag", "update", "4", "--url", "https://x", "--clear-url",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_kind_sees_through_context() {
        let err = Err::<(), _>(DomainError::DocumentNotFound(9))
            .context("Failed to update")
            .unwrap_err();
        assert_eq!(error_kind(&err), "not_found");
        assert_eq!(error_kind(&anyhow::anyhow!("plain")), "error");
    }
}
