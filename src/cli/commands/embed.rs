//! Embed a single text and print the vector, without storing anything.

use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::embeddings::build_provider;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::EmbeddingService;

const PREVIEW_LEN: usize = 8;

#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Text to embed
    pub text: String,
    /// Print the full vector instead of a preview
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct EmbedOutput {
    pub provider: String,
    pub dimension: usize,
    pub embedding: Vec<f32>,
    #[serde(skip)]
    full: bool,
}

impl CommandOutput for EmbedOutput {
    fn to_human(&self) -> String {
        let shown = if self.full {
            &self.embedding[..]
        } else {
            &self.embedding[..self.embedding.len().min(PREVIEW_LEN)]
        };
        let values: Vec<String> = shown.iter().map(|v| format!("{v:.6}")).collect();
        let ellipsis = if shown.len() < self.embedding.len() { ", ..." } else { "" };

        format!(
            "Provider: {}\nDimension: {}\n[{}{}]",
            self.provider,
            self.dimension,
            values.join(", "),
            ellipsis
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: EmbedArgs, config: Config, json_mode: bool) -> Result<()> {
    let provider = build_provider(&config.embedding).context("Failed to build embedding provider")?;
    let service = EmbeddingService::new(provider);

    let embedding = service.embed(&args.text).await?;

    output(
        &EmbedOutput {
            provider: service.provider_name().to_string(),
            dimension: embedding.len(),
            embedding,
            full: args.full,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_vectors() {
        let out = EmbedOutput {
            provider: "hashing".to_string(),
            dimension: 10,
            embedding: vec![0.5; 10],
            full: false,
        };
        let human = out.to_human();
        assert!(human.contains("Dimension: 10"));
        assert!(human.ends_with(", ...]"));
        assert_eq!(human.matches("0.500000").count(), PREVIEW_LEN);
    }

    #[test]
    fn test_short_vector_has_no_ellipsis() {
        let out = EmbedOutput {
            provider: "hashing".to_string(),
            dimension: 2,
            embedding: vec![1.0, 0.0],
            full: false,
        };
        assert!(out.to_human().ends_with("[1.000000, 0.000000]"));
    }
}
