//! Similarity search CLI command.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, ScoredDocument, SearchQuery};
use crate::infrastructure::AppContext;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query text
    pub query: String,
    /// Maximum number of results (defaults to search.default_limit)
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Minimum similarity, exclusive (defaults to search.default_threshold)
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: Option<f32>,
}

#[derive(Debug, serde::Serialize)]
pub struct SearchHitOutput {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub similarity: f32,
}

impl From<&ScoredDocument> for SearchHitOutput {
    fn from(hit: &ScoredDocument) -> Self {
        Self {
            id: hit.document.id,
            title: hit.document.title.clone(),
            content: hit.document.content.clone(),
            url: hit.document.url.clone(),
            similarity: hit.similarity,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub limit: usize,
    pub threshold: f32,
    pub results: Vec<SearchHitOutput>,
    #[serde(skip)]
    table: String,
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        if self.results.is_empty() {
            return format!(
                "No documents above similarity {} for \"{}\".",
                self.threshold, self.query
            );
        }
        format!("Top {} match(es) for \"{}\":\n{}", self.results.len(), self.query, self.table)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SearchArgs, config: Config, json_mode: bool) -> Result<()> {
    let limit = args.limit.unwrap_or(config.search.default_limit);
    let threshold = args.threshold.unwrap_or(config.search.default_threshold);
    if !(-1.0..=1.0).contains(&threshold) {
        anyhow::bail!("Threshold must be between -1 and 1, got {threshold}");
    }

    let ctx = AppContext::open(config).await?;

    let query = SearchQuery::new(args.query).with_limit(limit).with_threshold(threshold);
    let results = ctx.search.search(&query).await.context("Search failed")?;

    let table = if json_mode {
        String::new()
    } else {
        TableFormatter::new().format_search_results(&results)
    };

    output(
        &SearchOutput {
            query: query.text,
            limit,
            threshold,
            results: results.iter().map(SearchHitOutput::from).collect(),
            table,
        },
        json_mode,
    );

    ctx.close().await;
    Ok(())
}
