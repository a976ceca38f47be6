//! Seed the store with the built-in sample documents.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::progress::{progress_for, ProgressBarExt};
use crate::cli::output::{output, CommandOutput};
use crate::cli::commands::document::DocumentOutput;
use crate::domain::models::Config;
use crate::infrastructure::AppContext;
use crate::services::{sample_documents, seed_documents};

#[derive(Args, Debug)]
pub struct SeedArgs {}

#[derive(Debug, serde::Serialize)]
pub struct SeedOutput {
    pub added: usize,
    pub documents: Vec<DocumentOutput>,
}

impl CommandOutput for SeedOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("Seeded {} document(s):", self.added)];
        for doc in &self.documents {
            lines.push(format!("  {:>4}  {}", doc.id, doc.title));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: SeedArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    let documents = sample_documents();
    let pb = progress_for(documents.len() as u64, json_mode);

    let result = seed_documents(&ctx.documents, documents, |doc| {
        pb.set_message(doc.title.clone());
        pb.inc(1);
    })
    .await;

    let added = match result {
        Ok(added) => {
            pb.finish_success("seeding complete");
            added
        }
        Err(err) => {
            pb.finish_error("seeding failed");
            ctx.close().await;
            return Err(err).context("Failed to seed sample documents");
        }
    };

    output(
        &SeedOutput {
            added: added.len(),
            documents: added.iter().map(DocumentOutput::from).collect(),
        },
        json_mode,
    );

    ctx.close().await;
    Ok(())
}
