//! Document CLI commands: add, list, show, update, delete.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, truncate, CommandOutput, TableFormatter};
use crate::domain::models::{Config, Document, DocumentUpdate, NewDocument};
use crate::domain::DomainError;
use crate::infrastructure::AppContext;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Document title
    #[arg(short, long)]
    pub title: String,
    /// Document content (embedded on insert)
    #[arg(short, long)]
    pub content: String,
    /// Source URL
    #[arg(short, long)]
    pub url: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Document ID
    pub id: i64,
    /// Include the full embedding vector
    #[arg(long)]
    pub embedding: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Document ID
    pub id: i64,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New content (re-embedded)
    #[arg(short, long)]
    pub content: Option<String>,
    /// New source URL
    #[arg(short, long, conflicts_with = "clear_url")]
    pub url: Option<String>,
    /// Remove the source URL
    #[arg(long)]
    pub clear_url: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Document ID
    pub id: i64,
}

#[derive(Debug, serde::Serialize)]
pub struct DocumentOutput {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub url: Option<String>,
    pub embedding_dimension: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub created_at: String,
    pub updated_at: String,
}

impl DocumentOutput {
    fn from_document(doc: &Document, with_embedding: bool) -> Self {
        Self {
            id: doc.id,
            title: doc.title.clone(),
            content: doc.content.clone(),
            url: doc.url.clone(),
            embedding_dimension: doc.embedding_dimension(),
            embedding: if with_embedding { doc.embedding.clone() } else { None },
            created_at: doc.created_at.to_rfc3339(),
            updated_at: doc.updated_at.to_rfc3339(),
        }
    }
}

impl From<&Document> for DocumentOutput {
    fn from(doc: &Document) -> Self {
        Self::from_document(doc, false)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct DocumentListOutput {
    pub documents: Vec<DocumentOutput>,
    pub total: usize,
    #[serde(skip)]
    table: String,
}

impl CommandOutput for DocumentListOutput {
    fn to_human(&self) -> String {
        if self.documents.is_empty() {
            return "No documents found.".to_string();
        }
        format!("Found {} document(s):\n{}", self.total, self.table)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct DocumentDetailOutput {
    pub document: DocumentOutput,
}

impl CommandOutput for DocumentDetailOutput {
    fn to_human(&self) -> String {
        let doc = &self.document;
        let mut lines = vec![
            format!("Document: {}", doc.title),
            format!("ID: {}", doc.id),
            format!("URL: {}", doc.url.as_deref().unwrap_or("-")),
            format!(
                "Embedding: {}",
                doc.embedding_dimension
                    .map_or_else(|| "none".to_string(), |d| format!("{d} dimensions"))
            ),
            format!("Created: {}", doc.created_at),
            format!("Updated: {}", doc.updated_at),
            String::new(),
            doc.content.clone(),
        ];

        if let Some(embedding) = &doc.embedding {
            lines.push(String::new());
            lines.push(format!("{embedding:?}"));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct DocumentActionOutput {
    pub success: bool,
    pub message: String,
    pub document: Option<DocumentOutput>,
}

impl CommandOutput for DocumentActionOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute_add(args: AddArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    let mut new_doc = NewDocument::new(args.title, args.content);
    if let Some(url) = args.url {
        new_doc = new_doc.with_url(url);
    }

    let stored = ctx.documents.insert(new_doc).await.context("Failed to add document")?;

    output(
        &DocumentActionOutput {
            success: true,
            message: format!("Added document {}: {}", stored.id, truncate(&stored.title, 60)),
            document: Some(DocumentOutput::from(&stored)),
        },
        json_mode,
    );

    ctx.close().await;
    Ok(())
}

pub async fn execute_list(config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;
    let documents = ctx.documents.get_all().await.context("Failed to list documents")?;

    let table = if json_mode {
        String::new()
    } else {
        TableFormatter::new().format_documents(&documents)
    };

    output(
        &DocumentListOutput {
            total: documents.len(),
            documents: documents.iter().map(DocumentOutput::from).collect(),
            table,
        },
        json_mode,
    );

    ctx.close().await;
    Ok(())
}

pub async fn execute_show(args: ShowArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    let document = ctx
        .documents
        .get(args.id)
        .await?
        .ok_or(DomainError::DocumentNotFound(args.id))?;

    output(
        &DocumentDetailOutput {
            document: DocumentOutput::from_document(&document, args.embedding),
        },
        json_mode,
    );

    ctx.close().await;
    Ok(())
}

pub async fn execute_update(args: UpdateArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    let mut update = DocumentUpdate::new();
    if let Some(title) = args.title {
        update = update.title(title);
    }
    if let Some(content) = args.content {
        update = update.content(content);
    }
    if let Some(url) = args.url {
        update = update.url(url);
    }
    if args.clear_url {
        update = update.clear_url();
    }

    let reembedded = update.changes_content();
    let updated = ctx.documents.update(args.id, update).await?;

    let message = if reembedded {
        format!("Updated document {} (content re-embedded)", updated.id)
    } else {
        format!("Updated document {}", updated.id)
    };

    output(
        &DocumentActionOutput {
            success: true,
            message,
            document: Some(DocumentOutput::from(&updated)),
        },
        json_mode,
    );

    ctx.close().await;
    Ok(())
}

pub async fn execute_delete(args: DeleteArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = AppContext::open(config).await?;

    ctx.documents
        .delete_by_id(args.id)
        .await
        .context("Failed to delete document")?;

    output(
        &DocumentActionOutput {
            success: true,
            message: format!("Deleted document {}", args.id),
            document: None,
        },
        json_mode,
    );

    ctx.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn document() -> Document {
        let now = Utc::now();
        Document {
            id: 3,
            title: "Understanding React Hooks".to_string(),
            content: "Hooks let you use state.".to_string(),
            url: Some("https://react.dev/learn/hooks".to_string()),
            embedding: Some(vec![0.5, -0.5]),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_document_output_hides_embedding_by_default() {
        let json = serde_json::to_value(DocumentOutput::from(&document())).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["embedding_dimension"], 2);
        assert!(json.get("embedding").is_none());
    }

    #[test]
    fn test_detail_output_with_embedding() {
        let out = DocumentDetailOutput {
            document: DocumentOutput::from_document(&document(), true),
        };
        assert_eq!(out.to_json()["document"]["embedding"][1], -0.5);
        assert!(out.to_human().contains("2 dimensions"));
    }

    #[test]
    fn test_empty_list_output() {
        let out = DocumentListOutput {
            documents: Vec::new(),
            total: 0,
            table: String::new(),
        };
        assert_eq!(out.to_human(), "No documents found.");
        assert_eq!(out.to_json()["total"], 0);
    }
}
