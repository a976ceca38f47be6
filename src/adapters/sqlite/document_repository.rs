//! SQLite implementation of the DocumentRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Document, DocumentUpdate, NewDocument};
use crate::domain::ports::DocumentRepository;

use super::{bytes_to_embedding, embedding_to_bytes, format_datetime, parse_datetime};

const DIMENSION_KEY: &str = "embedding_dimension";

const INSERT_SQL: &str = r#"INSERT INTO documents (title, content, url, embedding, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
    RETURNING id, title, content, url, embedding, created_at, updated_at"#;

/// Document store backed by one SQLite table.
///
/// Every embedding written through this repository must have the width
/// recorded in `vector_config` when the repository was opened.
#[derive(Clone)]
pub struct SqliteDocumentRepository {
    pool: SqlitePool,
    dimension: usize,
}

impl SqliteDocumentRepository {
    /// Open the repository for a deployment with the given embedding width.
    ///
    /// The first open records the width. Later opens with a different width fail
    /// with `DimensionMismatch`, since stored vectors would no longer be comparable.
    pub async fn open(pool: SqlitePool, dimension: usize) -> DomainResult<Self> {
        let stored: Option<String> = sqlx::query_scalar("SELECT value FROM vector_config WHERE key = ?")
            .bind(DIMENSION_KEY)
            .fetch_optional(&pool)
            .await?;

        match stored {
            Some(value) => {
                let stored_dimension: usize = value.parse().map_err(|_| {
                    DomainError::SerializationError(format!("Invalid stored embedding dimension: {value}"))
                })?;
                if stored_dimension != dimension {
                    return Err(DomainError::DimensionMismatch {
                        expected: stored_dimension,
                        actual: dimension,
                    });
                }
            }
            None => {
                sqlx::query("INSERT INTO vector_config (key, value) VALUES (?, ?)")
                    .bind(DIMENSION_KEY)
                    .bind(dimension.to_string())
                    .execute(&pool)
                    .await?;
                tracing::info!(dimension, "recorded embedding dimension");
            }
        }

        Ok(Self { pool, dimension })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn check_dimension(&self, embedding: &[f32]) -> DomainResult<()> {
        if embedding.len() != self.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn insert(&self, document: &NewDocument, embedding: &[f32]) -> DomainResult<Document> {
        self.check_dimension(embedding)?;
        let now = format_datetime(&Utc::now());

        let row: DocumentRow = sqlx::query_as(INSERT_SQL)
            .bind(&document.title)
            .bind(&document.content)
            .bind(&document.url)
            .bind(embedding_to_bytes(embedding))
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn insert_many(&self, documents: &[(NewDocument, Vec<f32>)]) -> DomainResult<Vec<Document>> {
        for (_, embedding) in documents {
            self.check_dimension(embedding)?;
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(documents.len());

        for (document, embedding) in documents {
            let now = format_datetime(&Utc::now());
            let row: DocumentRow = sqlx::query_as(INSERT_SQL)
                .bind(&document.title)
                .bind(&document.content)
                .bind(&document.url)
                .bind(embedding_to_bytes(embedding))
                .bind(&now)
                .bind(&now)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row.try_into()?);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Document>> {
        let row: Option<DocumentRow> = sqlx::query_as("SELECT * FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Document>> {
        let rows: Vec<DocumentRow> =
            sqlx::query_as("SELECT * FROM documents ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_embedded(&self) -> DomainResult<Vec<Document>> {
        let rows: Vec<DocumentRow> =
            sqlx::query_as("SELECT * FROM documents WHERE embedding IS NOT NULL ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(
        &self,
        id: i64,
        update: &DocumentUpdate,
        embedding: Option<&[f32]>,
    ) -> DomainResult<Option<Document>> {
        if update.content.is_some() != embedding.is_some() {
            return Err(DomainError::ValidationFailed(
                "Content and embedding must be updated together".to_string(),
            ));
        }
        if let Some(embedding) = embedding {
            self.check_dimension(embedding)?;
        }

        let mut sql = String::from("UPDATE documents SET updated_at = ?");
        if update.title.is_some() {
            sql.push_str(", title = ?");
        }
        if update.content.is_some() {
            sql.push_str(", content = ?, embedding = ?");
        }
        if update.url.is_some() {
            sql.push_str(", url = ?");
        }
        sql.push_str(
            " WHERE id = ? RETURNING id, title, content, url, embedding, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, DocumentRow>(&sql).bind(format_datetime(&Utc::now()));
        if let Some(title) = &update.title {
            q = q.bind(title);
        }
        if let (Some(content), Some(embedding)) = (&update.content, embedding) {
            q = q.bind(content).bind(embedding_to_bytes(embedding));
        }
        if let Some(url) = &update.url {
            q = q.bind(url);
        }

        let row = q.bind(id).fetch_optional(&self.pool).await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> DomainResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: i64,
    title: String,
    content: String,
    url: Option<String>,
    embedding: Option<Vec<u8>>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<DocumentRow> for Document {
    type Error = DomainError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let embedding = row.embedding.as_deref().map(bytes_to_embedding).transpose()?;

        Ok(Document {
            id: row.id,
            title: row.title,
            content: row.content,
            url: row.url,
            embedding,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
