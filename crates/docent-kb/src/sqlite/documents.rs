use chrono::{DateTime, Utc};

use super::SqliteStore;
use crate::error::KbError;
use crate::types::Document;

type DocumentRow = (
    String,
    String,
    String,
    String,
    i64,
    String,
    String,
    String,
    bool,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

fn document_from_row(row: DocumentRow) -> Document {
    Document {
        id: row.0,
        name: row.1,
        content: row.2,
        media_type: row.3,
        size_bytes: row.4,
        description: row.5,
        category: row.6,
        keywords: serde_json::from_str(&row.7).unwrap_or_default(),
        active: row.8,
        uploaded_by: row.9,
        created_at: row.10,
        updated_at: row.11,
    }
}

impl SqliteStore {
    /// Insert a new document row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including on a duplicate id.
    pub async fn insert_document(&self, document: &Document) -> Result<(), KbError> {
        let keywords = serde_json::to_string(&document.keywords)?;
        sqlx::query(
            "INSERT INTO documents \
             (id, name, content, media_type, size_bytes, description, category, keywords, \
              active, uploaded_by, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&document.id)
        .bind(&document.name)
        .bind(&document.content)
        .bind(&document.media_type)
        .bind(document.size_bytes)
        .bind(&document.description)
        .bind(&document.category)
        .bind(keywords)
        .bind(document.active)
        .bind(&document.uploaded_by)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fetch a single document by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_document(&self, id: &str) -> Result<Option<Document>, KbError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            "SELECT id, name, content, media_type, size_bytes, description, category, keywords, \
             active, uploaded_by, created_at, updated_at \
             FROM documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(document_from_row))
    }

    /// All documents, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_documents(&self) -> Result<Vec<Document>, KbError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            "SELECT id, name, content, media_type, size_bytes, description, category, keywords, \
             active, uploaded_by, created_at, updated_at \
             FROM documents ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(document_from_row).collect())
    }

    /// Update a document's metadata. Content, media type, and size are
    /// immutable once saved.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::DocumentNotFound`] when no row matches, or an
    /// error if the update fails.
    pub async fn update_document_metadata(&self, document: &Document) -> Result<(), KbError> {
        let keywords = serde_json::to_string(&document.keywords)?;
        let result = sqlx::query(
            "UPDATE documents SET name = ?, description = ?, category = ?, keywords = ?, \
             active = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&document.name)
        .bind(&document.description)
        .bind(&document.category)
        .bind(keywords)
        .bind(document.active)
        .bind(Utc::now())
        .bind(&document.id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(KbError::DocumentNotFound(document.id.clone()));
        }
        Ok(())
    }

    /// Delete a document; its chunks go with it via `ON DELETE CASCADE`.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::DocumentNotFound`] when no row matches, or an
    /// error if the delete fails.
    pub async fn remove_document(&self, id: &str) -> Result<(), KbError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(KbError::DocumentNotFound(id.to_owned()));
        }
        Ok(())
    }
}
