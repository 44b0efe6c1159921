use super::SqliteStore;
use crate::error::KbError;
use crate::types::{Chunk, ChunkKind};

type ChunkRow = (
    String,
    String,
    i64,
    String,
    Option<String>,
    String,
    Option<String>,
    String,
    String,
    Option<String>,
    bool,
    Option<String>,
);

fn parse_kind(s: &str) -> ChunkKind {
    match s {
        "qa" => ChunkKind::Qa,
        "table" => ChunkKind::Table,
        _ => ChunkKind::Section,
    }
}

fn chunk_from_row(row: ChunkRow) -> Chunk {
    Chunk {
        id: row.0,
        document_id: row.1,
        ordinal: usize::try_from(row.2).unwrap_or_default(),
        kind: parse_kind(&row.3),
        question: row.4,
        answer: row.5,
        context: row.6,
        category: row.7,
        keywords: serde_json::from_str(&row.8).unwrap_or_default(),
        source_ref: row.9,
        active: row.10,
        embedding: row.11.as_deref().and_then(|s| serde_json::from_str(s).ok()),
    }
}

impl SqliteStore {
    /// Swap a document's chunk set inside one transaction, so readers see
    /// either the old set or the new set.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::DocumentNotFound`] when the document does not
    /// exist, or an error if any statement fails.
    pub async fn replace_chunks(&self, document_id: &str, chunks: &[Chunk]) -> Result<(), KbError> {
        if self.fetch_document(document_id).await?.is_none() {
            return Err(KbError::DocumentNotFound(document_id.to_owned()));
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM chunks WHERE document_id = ?")
            .bind(document_id)
            .execute(&mut *tx)
            .await?;
        for chunk in chunks {
            let keywords = serde_json::to_string(&chunk.keywords)?;
            let embedding = chunk
                .embedding
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;
            sqlx::query(
                "INSERT INTO chunks \
                 (id, document_id, ordinal, kind, question, answer, context, category, \
                  keywords, source_ref, active, embedding, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'))",
            )
            .bind(&chunk.id)
            .bind(&chunk.document_id)
            .bind(i64::try_from(chunk.ordinal)?)
            .bind(chunk.kind.as_str())
            .bind(&chunk.question)
            .bind(&chunk.answer)
            .bind(&chunk.context)
            .bind(&chunk.category)
            .bind(keywords)
            .bind(&chunk.source_ref)
            .bind(chunk.active)
            .bind(embedding)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Active chunks of active documents, in (document, ordinal) order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_active_chunks(&self) -> Result<Vec<Chunk>, KbError> {
        let rows: Vec<ChunkRow> = sqlx::query_as(
            "SELECT c.id, c.document_id, c.ordinal, c.kind, c.question, c.answer, c.context, \
             c.category, c.keywords, c.source_ref, c.active, c.embedding \
             FROM chunks c JOIN documents d ON c.document_id = d.id \
             WHERE c.active = 1 AND d.active = 1 \
             ORDER BY c.document_id ASC, c.ordinal ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(chunk_from_row).collect())
    }

    /// All chunks of one document regardless of active flags, ordinal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_chunks_for_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<Chunk>, KbError> {
        let rows: Vec<ChunkRow> = sqlx::query_as(
            "SELECT id, document_id, ordinal, kind, question, answer, context, category, \
             keywords, source_ref, active, embedding \
             FROM chunks WHERE document_id = ? ORDER BY ordinal ASC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(chunk_from_row).collect())
    }

    /// Delete all chunks of one document. Deleting for an unknown document
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn remove_chunks_for_document(&self, document_id: &str) -> Result<(), KbError> {
        sqlx::query("DELETE FROM chunks WHERE document_id = ?")
            .bind(document_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
