//! Ingestion pipeline: save a document, chunk it, optionally enrich each
//! chunk, then atomically replace the document's chunk set in the store.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::chunker::Chunker;
use crate::error::KbError;
use crate::loader::DocumentLoader;
use crate::store::KnowledgeStore;
use crate::types::{Chunk, Document};

pub type EmbedFuture = Pin<Box<dyn Future<Output = Result<Vec<f32>, KbError>> + Send>>;

/// Optional embedding capability. Vectors are stored alongside chunks as
/// extra signal; nothing in the answering path depends on them.
pub type Enricher = Box<dyn Fn(&str) -> EmbedFuture + Send + Sync>;

/// Counts reported by [`IngestionPipeline::rechunk_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RechunkSummary {
    pub documents: usize,
    pub chunks: usize,
    pub failures: usize,
}

pub struct IngestionPipeline {
    chunker: Chunker,
    store: Arc<dyn KnowledgeStore>,
    enricher: Option<Enricher>,
}

impl IngestionPipeline {
    pub fn new(chunker: Chunker, store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            chunker,
            store,
            enricher: None,
        }
    }

    #[must_use]
    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Ingest a new document: chunk -> enrich -> save -> replace. Returns
    /// the number of chunks produced.
    ///
    /// # Errors
    ///
    /// Returns an error if a store write fails. Enrichment failures are
    /// logged per chunk and never fail the ingest.
    pub async fn ingest(&self, document: Document) -> Result<usize, KbError> {
        let chunks = self.chunk_document(&document).await;
        let count = chunks.len();
        let document_id = document.id.clone();

        self.store.save_document(document).await?;
        self.store
            .replace_chunks_for_document(&document_id, chunks)
            .await?;

        tracing::debug!(document = %document_id, chunks = count, "document ingested");
        Ok(count)
    }

    /// Load a file through `loader` and ingest it under `category`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or a store write fails.
    pub async fn load_and_ingest(
        &self,
        loader: &(dyn DocumentLoader + '_),
        path: &std::path::Path,
        category: &str,
    ) -> Result<usize, KbError> {
        let mut document = loader.load(path).await?;
        document.category = category.to_owned();
        self.ingest(document).await
    }

    /// Re-chunk an existing document from its stored content, atomically
    /// replacing the previous chunk set. Chunk ids are deterministic, so
    /// re-chunking unchanged content reproduces the same chunks.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::DocumentNotFound`] for an unknown id, or an error
    /// if a store access fails.
    pub async fn rechunk(&self, document_id: &str) -> Result<usize, KbError> {
        let document = self
            .store
            .get_document(document_id)
            .await?
            .ok_or_else(|| KbError::DocumentNotFound(document_id.to_owned()))?;
        let chunks = self.chunk_document(&document).await;
        let count = chunks.len();
        self.store
            .replace_chunks_for_document(document_id, chunks)
            .await?;
        Ok(count)
    }

    /// Apply a metadata edit and re-chunk, since category and keywords flow
    /// into chunk tags.
    ///
    /// # Errors
    ///
    /// Returns [`KbError::DocumentNotFound`] for an unknown id, or an error
    /// if a store write fails.
    pub async fn update_metadata(&self, document: Document) -> Result<usize, KbError> {
        let document_id = document.id.clone();
        self.store.update_document(document).await?;
        self.rechunk(&document_id).await
    }

    /// Re-chunk every document. A failing document is logged and skipped;
    /// the batch continues.
    ///
    /// # Errors
    ///
    /// Returns an error only when the document listing itself fails.
    pub async fn rechunk_all(&self) -> Result<RechunkSummary, KbError> {
        let documents = self.store.list_documents().await?;
        let mut summary = RechunkSummary::default();
        for document in documents {
            match self.rechunk(&document.id).await {
                Ok(count) => {
                    summary.documents += 1;
                    summary.chunks += count;
                }
                Err(err) => {
                    tracing::warn!(document = %document.name, error = %err, "re-chunk failed, skipping");
                    summary.failures += 1;
                }
            }
        }
        Ok(summary)
    }

    async fn chunk_document(&self, document: &Document) -> Vec<Chunk> {
        let mut chunks = self.chunker.chunk(
            &document.id,
            &document.content,
            &document.category,
            &document.media_type,
        );
        if let Some(enricher) = &self.enricher {
            for chunk in &mut chunks {
                let text = chunk.question.as_deref().map_or_else(
                    || chunk.answer.clone(),
                    |question| format!("{question} {}", chunk.answer),
                );
                match enricher(&text).await {
                    Ok(vector) => chunk.embedding = Some(vector),
                    Err(err) => {
                        tracing::warn!(chunk = %chunk.id, error = %err, "enrichment failed, storing chunk without embedding");
                    }
                }
            }
        }
        chunks
    }
}
