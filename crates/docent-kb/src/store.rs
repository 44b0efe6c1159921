//! Dyn-compatible store traits the assistant and pipeline depend on.
//!
//! Methods return boxed futures so implementations can be held behind
//! `Arc<dyn KnowledgeStore>` without generics leaking into callers.

use std::future::Future;
use std::pin::Pin;

use crate::error::KbError;
use crate::types::{Chunk, Document, Settings};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait KnowledgeStore: Send + Sync {
    fn save_document(&self, document: Document) -> BoxFuture<'_, Result<(), KbError>>;

    fn get_document(&self, id: &str) -> BoxFuture<'_, Result<Option<Document>, KbError>>;

    fn list_documents(&self) -> BoxFuture<'_, Result<Vec<Document>, KbError>>;

    /// Update document metadata: name, description, category, keywords, and
    /// the active flag. Content is immutable once saved.
    fn update_document(&self, document: Document) -> BoxFuture<'_, Result<(), KbError>>;

    /// Delete a document and every chunk derived from it.
    fn delete_document(&self, id: &str) -> BoxFuture<'_, Result<(), KbError>>;

    /// Active chunks of active documents, in (document, ordinal) order.
    fn list_active_chunks(&self) -> BoxFuture<'_, Result<Vec<Chunk>, KbError>>;

    fn chunks_for_document(&self, document_id: &str) -> BoxFuture<'_, Result<Vec<Chunk>, KbError>>;

    /// Atomically swap a document's chunks: readers observe either the old
    /// set or the new set, never a mix.
    fn replace_chunks_for_document(
        &self,
        document_id: &str,
        chunks: Vec<Chunk>,
    ) -> BoxFuture<'_, Result<(), KbError>>;

    fn delete_chunks_for_document(&self, document_id: &str) -> BoxFuture<'_, Result<(), KbError>>;
}

/// Read-only settings access. Writes go through the concrete store's admin
/// surface, never through the answering path.
pub trait SettingsStore: Send + Sync {
    fn get_settings(&self) -> BoxFuture<'_, Result<Settings, KbError>>;
}
