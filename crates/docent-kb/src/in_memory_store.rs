use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::RwLock;

use crate::error::KbError;
use crate::store::{KnowledgeStore, SettingsStore};
use crate::types::{Chunk, Document, Settings};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Store backed by in-process maps. Used by tests and by callers that want
/// the full pipeline without a database file.
pub struct InMemoryStore {
    documents: RwLock<HashMap<String, Document>>,
    chunks: RwLock<HashMap<String, Vec<Chunk>>>,
    settings: RwLock<Settings>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            chunks: RwLock::new(HashMap::new()),
            settings: RwLock::new(Settings::default()),
        }
    }

    /// Replace the settings record.
    ///
    /// # Errors
    /// Returns an error when the settings lock is poisoned.
    pub fn save_settings(&self, settings: Settings) -> Result<(), KbError> {
        let mut current = self.settings.write().map_err(poisoned)?;
        *current = settings;
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore").finish_non_exhaustive()
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> KbError {
    KbError::Other(format!("store lock poisoned: {err}"))
}

impl KnowledgeStore for InMemoryStore {
    fn save_document(&self, document: Document) -> BoxFuture<'_, Result<(), KbError>> {
        Box::pin(async move {
            let mut docs = self.documents.write().map_err(poisoned)?;
            docs.insert(document.id.clone(), document);
            Ok(())
        })
    }

    fn get_document(&self, id: &str) -> BoxFuture<'_, Result<Option<Document>, KbError>> {
        let id = id.to_owned();
        Box::pin(async move {
            let docs = self.documents.read().map_err(poisoned)?;
            Ok(docs.get(&id).cloned())
        })
    }

    fn list_documents(&self) -> BoxFuture<'_, Result<Vec<Document>, KbError>> {
        Box::pin(async move {
            let docs = self.documents.read().map_err(poisoned)?;
            let mut all: Vec<Document> = docs.values().cloned().collect();
            all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            Ok(all)
        })
    }

    fn update_document(&self, document: Document) -> BoxFuture<'_, Result<(), KbError>> {
        Box::pin(async move {
            let mut docs = self.documents.write().map_err(poisoned)?;
            let existing = docs
                .get_mut(&document.id)
                .ok_or_else(|| KbError::DocumentNotFound(document.id.clone()))?;
            existing.name = document.name;
            existing.description = document.description;
            existing.category = document.category;
            existing.keywords = document.keywords;
            existing.active = document.active;
            existing.updated_at = chrono::Utc::now();
            Ok(())
        })
    }

    fn delete_document(&self, id: &str) -> BoxFuture<'_, Result<(), KbError>> {
        let id = id.to_owned();
        Box::pin(async move {
            let mut docs = self.documents.write().map_err(poisoned)?;
            docs.remove(&id)
                .ok_or_else(|| KbError::DocumentNotFound(id.clone()))?;
            let mut chunks = self.chunks.write().map_err(poisoned)?;
            chunks.remove(&id);
            Ok(())
        })
    }

    fn list_active_chunks(&self) -> BoxFuture<'_, Result<Vec<Chunk>, KbError>> {
        Box::pin(async move {
            let docs = self.documents.read().map_err(poisoned)?;
            let chunks = self.chunks.read().map_err(poisoned)?;
            let mut active: Vec<Chunk> = chunks
                .iter()
                .filter(|(doc_id, _)| docs.get(*doc_id).is_some_and(|d| d.active))
                .flat_map(|(_, list)| list.iter().filter(|c| c.active).cloned())
                .collect();
            active.sort_by(|a, b| {
                a.document_id
                    .cmp(&b.document_id)
                    .then(a.ordinal.cmp(&b.ordinal))
            });
            Ok(active)
        })
    }

    fn chunks_for_document(&self, document_id: &str) -> BoxFuture<'_, Result<Vec<Chunk>, KbError>> {
        let document_id = document_id.to_owned();
        Box::pin(async move {
            let chunks = self.chunks.read().map_err(poisoned)?;
            Ok(chunks.get(&document_id).cloned().unwrap_or_default())
        })
    }

    fn replace_chunks_for_document(
        &self,
        document_id: &str,
        new_chunks: Vec<Chunk>,
    ) -> BoxFuture<'_, Result<(), KbError>> {
        let document_id = document_id.to_owned();
        Box::pin(async move {
            let docs = self.documents.read().map_err(poisoned)?;
            if !docs.contains_key(&document_id) {
                return Err(KbError::DocumentNotFound(document_id));
            }
            let mut chunks = self.chunks.write().map_err(poisoned)?;
            chunks.insert(document_id, new_chunks);
            Ok(())
        })
    }

    fn delete_chunks_for_document(&self, document_id: &str) -> BoxFuture<'_, Result<(), KbError>> {
        let document_id = document_id.to_owned();
        Box::pin(async move {
            let mut chunks = self.chunks.write().map_err(poisoned)?;
            chunks.remove(&document_id);
            Ok(())
        })
    }
}

impl SettingsStore for InMemoryStore {
    fn get_settings(&self) -> BoxFuture<'_, Result<Settings, KbError>> {
        Box::pin(async move {
            let settings = self.settings.read().map_err(poisoned)?;
            Ok(settings.clone())
        })
    }
}
