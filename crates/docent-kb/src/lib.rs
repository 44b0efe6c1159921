//! Knowledge base for Docent: document loading, chunking, keyword tagging,
//! and the stores the assistant reads from.
//!
//! The ingestion path is [`pipeline::IngestionPipeline`]: load a document,
//! split it with [`chunker::Chunker`], tag each chunk via [`keywords`], then
//! atomically replace the document's chunk set in a [`store::KnowledgeStore`].

pub mod chunker;
pub mod error;
pub mod in_memory_store;
pub mod keywords;
pub mod loader;
pub mod pipeline;
pub mod sqlite;
pub mod store;
pub mod types;

pub use chunker::{Chunker, ChunkerConfig};
pub use error::KbError;
pub use in_memory_store::InMemoryStore;
pub use pipeline::{Enricher, IngestionPipeline, RechunkSummary};
pub use sqlite::SqliteStore;
pub use store::{KnowledgeStore, SettingsStore};
pub use types::{Chunk, ChunkKind, Document, Settings};
