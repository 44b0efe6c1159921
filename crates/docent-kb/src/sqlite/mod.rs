mod chunks;
mod documents;
mod settings;

use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::KbError;
use crate::store::{KnowledgeStore, SettingsStore};
use crate::types::{Chunk, Document, Settings};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the `SQLite` database and run migrations.
    ///
    /// Enables foreign key constraints at connection level so that
    /// `ON DELETE CASCADE` from documents to chunks is enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub async fn new(path: &str) -> Result<Self, KbError> {
        let url = if path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{path}?mode=rwc")
        };

        let opts = SqliteConnectOptions::from_str(&url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        sqlx::migrate!("../../migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Expose the underlying pool for ad hoc queries.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run all migrations on the given pool.
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails.
    pub async fn run_migrations(pool: &SqlitePool) -> Result<(), KbError> {
        sqlx::migrate!("../../migrations").run(pool).await?;
        Ok(())
    }
}

impl KnowledgeStore for SqliteStore {
    fn save_document(&self, document: Document) -> BoxFuture<'_, Result<(), KbError>> {
        Box::pin(async move { self.insert_document(&document).await })
    }

    fn get_document(&self, id: &str) -> BoxFuture<'_, Result<Option<Document>, KbError>> {
        let id = id.to_owned();
        Box::pin(async move { self.fetch_document(&id).await })
    }

    fn list_documents(&self) -> BoxFuture<'_, Result<Vec<Document>, KbError>> {
        Box::pin(self.fetch_documents())
    }

    fn update_document(&self, document: Document) -> BoxFuture<'_, Result<(), KbError>> {
        Box::pin(async move { self.update_document_metadata(&document).await })
    }

    fn delete_document(&self, id: &str) -> BoxFuture<'_, Result<(), KbError>> {
        let id = id.to_owned();
        Box::pin(async move { self.remove_document(&id).await })
    }

    fn list_active_chunks(&self) -> BoxFuture<'_, Result<Vec<Chunk>, KbError>> {
        Box::pin(self.fetch_active_chunks())
    }

    fn chunks_for_document(&self, document_id: &str) -> BoxFuture<'_, Result<Vec<Chunk>, KbError>> {
        let document_id = document_id.to_owned();
        Box::pin(async move { self.fetch_chunks_for_document(&document_id).await })
    }

    fn replace_chunks_for_document(
        &self,
        document_id: &str,
        chunks: Vec<Chunk>,
    ) -> BoxFuture<'_, Result<(), KbError>> {
        let document_id = document_id.to_owned();
        Box::pin(async move { self.replace_chunks(&document_id, &chunks).await })
    }

    fn delete_chunks_for_document(&self, document_id: &str) -> BoxFuture<'_, Result<(), KbError>> {
        let document_id = document_id.to_owned();
        Box::pin(async move { self.remove_chunks_for_document(&document_id).await })
    }
}

impl SettingsStore for SqliteStore {
    fn get_settings(&self) -> BoxFuture<'_, Result<Settings, KbError>> {
        Box::pin(self.fetch_settings())
    }
}
