use std::path::Path;
use std::pin::Pin;

use super::{DEFAULT_MAX_FILE_SIZE, DocumentLoader, document_name, media_type_for};
use crate::error::KbError;
use crate::types::Document;

pub struct TextLoader {
    pub max_file_size: u64,
}

impl Default for TextLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentLoader for TextLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Document, KbError>> + Send + '_>> {
        let path = path.to_path_buf();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let path = std::fs::canonicalize(&path)?;

            let meta = tokio::fs::metadata(&path).await?;
            if meta.len() > max_size {
                return Err(KbError::FileTooLarge(meta.len()));
            }

            let content = tokio::fs::read_to_string(&path).await?;

            Ok(Document::new(
                document_name(&path),
                content,
                media_type_for(&path),
                "",
            ))
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt", "md", "markdown", "json", "tsv"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("welcome.txt");
        std::fs::write(&file, "hello reunion").unwrap();

        let doc = TextLoader::default().load(&file).await.unwrap();
        assert_eq!(doc.content, "hello reunion");
        assert_eq!(doc.media_type, "text/plain");
        assert_eq!(doc.name, "welcome.txt");
        assert!(doc.active);
    }

    #[tokio::test]
    async fn load_json_file_records_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("faq.json");
        std::fs::write(&file, "[]").unwrap();

        let doc = TextLoader::default().load(&file).await.unwrap();
        assert_eq!(doc.media_type, "application/json");
    }

    #[tokio::test]
    async fn load_tsv_file_records_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("schedule.tsv");
        std::fs::write(&file, "a\tb").unwrap();

        let doc = TextLoader::default().load(&file).await.unwrap();
        assert_eq!(doc.media_type, "text/tab-separated-values");
    }

    #[tokio::test]
    async fn load_nonexistent_file() {
        let result = TextLoader::default()
            .load(Path::new("/nonexistent/file.txt"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.txt");
        std::fs::write(&file, "").unwrap();

        let doc = TextLoader::default().load(&file).await.unwrap();
        assert!(doc.content.is_empty());
        assert_eq!(doc.size_bytes, 0);
    }

    #[tokio::test]
    async fn file_too_large_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big.txt");
        std::fs::write(&file, "x").unwrap();

        let loader = TextLoader { max_file_size: 0 };
        let result = loader.load(&file).await;
        assert!(matches!(result, Err(KbError::FileTooLarge(_))));
    }

    #[test]
    fn supported_extensions_list() {
        let loader = TextLoader::default();
        let exts = loader.supported_extensions();
        assert!(exts.contains(&"txt"));
        assert!(exts.contains(&"json"));
        assert!(exts.contains(&"tsv"));
    }
}
