use std::path::Path;
use std::pin::Pin;

use super::{DEFAULT_MAX_FILE_SIZE, DocumentLoader, document_name};
use crate::error::KbError;
use crate::types::Document;

pub struct PdfLoader {
    pub max_file_size: u64,
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentLoader for PdfLoader {
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

            let name = document_name(&path);
            let path_buf = path.clone();
            let content = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text(&path_buf).map_err(|e| KbError::Pdf(e.to_string()))
            })
            .await
            .map_err(|e| KbError::Io(std::io::Error::other(e)))??;

            // Extracted text chunks like any plain-text document.
            Ok(Document::new(name, content, "text/plain", ""))
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }
}
