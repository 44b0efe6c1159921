//! Filesystem loaders that read a file into a [`Document`] ready for
//! ingestion.

mod text;

pub use text::TextLoader;

#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;

use std::path::Path;

use crate::error::KbError;
use crate::types::Document;

/// Default maximum file size: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        path: &Path,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Document, KbError>> + Send + '_>,
    >;

    fn supported_extensions(&self) -> &[&str];
}

/// Media type recorded for a file, keyed on its extension. Spreadsheet
/// exports are expected as tab-separated text.
#[must_use]
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => "application/json",
        Some("tsv") => "text/tab-separated-values",
        Some("md" | "markdown") => "text/markdown",
        Some("pdf") => "application/pdf",
        _ => "text/plain",
    }
}

/// Document name shown in listings: the file name, falling back to the
/// full path when there is none.
fn document_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
