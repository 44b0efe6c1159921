//! Splits ingested documents into retrievable chunks.
//!
//! One of three extraction strategies runs depending on the document's media
//! type: structured text (Q/A markers and paragraphs), structured data (JSON
//! FAQ records), or tabular (tab-separated rows). Every chunk comes out
//! keyword-tagged; ids are deterministic per (document, ordinal) so a
//! re-ingest replaces cleanly.

mod data;
mod table;
mod text;

use crate::keywords;
use crate::types::{Chunk, ChunkKind};

/// Media types handled by the tabular strategy. Spreadsheets reach the
/// chunker as already-extracted tab-separated text.
const TABULAR_MEDIA_TYPES: &[&str] = &[
    "text/tab-separated-values",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Intermediate unit produced by a strategy before ids, category, and
/// keyword tags are attached.
struct Piece {
    kind: ChunkKind,
    question: Option<String>,
    answer: String,
    context: Option<String>,
    source_ref: Option<String>,
    /// Record-level category, when the source carries its own.
    category: Option<String>,
    /// Record-level tags, when the source carries richer tagging than
    /// extraction would produce.
    keywords: Option<Vec<String>>,
}

/// Whole-document fallback so unstructured but non-empty content still
/// yields something retrievable.
fn fallback_piece(trimmed: &str, prefix_chars: usize) -> Piece {
    Piece {
        kind: ChunkKind::Section,
        question: None,
        answer: trimmed.chars().take(prefix_chars).collect(),
        context: None,
        source_ref: None,
        category: None,
        keywords: None,
    }
}

#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Prose sections and table rows shorter than this are dropped.
    pub min_section_chars: usize,
    /// Upper bound on the whole-document fallback chunk.
    pub fallback_prefix_chars: usize,
    /// Extracted keyword cap, before the category tag is appended.
    pub max_keywords: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_section_chars: 20,
            fallback_prefix_chars: 1000,
            max_keywords: keywords::DEFAULT_MAX_TERMS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Chunk `content` for the document identified by `document_id`.
    ///
    /// `category` is the document-level default; structured-data records may
    /// override it per chunk. Malformed structured data yields an empty list
    /// rather than an error — one bad file must never abort ingestion.
    #[must_use]
    pub fn chunk(
        &self,
        document_id: &str,
        content: &str,
        category: &str,
        media_type: &str,
    ) -> Vec<Chunk> {
        let pieces = if media_type == "application/json" {
            data::pieces(content)
        } else if TABULAR_MEDIA_TYPES.contains(&media_type) {
            table::pieces(&self.config, content)
        } else {
            text::pieces(&self.config, content)
        };

        pieces
            .into_iter()
            .enumerate()
            .map(|(ordinal, piece)| self.finalize(document_id, ordinal, category, piece))
            .collect()
    }

    fn finalize(
        &self,
        document_id: &str,
        ordinal: usize,
        default_category: &str,
        piece: Piece,
    ) -> Chunk {
        let category = piece
            .category
            .clone()
            .unwrap_or_else(|| default_category.to_owned());
        let keywords = self.tag_keywords(&piece, &category);
        Chunk {
            id: format!("{document_id}:{ordinal}"),
            document_id: document_id.to_owned(),
            ordinal,
            kind: piece.kind,
            question: piece.question,
            answer: piece.answer,
            context: piece.context,
            category,
            keywords,
            source_ref: piece.source_ref,
            active: true,
            embedding: None,
        }
    }

    /// Record-level tags win when present; otherwise extract from the chunk
    /// text and append the category as an implicit tag.
    fn tag_keywords(&self, piece: &Piece, category: &str) -> Vec<String> {
        if let Some(tags) = &piece.keywords
            && !tags.is_empty()
        {
            return tags.clone();
        }

        let text = match &piece.question {
            Some(question) => format!("{question} {}", piece.answer),
            None => piece.answer.clone(),
        };
        let mut terms = keywords::extract(&text, self.config.max_keywords);
        let category = category.to_lowercase();
        if !category.is_empty() && !terms.contains(&category) {
            terms.push(category);
        }
        terms
    }
}
