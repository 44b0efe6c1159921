use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact address used when no settings record has been written yet.
pub const DEFAULT_CONTACT_EMAIL: &str = "contact@reunion.com";

/// The retrievable unit kinds the chunker produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// An explicit question with its answer.
    Qa,
    /// A prose block without an attached question.
    Section,
    /// One row of row-oriented data.
    Table,
}

impl ChunkKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Qa => "qa",
            Self::Section => "section",
            Self::Table => "table",
        }
    }
}

/// An uploaded source file and its metadata, the parent of zero or more chunks.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub content: String,
    pub media_type: String,
    pub size_bytes: i64,
    pub description: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub active: bool,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a new active document with a fresh id and current timestamps.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        media_type: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let size_bytes = i64::try_from(content.len()).unwrap_or(i64::MAX);
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            content,
            media_type: media_type.into(),
            size_bytes,
            description: String::new(),
            category: category.into(),
            keywords: Vec::new(),
            active: true,
            uploaded_by: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A retrievable unit of knowledge-base content.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: String,
    pub document_id: String,
    pub ordinal: usize,
    pub kind: ChunkKind,
    pub question: Option<String>,
    pub answer: String,
    pub context: Option<String>,
    pub category: String,
    pub keywords: Vec<String>,
    pub source_ref: Option<String>,
    pub active: bool,
    /// Optional enrichment vector; absent when no enricher ran or it failed.
    pub embedding: Option<Vec<f32>>,
}

/// The single customization record read at query time.
///
/// Mutated only through admin tooling; the chat path treats it as read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub app_name: String,
    pub welcome_message: String,
    pub map_link: String,
    pub contact_email: String,
    pub icon_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Docent Reunion Assistant".to_owned(),
            welcome_message: "Welcome! Ask me anything about the reunion.".to_owned(),
            map_link: String::new(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_owned(),
            icon_url: String::new(),
            updated_at: DateTime::UNIX_EPOCH,
        }
    }
}

/// Canonicalize keyword input into an ordered, de-duplicated, lowercase list.
///
/// Each item may itself be a comma-joined string; admin surfaces hand
/// keywords over in both shapes, and nothing past this boundary should have
/// to care which one it was.
#[must_use]
pub fn normalize_keywords<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in raw {
        for part in item.split(',') {
            let term = part.trim().to_lowercase();
            if term.is_empty() || out.contains(&term) {
                continue;
            }
            out.push(term);
        }
    }
    out
}
