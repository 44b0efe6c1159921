//! Structured-data strategy: JSON FAQ records, either a bare array or
//! wrapped in a `faqs` field.

use serde::Deserialize;

use super::Piece;
use crate::types::{ChunkKind, normalize_keywords};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FaqPayload {
    Records(Vec<FaqRecord>),
    Wrapper { faqs: Vec<FaqRecord> },
}

/// All fields optional so one incomplete record skips instead of failing
/// the whole file.
#[derive(Debug, Deserialize)]
struct FaqRecord {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

pub(super) fn pieces(content: &str) -> Vec<Piece> {
    let payload: FaqPayload = match serde_json::from_str(content) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "structured-data content did not parse; no chunks produced");
            return Vec::new();
        }
    };
    let records = match payload {
        FaqPayload::Records(records) | FaqPayload::Wrapper { faqs: records } => records,
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| piece_from_record(index, record))
        .collect()
}

fn piece_from_record(index: usize, record: FaqRecord) -> Option<Piece> {
    let question = non_empty(record.question)?;
    let answer = non_empty(record.answer)?;
    let keywords = normalize_keywords(record.keywords.iter().map(String::as_str));
    Some(Piece {
        kind: ChunkKind::Qa,
        question: Some(question),
        answer,
        context: None,
        source_ref: Some(format!("record {index}")),
        category: non_empty(record.category),
        keywords: (!keywords.is_empty()).then_some(keywords),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
