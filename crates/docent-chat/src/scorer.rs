//! Lexical relevance scoring of active chunks against one utterance.
//!
//! Weights are policy constants tuned so that an exact question match
//! dominates, keyword tags beat incidental substrings, and a topic
//! corroboration boost lets a topically-right chunk outrank a merely
//! word-similar one. Scores are non-negative integers; ties keep insertion
//! order, so ranking is fully deterministic.

use docent_kb::{Chunk, ChunkKind};

use crate::classify::{Topic, tokenize};

/// Every utterance token appears among the question tokens or tagged
/// keywords of a qa chunk.
const FULL_QUESTION_MATCH: u32 = 100;
/// Per utterance token overlapping the question tokens, short of full match.
const OVERLAP_TOKEN: u32 = 20;
/// Answer length inside the well-formed band.
const WELL_FORMED_ANSWER: u32 = 10;
const ANSWER_BAND_CHARS: std::ops::RangeInclusive<usize> = 100..=500;
/// Utterance token appearing anywhere in the question text.
const TOKEN_IN_QUESTION: u32 = 10;
/// Utterance token appearing anywhere in the answer text.
const TOKEN_IN_ANSWER: u32 = 5;
/// Utterance token appearing in the category label.
const TOKEN_IN_CATEGORY: u32 = 10;
/// Utterance token equal to a tagged keyword.
const KEYWORD_EXACT: u32 = 15;
/// Utterance token contained in a tagged keyword without equalling it.
const KEYWORD_SUBSTRING: u32 = 8;
/// Classified topic corroborated by the chunk's own text.
const TOPIC_BOOST: u32 = 50;

/// One chunk with its relevance score for the scored utterance.
#[derive(Debug, Clone, Copy)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: u32,
}

/// Score `chunks` against `utterance` and return them in descending score
/// order, zero-scored chunks dropped. Ties keep the input order.
#[must_use]
pub fn score<'a>(utterance: &str, chunks: &'a [Chunk]) -> Vec<ScoredChunk<'a>> {
    let tokens = tokenize(utterance);
    let topic = Topic::classify(&tokens);

    let mut ranked: Vec<ScoredChunk<'a>> = chunks
        .iter()
        .filter(|chunk| chunk.active)
        .map(|chunk| ScoredChunk {
            chunk,
            score: score_chunk(&tokens, topic, chunk),
        })
        .filter(|scored| scored.score > 0)
        .collect();
    // sort_by is stable: equal scores stay in insertion order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn score_chunk(tokens: &[String], topic: Option<Topic>, chunk: &Chunk) -> u32 {
    let mut score = 0;

    let question_lower = chunk.question.as_deref().map(str::to_lowercase);
    let answer_lower = chunk.answer.to_lowercase();
    let category_lower = chunk.category.to_lowercase();

    if chunk.kind == ChunkKind::Qa
        && let Some(question) = &question_lower
        && !tokens.is_empty()
    {
        let question_tokens = tokenize(question);
        // The full-match set includes tagged keywords so that an extra
        // utterance token matching a tag never revokes the bonus.
        let covered = |t: &String| question_tokens.contains(t) || chunk.keywords.contains(t);
        if tokens.iter().all(covered) {
            score += FULL_QUESTION_MATCH;
        } else {
            let overlap = tokens.iter().filter(|t| question_tokens.contains(t)).count();
            score += OVERLAP_TOKEN * u32::try_from(overlap).unwrap_or(u32::MAX);
        }
    }

    if ANSWER_BAND_CHARS.contains(&chunk.answer.chars().count()) {
        score += WELL_FORMED_ANSWER;
    }

    for token in tokens {
        if question_lower.as_deref().is_some_and(|q| q.contains(token)) {
            score += TOKEN_IN_QUESTION;
        }
        if answer_lower.contains(token) {
            score += TOKEN_IN_ANSWER;
        }
        if category_lower.contains(token) {
            score += TOKEN_IN_CATEGORY;
        }
        if chunk.keywords.iter().any(|k| k == token) {
            score += KEYWORD_EXACT;
        } else if chunk.keywords.iter().any(|k| k.contains(token.as_str())) {
            score += KEYWORD_SUBSTRING;
        }
    }

    if let Some(topic) = topic {
        let chunk_text = match &question_lower {
            Some(question) => format!("{question} {answer_lower}"),
            None => answer_lower.clone(),
        };
        let mut chunk_tokens = tokenize(&chunk_text);
        chunk_tokens.extend(chunk.keywords.iter().cloned());
        if topic.corroborated_by(&chunk_tokens) {
            score += TOPIC_BOOST;
        }
    }

    score
}
