//! Structured-text strategy: a line scanner that recognizes Q/A marker
//! pairs and falls back to paragraph sections for everything else.

use super::{ChunkerConfig, Piece};
use crate::types::ChunkKind;

pub(super) fn pieces(config: &ChunkerConfig, content: &str) -> Vec<Piece> {
    let mut scanner = Scanner::new(config.min_section_chars);

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            scanner.flush();
            continue;
        }
        if let Some(question) = question_text(line) {
            scanner.flush();
            scanner.begin_question(question, line_no);
            continue;
        }
        scanner.push_body(line, line_no);
    }
    scanner.flush();

    let mut pieces = scanner.into_pieces();
    if pieces.is_empty() {
        let trimmed = content.trim();
        if !trimmed.is_empty() {
            pieces.push(super::fallback_piece(trimmed, config.fallback_prefix_chars));
        }
    }
    pieces
}

/// Returns the question text when `line` is a question marker: a `Q:` or
/// `Q<n>:` prefix, or a line ending in `?`.
fn question_text(line: &str) -> Option<String> {
    if let Some(rest) = strip_marker(line, 'Q', 'q') {
        return Some(rest.trim().to_owned());
    }
    if line.ends_with('?') {
        return Some(line.to_owned());
    }
    None
}

/// Strips a `X:` or `X<n>:` prefix, where `X` is the given marker letter.
fn strip_marker(line: &str, upper: char, lower: char) -> Option<&str> {
    let rest = line
        .strip_prefix(upper)
        .or_else(|| line.strip_prefix(lower))?;
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.strip_prefix(':')
}

struct Scanner {
    min_section_chars: usize,
    pieces: Vec<Piece>,
    question: Option<String>,
    body: Vec<String>,
    start_line: usize,
    end_line: usize,
}

impl Scanner {
    fn new(min_section_chars: usize) -> Self {
        Self {
            min_section_chars,
            pieces: Vec::new(),
            question: None,
            body: Vec::new(),
            start_line: 0,
            end_line: 0,
        }
    }

    fn begin_question(&mut self, question: String, line_no: usize) {
        self.question = Some(question);
        self.start_line = line_no;
        self.end_line = line_no;
    }

    fn push_body(&mut self, line: &str, line_no: usize) {
        let line = if self.question.is_some() {
            strip_answer_marker(line)
        } else {
            line
        };
        if self.body.is_empty() && self.question.is_none() {
            self.start_line = line_no;
        }
        self.body.push(line.to_owned());
        self.end_line = line_no;
    }

    /// Close the current accumulation. A pending question with no answer
    /// lines is dropped; a plain section must meet the minimum length.
    fn flush(&mut self) {
        let body = self.body.join("\n");
        self.body.clear();
        let question = self.question.take();

        let keep = match &question {
            Some(_) => !body.is_empty(),
            None => body.chars().count() >= self.min_section_chars,
        };
        if !keep {
            return;
        }

        let kind = if question.is_some() {
            ChunkKind::Qa
        } else {
            ChunkKind::Section
        };
        self.pieces.push(Piece {
            kind,
            question,
            answer: body,
            context: None,
            source_ref: Some(self.source_ref()),
            category: None,
            keywords: None,
        });
    }

    fn source_ref(&self) -> String {
        if self.start_line == self.end_line {
            format!("line {}", self.start_line)
        } else {
            format!("lines {}-{}", self.start_line, self.end_line)
        }
    }

    fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }
}

/// Inside an answer block, an `A:` or `A<n>:` prefix is presentation, not
/// content.
fn strip_answer_marker(line: &str) -> &str {
    strip_marker(line, 'A', 'a').map_or(line, str::trim_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str) -> Vec<Piece> {
        pieces(&ChunkerConfig::default(), content)
    }

    #[test]
    fn qa_markers_pair_question_with_answer() {
        let out = run("Q: When is the reunion?\nA: May 21-24, 2026 on campus.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ChunkKind::Qa);
        assert_eq!(out[0].question.as_deref(), Some("When is the reunion?"));
        assert_eq!(out[0].answer, "May 21-24, 2026 on campus.");
    }

    #[test]
    fn numbered_markers_are_recognized() {
        let out = run("Q12: What does it cost?\nA12: Packages start at $250 per person.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question.as_deref(), Some("What does it cost?"));
        assert_eq!(out[0].answer, "Packages start at $250 per person.");
    }

    #[test]
    fn trailing_question_mark_starts_a_question() {
        let out = run("Can I bring my family?\nAbsolutely, the weekend is family friendly.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question.as_deref(), Some("Can I bring my family?"));
    }

    #[test]
    fn answer_spans_lines_until_blank() {
        let out = run(
            "Q: What is included?\nAll meals are covered.\nSo is entertainment.\n\n\
             A separate paragraph section follows here.",
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].answer, "All meals are covered.\nSo is entertainment.");
        assert_eq!(out[1].kind, ChunkKind::Section);
    }

    #[test]
    fn next_question_marker_closes_previous_answer() {
        let out = run(
            "Q: Where do we stay?\nA: The Marriott holds our block.\n\
             Q: When do we arrive?\nA: Check-in opens Thursday afternoon.",
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].answer, "The Marriott holds our block.");
        assert_eq!(out[1].question.as_deref(), Some("When do we arrive?"));
    }

    #[test]
    fn question_without_answer_is_dropped() {
        let out = run("Q: Orphan question?\n\nA paragraph long enough to survive the cut.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ChunkKind::Section);
    }

    #[test]
    fn short_sections_are_dropped() {
        let out = run("tiny\n\nThis section is comfortably past the minimum.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].answer, "This section is comfortably past the minimum.");
    }

    #[test]
    fn answer_marker_untouched_outside_qa_context() {
        let out = run("A: looks like a marker but no question came before it here.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ChunkKind::Section);
        assert!(out[0].answer.starts_with("A: looks like"));
    }

    #[test]
    fn unstructured_content_falls_back_to_whole_document() {
        let out = run("short note");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ChunkKind::Section);
        assert_eq!(out[0].answer, "short note");
        assert!(out[0].source_ref.is_none());
    }

    #[test]
    fn fallback_is_bounded() {
        let word = "x".repeat(1500);
        let out = run(&word);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].answer.chars().count(), 1000);
    }

    #[test]
    fn empty_content_yields_nothing() {
        assert!(run("").is_empty());
        assert!(run("   \n\n  ").is_empty());
    }

    #[test]
    fn source_refs_track_line_numbers() {
        let out = run(
            "Q: Where is dinner held?\nA: In the main dining hall.\n\n\
             The Saturday program starts right after breakfast.",
        );
        assert_eq!(out[0].source_ref.as_deref(), Some("lines 1-2"));
        assert_eq!(out[1].source_ref.as_deref(), Some("line 4"));
    }
}
