//! Tabular strategy: tab-separated rows, with a Q/A column pairing when
//! the header names one. A sheet whose rows all fall below the section
//! minimum still yields one whole-document chunk.

use super::{ChunkerConfig, Piece};
use crate::types::ChunkKind;

pub(super) fn pieces(config: &ChunkerConfig, content: &str) -> Vec<Piece> {
    let rows: Vec<(usize, Vec<&str>)> = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.split('\t').map(str::trim).collect()))
        .filter(|(_, cells): &(usize, Vec<&str>)| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    let pieces: Vec<Piece> = match rows.first() {
        None => Vec::new(),
        Some((_, header)) => match qa_columns(header) {
            Some((q_col, a_col)) => rows
                .iter()
                .skip(1)
                .filter_map(|(line_no, cells)| qa_row(*line_no, cells, q_col, a_col))
                .collect(),
            None => rows
                .iter()
                .filter_map(|(line_no, cells)| plain_row(config, *line_no, cells))
                .collect(),
        },
    };

    if pieces.is_empty() {
        let trimmed = content.trim();
        if !trimmed.is_empty() {
            return vec![super::fallback_piece(trimmed, config.fallback_prefix_chars)];
        }
    }
    pieces
}

/// Column indexes for question and answer, when the header names both.
fn qa_columns(header: &[&str]) -> Option<(usize, usize)> {
    let find = |name: &str| {
        header
            .iter()
            .position(|cell| cell.to_lowercase().contains(name))
    };
    Some((find("question")?, find("answer")?))
}

fn qa_row(line_no: usize, cells: &[&str], q_col: usize, a_col: usize) -> Option<Piece> {
    let question = *cells.get(q_col)?;
    let answer = *cells.get(a_col)?;
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    // Cells outside the Q/A columns still carry signal, keep them around.
    let extra: Vec<&str> = cells
        .iter()
        .enumerate()
        .filter(|&(i, cell)| i != q_col && i != a_col && !cell.is_empty())
        .map(|(_, cell)| *cell)
        .collect();
    Some(Piece {
        kind: ChunkKind::Qa,
        question: Some(question.to_owned()),
        answer: answer.to_owned(),
        context: (!extra.is_empty()).then(|| extra.join(" | ")),
        source_ref: Some(format!("row {line_no}")),
        category: None,
        keywords: None,
    })
}

fn plain_row(config: &ChunkerConfig, line_no: usize, cells: &[&str]) -> Option<Piece> {
    let joined = cells
        .iter()
        .copied()
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.chars().count() < config.min_section_chars {
        return None;
    }
    Some(Piece {
        kind: ChunkKind::Table,
        question: None,
        answer: joined,
        context: None,
        source_ref: Some(format!("row {line_no}")),
        category: None,
        keywords: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str) -> Vec<Piece> {
        pieces(&ChunkerConfig::default(), content)
    }

    #[test]
    fn qa_header_pairs_columns() {
        let out = run(
            "Question\tAnswer\n\
             When is check-in?\tThursday from 3pm.\n\
             Is parking free?\tYes, in the north lot.",
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, ChunkKind::Qa);
        assert_eq!(out[0].question.as_deref(), Some("When is check-in?"));
        assert_eq!(out[1].answer, "Yes, in the north lot.");
        assert_eq!(out[1].source_ref.as_deref(), Some("row 3"));
    }

    #[test]
    fn qa_header_matching_is_case_insensitive_substring() {
        let out = run("FAQ Question Text\tFull Answer\tTopic\nWhere?\tMain campus lawn.\tLocation");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].context.as_deref(), Some("Location"));
    }

    #[test]
    fn rows_missing_question_or_answer_are_dropped() {
        let out = run(
            "question\tanswer\n\
             \tOnly an answer here.\n\
             Only a question?\t\n\
             Kept?\tKept indeed.",
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].question.as_deref(), Some("Kept?"));
    }

    #[test]
    fn no_header_joins_cells_into_rows() {
        let out = run(
            "Thursday\tWelcome barbecue on the lawn\n\
             Friday\tClass dinner and dancing",
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, ChunkKind::Table);
        assert_eq!(out[0].answer, "Thursday Welcome barbecue on the lawn");
        assert_eq!(out[0].source_ref.as_deref(), Some("row 1"));
    }

    #[test]
    fn short_rows_are_dropped() {
        let out = run("Sheet: Overview\nThe full weekend schedule spans four days of events.");
        assert_eq!(out.len(), 1);
        assert!(out[0].answer.starts_with("The full weekend"));
    }

    #[test]
    fn all_short_rows_fall_back_to_whole_document() {
        let out = run("Mon\t9am\nTue\t10am");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ChunkKind::Section);
        assert_eq!(out[0].answer, "Mon\t9am\nTue\t10am");
        assert!(out[0].source_ref.is_none());
    }

    #[test]
    fn header_only_qa_sheet_falls_back() {
        let out = run("Question\tAnswer");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, ChunkKind::Section);
        assert_eq!(out[0].answer, "Question\tAnswer");
    }

    #[test]
    fn blank_lines_and_empty_cells_are_ignored() {
        let out = run("\t\t\n\nFriday evening\tDinner and dancing until late\t\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].answer, "Friday evening Dinner and dancing until late");
    }

    #[test]
    fn empty_content_yields_nothing() {
        assert!(run("").is_empty());
        assert!(run("\t\t\t").is_empty());
    }
}
