//! Salient-term extraction used to tag chunks at ingestion time.
//!
//! Pure lexical filtering: lowercase, strip punctuation, drop short and
//! stop-listed words, keep first-seen order, cap the result. No stemming
//! and no frequency weighting on purpose — retrieval stays deterministic
//! and explainable.

/// Terms kept per chunk before the category tag is appended.
pub const DEFAULT_MAX_TERMS: usize = 10;

/// Closed stop-word list: articles, conjunctions, auxiliaries, demonstratives.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "been", "be", "have", "has", "had", "do", "does", "did",
    "will", "would", "should", "could", "may", "might", "must", "can", "this", "that", "these",
    "those",
];

/// Words at or under this length carry too little signal to tag with.
const MIN_TERM_CHARS: usize = 4;

/// Extract up to `max_terms` salient terms from `text`, preserving the order
/// in which they first appear. Empty input yields an empty list.
#[must_use]
pub fn extract(text: &str, max_terms: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut terms: Vec<String> = Vec::new();

    for raw in lowered.split_whitespace() {
        if terms.len() == max_terms {
            break;
        }
        let word: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
        if word.chars().count() < MIN_TERM_CHARS || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if !terms.contains(&word) {
            terms.push(word);
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_set() {
        assert!(extract("", DEFAULT_MAX_TERMS).is_empty());
        assert!(extract("   \n\t ", DEFAULT_MAX_TERMS).is_empty());
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        let terms = extract("Reunion! Registration, (Housing)", DEFAULT_MAX_TERMS);
        assert_eq!(terms, vec!["reunion", "registration", "housing"]);
    }

    #[test]
    fn drops_short_words_and_stop_words() {
        let terms = extract("the cost of a room at this hotel", DEFAULT_MAX_TERMS);
        assert_eq!(terms, vec!["cost", "room", "hotel"]);
    }

    #[test]
    fn stop_words_dropped_even_past_length_cutoff() {
        // "would", "should", "these" are all longer than the length cutoff.
        let terms = extract("would should these gather", DEFAULT_MAX_TERMS);
        assert_eq!(terms, vec!["gather"]);
    }

    #[test]
    fn deduplicates_preserving_first_seen_order() {
        let terms = extract("hotel rates hotel shuttle rates", DEFAULT_MAX_TERMS);
        assert_eq!(terms, vec!["hotel", "rates", "shuttle"]);
    }

    #[test]
    fn truncates_to_max_terms() {
        let text = "alpha bravo charlie delta echo foxtrot golfs hotels india juliet kilos limas";
        let terms = extract(text, 5);
        assert_eq!(terms.len(), 5);
        assert_eq!(terms[0], "alpha");
        assert_eq!(terms[4], "echo");
    }

    #[test]
    fn re_extraction_does_not_grow() {
        let text = "Registration opens November 26 for committee members; early bird pricing \
                    ends December 31, 2025.";
        let once = extract(text, DEFAULT_MAX_TERMS);
        let again = extract(&once.join(" "), DEFAULT_MAX_TERMS);
        assert_eq!(once, again);
    }

    mod proptest_extract {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn never_panics_and_respects_cap(
                text in "\\PC{0,2000}",
                max_terms in 0usize..64,
            ) {
                let terms = extract(&text, max_terms);
                prop_assert!(terms.len() <= max_terms);
            }

            #[test]
            fn terms_are_lowercase_alphanumeric(text in "\\PC{0,1000}") {
                for term in extract(&text, DEFAULT_MAX_TERMS) {
                    prop_assert!(term.chars().all(char::is_alphanumeric));
                    prop_assert_eq!(term.to_lowercase(), term.clone());
                    prop_assert!(!STOP_WORDS.contains(&term.as_str()));
                }
            }

            #[test]
            fn extraction_is_idempotent(text in "[A-Za-z ,.!?]{0,800}") {
                let once = extract(&text, DEFAULT_MAX_TERMS);
                let again = extract(&once.join(" "), DEFAULT_MAX_TERMS);
                prop_assert_eq!(once, again);
            }
        }
    }
}
