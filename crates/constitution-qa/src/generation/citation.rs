//! Citation shaping and response assembly

use crate::types::response::{Citation, QueryResponse};
use crate::types::RetrievedPassage;

/// Maximum characters kept from a passage title
pub const TITLE_MAX_CHARS: usize = 100;

/// Characters of passage text shown in a preview
pub const PREVIEW_MAX_CHARS: usize = 200;

/// Appended to every preview, truncated or not
pub const PREVIEW_SUFFIX: &str = "...";

/// Above this scaled magnitude a second rounding can drift by one unit
const SCALED_LIMIT: f64 = 1e15;

/// Round a similarity score to 4 decimal places
///
/// Non-finite scores become `0.0`. Scores too large to carry 4 decimals are
/// returned as they are.
pub fn round_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    let scaled = score * 10_000.0;
    if scaled.abs() >= SCALED_LIMIT {
        return score;
    }
    scaled.round() / 10_000.0
}

/// First `max_chars` characters of `text`, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Passage preview: at most 200 characters followed by `...`
pub fn text_preview(text: &str) -> String {
    format!("{}{}", truncate_chars(text, PREVIEW_MAX_CHARS), PREVIEW_SUFFIX)
}

impl Citation {
    /// Create a citation for the passage at 1-based `rank`
    pub fn from_passage(rank: usize, passage: &RetrievedPassage) -> Self {
        Self {
            reference: format!("[{}]", rank),
            article: passage.article.clone(),
            title: truncate_chars(&passage.title, TITLE_MAX_CHARS).to_string(),
            score: round_score(passage.score),
            text_preview: text_preview(&passage.text),
        }
    }
}

/// Package the answer with one citation per passage, in retrieval order
pub fn assemble(question: &str, passages: &[RetrievedPassage], answer: String) -> QueryResponse {
    let citations = passages
        .iter()
        .enumerate()
        .map(|(i, passage)| Citation::from_passage(i + 1, passage))
        .collect();

    QueryResponse::new(question, answer, citations)
}
