use regex::Regex;
use std::sync::LazyLock;

/// Terms of this length or shorter are ignored in queries.
pub const MIN_TERM_LEN: usize = 2;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("non-word pattern is valid"));

/// Lower-case `text` and split it on runs of non-word characters.
///
/// Leading or trailing punctuation yields an empty token at that end, and
/// those tokens count towards a chunk's word total.
pub fn split_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD.split(&lowered).map(str::to_string).collect()
}

/// Query terms in query order, duplicates kept.
pub fn query_terms(query: &str) -> Vec<String> {
    split_words(query).into_iter().filter(|t| t.len() > MIN_TERM_LEN).collect()
}
