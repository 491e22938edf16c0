use crate::Author;
use once_cell::sync::Lazy;
use regex::Regex;

// Letters, whitespace, a second word, then a trailing separator. This is a
// heuristic classifier, not a grammar: it misses a lone first name and can
// trigger on stray punctuation.
static AUTHOR_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]+\s+\S+(\s|,|;)").unwrap());

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,;]+").unwrap());

/// Does the text plausibly hold a complete "firstname lastname" pair?
pub fn looks_like_author(input: &str) -> bool {
    AUTHOR_PAIR.is_match(input)
}

fn normalize(input: &str) -> String {
    SEPARATORS.replace_all(input, " ").trim().to_string()
}

/// Split free text into unconfirmed first/last name pairs. Words are
/// consumed two at a time; a trailing odd word is silently dropped.
pub fn parse_author_pairs(input: &str) -> Vec<Author> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return Vec::new();
    }

    let words: Vec<&str> = normalized.split(' ').collect();
    words
        .chunks_exact(2)
        .map(|pair| Author::unconfirmed(pair[0], pair[1]))
        .collect()
}

/// At least two words after normalization. Used as a submit-time gate so a
/// half-typed name blocks submission instead of losing its last name.
pub fn has_full_name(input: &str) -> bool {
    let normalized = normalize(input);
    normalized.split(' ').filter(|w| !w.is_empty()).count() >= 2
}
