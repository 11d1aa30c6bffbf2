//! Text processing utilities.
//!
//! Flattened document text carries [`SENTINEL`] markers between block
//! boundaries. Everything here either respects those markers or strips
//! them before text reaches a user.

use regex::Regex;
use std::sync::LazyLock;

/// Boundary marker inserted between paragraphs, headings and other blocks.
pub const SENTINEL: &str = " $$ ";

/// Sentence ending punctuation followed by whitespace.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.:;?!]\s+").expect("valid regex"));

/// Runs of characters that separate words.
static WORD_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/,-]+").expect("valid regex"));

/// Remove every boundary marker from `text`.
pub fn strip_sentinels(text: &str) -> String {
    text.replace(SENTINEL, "")
}

/// Strip markers and surrounding whitespace: the user-visible form of a run.
pub fn visible(text: &str) -> String {
    strip_sentinels(text).trim().to_string()
}

/// Split flattened text into words.
///
/// Markers are removed first, then the text is split on runs of
/// whitespace, slashes, commas and hyphens. Empty tokens are dropped.
pub fn split_words(text: &str) -> Vec<String> {
    let stripped = strip_sentinels(text);
    WORD_BREAK
        .split(stripped.trim())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a paragraph into sentences on `.`, `:`, `;`, `?` or `!` followed by
/// whitespace.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    SENTENCE_BREAK.split(paragraph).collect()
}

/// The longest sentence of a paragraph. On ties the later sentence wins.
pub fn longest_sentence(paragraph: &str) -> &str {
    split_sentences(paragraph)
        .into_iter()
        .max_by_key(|s| char_len(s))
        .unwrap_or("")
}

/// Length in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `n` characters of `text`.
pub fn head(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// The last `n` characters of `text`.
pub fn tail(text: &str, n: usize) -> &str {
    let len = char_len(text);
    if len <= n {
        return text;
    }
    match text.char_indices().nth(len - n) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_separators() {
        let words = split_words("red/green, blue-ish  and\tgrey");
        assert_eq!(words, vec!["red", "green", "blue", "ish", "and", "grey"]);
    }

    #[test]
    fn words_ignore_markers_and_edges() {
        assert_eq!(split_words(" $$ Hello world $$ ").len(), 2);
        assert!(split_words("").is_empty());
        assert!(split_words(" $$  $$ ").is_empty());
        assert_eq!(split_words("- leading dash"), vec!["leading", "dash"]);
    }

    #[test]
    fn sentences_split_on_punctuation_and_space() {
        let parts = split_sentences("One. Two: three; four? Five! six");
        assert_eq!(parts, vec!["One", "Two", "three", "four", "Five", "six"]);
    }

    #[test]
    fn sentences_keep_unspaced_punctuation() {
        assert_eq!(split_sentences("Version 1.2 is out"), vec!["Version 1.2 is out"]);
    }

    #[test]
    fn longest_sentence_prefers_later_on_tie() {
        assert_eq!(longest_sentence("abc. xyz"), "xyz");
        assert_eq!(longest_sentence("abcd. xyz"), "abcd");
        assert_eq!(longest_sentence(""), "");
    }

    #[test]
    fn head_and_tail_count_characters() {
        assert_eq!(head("grüße", 3), "grü");
        assert_eq!(tail("grüße", 2), "ße");
        assert_eq!(head("ab", 5), "ab");
        assert_eq!(tail("ab", 5), "ab");
        assert_eq!(tail("abc", 0), "");
    }

    #[test]
    fn visible_strips_and_trims() {
        assert_eq!(visible(" $$  Title "), "Title");
    }
}
