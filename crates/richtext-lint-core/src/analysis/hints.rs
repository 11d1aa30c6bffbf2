//! Readability hints derived from document statistics.

use crate::text;

use super::reports::{Hint, Longest};

/// Characters of a long sentence shown in its hint.
const EXCERPT_CHARS: usize = 100;

/// Thresholds for [`collect_hints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintThresholds {
    /// Sentences longer than this many characters get a hint.
    pub long_sentence_chars: usize,
    /// Paragraphs longer than this many characters get a hint.
    pub long_paragraph_chars: usize,
    /// Heading density is only judged above this many words.
    pub heading_min_words: usize,
    /// Words one heading is expected to cover.
    pub words_per_heading: usize,
}

impl Default for HintThresholds {
    fn default() -> Self {
        Self {
            long_sentence_chars: 200,
            long_paragraph_chars: 500,
            heading_min_words: 180,
            words_per_heading: 120,
        }
    }
}

/// Collect readability hints.
pub fn collect_hints(
    longest: &Longest,
    word_count: usize,
    heading_count: usize,
    thresholds: &HintThresholds,
) -> Vec<Hint> {
    let mut hints = Vec::new();

    if longest.sentence_chars > thresholds.long_sentence_chars {
        hints.push(Hint::LongSentence {
            chars: longest.sentence_chars,
            excerpt: text::head(&longest.sentence, EXCERPT_CHARS).to_string(),
        });
    }

    if longest.paragraph_chars > thresholds.long_paragraph_chars {
        hints.push(Hint::LongParagraph {
            chars: longest.paragraph_chars,
        });
    }

    if needs_more_headings(word_count, heading_count, thresholds) {
        hints.push(Hint::FewHeadings {
            words: word_count,
            headings: heading_count,
        });
    }

    hints
}

fn needs_more_headings(words: usize, headings: usize, thresholds: &HintThresholds) -> bool {
    words > thresholds.heading_min_words
        && headings.saturating_mul(thresholds.words_per_heading)
            < words.saturating_sub(thresholds.words_per_heading)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn longest(paragraph_chars: usize, sentence_chars: usize) -> Longest {
        Longest {
            paragraph: "p".repeat(paragraph_chars),
            paragraph_chars,
            sentence: "s".repeat(sentence_chars),
            sentence_chars,
        }
    }

    #[test]
    fn short_text_has_no_hints() {
        let hints = collect_hints(&longest(100, 50), 20, 0, &HintThresholds::default());
        assert!(hints.is_empty());
    }

    #[test]
    fn long_sentence_hint_has_excerpt() {
        let hints = collect_hints(&longest(250, 201), 40, 1, &HintThresholds::default());
        assert_eq!(
            hints,
            vec![Hint::LongSentence {
                chars: 201,
                excerpt: "s".repeat(100),
            }]
        );
    }

    #[test]
    fn thresholds_are_exclusive() {
        let hints = collect_hints(&longest(500, 200), 180, 0, &HintThresholds::default());
        assert!(hints.is_empty());
    }

    #[test]
    fn long_paragraph_hint() {
        let hints = collect_hints(&longest(501, 10), 80, 0, &HintThresholds::default());
        assert_eq!(hints, vec![Hint::LongParagraph { chars: 501 }]);
    }

    #[test]
    fn heading_density() {
        let t = HintThresholds::default();
        // 400 words: one heading covers 120, 400 - 120 = 280
        assert!(needs_more_headings(400, 2, &t));
        assert!(!needs_more_headings(400, 3, &t));
        assert!(!needs_more_headings(180, 0, &t));
        assert!(needs_more_headings(181, 0, &t));
    }

    #[test]
    fn custom_thresholds() {
        let t = HintThresholds {
            long_sentence_chars: 5,
            long_paragraph_chars: 5,
            heading_min_words: 1,
            words_per_heading: 1,
        };
        let hints = collect_hints(&longest(6, 6), 10, 0, &t);
        assert_eq!(hints.len(), 3);
    }
}
