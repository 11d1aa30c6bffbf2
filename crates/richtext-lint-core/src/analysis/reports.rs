//! Report structs for document analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in both CLI JSON output and MCP tool responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::links::LinkWarning;
use crate::text;

/// Everything the sidebar shows for one document snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentReport {
    /// Number of words in the flattened text.
    pub word_count: usize,
    /// Headings that follow the hierarchy.
    pub heading_count: usize,
    /// Text of headings that skip a level.
    pub wrong_headings: Vec<String>,
    /// Hard line breaks that should probably be paragraphs.
    pub line_breaks: Vec<DiscouragedBreak>,
    /// Link warnings, in document order.
    pub link_warnings: Vec<LinkWarning>,
    /// Longest paragraph and sentence.
    pub longest: Longest,
    /// Readability notes.
    pub hints: Vec<Hint>,
}

impl DocumentReport {
    /// Whether any warning (not counting hints) is present.
    ///
    /// Pending entry/asset checks count; project the warnings through a
    /// reconciler first to drop the ones that resolve clean.
    pub fn has_warnings(&self) -> bool {
        !self.wrong_headings.is_empty()
            || !self.line_breaks.is_empty()
            || !self.link_warnings.is_empty()
    }
}

// -- Longest ---------------------------------------------------------------

/// The longest paragraph and sentence seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Longest {
    /// Longest paragraph text.
    pub paragraph: String,
    /// Its length in characters.
    pub paragraph_chars: usize,
    /// Longest sentence text.
    pub sentence: String,
    /// Its length in characters.
    pub sentence_chars: usize,
}

impl Longest {
    /// Replace the paragraph if `candidate` is strictly longer.
    pub fn offer_paragraph(&mut self, candidate: &str) {
        let chars = text::char_len(candidate);
        if chars > self.paragraph_chars {
            self.paragraph = candidate.to_string();
            self.paragraph_chars = chars;
        }
    }

    /// Replace the sentence if `candidate` is strictly longer.
    pub fn offer_sentence(&mut self, candidate: &str) {
        let chars = text::char_len(candidate);
        if chars > self.sentence_chars {
            self.sentence = candidate.to_string();
            self.sentence_chars = chars;
        }
    }

    /// Fold in statistics collected later in the document.
    pub fn merge(&mut self, later: &Self) {
        self.offer_paragraph(&later.paragraph);
        self.offer_sentence(&later.sentence);
    }
}

// -- Line breaks -----------------------------------------------------------

/// A discouraged hard line break with its surrounding text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiscouragedBreak {
    /// Up to 33 characters before the break.
    pub before: String,
    /// Up to 33 characters after the break.
    pub after: String,
}

// -- Hints -----------------------------------------------------------------

/// A readability note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hint {
    /// A sentence is very long.
    LongSentence {
        /// Sentence length in characters.
        chars: usize,
        /// The first 100 characters.
        excerpt: String,
    },
    /// A paragraph is very long.
    LongParagraph {
        /// Paragraph length in characters.
        chars: usize,
    },
    /// The text would benefit from more headings.
    FewHeadings {
        /// Words in the document.
        words: usize,
        /// Headings in the document.
        headings: usize,
    },
}
