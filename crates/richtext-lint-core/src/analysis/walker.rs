//! Single-pass document walk.
//!
//! Collects flattened text, heading hierarchy violations, link warnings and
//! the longest paragraph/sentence in one depth-first traversal. Paragraphs,
//! out-of-order headings and hyperlinks are walked in a forked [`Scope`]
//! whose text is kept apart until the subtree is done, then merged back.

use crate::document::{Node, NodeKind};
use crate::links::{LinkPatterns, LinkReason, LinkWarning};
use crate::text::{self, SENTINEL};

use super::reports::Longest;

/// Heading level in effect before the first heading.
const INITIAL_HEADING_LEVEL: u32 = 1;

/// Result of walking a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentWalk {
    /// Flattened text with [`SENTINEL`] markers at block boundaries.
    pub text: String,
    /// Visible text of every heading that skips a level.
    pub wrong_headings: Vec<String>,
    /// Unreconciled link warnings in document order.
    pub link_warnings: Vec<LinkWarning>,
    /// Longest paragraph and sentence.
    pub longest: Longest,
    /// Headings that follow the hierarchy.
    pub heading_count: usize,
}

/// Walk `document` (a `document` root) and collect its statistics.
#[tracing::instrument(skip_all, fields(blocks = document.content.len()))]
pub fn walk_document(document: &Node, patterns: &LinkPatterns) -> DocumentWalk {
    let walker = Walker { patterns };
    let mut scope = Scope::root();
    for node in &document.content {
        walker.visit(node, &mut scope);
    }
    tracing::debug!(
        text_len = scope.text.len(),
        wrong_headings = scope.wrong_headings.len(),
        link_warnings = scope.link_warnings.len(),
        "document walked"
    );
    scope.into_walk()
}

/// Accumulator for one level of the walk.
#[derive(Debug, Default)]
struct Scope {
    text: String,
    last_heading: u32,
    heading_count: usize,
    wrong_headings: Vec<String>,
    link_warnings: Vec<LinkWarning>,
    longest: Longest,
}

impl Scope {
    fn root() -> Self {
        Self {
            last_heading: INITIAL_HEADING_LEVEL,
            ..Self::default()
        }
    }

    /// A child scope with a private text buffer starting at `seed`.
    ///
    /// The child sees the current heading level; heading state it changes
    /// stays in the child.
    fn fork(&self, seed: &str) -> Self {
        Self {
            text: seed.to_string(),
            last_heading: self.last_heading,
            ..Self::default()
        }
    }

    /// Merge a finished child back in.
    fn absorb(&mut self, child: Self) {
        self.text.push_str(&child.text);
        self.wrong_headings.extend(child.wrong_headings);
        self.link_warnings.extend(child.link_warnings);
        self.longest.merge(&child.longest);
    }

    fn into_walk(self) -> DocumentWalk {
        DocumentWalk {
            text: self.text,
            wrong_headings: self.wrong_headings,
            link_warnings: self.link_warnings,
            longest: self.longest,
            heading_count: self.heading_count,
        }
    }
}

struct Walker<'a> {
    patterns: &'a LinkPatterns,
}

impl Walker<'_> {
    fn visit(&self, node: &Node, scope: &mut Scope) {
        match node.kind() {
            NodeKind::Text => scope.text.push_str(node.text()),
            NodeKind::Heading(level) => self.heading(node, level, scope),
            NodeKind::Paragraph => self.paragraph(node, scope),
            NodeKind::Hyperlink => {
                let text = self.collect(node, scope);
                if let Some(warning) = self.patterns.classify(&text, node.uri()) {
                    scope.link_warnings.push(warning);
                }
            }
            NodeKind::EntryHyperlink => {
                let text = self.collect(node, scope);
                scope.link_warnings.push(LinkWarning::new(
                    LinkReason::CheckEntry,
                    text,
                    node.target_id(),
                ));
            }
            NodeKind::EmbeddedAsset => {
                let id = node.target_id();
                scope.link_warnings.push(LinkWarning::new(
                    LinkReason::CheckAsset,
                    format!("Asset {id}"),
                    id,
                ));
            }
            kind => {
                if !kind.is_unmarked() {
                    scope.text.push_str(SENTINEL);
                }
                self.visit_children(node, scope);
            }
        }
    }

    fn visit_children(&self, node: &Node, scope: &mut Scope) {
        for child in &node.content {
            self.visit(child, scope);
        }
    }

    fn heading(&self, node: &Node, level: u32, scope: &mut Scope) {
        if level > scope.last_heading.saturating_add(1) {
            scope.last_heading = level;
            let mut child = scope.fork(SENTINEL);
            self.visit_children(node, &mut child);
            let excerpt = text::visible(&child.text);
            scope.absorb(child);
            scope.wrong_headings.push(excerpt);
            return;
        }
        scope.last_heading = level;
        scope.text.push_str(SENTINEL);
        scope.heading_count += 1;
        self.visit_children(node, scope);
    }

    fn paragraph(&self, node: &Node, scope: &mut Scope) {
        let mut child = scope.fork(SENTINEL);
        self.visit_children(node, &mut child);
        let paragraph = text::visible(&child.text);
        scope.absorb(child);

        scope.longest.offer_paragraph(&paragraph);
        scope.longest.offer_sentence(text::longest_sentence(&paragraph));
    }

    /// Walk a link's children in a private scope and return its display text.
    fn collect(&self, node: &Node, scope: &mut Scope) -> String {
        let mut child = scope.fork("");
        self.visit_children(node, &mut child);
        let text = text::visible(&child.text);
        scope.absorb(child);
        text
    }
}
