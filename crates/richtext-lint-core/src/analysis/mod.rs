//! Rich-text document analysis.
//!
//! [`analyze_document`] runs every synchronous check on one document
//! snapshot: the tree walk, word count, line break classification and
//! readability hints. Link warnings come back unreconciled; pass them
//! through a [`LinkReconciler`](crate::reconcile::LinkReconciler) to
//! resolve entry and asset checks.

pub mod hints;
pub mod line_breaks;
pub mod reports;
pub mod walker;

pub use hints::HintThresholds;
pub use reports::{DiscouragedBreak, DocumentReport, Hint, Longest};
pub use walker::{DocumentWalk, walk_document};

use crate::config::Config;
use crate::document::Node;
use crate::error::AnalysisResult;
use crate::links::LinkPatterns;
use crate::text;

/// Settings for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSettings {
    /// Site-specific link patterns.
    pub links: LinkPatterns,
    /// Readability hint thresholds.
    pub hints: HintThresholds,
}

impl AnalysisSettings {
    /// Build settings from configuration, falling back to defaults for
    /// anything unset.
    pub fn from_config(config: &Config) -> AnalysisResult<Self> {
        let links = LinkPatterns::new(
            config.site_domain.as_deref(),
            config.url_text_pattern.as_deref(),
        )?;
        let defaults = HintThresholds::default();
        let hints = HintThresholds {
            long_sentence_chars: config
                .long_sentence_chars
                .unwrap_or(defaults.long_sentence_chars),
            long_paragraph_chars: config
                .long_paragraph_chars
                .unwrap_or(defaults.long_paragraph_chars),
            heading_min_words: config
                .heading_min_words
                .unwrap_or(defaults.heading_min_words),
            words_per_heading: config
                .words_per_heading
                .unwrap_or(defaults.words_per_heading),
        };
        Ok(Self { links, hints })
    }
}

/// Analyze one document snapshot.
#[tracing::instrument(skip_all)]
pub fn analyze_document(document: &Node, settings: &AnalysisSettings) -> DocumentReport {
    let walk = walk_document(document, &settings.links);
    let word_count = text::split_words(&walk.text).len();
    let line_breaks = line_breaks::find_discouraged_breaks(&walk.text);
    let hints = hints::collect_hints(
        &walk.longest,
        word_count,
        walk.heading_count,
        &settings.hints,
    );

    tracing::debug!(
        word_count,
        headings = walk.heading_count,
        line_breaks = line_breaks.len(),
        hints = hints.len(),
        "document analyzed"
    );

    DocumentReport {
        word_count,
        heading_count: walk.heading_count,
        wrong_headings: walk.wrong_headings,
        line_breaks,
        link_warnings: walk.link_warnings,
        longest: walk.longest,
        hints,
    }
}
