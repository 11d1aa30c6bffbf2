//! Link warnings and the patterns that produce them.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Default pattern for display text that is itself a URL.
pub const DEFAULT_URL_TEXT_PATTERN: &str = r"^https?://";

/// Why a link was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum LinkReason {
    /// Entry link awaiting a publication check.
    #[serde(rename = "checkEntry")]
    CheckEntry,
    /// Embedded asset awaiting a publication check.
    #[serde(rename = "checkAsset")]
    CheckAsset,
    /// Plain hyperlink into the own site; should be an entry link.
    #[serde(rename = "noEntryLink")]
    NoEntryLink,
    /// Display text is a bare URL.
    #[serde(rename = "urlText")]
    UrlText,
    /// Target page does not exist.
    #[serde(rename = "404")]
    NotFound,
    /// Linked entry is not published.
    #[serde(rename = "unpublishedEntry")]
    UnpublishedEntry,
    /// Embedded asset is not published.
    #[serde(rename = "unpublishedAsset")]
    UnpublishedAsset,
}

impl LinkReason {
    /// Returns the reason as its wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckEntry => "checkEntry",
            Self::CheckAsset => "checkAsset",
            Self::NoEntryLink => "noEntryLink",
            Self::UrlText => "urlText",
            Self::NotFound => "404",
            Self::UnpublishedEntry => "unpublishedEntry",
            Self::UnpublishedAsset => "unpublishedAsset",
        }
    }

    /// Whether the warning still waits on an entity lookup.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::CheckEntry | Self::CheckAsset)
    }

    /// Advice shown to authors next to the warning.
    pub const fn advice(&self) -> &'static str {
        match self {
            Self::UnpublishedEntry | Self::UnpublishedAsset => "must still be published",
            Self::NotFound => "the page does not exist",
            Self::NoEntryLink => "use an entry link instead",
            Self::UrlText => "use descriptive link text",
            Self::CheckEntry | Self::CheckAsset => "",
        }
    }
}

impl std::fmt::Display for LinkReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link-related authoring issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinkWarning {
    /// Why the link was flagged.
    pub reason: LinkReason,
    /// Display text (or a replacement text after reconciliation).
    pub text: String,
    /// Target URI, or the referenced entity id for entry/asset links.
    pub uri: String,
}

impl LinkWarning {
    /// Create a warning.
    pub fn new(reason: LinkReason, text: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            reason,
            text: text.into(),
            uri: uri.into(),
        }
    }
}

/// Site-specific patterns for plain hyperlinks.
#[derive(Debug, Clone)]
pub struct LinkPatterns {
    site_domain: Option<String>,
    url_text: Regex,
}

impl Default for LinkPatterns {
    fn default() -> Self {
        Self {
            site_domain: None,
            url_text: Regex::new(DEFAULT_URL_TEXT_PATTERN).expect("valid regex"),
        }
    }
}

impl LinkPatterns {
    /// Build patterns from settings.
    ///
    /// `site_domain` is a URI prefix; links starting with it should be entry
    /// links. `url_text` overrides [`DEFAULT_URL_TEXT_PATTERN`].
    pub fn new(site_domain: Option<&str>, url_text: Option<&str>) -> AnalysisResult<Self> {
        let url_text = Regex::new(url_text.unwrap_or(DEFAULT_URL_TEXT_PATTERN)).map_err(
            |source| AnalysisError::InvalidPattern {
                name: "url_text_pattern",
                source,
            },
        )?;
        Ok(Self {
            site_domain: site_domain
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            url_text,
        })
    }

    /// Whether `uri` points into the own site.
    pub fn is_own_site(&self, uri: &str) -> bool {
        self.site_domain
            .as_deref()
            .is_some_and(|domain| uri.starts_with(domain))
    }

    /// Whether display `text` looks like a URL.
    pub fn is_url_text(&self, text: &str) -> bool {
        self.url_text.is_match(text)
    }

    /// Classify a plain hyperlink, if it needs a warning.
    pub fn classify(&self, text: &str, uri: &str) -> Option<LinkWarning> {
        if self.is_own_site(uri) {
            Some(LinkWarning::new(LinkReason::NoEntryLink, text, uri))
        } else if self.is_url_text(text) {
            Some(LinkWarning::new(LinkReason::UrlText, text, uri))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> LinkPatterns {
        LinkPatterns::new(Some("https://example.org"), None).unwrap()
    }

    #[test]
    fn own_site_link_needs_entry() {
        let w = patterns()
            .classify("Our team", "https://example.org/team")
            .unwrap();
        assert_eq!(w.reason, LinkReason::NoEntryLink);
        assert_eq!(w.text, "Our team");
        assert_eq!(w.uri, "https://example.org/team");
    }

    #[test]
    fn own_site_wins_over_url_text() {
        let w = patterns()
            .classify("https://example.org/team", "https://example.org/team")
            .unwrap();
        assert_eq!(w.reason, LinkReason::NoEntryLink);
    }

    #[test]
    fn url_display_text_flagged() {
        let w = patterns()
            .classify("http://other.net/page", "http://other.net/page")
            .unwrap();
        assert_eq!(w.reason, LinkReason::UrlText);
    }

    #[test]
    fn descriptive_external_link_passes() {
        assert!(patterns().classify("Read more", "https://other.net").is_none());
    }

    #[test]
    fn no_site_domain_disables_own_site_check() {
        let p = LinkPatterns::default();
        assert!(!p.is_own_site("https://example.org"));
        assert!(LinkPatterns::new(Some(""), None).unwrap().classify("x", "y").is_none());
    }

    #[test]
    fn custom_url_pattern() {
        let p = LinkPatterns::new(None, Some(r"^www\.")).unwrap();
        assert!(p.is_url_text("www.example.org"));
        assert!(!p.is_url_text("https://example.org"));
    }

    #[test]
    fn invalid_pattern_errors() {
        let err = LinkPatterns::new(None, Some("(")).unwrap_err();
        assert!(err.to_string().contains("url_text_pattern"));
    }

    #[test]
    fn reason_wire_names() {
        let json = serde_json::to_string(&LinkReason::NotFound).unwrap();
        assert_eq!(json, "\"404\"");
        for reason in [
            LinkReason::CheckEntry,
            LinkReason::CheckAsset,
            LinkReason::NoEntryLink,
            LinkReason::UrlText,
            LinkReason::UnpublishedEntry,
            LinkReason::UnpublishedAsset,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }
}
