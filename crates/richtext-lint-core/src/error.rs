//! Error types for richtext-lint-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur at the edges of document analysis.
///
/// The walk itself never fails; these cover parsing input and building
/// the settings the walk runs with.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input is not a rich-text document.
    #[error("invalid rich-text document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A configured pattern failed to compile.
    #[error("invalid {name} pattern: {source}")]
    InvalidPattern {
        /// Which setting held the pattern.
        name: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// The entity fixture could not be read or parsed.
    #[error("failed to load entity fixture {path}: {reason}")]
    EntityFixture {
        /// Fixture file path.
        path: Utf8PathBuf,
        /// What went wrong.
        reason: String,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors returned by an [`EntityLookup`](crate::reconcile::EntityLookup).
///
/// The reconciler treats every variant the same way: the link is surfaced
/// as needing attention.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No entity exists with the given id.
    #[error("{kind} {id} not found")]
    NotFound {
        /// "entry" or "asset".
        kind: &'static str,
        /// The requested id.
        id: String,
    },

    /// The lookup failed for another reason (network, permissions).
    ///
    /// [`StaticLookup`](crate::lookup::StaticLookup) never returns this;
    /// lookups backed by a remote API do.
    #[error("lookup failed: {0}")]
    Failed(String),
}
