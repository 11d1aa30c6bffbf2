//! Core library for richtext-lint.
//!
//! Authoring checks for structured rich-text documents: heading order,
//! discouraged hard line breaks, link hygiene with asynchronous
//! publication checks for linked entries and assets, and readability
//! hints.
//!
//! # Modules
//!
//! - [`document`] - Rich-text node tree
//! - [`analysis`] - Tree walk, line break classification, hints
//! - [`links`] - Link warning kinds and site patterns
//! - [`reconcile`] - Asynchronous entry and asset lookups
//! - [`lookup`] - Fixture-backed entity lookup
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use richtext_lint_core::{AnalysisSettings, Node, analyze_document};
//!
//! let doc = Node::from_json(r#"{"nodeType": "document", "content": []}"#)
//!     .expect("valid document");
//! let report = analyze_document(&doc, &AnalysisSettings::default());
//! println!("{} words", report.word_count);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod links;
pub mod lookup;
pub mod reconcile;
pub mod text;

pub use analysis::{AnalysisSettings, DocumentReport, analyze_document};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use document::{Node, NodeKind};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult, LookupError};
pub use links::{LinkPatterns, LinkReason, LinkWarning};
pub use lookup::StaticLookup;
pub use reconcile::{Entity, EntityLookup, LinkReconciler, Resolution};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
