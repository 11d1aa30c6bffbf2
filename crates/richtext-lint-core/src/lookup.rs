//! Entity lookup backed by a JSON fixture.
//!
//! The fixture mirrors what the content management API would return:
//!
//! ```json
//! {
//!   "entries": { "4xYz": { "sys": { "publishedCounter": 0 }, "fields": { "title": { "de-DE": "Sommerfest" } } } },
//!   "assets":  { "9aBc": { "sys": { "publishedCounter": 2 } } }
//! }
//! ```
//!
//! Ids missing from the fixture fail with [`LookupError::NotFound`].

use std::collections::HashMap;

use async_trait::async_trait;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult, LookupError};
use crate::reconcile::{Entity, EntityLookup};

/// In-memory entities keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticLookup {
    /// Entries by id.
    pub entries: HashMap<String, Entity>,
    /// Assets by id.
    pub assets: HashMap<String, Entity>,
}

impl StaticLookup {
    /// Parse a fixture from JSON text.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Load a fixture file.
    #[tracing::instrument(fields(path = %path))]
    pub fn load(path: &Utf8Path) -> AnalysisResult<Self> {
        let fixture_error = |reason: String| AnalysisError::EntityFixture {
            path: path.to_path_buf(),
            reason,
        };
        let content =
            std::fs::read_to_string(path.as_std_path()).map_err(|e| fixture_error(e.to_string()))?;
        let lookup = Self::from_json(&content).map_err(|e| fixture_error(e.to_string()))?;
        tracing::debug!(
            entries = lookup.entries.len(),
            assets = lookup.assets.len(),
            "entity fixture loaded"
        );
        Ok(lookup)
    }
}

#[async_trait]
impl EntityLookup for StaticLookup {
    async fn fetch_entry(&self, id: &str) -> Result<Entity, LookupError> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                kind: "entry",
                id: id.to_string(),
            })
    }

    async fn fetch_asset(&self, id: &str) -> Result<Entity, LookupError> {
        self.assets
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                kind: "asset",
                id: id.to_string(),
            })
    }
}
