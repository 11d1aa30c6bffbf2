//! Asynchronous link resolution.
//!
//! Entry links and embedded assets are reported by the walker as
//! `checkEntry` / `checkAsset`. [`LinkReconciler`] looks each referenced
//! entity up once, remembers the outcome for as long as the reconciler
//! lives, and projects the raw warnings into what an author should see.
//!
//! # Example
//!
//! ```no_run
//! # async fn demo(warnings: Vec<richtext_lint_core::links::LinkWarning>) {
//! use std::sync::Arc;
//! use richtext_lint_core::lookup::StaticLookup;
//! use richtext_lint_core::reconcile::LinkReconciler;
//!
//! let reconciler = LinkReconciler::new(Arc::new(StaticLookup::default()), "de-DE");
//! let visible = reconciler.resolve(&warnings).await;
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::error::LookupError;
use crate::links::{LinkReason, LinkWarning};

/// An entry or asset as returned by the content management API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Entity {
    /// System metadata.
    pub sys: EntitySys,
    /// Localized fields.
    pub fields: EntityFields,
}

/// System metadata of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitySys {
    /// How often the entity was published; absent means never.
    pub published_counter: Option<u64>,
}

/// The fields the reconciler reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EntityFields {
    /// Title per locale.
    pub title: Option<HashMap<String, String>>,
}

impl Entity {
    /// An entity published `counter` times with a title in `locale`.
    pub fn new(counter: u64, locale: &str, title: &str) -> Self {
        Self {
            sys: EntitySys {
                published_counter: Some(counter),
            },
            fields: EntityFields {
                title: Some(HashMap::from([(locale.to_string(), title.to_string())])),
            },
        }
    }

    /// Whether the entity was ever published.
    pub fn is_published(&self) -> bool {
        self.sys.published_counter.unwrap_or(0) > 0
    }

    /// Title in `locale`, if set.
    pub fn title(&self, locale: &str) -> Option<&str> {
        self.fields
            .title
            .as_ref()
            .and_then(|t| t.get(locale))
            .map(String::as_str)
    }
}

/// Capability to look up referenced entities.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Fetch an entry by id.
    async fn fetch_entry(&self, id: &str) -> Result<Entity, LookupError>;

    /// Fetch an asset by id.
    async fn fetch_asset(&self, id: &str) -> Result<Entity, LookupError>;
}

/// What the reconciler knows about one referenced id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A lookup is in flight (or never finished).
    Pending,
    /// The entity is published; nothing to report.
    Clean,
    /// The link needs attention; holds the text to show.
    Flagged(String),
}

/// Resolves entry and asset link warnings against an [`EntityLookup`].
///
/// Each id is looked up at most once: the id is marked [`Resolution::Pending`]
/// before its lookup task is spawned, so warnings seen again while the lookup
/// runs never start a second one. Outcomes stay cached until [`reset`].
///
/// [`reset`]: LinkReconciler::reset
pub struct LinkReconciler<L> {
    lookup: Arc<L>,
    locale: String,
    cache: Arc<Mutex<HashMap<String, Resolution>>>,
}

impl<L> Clone for LinkReconciler<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            locale: self.locale.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<L: EntityLookup + 'static> LinkReconciler<L> {
    /// Create a reconciler that reads titles in `locale`.
    pub fn new(lookup: Arc<L>, locale: impl Into<String>) -> Self {
        Self {
            lookup,
            locale: locale.into(),
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start lookups for every pending warning whose id is not yet known.
    ///
    /// Must be called within a tokio runtime. The returned handles may be
    /// awaited to wait for completion or dropped to let lookups finish in
    /// the background; either way each task writes its outcome to the cache.
    #[tracing::instrument(skip_all, fields(warnings = warnings.len()))]
    pub fn dispatch(&self, warnings: &[LinkWarning]) -> Vec<JoinHandle<()>> {
        let mut tasks = Vec::new();

        for warning in warnings.iter().filter(|w| w.reason.is_pending()) {
            if !self.claim(&warning.uri) {
                continue;
            }
            tracing::debug!(id = %warning.uri, reason = %warning.reason, "dispatching lookup");

            let lookup = Arc::clone(&self.lookup);
            let cache = Arc::clone(&self.cache);
            let locale = self.locale.clone();
            let warning = warning.clone();
            tasks.push(tokio::spawn(async move {
                let result = match warning.reason {
                    LinkReason::CheckAsset => lookup.fetch_asset(&warning.uri).await,
                    _ => lookup.fetch_entry(&warning.uri).await,
                };
                let resolution = resolve_outcome(result, &warning, &locale);
                lock(&cache).insert(warning.uri, resolution);
            }));
        }

        tasks
    }

    /// Dispatch lookups, wait for all of them and project the warnings.
    pub async fn resolve(&self, warnings: &[LinkWarning]) -> Vec<LinkWarning> {
        for task in self.dispatch(warnings) {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "lookup task did not complete");
            }
        }
        self.project(warnings)
    }

    /// The warnings an author should see right now.
    ///
    /// `noEntryLink`, `urlText` and `404` pass through. Entry and asset
    /// checks appear only once their id is flagged, re-tagged as unpublished
    /// and prefixed with a category label; clean and pending ones are hidden.
    pub fn project(&self, warnings: &[LinkWarning]) -> Vec<LinkWarning> {
        let cache = lock(&self.cache);
        warnings
            .iter()
            .filter_map(|warning| {
                if !warning.reason.is_pending() {
                    return Some(warning.clone());
                }
                let Some(Resolution::Flagged(text)) = cache.get(&warning.uri) else {
                    return None;
                };
                if text.is_empty() {
                    return None;
                }
                let (reason, label) = match warning.reason {
                    LinkReason::CheckAsset => (LinkReason::UnpublishedAsset, "Asset"),
                    _ => (LinkReason::UnpublishedEntry, "Entry"),
                };
                Some(LinkWarning::new(
                    reason,
                    format!("{label}: {text}"),
                    warning.uri.clone(),
                ))
            })
            .collect()
    }

    /// What is known about `id`, if it was ever dispatched.
    pub fn state(&self, id: &str) -> Option<Resolution> {
        lock(&self.cache).get(id).cloned()
    }

    /// Forget every outcome. Call when switching to a different document.
    ///
    /// Lookups still in flight write their outcome after the reset.
    pub fn reset(&self) {
        let mut cache = lock(&self.cache);
        tracing::debug!(entries = cache.len(), "resetting link resolution cache");
        cache.clear();
    }

    /// Mark `id` pending unless it is already known. Returns whether the
    /// caller now owns the lookup.
    fn claim(&self, id: &str) -> bool {
        let mut cache = lock(&self.cache);
        if cache.contains_key(id) {
            return false;
        }
        cache.insert(id.to_string(), Resolution::Pending);
        true
    }
}

/// Turn a lookup result into a cache entry.
fn resolve_outcome(
    result: Result<Entity, LookupError>,
    warning: &LinkWarning,
    locale: &str,
) -> Resolution {
    match result {
        Ok(entity) if entity.is_published() => {
            tracing::debug!(id = %warning.uri, "linked entity is published");
            Resolution::Clean
        }
        Ok(entity) => {
            let text = entity.title(locale).unwrap_or(warning.text.as_str());
            tracing::debug!(id = %warning.uri, "linked entity is unpublished");
            Resolution::Flagged(text.to_string())
        }
        Err(err) => {
            tracing::warn!(id = %warning.uri, error = %err, "entity lookup failed");
            Resolution::Flagged(warning.text.clone())
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
