//! Session-scoped oracle tag cache.
//!
//! An absent key means the card has not been resolved yet. A present key with
//! an empty list means the card was resolved and carries no tags. The fetcher
//! relies on that distinction, so callers must never insert placeholder
//! entries for unresolved cards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// Mapping from card name to a previously resolved tag list.
///
/// Owned by the caller for the lifetime of one import session and handed to
/// the fetcher by mutable reference. There is no eviction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCache {
    entries: BTreeMap<String, Vec<String>>,
}

impl TagCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn put(&mut self, name: impl Into<String>, tags: Vec<String>) {
        self.entries.insert(name.into(), tags);
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a cache persisted by [`TagCache::save`]. A missing file yields an
    /// empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Cache`] if the file exists but cannot be read or
    /// does not hold a `{ name: [tags] }` JSON object.
    pub fn load(path: &Path) -> Result<Self, TagError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TagError::Cache(format!("failed to read {}: {e}", path.display())))?;
        let cache: Self = serde_json::from_str(&raw)
            .map_err(|e| TagError::Cache(format!("failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), entries = cache.len(), "loaded tag cache");
        Ok(cache)
    }

    /// Persist the cache as a pretty-printed JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Cache`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), TagError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TagError::Cache(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| TagError::Cache(format!("failed to serialize tag cache: {e}")))?;
        std::fs::write(path, raw)
            .map_err(|e| TagError::Cache(format!("failed to write {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), entries = self.len(), "saved tag cache");
        Ok(())
    }
}
