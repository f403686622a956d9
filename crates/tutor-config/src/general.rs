//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Where the tag cache is persisted between sessions. Empty disables
    /// persistence.
    #[serde(default)]
    pub cache_path: String,
}

impl GeneralConfig {
    /// The persistent cache location, if one is configured.
    #[must_use]
    pub fn cache_path(&self) -> Option<PathBuf> {
        (!self.cache_path.is_empty()).then(|| PathBuf::from(&self.cache_path))
    }
}
