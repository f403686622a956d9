//! # tutor-config
//!
//! Layered configuration loading for Tutor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TUTOR_*` prefix, `__` as separator)
//! 2. Project-level `.tutor/config.toml`
//! 3. User-level `~/.config/tutor/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TUTOR_TAGGER__REQUEST_DELAY_MS` -> `tagger.request_delay_ms`,
//! `TUTOR_GENERAL__CACHE_PATH` -> `general.cache_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tutor_config::TutorConfig;
//!
//! let config = TutorConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.tagger.is_authenticated() {
//!     println!("Tagger session configured");
//! }
//! ```

mod error;
mod general;
mod tagger;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use tagger::TaggerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TutorConfig {
    #[serde(default)]
    pub tagger: TaggerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TutorConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tutor/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TUTOR_").split("__"))
    }

    /// Reject values the fetcher cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero failure threshold or a
    /// zero request timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tagger.failure_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tagger.failure_threshold".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tagger.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tagger.timeout_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tutor").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current
    /// directory. Does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
