//! Scryfall Tagger connection and fetch policy configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://tagger.scryfall.com/graphql".to_string()
}

fn default_scryfall_api() -> String {
    "https://api.scryfall.com".to_string()
}

fn default_user_agent() -> String {
    "tutor/0.1".to_string()
}

/// Default pause between network requests, in milliseconds.
const fn default_request_delay_ms() -> u64 {
    150
}

/// Default consecutive-failure threshold for the circuit breaker.
const fn default_failure_threshold() -> u32 {
    3
}

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

const fn default_cache_aborted_as_empty() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaggerConfig {
    /// GraphQL endpoint of the tagging service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Scryfall REST API base, used to resolve card names to printings.
    #[serde(default = "default_scryfall_api")]
    pub scryfall_api: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause between two network requests, in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Consecutive failures after which remaining cards are skipped.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache cards skipped after an abort as confirmed empty. When false they
    /// stay uncached and are retried next session.
    #[serde(default = "default_cache_aborted_as_empty")]
    pub cache_aborted_as_empty: bool,

    /// Tagger CSRF token, sent as `X-CSRF-Token`.
    #[serde(default)]
    pub csrf_token: String,

    /// Tagger session cookie, sent as `Cookie`.
    #[serde(default)]
    pub session_cookie: String,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            scryfall_api: default_scryfall_api(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            failure_threshold: default_failure_threshold(),
            timeout_secs: default_timeout_secs(),
            cache_aborted_as_empty: default_cache_aborted_as_empty(),
            csrf_token: String::new(),
            session_cookie: String::new(),
        }
    }
}

impl TaggerConfig {
    /// Check if both halves of the Tagger session are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.csrf_token.is_empty() && !self.session_cookie.is_empty()
    }

    #[must_use]
    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
