//! Tag acquisition error types.

use thiserror::Error;

/// Errors that can occur while obtaining oracle tags.
///
/// Every network-side variant counts as one failed lookup towards the
/// fetcher's consecutive-failure limit. A card the service does not know is
/// not an error: it resolves to an empty tag list.
#[derive(Debug, Error)]
pub enum TagError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The tagging service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a response, or the response carried GraphQL errors.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading or writing a persisted tag cache failed.
    #[error("tag cache error: {0}")]
    Cache(String),
}
