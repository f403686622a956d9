//! Cross-cutting error types for Tutor.
//!
//! Domain-specific errors (`TagError`, `ConfigError`) live in their own
//! crates. The binary converges everything through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Tutor crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record failed validation (quantity, cmc, empty name).
    #[error("Validation error: {0}")]
    Validation(String),
}
