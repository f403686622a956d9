//! # tutor-tags
//!
//! Oracle tag acquisition for Tutor.
//!
//! Functional ("oracle") tags come from an external tagging service that
//! enforces strict rate limits. This crate provides:
//! - [`TagCache`]: session-scoped cache that tells "never asked" apart from
//!   "asked, no tags"
//! - [`TagSource`]: the lookup seam, implemented over HTTP by [`TaggerClient`]
//! - [`TagFetcher`]: strictly sequential lookups with an inter-request delay,
//!   a consecutive-failure circuit breaker, and cooperative cancellation
//! - [`fetch_tags_by_name`]: the legacy name-only path, which never calls out
//! - [`enrich`]: build tagged copies of imported card records

pub mod cache;
pub mod enrich;
pub mod fetcher;
pub mod source;
pub mod tagger;

mod error;
mod http;

pub use cache::TagCache;
pub use enrich::enrich;
pub use error::TagError;
pub use fetcher::{
    AbortPolicy, CardOutcome, FetchOptions, FetchReport, FetchRun, Halt, OutcomeKind, TagFetcher,
    fetch_tags_by_name,
};
pub use source::{CardIdentifier, TagSource, TaggerAuth};
pub use tagger::{ClientOptions, TaggerClient};
