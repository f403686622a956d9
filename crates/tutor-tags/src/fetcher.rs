//! Sequential, rate-limited oracle tag acquisition.
//!
//! Requests go out strictly one at a time with a fixed pause between two
//! network calls. Cache hits cost neither a call nor a pause. After
//! `failure_threshold` consecutive failures the run stops calling the
//! service and every remaining card resolves to an empty tag list.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tutor_core::CardAggregate;

use crate::cache::TagCache;
use crate::source::{CardIdentifier, TagSource, TaggerAuth};

/// Pause between two consecutive network requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(150);

/// Consecutive failures after which the run stops issuing requests.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Reported by the name-only lookup path on every call.
pub const NAME_LOOKUP_UNSUPPORTED: &str = "Tag lookup by card name alone is no longer supported; \
provide set codes and collector numbers to fetch oracle tags";

/// Recorded once when a cancellation request stops a run.
pub const CANCELLED_MESSAGE: &str =
    "Tag fetching was cancelled; remaining cards were left without tags";

/// What happens to cards skipped after the run stops early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortPolicy {
    /// Cache skipped cards as confirmed empty.
    #[default]
    CacheAsEmpty,
    /// Leave skipped cards out of the cache so a later session retries them.
    LeaveUnresolved,
}

/// Per-call fetch options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub use_cache: bool,
    pub auth: Option<TaggerAuth>,
    /// When the receiver observes `true`, the run stops at the next card.
    pub cancel: Option<watch::Receiver<bool>>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            auth: None,
            cancel: None,
        }
    }
}

/// How a single card was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Cached,
    Fetched,
    Failed(String),
    /// Not attempted because the run was aborted or cancelled.
    Skipped,
}

/// One resolved-or-failed card yielded by a [`FetchRun`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOutcome {
    pub name: String,
    pub tags: Vec<String>,
    pub kind: OutcomeKind,
}

/// Why a run stopped issuing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    Aborted,
    Cancelled,
}

/// Result of [`TagFetcher::fetch_tags`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    pub tags: BTreeMap<String, Vec<String>>,
    /// Distinct failure messages in first-seen order.
    pub errors: Vec<String>,
    pub has_errors: bool,
    pub aborted: bool,
}

impl FetchReport {
    fn record_error(&mut self, message: String) {
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
        self.has_errors = true;
    }
}

/// Drives a [`TagSource`] over a card list under the rate-limit contract.
#[derive(Debug, Clone)]
pub struct TagFetcher<S> {
    source: S,
    request_delay: Duration,
    failure_threshold: u32,
    abort_policy: AbortPolicy,
}

impl<S: TagSource> TagFetcher<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            request_delay: DEFAULT_REQUEST_DELAY,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            abort_policy: AbortPolicy::CacheAsEmpty,
        }
    }

    #[must_use]
    pub const fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// A threshold of zero is treated as one.
    #[must_use]
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold.max(1);
        self
    }

    #[must_use]
    pub const fn with_abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.abort_policy = policy;
        self
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The message recorded once when the circuit breaker opens.
    #[must_use]
    pub fn abort_message(&self) -> String {
        format!(
            "Stopped fetching tags after {} consecutive failures; remaining cards were left without tags",
            self.failure_threshold
        )
    }

    /// Start a run that yields one card outcome at a time.
    pub fn run<'a>(
        &'a self,
        cards: &'a [CardAggregate],
        cache: &'a mut TagCache,
        options: &'a FetchOptions,
    ) -> FetchRun<'a, S> {
        FetchRun {
            fetcher: self,
            cards,
            cache,
            options,
            position: 0,
            consecutive_failures: 0,
            requests_sent: 0,
            halt: None,
        }
    }

    /// Resolve tags for every card, in input order.
    ///
    /// `on_progress(processed, total)` fires after every card, whether it
    /// came from the cache, the network, or was skipped.
    pub async fn fetch_tags<F>(
        &self,
        cards: &[CardAggregate],
        cache: &mut TagCache,
        options: &FetchOptions,
        mut on_progress: F,
    ) -> FetchReport
    where
        F: FnMut(usize, usize),
    {
        let total = cards.len();
        let mut report = FetchReport::default();
        let mut run = self.run(cards, cache, options);
        let mut processed = 0;
        let mut halt_recorded = false;

        while let Some(outcome) = run.next().await {
            if let OutcomeKind::Failed(message) = outcome.kind {
                report.record_error(message);
            }
            if !halt_recorded {
                if let Some(halt) = run.halt() {
                    halt_recorded = true;
                    match halt {
                        Halt::Aborted => {
                            report.aborted = true;
                            report.record_error(self.abort_message());
                        }
                        Halt::Cancelled => report.record_error(CANCELLED_MESSAGE.to_string()),
                    }
                }
            }
            report.tags.insert(outcome.name, outcome.tags);
            processed += 1;
            on_progress(processed, total);
        }

        tracing::debug!(
            cards = total,
            requests = run.requests_sent(),
            errors = report.errors.len(),
            aborted = report.aborted,
            "tag fetch finished"
        );
        report
    }
}

/// An in-progress fetch over a card list.
///
/// Holds the loop state (position, failure counter, halt flag) so callers can
/// consume outcomes one at a time via [`FetchRun::next`].
pub struct FetchRun<'a, S> {
    fetcher: &'a TagFetcher<S>,
    cards: &'a [CardAggregate],
    cache: &'a mut TagCache,
    options: &'a FetchOptions,
    position: usize,
    consecutive_failures: u32,
    requests_sent: usize,
    halt: Option<Halt>,
}

impl<S: TagSource> FetchRun<'_, S> {
    /// Resolve the next card. `None` once every card has been yielded.
    pub async fn next(&mut self) -> Option<CardOutcome> {
        let cards = self.cards;
        let card = cards.get(self.position)?;
        self.position += 1;

        if self.halt.is_none() && self.cancel_requested() {
            tracing::warn!(remaining = self.cards.len() - self.position + 1, "tag fetch cancelled");
            self.halt = Some(Halt::Cancelled);
        }

        // Cache hits are served even after a halt; only network work stops.
        if self.options.use_cache {
            if let Some(tags) = self.cache.get(&card.name) {
                tracing::debug!(card = %card.name, "tag cache hit");
                return Some(CardOutcome {
                    name: card.name.clone(),
                    tags: tags.to_vec(),
                    kind: OutcomeKind::Cached,
                });
            }
        }
        if self.halt.is_some() {
            return Some(self.skip(card));
        }

        if self.requests_sent > 0 {
            tokio::time::sleep(self.fetcher.request_delay).await;
        }
        self.requests_sent += 1;

        let id = CardIdentifier::for_card(card);
        tracing::debug!(card = %card.name, %id, "fetching oracle tags");
        let result = self
            .fetcher
            .source
            .fetch_tags(&id, self.options.auth.as_ref())
            .await;
        match result {
            Ok(tags) => {
                self.consecutive_failures = 0;
                if self.options.use_cache {
                    self.cache.put(card.name.clone(), tags.clone());
                }
                Some(CardOutcome {
                    name: card.name.clone(),
                    tags,
                    kind: OutcomeKind::Fetched,
                })
            }
            Err(error) => {
                self.consecutive_failures += 1;
                tracing::warn!(
                    card = %card.name,
                    %error,
                    consecutive_failures = self.consecutive_failures,
                    "oracle tag lookup failed"
                );
                if self.consecutive_failures >= self.fetcher.failure_threshold {
                    tracing::warn!(
                        threshold = self.fetcher.failure_threshold,
                        "too many consecutive failures, skipping remaining cards"
                    );
                    self.halt = Some(Halt::Aborted);
                }
                Some(CardOutcome {
                    name: card.name.clone(),
                    tags: Vec::new(),
                    kind: OutcomeKind::Failed(error.to_string()),
                })
            }
        }
    }

    /// Why the run stopped early, if it did.
    #[must_use]
    pub const fn halt(&self) -> Option<Halt> {
        self.halt
    }

    /// Network requests issued so far.
    #[must_use]
    pub const fn requests_sent(&self) -> usize {
        self.requests_sent
    }

    fn cancel_requested(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(|rx| *rx.borrow())
    }

    fn skip(&mut self, card: &CardAggregate) -> CardOutcome {
        if self.options.use_cache
            && self.fetcher.abort_policy == AbortPolicy::CacheAsEmpty
            && !self.cache.has(&card.name)
        {
            self.cache.put(card.name.clone(), Vec::new());
        }
        CardOutcome {
            name: card.name.clone(),
            tags: Vec::new(),
            kind: OutcomeKind::Skipped,
        }
    }
}

/// Legacy name-only lookup.
///
/// Never touches the network: every name maps to an empty tag list and the
/// report always carries an error pointing callers at print-identity lookups.
#[must_use]
pub fn fetch_tags_by_name(names: &[String]) -> FetchReport {
    tracing::warn!(cards = names.len(), "name-only tag lookup requested");
    FetchReport {
        tags: names.iter().map(|name| (name.clone(), Vec::new())).collect(),
        errors: vec![NAME_LOOKUP_UNSUPPORTED.to_string()],
        has_errors: true,
        aborted: false,
    }
}
