//! Generic multi-tier fallback policy
//!
//! A [`FallbackChain`] tries an ordered list of named tiers, each under its
//! own timeout, and accepts the first non-empty successful result. The
//! terminal tier is held separately and returns a plain value rather than an
//! outcome: every concrete chain in this pipeline ends in a deterministic
//! generator (template text, placeholder frames, silent waveform), so "all
//! tiers failed" is not a representable state and never an error path.

use futures::future::BoxFuture;
use hush_common::events::{AttemptOutcome, GenerationAttempt};
use std::future::Future;
use std::time::{Duration, Instant};

/// What a single tier producer reported
///
/// Timeouts are not a producer concern: the chain races every producer
/// against its tier timeout and records `TimedOut` itself.
#[derive(Debug)]
pub enum TierOutcome<T> {
    /// Usable value; the chain stops here
    Success(T),
    /// The tier ran but produced nothing usable (zero-length text/bytes/batch)
    Empty,
    /// The tier failed with a diagnostic detail
    Error(String),
}

type TierProducer<T> = Box<dyn FnOnce() -> BoxFuture<'static, TierOutcome<T>> + Send>;
type TerminalProducer<T> = Box<dyn FnOnce() -> BoxFuture<'static, T> + Send>;

/// One named attempt within a fallback chain
pub struct Tier<T> {
    name: &'static str,
    timeout: Duration,
    produce: TierProducer<T>,
}

impl<T: Send + 'static> Tier<T> {
    pub fn new<F, Fut>(name: &'static str, timeout: Duration, produce: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = TierOutcome<T>> + Send + 'static,
    {
        Self {
            name,
            timeout,
            produce: Box::new(move || {
                let fut: BoxFuture<'static, TierOutcome<T>> = Box::pin(produce());
                fut
            }),
        }
    }
}

/// Output of a completed chain run
pub struct ChainOutput<T> {
    pub value: T,
    /// Name of the tier that produced the value
    pub satisfied_by: &'static str,
    /// One record per tier tried, in order, terminal included
    pub attempts: Vec<GenerationAttempt>,
}

/// Ordered fallback tiers plus an infallible terminal tier
pub struct FallbackChain<T> {
    tiers: Vec<Tier<T>>,
    terminal_name: &'static str,
    terminal: TerminalProducer<T>,
}

impl<T: Send + 'static> FallbackChain<T> {
    /// Create a chain with only its terminal tier
    pub fn new<F, Fut>(terminal_name: &'static str, terminal: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            tiers: Vec::new(),
            terminal_name,
            terminal: Box::new(move || {
                let fut: BoxFuture<'static, T> = Box::pin(terminal());
                fut
            }),
        }
    }

    /// Append a tier; tiers run in insertion order, before the terminal
    pub fn push_tier(&mut self, tier: Tier<T>) {
        self.tiers.push(tier);
    }

    /// Try each tier in order; never fails
    ///
    /// A failed or timed-out tier is abandoned, not retried; its underlying
    /// call may run on in the background and its result is discarded.
    pub async fn run(self) -> ChainOutput<T> {
        let mut attempts = Vec::with_capacity(self.tiers.len() + 1);

        for tier in self.tiers {
            let started = Instant::now();
            let result = tokio::time::timeout(tier.timeout, (tier.produce)()).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let outcome = match result {
                Ok(TierOutcome::Success(value)) => {
                    tracing::debug!(tier = tier.name, elapsed_ms, "Tier succeeded");
                    attempts.push(GenerationAttempt {
                        tier_name: tier.name.to_string(),
                        outcome: AttemptOutcome::Success,
                        elapsed_ms,
                    });
                    return ChainOutput {
                        value,
                        satisfied_by: tier.name,
                        attempts,
                    };
                }
                Ok(TierOutcome::Empty) => {
                    tracing::warn!(tier = tier.name, elapsed_ms, "Tier returned empty result");
                    AttemptOutcome::EmptyResult
                }
                Ok(TierOutcome::Error(detail)) => {
                    tracing::warn!(tier = tier.name, elapsed_ms, error = %detail, "Tier failed");
                    AttemptOutcome::Error
                }
                Err(_) => {
                    tracing::warn!(
                        tier = tier.name,
                        timeout_ms = tier.timeout.as_millis() as u64,
                        "Tier timed out"
                    );
                    AttemptOutcome::TimedOut
                }
            };

            attempts.push(GenerationAttempt {
                tier_name: tier.name.to_string(),
                outcome,
                elapsed_ms,
            });
        }

        let started = Instant::now();
        let value = (self.terminal)().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::debug!(tier = self.terminal_name, elapsed_ms, "Terminal tier produced value");
        attempts.push(GenerationAttempt {
            tier_name: self.terminal_name.to_string(),
            outcome: AttemptOutcome::Success,
            elapsed_ms,
        });

        ChainOutput {
            value,
            satisfied_by: self.terminal_name,
            attempts,
        }
    }
}
