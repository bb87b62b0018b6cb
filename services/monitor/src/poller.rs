//! # Metrics Poller
//!
//! ## Purpose
//!
//! Reads a snapshot from a [`MetricsSource`], decodes it, and keeps the last
//! good sample so a failed read or decode never blanks the display.
//!
//! ## Failure Handling
//!
//! Every failure becomes [`PollOutcome::Stale`] carrying the error and the
//! retained sample. An unknown revision pair is logged at `warn` the first
//! time it is seen and at `debug` after that, since a driver that speaks a
//! newer revision will keep doing so on every poll. Read failures follow the
//! same rule: a missing sysfs file fails identically on every tick, so only a
//! change in the error text is logged at `warn`.
//!
//! The run loop stops on shutdown, after the first frame in `once` mode, or
//! after the configured number of consecutive failures.

use std::collections::HashSet;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

use gpumon_codec::{decode_with, OwnedSample};
use gpumon_types::{SchemaRegistry, TableFamily};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{MonitorError, Result};
use crate::render::Renderer;
use crate::source::MetricsSource;

/// Result of one poll
#[derive(Debug)]
pub enum PollOutcome {
    /// Freshly decoded sample
    Fresh(OwnedSample),
    /// Read or decode failed; `last` is the most recent good sample, if any
    Stale {
        error: MonitorError,
        last: Option<OwnedSample>,
    },
}

impl PollOutcome {
    /// Sample to display, fresh or retained
    pub fn sample(&self) -> Option<&OwnedSample> {
        match self {
            PollOutcome::Fresh(sample) => Some(sample),
            PollOutcome::Stale { last, .. } => last.as_ref(),
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, PollOutcome::Fresh(_))
    }
}

/// Poll counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls: u64,
    pub fresh: u64,
    pub failures: u64,
    pub consecutive_failures: u32,
}

/// Stop conditions and pacing for [`Poller::run`]
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub interval: Duration,
    pub once: bool,
    pub max_consecutive_failures: Option<u32>,
}

pub struct Poller<S: MetricsSource> {
    source: S,
    registry: SchemaRegistry,
    last_good: Option<OwnedSample>,
    stats: PollStats,
    warned_variants: HashSet<(u8, u8)>,
    last_read_error: Option<String>,
}

impl<S: MetricsSource> Poller<S> {
    pub fn new(source: S) -> Self {
        Self::with_registry(source, SchemaRegistry::builtin())
    }

    pub fn with_registry(source: S, registry: SchemaRegistry) -> Self {
        Self {
            source,
            registry,
            last_good: None,
            stats: PollStats::default(),
            warned_variants: HashSet::new(),
            last_read_error: None,
        }
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    pub fn last_good(&self) -> Option<&OwnedSample> {
        self.last_good.as_ref()
    }

    /// Read, decode, and update the retained sample
    pub fn poll_once(&mut self) -> PollOutcome {
        self.stats.polls += 1;

        let bytes = match self.source.read_snapshot() {
            Ok(bytes) => {
                if self.last_read_error.take().is_some() {
                    info!("Reading metrics from {} again", self.source.describe());
                }
                bytes
            }
            Err(error) => {
                let message = error.to_string();
                if self.last_read_error.as_deref() == Some(message.as_str()) {
                    debug!("Failed to read metrics from {}: {}", self.source.describe(), message);
                } else {
                    warn!("Failed to read metrics from {}: {}", self.source.describe(), message);
                    self.last_read_error = Some(message);
                }
                return self.stale(error);
            }
        };

        match decode_with(&self.registry, &bytes) {
            Ok(sample) => {
                if !sample.declared_size_matches() {
                    debug!(
                        "{} declares {} bytes, layout has {}",
                        sample.variant().name,
                        sample.declared_size(),
                        sample.variant().byte_size
                    );
                }
                let owned = sample.to_owned_sample();
                self.last_good = Some(owned.clone());
                self.stats.fresh += 1;
                self.stats.consecutive_failures = 0;
                PollOutcome::Fresh(owned)
            }
            Err(error) => {
                let error = MonitorError::from(error);
                match error.unknown_variant() {
                    Some(pair) if self.warned_variants.insert(pair) => {
                        warn!("{}", self.unsupported_message(pair))
                    }
                    Some(_) => debug!("{}", error),
                    None => warn!("Failed to decode metrics from {}: {}", self.source.describe(), error),
                }
                self.stale(error)
            }
        }
    }

    /// `APU table revision 2.9 unsupported (supported: 1.3, 2.2, 2.3)`
    fn unsupported_message(&self, (format_revision, content_revision): (u8, u8)) -> String {
        format!(
            "{} unsupported (supported: {})",
            TableFamily::describe_revision(format_revision, content_revision),
            self.registry.supported_revisions()
        )
    }

    fn stale(&mut self, error: MonitorError) -> PollOutcome {
        self.stats.failures += 1;
        self.stats.consecutive_failures = self.stats.consecutive_failures.saturating_add(1);
        PollOutcome::Stale {
            error,
            last: self.last_good.clone(),
        }
    }

    /// Poll on a fixed interval, writing one rendered frame per poll to `out`
    pub async fn run<W, F>(
        &mut self,
        renderer: &Renderer,
        out: &mut W,
        options: RunOptions,
        shutdown: F,
    ) -> Result<PollStats>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        info!(
            "Polling {} every {:?}",
            self.source.describe(),
            options.interval
        );

        let mut ticker = tokio::time::interval(options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.poll_once();
                    let frame = renderer.render(&outcome)?;
                    out.write_all(frame.as_bytes())
                        .and_then(|_| out.flush())
                        .map_err(|e| MonitorError::io("<stdout>", e))?;

                    if options.once {
                        break;
                    }

                    if let Some(max) = options.max_consecutive_failures {
                        if self.stats.consecutive_failures >= max {
                            return Err(MonitorError::TooManyFailures {
                                count: self.stats.consecutive_failures,
                            });
                        }
                    }
                }
            }
        }

        debug!(stats = ?self.stats, "Poll loop finished");
        Ok(self.stats)
    }
}
