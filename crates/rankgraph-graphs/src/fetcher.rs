//! Message fetching and rank record assembly.

use crate::extractor::extract_rank;
use async_trait::async_trait;
use rankgraph_common::{
    format_timestamp, truncate_string, ChannelId, RankRecord, RawMessage, Result,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Longest message excerpt written to logs.
const LOG_EXCERPT_CHARS: usize = 120;

/// A platform capability that returns one page of messages for a channel.
///
/// Implementations perform exactly one request; pagination, if any, is their
/// concern and not the pipeline's.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetches the messages of `channel` in platform order.
    async fn fetch_messages(&self, channel: ChannelId) -> Result<Vec<RawMessage>>;
}

/// Result of one fetch-and-parse pass.
///
/// A failed fetch still yields an (empty) record list so the chart can be
/// drawn, but remains distinguishable from a channel without rank reports.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The platform answered.
    Fetched {
        /// Matching records, in platform order.
        records: Vec<RankRecord>,
        /// Messages examined.
        scanned: usize,
        /// Messages that matched the pattern but failed to parse.
        skipped: usize,
    },
    /// The platform call failed or timed out.
    Failed {
        /// Error payload as reported by the platform client.
        reason: String,
    },
}

impl FetchOutcome {
    /// Records to chart; empty after a failure.
    pub fn records(&self) -> &[RankRecord] {
        match self {
            Self::Fetched { records, .. } => records.as_slice(),
            Self::Failed { .. } => &[],
        }
    }

    /// Consumes the outcome, keeping only the records.
    pub fn into_records(self) -> Vec<RankRecord> {
        match self {
            Self::Fetched { records, .. } => records,
            Self::Failed { .. } => Vec::new(),
        }
    }

    /// Whether the platform call failed.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Messages skipped because of parse errors.
    pub const fn skipped(&self) -> usize {
        match self {
            Self::Fetched { skipped, .. } => *skipped,
            Self::Failed { .. } => 0,
        }
    }

    /// Failure reason, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Fetched { .. } => None,
            Self::Failed { reason } => Some(reason.as_str()),
        }
    }
}

/// Fetches a channel's messages and turns rank reports into records.
#[derive(Debug, Clone, Copy)]
pub struct RankFetcher {
    timeout: Duration,
}

impl RankFetcher {
    /// Creates a fetcher whose platform call is bounded by `timeout`.
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Fetches one page from `source` and parses it.
    ///
    /// Never fails: platform errors and timeouts are logged and reported as
    /// [`FetchOutcome::Failed`].
    pub async fn fetch<S>(&self, source: &S, channel: ChannelId) -> FetchOutcome
    where
        S: MessageSource + ?Sized,
    {
        debug!(%channel, timeout = ?self.timeout, "Fetching messages");

        let messages = match tokio::time::timeout(self.timeout, source.fetch_messages(channel)).await
        {
            Ok(Ok(messages)) => messages,
            Ok(Err(e)) => {
                error!(%channel, error = %e, "Error fetching messages");
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                };
            }
            Err(_) => {
                let reason = format!(
                    "no response from the platform within {}s",
                    self.timeout.as_secs_f64()
                );
                error!(%channel, %reason, "Error fetching messages");
                return FetchOutcome::Failed { reason };
            }
        };

        let outcome = Self::parse_messages(&messages);
        info!(
            %channel,
            scanned = messages.len(),
            records = outcome.records().len(),
            skipped = outcome.skipped(),
            "Fetched rank reports"
        );
        outcome
    }

    /// Applies the extractor to every message, keeping matches in order.
    pub fn parse_messages(messages: &[RawMessage]) -> FetchOutcome {
        let mut records = Vec::new();
        let mut skipped = 0;

        for message in messages {
            match extract_rank(&message.content) {
                Ok(Some(record)) => {
                    debug!(
                        at = %format_timestamp(&record.timestamp),
                        rank = record.rank,
                        "Found rank report"
                    );
                    records.push(record);
                }
                Ok(None) => {}
                Err(e) => {
                    skipped += 1;
                    warn!(
                        error = %e,
                        posted_at = %message.timestamp,
                        content = %truncate_string(&message.content, LOG_EXCERPT_CHARS),
                        "Skipping malformed rank report"
                    );
                }
            }
        }

        FetchOutcome::Fetched {
            records,
            scanned: messages.len(),
            skipped,
        }
    }
}
