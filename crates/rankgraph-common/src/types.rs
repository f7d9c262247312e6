//! Common type definitions and newtype wrappers for domain modeling.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A Discord channel ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A chat message as returned by the platform, reduced to the fields the
/// rank pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Message body.
    pub content: String,
    /// Platform creation time (RFC 3339). Kept for diagnostics only.
    pub timestamp: String,
}

impl RawMessage {
    /// Creates a raw message.
    pub fn new(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A rank reading taken from one message.
///
/// Records are created once by the extractor and never mutated. The zone
/// defaults to the process's local time zone.
#[derive(Debug, Clone)]
pub struct RankRecord<Tz: TimeZone = Local> {
    /// When the rank was reported, in the record's zone.
    pub timestamp: DateTime<Tz>,
    /// Reported rank.
    pub rank: u32,
}

impl<Tz: TimeZone> RankRecord<Tz> {
    /// Creates a record.
    pub const fn new(timestamp: DateTime<Tz>, rank: u32) -> Self {
        Self { timestamp, rank }
    }

    /// Seconds since the Unix epoch, as used for the chart's time axis.
    #[allow(clippy::cast_precision_loss)]
    pub fn epoch_seconds(&self) -> f64 {
        self.timestamp.timestamp() as f64
    }
}
