//! Test utilities and shared test helpers for RankGraph.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Rank report fixtures.
pub mod rank_fixtures {
    use super::*;
    use crate::{RankRecord, RawMessage};

    /// Formats an instant and rank exactly the way rank reports are posted.
    pub fn rank_line(at: DateTime<Utc>, rank: u32) -> String {
        format!("{} - Rank: {rank}", at.format("%d/%m/%Y-%H:%M:%S"))
    }

    /// A raw message carrying `content`, stamped with a fixed creation time.
    pub fn raw(content: &str) -> RawMessage {
        RawMessage::new(content, "2024-03-02T08:00:05.000000+00:00")
    }

    /// The three-message channel used by the end-to-end scenario.
    pub fn scenario_messages() -> Vec<RawMessage> {
        vec![
            raw("noise"),
            raw("01/03/2024-08:00:00 - Rank: 120"),
            raw("02/03/2024-08:00:00 - Rank: 80"),
        ]
    }

    /// Records at the given UTC instants, ranks paired in order.
    pub fn utc_records(points: &[((i32, u32, u32), u32)]) -> Vec<RankRecord<Utc>> {
        points
            .iter()
            .map(|&((y, m, d), rank)| RankRecord::new(mock_timestamp(y, m, d, 12, 0, 0), rank))
            .collect()
    }
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::ChannelId;

    /// Create a test channel ID.
    pub fn test_channel_id() -> ChannelId {
        ChannelId(123456789012345678)
    }

    /// A bot token shaped like a real one.
    pub fn test_token() -> &'static str {
        "MTExNzU4MzQ4NzEyNzY1NjQxNw.GZKbkF.1234567890123456789012345678901234567890"
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for message bodies that cannot contain a rank report marker.
    pub fn chatter_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9 /:.,!?-]{0,120}".prop_filter("must not carry the rank marker", |s| {
            !s.contains(" - Rank: ")
        })
    }

    /// Strategy for valid (day, month, year, hour, minute, second, rank) tuples.
    pub fn rank_report_strategy() -> impl Strategy<Value = (u32, u32, i32, u32, u32, u32, u32)> {
        (1u32..=28, 1u32..=12, 1970i32..=2099, 0u32..24, 0u32..60, 0u32..60, any::<u32>())
    }
}
