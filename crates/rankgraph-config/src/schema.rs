//! Configuration schema definitions using serde.

use rankgraph_common::ChannelId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for RankGraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
}

/// Discord bot configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    #[serde(skip_serializing)]
    pub token: String,
    /// Channel whose rank reports are charted.
    pub channel_id: ChannelId,
    /// Messages requested in the single fetch (Discord accepts 1..=100).
    pub message_limit: u8,
    /// Upper bound on the fetch call, in seconds.
    pub fetch_timeout_seconds: u64,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &if self.token.is_empty() { "<unset>" } else { "<redacted>" })
            .field("channel_id", &self.channel_id)
            .field("message_limit", &self.message_limit)
            .field("fetch_timeout_seconds", &self.fetch_timeout_seconds)
            .finish()
    }
}

/// Rendering parameters of the rank chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Where the PNG is written; overwritten on every run.
    pub output_path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Lower bound of the rank axis.
    pub rank_min: u32,
    /// Upper bound of the rank axis.
    pub rank_max: u32,
    /// Chart title.
    pub title: String,
    /// Time axis label.
    pub x_label: String,
    /// Rank axis label.
    pub y_label: String,
    /// Whether to draw the grid.
    pub show_grid: bool,
    /// Whether to open the written chart in the system viewer.
    pub open_viewer: bool,
    /// Color configuration.
    pub colors: ChartColors,
    /// Monthly marker radius in pixels.
    pub marker_size: u32,
    /// Rank line stroke width in pixels.
    pub line_width: u32,
}

/// Chart colors as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    /// Canvas background.
    pub background: String,
    /// Rank line.
    pub line: String,
    /// Monthly minimum marker.
    pub min_marker: String,
    /// Monthly maximum marker.
    pub max_marker: String,
}
