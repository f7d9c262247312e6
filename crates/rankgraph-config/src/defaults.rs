//! Default values for every configurable parameter.

use crate::schema::{ChartColors, ChartConfig, DiscordConfig};
use rankgraph_common::ChannelId;
use std::path::PathBuf;

/// Default chart file name, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "rank_evolution.png";

/// Discord's default page size for `GET /channels/{id}/messages`.
pub const DEFAULT_MESSAGE_LIMIT: u8 = 50;

/// Largest page Discord will return for a single request.
pub const MAX_MESSAGE_LIMIT: u8 = 100;

/// Default bound on the fetch call.
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 30;

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            channel_id: ChannelId(0),
            message_limit: DEFAULT_MESSAGE_LIMIT,
            fetch_timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            width: 1920,
            height: 1080,
            rank_min: 0,
            rank_max: 1000,
            title: "Rank Evolution Over Time".to_string(),
            x_label: "Date and Time".to_string(),
            y_label: "Rank".to_string(),
            show_grid: true,
            open_viewer: true,
            colors: ChartColors::default(),
            marker_size: 10,
            line_width: 2,
        }
    }
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            line: "#1f77b4".to_string(),
            min_marker: "#ff0000".to_string(),
            max_marker: "#00ff00".to_string(),
        }
    }
}
