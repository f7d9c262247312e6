//! Shared utility functions.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Formats a timestamp for display in its own zone.
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%Y-%m-%d %H:%M:%S %:z").to_string()
}

/// Truncates a string to a maximum length in characters, with ellipsis.
///
/// Used to keep message bodies and platform error payloads readable in logs.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
