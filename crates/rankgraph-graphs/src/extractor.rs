//! Rank report extraction from message text.
//!
//! A rank report carries `DD/MM/YYYY-HH:MM:SS - Rank: <digits>` somewhere in
//! its body. The date and time are UTC and are converted to the target zone.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use rankgraph_common::{RankGraphError, RankRecord};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Day, month, year, hour, minute, second, rank. ASCII digits only.
pub static RANK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]{2})/([0-9]{2})/([0-9]{4})-([0-9]{2}):([0-9]{2}):([0-9]{2}) - Rank: ([0-9]+)",
    )
    .expect("Invalid rank report regex pattern")
});

/// A message matched the rank report pattern but its fields are unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The date is not on the calendar (e.g. 31/02/2024).
    #[error("invalid date {day:02}/{month:02}/{year:04}")]
    InvalidDate {
        /// Day field.
        day: u32,
        /// Month field.
        month: u32,
        /// Year field.
        year: i32,
    },

    /// The time of day is out of range (e.g. 24:00:00).
    #[error("invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime {
        /// Hour field.
        hour: u32,
        /// Minute field.
        minute: u32,
        /// Second field.
        second: u32,
    },

    /// The rank does not fit in 32 bits.
    #[error("rank '{0}' is out of range")]
    RankOverflow(String),
}

impl From<ExtractError> for RankGraphError {
    fn from(err: ExtractError) -> Self {
        RankGraphError::parse(err.to_string())
    }
}

/// Extracts a rank record in the process's local time zone.
///
/// Returns `Ok(None)` when the text is not a rank report.
pub fn extract_rank(text: &str) -> Result<Option<RankRecord>, ExtractError> {
    extract_rank_in(text, &Local)
}

/// Extracts a rank record, converting the reported UTC instant into `tz`.
pub fn extract_rank_in<Tz: TimeZone>(
    text: &str,
    tz: &Tz,
) -> Result<Option<RankRecord<Tz>>, ExtractError> {
    let Some(caps) = RANK_PATTERN.captures(text) else {
        return Ok(None);
    };

    // The pattern guarantees short ASCII digit runs for the date and time.
    let field = |i: usize| caps[i].parse::<u32>().unwrap_or(u32::MAX);
    let (day, month, hour, minute, second) = (field(1), field(2), field(4), field(5), field(6));
    let year = caps[3].parse::<i32>().unwrap_or(i32::MAX);

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(ExtractError::InvalidDate { day, month, year })?;
    let naive = date
        .and_hms_opt(hour, minute, second)
        .ok_or(ExtractError::InvalidTime {
            hour,
            minute,
            second,
        })?;

    let rank = caps[7]
        .parse::<u32>()
        .map_err(|_| ExtractError::RankOverflow(caps[7].to_string()))?;

    let timestamp: DateTime<Tz> = Utc.from_utc_datetime(&naive).with_timezone(tz);
    Ok(Some(RankRecord::new(timestamp, rank)))
}
