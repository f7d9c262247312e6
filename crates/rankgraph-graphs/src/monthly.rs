//! Monthly min/max aggregation for the detailed chart overlay.

use chrono::{DateTime, Datelike, Local, TimeZone};
use rankgraph_common::RankRecord;
use std::collections::BTreeMap;

/// Lowest and highest rank reported in one calendar month.
#[derive(Debug, Clone)]
pub struct MonthlyExtremes<Tz: TimeZone = Local> {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// First instant of the month in the records' zone; markers are drawn here.
    pub anchor: DateTime<Tz>,
    /// Smallest rank of the month.
    pub min: u32,
    /// Largest rank of the month.
    pub max: u32,
    /// Number of records in the month.
    pub count: usize,
}

impl<Tz: TimeZone> MonthlyExtremes<Tz> {
    /// Seconds since the Unix epoch of the anchor.
    #[allow(clippy::cast_precision_loss)]
    pub fn anchor_seconds(&self) -> f64 {
        self.anchor.timestamp() as f64
    }
}

/// Groups records by the calendar month of their own timestamp and returns
/// each month's extremes, oldest month first. Months without records are
/// absent.
pub fn monthly_extremes<Tz: TimeZone>(records: &[RankRecord<Tz>]) -> Vec<MonthlyExtremes<Tz>> {
    let mut months: BTreeMap<(i32, u32), MonthlyExtremes<Tz>> = BTreeMap::new();

    for record in records {
        let key = (record.timestamp.year(), record.timestamp.month());
        months
            .entry(key)
            .and_modify(|m| {
                m.min = m.min.min(record.rank);
                m.max = m.max.max(record.rank);
                m.count += 1;
                if record.timestamp < m.anchor {
                    // Only reachable while the anchor is still a fallback.
                    m.anchor = record.timestamp.clone();
                }
            })
            .or_insert_with(|| MonthlyExtremes {
                year: key.0,
                month: key.1,
                anchor: month_start(&record.timestamp),
                min: record.rank,
                max: record.rank,
                count: 1,
            });
    }

    months.into_values().collect()
}

/// Midnight on the first of the month containing `at`, in `at`'s zone.
///
/// If that local midnight does not exist (a DST gap) the instant itself is
/// returned; if it is ambiguous the earlier instant is used.
fn month_start<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Tz> {
    at.timezone()
        .with_ymd_and_hms(at.year(), at.month(), 1, 0, 0, 0)
        .earliest()
        .unwrap_or_else(|| at.clone())
}
