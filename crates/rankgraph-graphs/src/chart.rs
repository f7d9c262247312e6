//! Chart options and axis geometry for the rank chart.

use std::ops::Range;

/// Padding added on each side of a single-instant time range, in seconds.
const SINGLE_POINT_PADDING: f64 = 1800.0;

/// Width of the window drawn when there is no data, in seconds.
const EMPTY_WINDOW: f64 = 86_400.0;

/// Fraction of the data span added on each side of the time axis.
const SPAN_PADDING: f64 = 0.02;

/// Per-run rendering switches taken from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartOptions {
    /// Flip the rank axis so smaller ranks draw higher.
    pub inverted: bool,
    /// Overlay monthly min/max markers.
    pub detailed: bool,
}

/// Fixed rank axis, optionally mirrored.
///
/// Plot coordinates are always drawn on `min..max`; when inverted a rank `r`
/// is drawn at `min + max - r` and tick labels map back the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankAxis {
    min: f64,
    max: f64,
    inverted: bool,
}

impl RankAxis {
    /// Creates an axis over `min..=max`.
    pub fn new(min: u32, max: u32, inverted: bool) -> Self {
        Self {
            min: f64::from(min),
            max: f64::from(max),
            inverted,
        }
    }

    /// Coordinate range handed to the chart.
    pub fn range(&self) -> Range<f64> {
        self.min..self.max
    }

    /// Whether the rank is visible on this axis.
    pub fn contains(&self, rank: u32) -> bool {
        let rank = f64::from(rank);
        rank >= self.min && rank <= self.max
    }

    /// Plot coordinate of a rank.
    pub fn to_plot(&self, rank: u32) -> f64 {
        self.mirror(f64::from(rank))
    }

    /// Plot coordinate of a fractional rank, such as a clipped line end.
    pub fn value_to_plot(&self, value: f64) -> f64 {
        self.mirror(value)
    }

    /// Rank shown at a plot coordinate, for tick labels.
    pub fn label_at(&self, coordinate: f64) -> f64 {
        self.mirror(coordinate)
    }

    /// Whether the axis is mirrored.
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn mirror(&self, value: f64) -> f64 {
        if self.inverted {
            self.min + self.max - value
        } else {
            value
        }
    }
}

/// Time axis range (epoch seconds) covering every given instant.
///
/// A single instant is widened by half an hour on each side; no instants at
/// all yield a one-day window ending at `now`.
pub fn time_range(instants: impl IntoIterator<Item = f64>, now: f64) -> Range<f64> {
    let (lo, hi) = instants
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });

    if lo > hi {
        return (now - EMPTY_WINDOW)..now;
    }

    let span = hi - lo;
    if span <= 0.0 {
        return (lo - SINGLE_POINT_PADDING)..(hi + SINGLE_POINT_PADDING);
    }

    let padding = span * SPAN_PADDING;
    (lo - padding)..(hi + padding)
}
