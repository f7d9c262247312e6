//! Rank chart rendering with plotters.

use crate::chart::{time_range, ChartOptions, RankAxis};
use crate::monthly::{monthly_extremes, MonthlyExtremes};
use crate::traits::GraphRenderer;
use chrono::{Local, TimeZone};
use plotters::coord::Shift;
use plotters::prelude::*;
use rankgraph_common::{RankGraphError, RankRecord, Result};
use rankgraph_config::ChartConfig;
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Caption font size in pixels.
const TITLE_FONT_SIZE: u32 = 40;
/// Axis description font size in pixels.
const AXIS_DESC_FONT_SIZE: u32 = 26;
/// Tick label font size in pixels.
const LABEL_FONT_SIZE: u32 = 18;

fn render_err(e: impl std::fmt::Display) -> RankGraphError {
    RankGraphError::render(e.to_string())
}

/// Parse a `#rrggbb` color string, defaulting to black.
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

/// Formats an epoch-seconds tick as a local date and time.
#[allow(clippy::cast_possible_truncation)]
pub fn format_time_tick(seconds: f64) -> String {
    Local
        .timestamp_opt(seconds.round() as i64, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Clips the segment `a -> b` (time, rank) to ranks within `band`.
///
/// Returns the visible part, or `None` if the segment never enters the band.
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    band: &Range<f64>,
) -> Option<((f64, f64), (f64, f64))> {
    let dy = b.1 - a.1;
    if dy == 0.0 {
        return (a.1 >= band.start && a.1 <= band.end).then_some((a, b));
    }

    let t_start = (band.start - a.1) / dy;
    let t_end = (band.end - a.1) / dy;
    let enter = t_start.min(t_end).max(0.0);
    let exit = t_start.max(t_end).min(1.0);
    if enter > exit {
        return None;
    }

    let at = |t: f64| {
        if t <= 0.0 {
            a
        } else if t >= 1.0 {
            b
        } else {
            (a.0 + (b.0 - a.0) * t, a.1 + dy * t)
        }
    };
    Some((at(enter), at(exit)))
}

/// Plot coordinates of the line, split into continuous runs.
///
/// Segments are clipped at the rank bounds, so a line toward an out-of-range
/// rank is drawn up to the axis edge and breaks only while outside it.
fn clipped_runs(records: &[RankRecord], axis: &RankAxis) -> Vec<Vec<(f64, f64)>> {
    let band = axis.range();
    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|r| (r.epoch_seconds(), f64::from(r.rank)))
        .collect();

    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    if let [record] = records {
        if axis.contains(record.rank) {
            current.push(points[0]);
        }
    }

    for pair in points.windows(2) {
        match clip_segment(pair[0], pair[1], &band) {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.push(start);
                }
                current.push(end);
            }
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs.into_iter()
        .map(|run| {
            run.into_iter()
                .map(|(x, rank)| (x, axis.value_to_plot(rank)))
                .collect()
        })
        .collect()
}

/// Line chart of rank over time with optional monthly extremes.
#[derive(Debug, Clone)]
pub struct RankChartRenderer {
    config: ChartConfig,
    options: ChartOptions,
}

impl RankChartRenderer {
    /// Creates a renderer with the given styling and per-run options.
    pub const fn new(config: ChartConfig, options: ChartOptions) -> Self {
        Self { config, options }
    }

    /// Rank axis for the configured bounds and inversion.
    pub fn axis(&self) -> RankAxis {
        RankAxis::new(self.config.rank_min, self.config.rank_max, self.options.inverted)
    }

    /// Draws the chart onto any plotters drawing area.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        records: &[RankRecord],
    ) -> Result<()> {
        let axis = self.axis();
        let months: Vec<MonthlyExtremes> = if self.options.detailed {
            monthly_extremes(records)
        } else {
            Vec::new()
        };

        #[allow(clippy::cast_precision_loss)]
        let now = Local::now().timestamp() as f64;
        let x_range = time_range(
            records
                .iter()
                .map(RankRecord::epoch_seconds)
                .chain(months.iter().map(MonthlyExtremes::anchor_seconds)),
            now,
        );

        root.fill(&parse_color(&self.config.colors.background))
            .map_err(render_err)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.config.title, ("sans-serif", TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(x_range, axis.range())
            .map_err(render_err)?;

        let x_formatter = |x: &f64| format_time_tick(*x);
        let y_formatter = |y: &f64| format!("{:.0}", axis.label_at(*y));

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(self.config.x_label.as_str())
            .y_desc(self.config.y_label.as_str())
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_labels(10)
            .y_labels(11)
            .label_style(("sans-serif", LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_DESC_FONT_SIZE));
        if !self.config.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(render_err)?;

        let line_style = parse_color(&self.config.colors.line)
            .stroke_width(self.config.line_width);
        for run in clipped_runs(records, &axis) {
            chart
                .draw_series(LineSeries::new(run, line_style))
                .map_err(render_err)?;
        }

        if self.options.detailed {
            let size = i32::try_from(self.config.marker_size).unwrap_or(i32::MAX);
            let min_style = parse_color(&self.config.colors.min_marker).filled();
            let max_style = parse_color(&self.config.colors.max_marker).filled();

            for month in &months {
                let x = month.anchor_seconds();
                debug!(
                    year = month.year,
                    month = month.month,
                    min = month.min,
                    max = month.max,
                    "Drawing monthly extremes"
                );
                let markers = [(month.min, min_style), (month.max, max_style)]
                    .into_iter()
                    .filter(|(rank, _)| axis.contains(*rank))
                    .map(|(rank, style)| Circle::new((x, axis.to_plot(rank)), size, style));
                chart.draw_series(markers).map_err(render_err)?;
            }
        }

        Ok(())
    }
}

impl GraphRenderer for RankChartRenderer {
    type Data = [RankRecord];

    fn render_to_file(&self, records: &[RankRecord], path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.config.width, self.config.height))
            .into_drawing_area();
        self.draw(&root, records)?;
        root.present().map_err(|e| {
            RankGraphError::render(format!("failed to write {}: {e}", path.display()))
        })?;

        info!(
            path = %path.display(),
            records = records.len(),
            inverted = self.options.inverted,
            detailed = self.options.detailed,
            "Rendered rank chart"
        );
        Ok(())
    }

    fn render_to_bytes(&self, records: &[RankRecord]) -> Result<Vec<u8>> {
        let (width, height) = (self.config.width, self.config.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                .into_drawing_area();
            self.draw(&root, records)?;
            root.present().map_err(render_err)?;
        }

        let image = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RankGraphError::render("pixel buffer does not match chart size"))?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .map_err(|e| RankGraphError::render_with_source("failed to encode chart", e))?;
        Ok(png)
    }

    fn name(&self) -> &'static str {
        "rank_evolution"
    }

    fn description(&self) -> &'static str {
        "Rank evolution over time"
    }
}
