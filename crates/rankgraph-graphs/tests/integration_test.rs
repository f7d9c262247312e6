//! Integration tests for rankgraph-graphs.
//!
//! These drive the fetch, parse, and render stages together and check the
//! PNG written to disk.

use async_trait::async_trait;
use rankgraph_common::test_utils::{
    create_temp_dir, discord_fixtures, init_test_logging, mock_timestamp, rank_fixtures,
};
use rankgraph_common::{ChannelId, RankGraphError, RawMessage, Result};
use rankgraph_config::ChartConfig;
use rankgraph_graphs::{
    parse_color, ChartOptions, GraphRenderer, MessageSource, RankChartRenderer, RankFetcher,
    RankPipeline,
};
use std::time::Duration;

/// Serves a fixed page of messages.
struct FixedSource(Vec<RawMessage>);

#[async_trait]
impl MessageSource for FixedSource {
    async fn fetch_messages(&self, _channel: ChannelId) -> Result<Vec<RawMessage>> {
        Ok(self.0.clone())
    }
}

/// Always fails like an unauthorized client.
struct RejectingSource;

#[async_trait]
impl MessageSource for RejectingSource {
    async fn fetch_messages(&self, _channel: ChannelId) -> Result<Vec<RawMessage>> {
        Err(RankGraphError::fetch("401: Unauthorized"))
    }
}

/// Pixels in the decoded PNG that exactly match a `#rrggbb` color.
fn pixels_of(png: &[u8], color: &str) -> usize {
    let rgb = parse_color(color);
    image::load_from_memory(png)
        .unwrap()
        .to_rgb8()
        .pixels()
        .filter(|p| p.0 == [rgb.0, rgb.1, rgb.2])
        .count()
}

fn small_chart() -> ChartConfig {
    ChartConfig {
        width: 640,
        height: 360,
        ..ChartConfig::default()
    }
}

#[tokio::test]
async fn test_scenario_writes_default_sized_chart() {
    init_test_logging();
    let dir = create_temp_dir();
    let path = dir.path().join("rank_evolution.png");

    let pipeline = RankPipeline::new(
        RankFetcher::new(Duration::from_secs(5)),
        RankChartRenderer::new(ChartConfig::default(), ChartOptions::default()),
        &path,
        false,
    );
    let source = FixedSource(rank_fixtures::scenario_messages());
    let report = pipeline
        .run(&source, discord_fixtures::test_channel_id())
        .await
        .unwrap();

    assert_eq!(report.records, 2);
    assert_eq!(report.fetch_error, None);
    assert_eq!(report.output_path, path);

    let (width, height) = image::image_dimensions(&path).unwrap();
    assert_eq!((width, height), (1920, 1080));
}

#[tokio::test]
async fn test_failed_fetch_still_writes_chart() {
    let dir = create_temp_dir();
    let path = dir.path().join("empty.png");

    let pipeline = RankPipeline::new(
        RankFetcher::new(Duration::from_secs(5)),
        RankChartRenderer::new(small_chart(), ChartOptions::default()),
        &path,
        false,
    );
    let report = pipeline
        .run(&RejectingSource, discord_fixtures::test_channel_id())
        .await
        .unwrap();

    assert_eq!(report.records, 0);
    assert!(report.fetch_error.is_some());

    let chart = image::open(&path).unwrap();
    assert_eq!((chart.width(), chart.height()), (640, 360));
}

#[tokio::test]
async fn test_existing_chart_is_overwritten() {
    let dir = create_temp_dir();
    let path = dir.path().join("rank_evolution.png");
    std::fs::write(&path, b"stale").unwrap();

    let pipeline = RankPipeline::new(
        RankFetcher::new(Duration::from_secs(5)),
        RankChartRenderer::new(small_chart(), ChartOptions::default()),
        &path,
        false,
    );
    pipeline
        .run(&FixedSource(Vec::new()), discord_fixtures::test_channel_id())
        .await
        .unwrap();

    assert_eq!(image::image_dimensions(&path).unwrap(), (640, 360));
}

#[test]
fn test_detailed_inverted_render_to_bytes() {
    let messages: Vec<RawMessage> = [
        ((2024, 1, 5), 50),
        ((2024, 1, 20), 10),
        ((2024, 2, 3), 5),
        ((2024, 2, 17), 4000),
    ]
    .iter()
    .map(|&((y, m, d), rank)| {
        rank_fixtures::raw(&rank_fixtures::rank_line(mock_timestamp(y, m, d, 12, 0, 0), rank))
    })
    .collect();
    let outcome = RankFetcher::parse_messages(&messages);
    assert_eq!(outcome.records().len(), 4);

    let renderer = RankChartRenderer::new(
        small_chart(),
        ChartOptions {
            inverted: true,
            detailed: true,
        },
    );
    let png = renderer.render_to_bytes(outcome.records()).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 360));

    let without_markers = RankChartRenderer::new(
        small_chart(),
        ChartOptions {
            inverted: true,
            detailed: false,
        },
    )
    .render_to_bytes(outcome.records())
    .unwrap();

    let colors = small_chart().colors;
    assert!(pixels_of(&png, &colors.min_marker) > 0);
    assert!(pixels_of(&png, &colors.max_marker) > 0);
    assert_eq!(pixels_of(&without_markers, &colors.min_marker), 0);
    assert_eq!(pixels_of(&without_markers, &colors.max_marker), 0);
}

#[test]
fn test_unwritable_path_is_render_error() {
    let dir = create_temp_dir();
    let path = dir.path().join("missing").join("chart.png");

    let renderer = RankChartRenderer::new(small_chart(), ChartOptions::default());
    let err = renderer.render_to_file(&[], &path).unwrap_err();
    assert!(matches!(err, RankGraphError::Render { .. }));
}
