//! Fetch-then-render pipeline run once per process.

use crate::fetcher::{FetchOutcome, MessageSource, RankFetcher};
use crate::traits::GraphRenderer;
use crate::viewer::open_chart;
use rankgraph_common::{ChannelId, RankGraphError, RankRecord, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Why the fetch failed, if it did. The chart was still drawn, empty.
    pub fetch_error: Option<String>,
    /// Records charted.
    pub records: usize,
    /// Messages skipped because they failed to parse.
    pub skipped: usize,
    /// Where the chart was written.
    pub output_path: PathBuf,
}

/// Fetches rank reports, renders them, writes the chart, and shows it.
pub struct RankPipeline<R> {
    fetcher: RankFetcher,
    renderer: Arc<R>,
    output_path: PathBuf,
    open_viewer: bool,
}

impl<R> RankPipeline<R>
where
    R: GraphRenderer<Data = [RankRecord]> + 'static,
{
    /// Creates a pipeline.
    pub fn new(
        fetcher: RankFetcher,
        renderer: R,
        output_path: impl Into<PathBuf>,
        open_viewer: bool,
    ) -> Self {
        Self {
            fetcher,
            renderer: Arc::new(renderer),
            output_path: output_path.into(),
            open_viewer,
        }
    }

    /// Output path of the chart.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Runs fetch, render, and display once.
    ///
    /// Fetch failures do not fail the run; render failures do.
    #[instrument(skip(self, source), fields(renderer = self.renderer.name()))]
    pub async fn run<S>(&self, source: &S, channel: ChannelId) -> Result<PipelineReport>
    where
        S: MessageSource + ?Sized,
    {
        let outcome = self.fetcher.fetch(source, channel).await;
        let fetch_error = outcome.failure_reason().map(str::to_string);
        let skipped = outcome.skipped();
        if let FetchOutcome::Failed { reason } = &outcome {
            warn!(%reason, "Continuing with an empty chart");
        }

        let records = outcome.into_records();
        let count = records.len();

        let renderer = Arc::clone(&self.renderer);
        let path = self.output_path.clone();
        tokio::task::spawn_blocking(move || renderer.render_to_file(records.as_slice(), &path))
            .await
            .map_err(|e| RankGraphError::render_with_source("render task failed", e))??;

        if self.open_viewer {
            if let Err(e) = open_chart(&self.output_path) {
                warn!(error = %e, path = %self.output_path.display(), "Could not display chart");
            }
        }

        info!(records = count, path = %self.output_path.display(), "Pipeline finished");
        Ok(PipelineReport {
            fetch_error,
            records: count,
            skipped,
            output_path: self.output_path.clone(),
        })
    }
}
