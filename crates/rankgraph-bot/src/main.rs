//! Main entry point for RankGraph.

use anyhow::{anyhow, Result};
use clap::Parser;
use rankgraph_bot::{Cli, RankGraphBot};
use rankgraph_common::{init_logging, LoggingConfig};
use rankgraph_config::ConfigLoader;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    init_logging(&LoggingConfig::from_env())
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        inverted = args.inverted,
        detailed = args.detailed,
        "Starting RankGraph"
    );

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(channel = %config.discord.channel_id, "Configuration loaded successfully");

    let bot = RankGraphBot::new(config, args.chart_options());
    match bot.start().await? {
        Some(report) => {
            if let Some(reason) = &report.fetch_error {
                warn!(%reason, "Chart drawn without data because the fetch failed");
            }
            info!(
                records = report.records,
                skipped = report.skipped,
                path = %report.output_path.display(),
                "Chart written"
            );
        }
        None => info!("Interrupted before the chart was written"),
    }

    Ok(())
}
