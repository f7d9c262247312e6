//! Command line arguments.

use clap::Parser;
use rankgraph_graphs::ChartOptions;

/// Fetch rank reports from a Discord channel and chart them.
#[derive(Parser, Debug, Clone, Copy, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Put the best (lowest) rank at the top of the chart
    #[arg(short, long)]
    pub inverted: bool,

    /// Mark each month's best and worst rank
    #[arg(short, long)]
    pub detailed: bool,
}

impl Cli {
    /// Chart options selected on the command line.
    pub const fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            inverted: self.inverted,
            detailed: self.detailed,
        }
    }
}
