//! Discord client wiring using the Poise framework.

use crate::error::{BotError, BotResult};
use crate::run_once::RunOnce;
use crate::source::DiscordMessageSource;
use poise::serenity_prelude as serenity;
use rankgraph_common::{ChannelId, Result as PipelineResult};
use rankgraph_config::Config;
use rankgraph_graphs::{ChartOptions, PipelineReport, RankChartRenderer, RankFetcher, RankPipeline};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Shared state handed to the event handler.
pub struct Data {
    pipeline: Arc<RankPipeline<RankChartRenderer>>,
    channel: ChannelId,
    message_limit: u8,
    run_once: RunOnce,
    /// Taken by the pipeline task, so the channel closes if that task dies.
    done_tx: Mutex<Option<mpsc::Sender<PipelineResult<PipelineReport>>>>,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("pipeline", &"<RankPipeline>")
            .field("channel", &self.channel)
            .field("message_limit", &self.message_limit)
            .field("run_once", &self.run_once)
            .finish_non_exhaustive()
    }
}

/// Connects to Discord, charts the channel once, then disconnects.
pub struct RankGraphBot {
    config: Config,
    options: ChartOptions,
}

impl RankGraphBot {
    /// Creates a bot from validated configuration and the CLI chart options.
    pub const fn new(config: Config, options: ChartOptions) -> Self {
        Self { config, options }
    }

    /// Builds the pipeline described by the configuration.
    pub fn pipeline(&self) -> RankPipeline<RankChartRenderer> {
        RankPipeline::new(
            RankFetcher::new(Duration::from_secs(self.config.discord.fetch_timeout_seconds)),
            RankChartRenderer::new(self.config.chart.clone(), self.options),
            self.config.chart.output_path.clone(),
            self.config.chart.open_viewer,
        )
    }

    /// Runs the bot until the chart is written or the process is interrupted.
    ///
    /// Returns `None` when interrupted before the pipeline finished.
    pub async fn start(self) -> BotResult<Option<PipelineReport>> {
        let (done_tx, done_rx) = mpsc::channel(1);
        let data = Data {
            pipeline: Arc::new(self.pipeline()),
            channel: self.config.discord.channel_id,
            message_limit: self.config.discord.message_limit,
            run_once: RunOnce::new(),
            done_tx: Mutex::new(Some(done_tx)),
        };

        let intents = serenity::GatewayIntents::GUILDS
            | serenity::GatewayIntents::GUILD_MESSAGES
            | serenity::GatewayIntents::MESSAGE_CONTENT;

        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: vec![],
                on_error: |error| Box::pin(on_error(error)),
                event_handler: |ctx, event, framework, data| {
                    Box::pin(event_handler(ctx, event, framework, data))
                },
                ..Default::default()
            })
            .setup(move |ctx, ready, _framework| {
                Box::pin(async move {
                    info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");
                    // The event handler sees this Ready too; the guard keeps one run.
                    on_ready(ctx, &data);
                    Ok(data)
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&self.config.discord.token, intents)
            .framework(framework)
            .await?;
        debug!("Discord client created");

        let lifecycle = tokio::spawn(wait_for_completion(
            done_rx,
            client.shard_manager.clone(),
        ));

        if let Err(why) = client.start().await {
            error!(error = ?why, "Client error");
            lifecycle.abort();
            return Err(why.into());
        }

        let outcome = lifecycle
            .await
            .map_err(|e| BotError::Framework(format!("lifecycle task failed: {e}")))?;
        info!("Discord client shut down");

        match outcome {
            Completion::Finished(result) => Ok(Some(result?)),
            Completion::Interrupted => Ok(None),
            Completion::Abandoned => Err(BotError::Framework(
                "pipeline task ended without reporting a result".to_string(),
            )),
        }
    }
}

/// Starts the pipeline on the first call; later calls are ignored.
fn on_ready(ctx: &serenity::Context, data: &Data) {
    if !data.run_once.try_claim() {
        debug!("Ready received again; pipeline already started");
        return;
    }

    let Some(done_tx) = data.done_tx.try_lock().ok().and_then(|mut slot| slot.take()) else {
        warn!("Pipeline result channel already taken");
        return;
    };

    let source = DiscordMessageSource::new(ctx.http.clone(), data.message_limit);
    let pipeline = Arc::clone(&data.pipeline);
    let channel = data.channel;

    tokio::spawn(async move {
        let result = pipeline.run(&source, channel).await;
        if let Err(e) = &result {
            error!(error = %e, "Pipeline failed");
        }
        if done_tx.send(result).await.is_err() {
            warn!("Lifecycle task is gone; pipeline result dropped");
        }
    });
}

/// How the wait for the pipeline ended.
#[derive(Debug)]
enum Completion {
    /// The pipeline reported a result.
    Finished(PipelineResult<PipelineReport>),
    /// Ctrl-C arrived first.
    Interrupted,
    /// Every sender was dropped without a result, e.g. the task panicked.
    Abandoned,
}

/// Waits for the pipeline result or Ctrl-C, then shuts every shard down.
async fn wait_for_completion(
    mut done_rx: mpsc::Receiver<PipelineResult<PipelineReport>>,
    shard_manager: Arc<serenity::ShardManager>,
) -> Completion {
    let outcome = next_outcome(&mut done_rx).await;
    shard_manager.shutdown_all().await;
    outcome
}

async fn next_outcome(done_rx: &mut mpsc::Receiver<PipelineResult<PipelineReport>>) -> Completion {
    tokio::select! {
        outcome = done_rx.recv() => match outcome {
            Some(result) => Completion::Finished(result),
            None => {
                error!("Pipeline task ended without reporting a result");
                Completion::Abandoned
            }
        },
        () = shutdown_signal() => Completion::Interrupted,
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, starting graceful shutdown");
}

/// Central event handler for Discord events
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Ready { data_about_bot } = event {
        debug!(user = %data_about_bot.user.name, "Ready event received");
        on_ready(ctx, data);
    }
    Ok(())
}

/// Global error handler for the framework
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!("Error in event handler for {:?}: {:?}", event.snake_case_name(), error);
        }
        error => {
            error!("Other error: {:?}", error);
        }
    }
}
