//! Configuration loading utilities

use crate::Config;
use rankgraph_common::{ChannelId, RankGraphError};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Bot token, required.
pub const ENV_BOT_TOKEN: &str = "DISCORD_BOT_TOKEN";
/// Channel to chart, required.
pub const ENV_CHANNEL_ID: &str = "DISCORD_CHANNEL_ID";
/// Page size of the single fetch.
pub const ENV_MESSAGE_LIMIT: &str = "DISCORD_MESSAGE_LIMIT";
/// Fetch timeout in seconds.
pub const ENV_FETCH_TIMEOUT: &str = "DISCORD_FETCH_TIMEOUT";
/// Chart output path.
pub const ENV_OUTPUT_PATH: &str = "RANKGRAPH_OUTPUT_PATH";
/// Whether to open the chart after writing it.
pub const ENV_OPEN_VIEWER: &str = "RANKGRAPH_OPEN_VIEWER";
/// Optional YAML file with `discord` and `chart` sections.
pub const ENV_CONFIG_PATH: &str = "RANKGRAPH_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {0} must be set")]
    MissingConfig(String),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for RankGraphError {
    fn from(err: ConfigError) -> Self {
        RankGraphError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `.env` (if present) into the process environment, then builds
    /// the configuration from it.
    pub fn load() -> Result<Config, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded environment file"),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => {
                return Err(ConfigError::EnvParseError {
                    var: ".env".to_string(),
                    source: Box::new(e),
                })
            }
        }

        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// The YAML file named by `RANKGRAPH_CONFIG_PATH` (if any) is read first,
    /// then individual variables override it, then the result is validated.
    pub fn load_with<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::load_file(path)?,
            None => Config::default(),
        };

        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate()?;

        debug!(?config, "Configuration resolved");
        Ok(config)
    }

    /// Reads a YAML configuration file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        info!(path = %path.as_ref().display(), "Loaded configuration file");
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_BOT_TOKEN) {
            config.discord.token = token.trim().to_string();
        }

        if let Some(channel_id) = lookup(ENV_CHANNEL_ID) {
            config.discord.channel_id = parse_var::<ChannelId>(ENV_CHANNEL_ID, &channel_id)?;
        }

        if let Some(limit) = lookup(ENV_MESSAGE_LIMIT) {
            config.discord.message_limit = parse_var(ENV_MESSAGE_LIMIT, &limit)?;
        }

        if let Some(timeout) = lookup(ENV_FETCH_TIMEOUT) {
            config.discord.fetch_timeout_seconds = parse_var(ENV_FETCH_TIMEOUT, &timeout)?;
        }

        if let Some(path) = lookup(ENV_OUTPUT_PATH) {
            config.chart.output_path = path.into();
        }

        if let Some(open) = lookup(ENV_OPEN_VIEWER) {
            config.chart.open_viewer = parse_bool(ENV_OPEN_VIEWER, &open)?;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{var} must be a boolean, got '{other}'"
        ))),
    }
}
