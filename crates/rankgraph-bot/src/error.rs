//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;
use rankgraph_common::RankGraphError;
use rankgraph_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Poise framework or task error.
    #[error("Framework error: {0}")]
    Framework(String),

    /// The chart could not be produced.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] RankGraphError),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let err: BotError = ConfigError::MissingConfig("DISCORD_BOT_TOKEN".into()).into();
        assert!(matches!(err, BotError::Config(_)));
        assert!(err.to_string().contains("DISCORD_BOT_TOKEN"));

        let err: BotError = RankGraphError::render("disk full").into();
        assert!(matches!(err, BotError::Pipeline(_)));
        assert!(err.to_string().starts_with("Pipeline error"));
    }
}
