//! Runtime validation of a loaded configuration.

use crate::defaults::MAX_MESSAGE_LIMIT;
use crate::loader::ConfigError;
use crate::schema::{ChartColors, ChartConfig, Config, DiscordConfig};

/// Returns true for `#rrggbb` color strings.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discord.validate()?;
        self.chart.validate()
    }
}

impl DiscordConfig {
    /// Checks credentials and fetch parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingConfig("DISCORD_BOT_TOKEN".to_string()));
        }

        if self.channel_id.0 == 0 {
            return Err(ConfigError::MissingConfig("DISCORD_CHANNEL_ID".to_string()));
        }

        if self.message_limit == 0 || self.message_limit > MAX_MESSAGE_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "message_limit must be between 1 and {MAX_MESSAGE_LIMIT}, got {}",
                self.message_limit
            )));
        }

        if self.fetch_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "fetch_timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl ChartConfig {
    /// Checks dimensions, axis bounds, and colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chart dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        if self.rank_min >= self.rank_max {
            return Err(ConfigError::Invalid(format!(
                "rank_min ({}) must be below rank_max ({})",
                self.rank_min, self.rank_max
            )));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output_path cannot be empty".to_string()));
        }

        self.colors.validate()
    }
}

impl ChartColors {
    /// Checks that every color is `#rrggbb`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("background", &self.background),
            ("line", &self.line),
            ("min_marker", &self.min_marker),
            ("max_marker", &self.max_marker),
        ] {
            if !is_hex_color(value) {
                return Err(ConfigError::Invalid(format!(
                    "color '{name}' must be #rrggbb, got '{value}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankgraph_common::test_utils::discord_fixtures;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.discord.token = discord_fixtures::test_token().to_string();
        config.discord.channel_id = discord_fixtures::test_channel_id();
        config
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#FF0000"));
        assert!(is_hex_color("#1f77b4"));
        assert!(!is_hex_color("FF0000"));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("#ZZ0000"));
    }

    #[test]
    fn test_default_config_needs_credentials() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfig(ref var) if var == "DISCORD_BOT_TOKEN"));

        let mut config = Config::default();
        config.discord.token = "token".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfig(ref var) if var == "DISCORD_CHANNEL_ID"));

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_message_limit_bounds() {
        let mut config = valid_config();
        config.discord.message_limit = 0;
        assert!(config.validate().is_err());
        config.discord.message_limit = 101;
        assert!(config.validate().is_err());
        config.discord.message_limit = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rank_bounds() {
        let mut config = valid_config();
        config.chart.rank_min = 1000;
        config.chart.rank_max = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_color() {
        let mut config = valid_config();
        config.chart.colors.min_marker = "red".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_marker"));
    }
}
