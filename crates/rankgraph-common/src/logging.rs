//! Structured logging infrastructure for RankGraph

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Filter used when `RUST_LOG` is not set. Serenity's gateway chatter is
/// kept at `warn`.
pub const DEFAULT_FILTER: &str = "info,serenity=warn,tracing::span=warn";

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "rankgraph_graphs=trace")
    pub level: String,
    /// Whether to emit JSON lines instead of human-readable output
    pub json_format: bool,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_FILTER.to_string(),
            json_format: false,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Builds a configuration whose filter comes from `RUST_LOG` when set.
    pub fn from_env() -> Self {
        let level = std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        Self {
            level,
            ..Self::default()
        }
    }

    /// Builds the env filter, falling back to the default filter when the
    /// configured directive is malformed.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Serenity and poise log through `tracing` as well, so this is also the sink
/// for the Discord client's own diagnostics.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(config.env_filter());

    if config.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, DEFAULT_FILTER);
        assert!(!config.json_format);
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_malformed_filter_falls_back() {
        let config = LoggingConfig {
            level: "info,=[".to_string(),
            ..LoggingConfig::default()
        };
        // Must not panic.
        let _ = config.env_filter();
    }
}
