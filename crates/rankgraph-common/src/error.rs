//! Error types and utilities for RankGraph

use thiserror::Error;

/// Result type alias for RankGraph operations
pub type Result<T> = std::result::Result<T, RankGraphError>;

/// Main error type for RankGraph operations
#[derive(Error, Debug)]
pub enum RankGraphError {
    /// Missing or invalid configuration. Fatal at startup.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The platform refused or failed the message fetch.
    #[error("Fetch error: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A message looked like a rank report but could not be parsed.
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Drawing, encoding, or writing the chart failed.
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The chart could not be shown interactively.
    #[error("Display error: {message}")]
    Display { message: String },
}

impl RankGraphError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new fetch error with source
    pub fn fetch_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new display error
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display {
            message: msg.into(),
        }
    }

    /// Whether this error should stop the process.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Render { .. })
    }
}
