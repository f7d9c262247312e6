//! Discord-backed message source.

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use rankgraph_common::{ChannelId, RankGraphError, RawMessage, Result};
use rankgraph_graphs::MessageSource;
use std::sync::Arc;
use tracing::debug;

/// Reads one page of channel history over the Discord REST API.
#[derive(Clone)]
pub struct DiscordMessageSource {
    http: Arc<serenity::Http>,
    limit: u8,
}

impl DiscordMessageSource {
    /// Creates a source that requests `limit` messages per fetch.
    pub const fn new(http: Arc<serenity::Http>, limit: u8) -> Self {
        Self { http, limit }
    }
}

impl std::fmt::Debug for DiscordMessageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordMessageSource")
            .field("http", &"<Http>")
            .field("limit", &self.limit)
            .finish()
    }
}

fn to_raw(message: serenity::Message) -> RawMessage {
    RawMessage::new(message.content, message.timestamp.to_string())
}

#[async_trait]
impl MessageSource for DiscordMessageSource {
    async fn fetch_messages(&self, channel: ChannelId) -> Result<Vec<RawMessage>> {
        if channel.0 == 0 {
            return Err(RankGraphError::fetch("channel id must be non-zero"));
        }

        debug!(%channel, limit = self.limit, "Requesting channel messages");
        let messages = self
            .http
            .get_messages(serenity::ChannelId::new(channel.0), None, Some(self.limit))
            .await
            .map_err(|e| RankGraphError::fetch_with_source(e.to_string(), e))?;

        // Newest first, as Discord returns them.
        Ok(messages.into_iter().map(to_raw).collect())
    }
}
