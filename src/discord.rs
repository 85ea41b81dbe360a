use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("request to Discord failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Raw outcome of one message dispatch
///
/// The client does not interpret success or failure; the announcer decides
/// what a run's deliveries add up to.
#[derive(Debug)]
pub struct Delivery {
    pub status: u16,
    pub body: String,
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// Client for the Discord channel-message endpoint
pub struct DiscordClient {
    client: Client,
    token: String,
    base_url: String,
}

impl DiscordClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            token: config.discord_api_token.clone(),
            base_url: config.discord_api_base_url.clone(),
        }
    }

    /// Post one message to a channel, returning the raw delivery outcome
    pub async fn post_message(
        &self,
        channel: &str,
        content: &str,
    ) -> Result<Delivery, DiscordError> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bot {}", self.token))
            .json(&CreateMessage { content })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!("Posted message to channel {}: status={}", channel, status);

        Ok(Delivery { status, body })
    }
}
