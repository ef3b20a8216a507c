//! Slack Web API client.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::{error, trace};

use super::types::{PostMessageRequest, PostMessageResponse};

pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";
/// Total time allowed for one Web API call; Slack expects an ack within 3s.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2500);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum SlackClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to Slack failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to parse Slack response: {source} (body: {body})")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Slack API error: {error}")]
    Api { error: String },
}

/// HTTP client for the Slack Web API, authenticated with a bot token.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    bot_token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(
        bot_token: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, SlackClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(CONNECT_TIMEOUT))
            .build()
            .map_err(SlackClientError::Build)?;

        Ok(Self {
            client,
            bot_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Post a plain-text message to a channel as the bot user.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
    ) -> Result<PostMessageResponse, SlackClientError> {
        let request = PostMessageRequest {
            channel: channel.to_string(),
            text: text.to_string(),
            as_user: true,
        };

        trace!(channel = %request.channel, "Posting message to Slack");

        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(&self.bot_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let result: PostMessageResponse =
            serde_json::from_str(&body).map_err(|source| SlackClientError::Parse {
                body: body.clone(),
                source,
            })?;

        // Slack reports API failures with HTTP 200 and `ok: false`
        if !result.ok {
            error!(error = ?result.error, status = %status, "Slack API error");
            return Err(SlackClientError::Api {
                error: result.error.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        trace!(ts = ?result.ts, "Message posted successfully");
        Ok(result)
    }
}

impl fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackClient")
            .field("bot_token", &"[redacted]")
            .field("base_url", &self.base_url)
            .finish()
    }
}
