// Library entry point for the binary and integration tests
pub mod api;
pub mod config;
pub mod crypto;
pub mod slack;

pub use config::Config;

use slack::{SlackClient, SlackClientError};

pub struct AppState {
    pub config: Config,
    pub slack: SlackClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, SlackClientError> {
        let slack = SlackClient::new(
            config.bot_token.clone(),
            config.slack_api_base_url.clone(),
            config.slack_timeout,
        )?;
        Ok(Self { config, slack })
    }
}
