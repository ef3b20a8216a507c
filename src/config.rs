use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::slack::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REPLAY_WINDOW_SECS: u64 = 300;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub signing_secret: String,
    pub bind_address: String,
    /// Maximum clock skew accepted on `X-Slack-Request-Timestamp`.
    pub replay_window: Duration,
    pub slack_api_base_url: String,
    /// Total timeout for one outbound Web API call.
    pub slack_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenv::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (bot_token, signing_secret) = match (
            non_empty("SLACK_BOT_TOKEN"),
            non_empty("SLACK_SIGNING_SECRET"),
        ) {
            (Some(token), Some(secret)) => (token, secret),
            _ => {
                return Err(anyhow!(
                    "SLACK_BOT_TOKEN and SLACK_SIGNING_SECRET must be set (environment or .env)"
                ))
            }
        };

        let bind_address = match non_empty("BIND_ADDRESS") {
            Some(address) => address,
            None => {
                let port: u16 = parse_or_default(&non_empty, "PORT", DEFAULT_PORT)?;
                format!("0.0.0.0:{}", port)
            }
        };

        let replay_window_secs = parse_or_default(
            &non_empty,
            "SLACK_REPLAY_WINDOW_SECS",
            DEFAULT_REPLAY_WINDOW_SECS,
        )?;

        let slack_api_base_url = non_empty("SLACK_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let slack_timeout_ms = parse_or_default(
            &non_empty,
            "SLACK_TIMEOUT_MS",
            DEFAULT_TIMEOUT.as_millis() as u64,
        )?;

        let max_body_bytes =
            parse_or_default(&non_empty, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?;

        Ok(Self {
            bot_token,
            signing_secret,
            bind_address,
            replay_window: Duration::from_secs(replay_window_secs),
            slack_api_base_url,
            slack_timeout: Duration::from_millis(slack_timeout_ms),
            max_body_bytes,
        })
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"[redacted]")
            .field("signing_secret", &"[redacted]")
            .field("bind_address", &self.bind_address)
            .field("replay_window", &self.replay_window)
            .field("slack_api_base_url", &self.slack_api_base_url)
            .field("slack_timeout", &self.slack_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
