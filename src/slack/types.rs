use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Slack Events API outer envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackEventEnvelope {
    /// One-time handshake sent when the request URL is configured
    UrlVerification {
        challenge: String,
        #[serde(default)]
        token: Option<String>,
    },
    /// Event callback containing actual event data
    EventCallback {
        #[serde(default)]
        team_id: Option<String>,
        #[serde(default)]
        api_app_id: Option<String>,
        #[serde(default)]
        event_id: Option<String>,
        #[serde(default)]
        event_time: Option<i64>,
        event: SlackEvent,
    },
    /// Sent when the app exceeds its event delivery quota
    AppRateLimited {
        #[serde(default)]
        team_id: Option<String>,
        minute_rate_limited: i64,
        #[serde(default)]
        api_app_id: Option<String>,
    },
}

/// Inner event of an `event_callback`.
///
/// Only `app_mention` is acted upon; everything else keeps its type name so
/// it can be logged.
#[derive(Debug, Clone, PartialEq)]
pub enum SlackEvent {
    AppMention(AppMentionEvent),
    Unsupported { event_type: String },
}

impl SlackEvent {
    pub fn event_type(&self) -> &str {
        match self {
            SlackEvent::AppMention(_) => "app_mention",
            SlackEvent::Unsupported { event_type } => event_type,
        }
    }
}

impl<'de> Deserialize<'de> for SlackEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let event_type = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match event_type.as_str() {
            "app_mention" => serde_json::from_value(value)
                .map(SlackEvent::AppMention)
                .map_err(serde::de::Error::custom),
            _ => Ok(SlackEvent::Unsupported { event_type }),
        }
    }
}

/// Slack app mention event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppMentionEvent {
    pub channel: String,
    pub user: String,
    pub text: String,
    pub ts: String,
    #[serde(default)]
    pub thread_ts: Option<String>,
}

/// Body of `chat.postMessage`
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
    /// Post as the bot user rather than as the app
    pub as_user: bool,
}

/// Response envelope shared by Web API methods
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
}
