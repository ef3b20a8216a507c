//! Slack Events API payloads and the Web API client used to answer them.

mod client;
mod types;

pub use client::{SlackClient, SlackClientError, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT};
pub use types::{
    AppMentionEvent, PostMessageRequest, PostMessageResponse, SlackEvent, SlackEventEnvelope,
};
