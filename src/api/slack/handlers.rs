use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::common::ApiError;
use crate::slack::{AppMentionEvent, SlackEvent, SlackEventEnvelope};
use crate::AppState;

/// Reply posted in response to an `app_mention`.
pub fn mention_reply(user: &str, text: &str) -> String {
    format!("Hello <@{}>! You mentioned me: {}", user, text)
}

/// Handle Slack Events API callbacks.
///
/// The request has already been authenticated by
/// [`verify_slack_request_middleware`](super::verify_slack_request_middleware),
/// so the body is trusted here.
pub async fn handle_event(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let envelope: SlackEventEnvelope = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Failed to parse Slack event: {}", e);
        ApiError::bad_request("Failed to parse Slack event")
    })?;

    match envelope {
        // Handle URL verification challenge (one-time Slack setup)
        SlackEventEnvelope::UrlVerification { challenge, .. } => {
            tracing::info!("Responding to Slack URL verification challenge");
            Ok(([(header::CONTENT_TYPE, "text/plain")], challenge).into_response())
        }

        SlackEventEnvelope::EventCallback {
            event,
            team_id,
            event_id,
            ..
        } => {
            match event {
                SlackEvent::AppMention(mention) => {
                    tracing::info!(
                        team_id = ?team_id,
                        event_id = ?event_id,
                        channel = %mention.channel,
                        user = %mention.user,
                        "Received app_mention event"
                    );
                    reply_to_mention(&state, &mention).await;
                }
                other => {
                    tracing::info!("Unsupported event type: {}", other.event_type());
                }
            }
            Ok(StatusCode::OK.into_response())
        }

        SlackEventEnvelope::AppRateLimited {
            minute_rate_limited,
            team_id,
            ..
        } => {
            tracing::warn!(
                team_id = ?team_id,
                rate_limited_until = minute_rate_limited,
                "Slack app rate limited"
            );
            Ok(StatusCode::OK.into_response())
        }
    }
}

/// Post the canned reply. Failures are logged and never change the
/// acknowledgement sent back to Slack.
async fn reply_to_mention(state: &AppState, mention: &AppMentionEvent) {
    let text = mention_reply(&mention.user, &mention.text);
    match state.slack.post_message(&mention.channel, &text).await {
        Ok(response) => {
            tracing::debug!(
                channel = %mention.channel,
                ts = ?response.ts,
                "Posted reply to mention"
            );
        }
        Err(e) => {
            tracing::error!(
                channel = %mention.channel,
                "Error posting message to Slack: {}",
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_reply_greets_user_and_echoes_text() {
        assert_eq!(
            mention_reply("U456", "<@UBOT> how are you?"),
            "Hello <@U456>! You mentioned me: <@UBOT> how are you?"
        );
    }

    #[test]
    fn mention_reply_with_empty_text() {
        assert_eq!(mention_reply("U1", ""), "Hello <@U1>! You mentioned me: ");
    }
}
