use axum::{
  body::Body,
  extract::{Request, State},
  http::{HeaderMap, StatusCode},
  middleware::Next,
  response::Response,
};
use http_body_util::LengthLimitError;
use std::sync::Arc;

use crate::api::common::ApiError;
use crate::crypto::{self, SignatureError};
use crate::AppState;

pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";

// Middleware function to authenticate Slack callbacks before any payload parsing
pub async fn verify_slack_request_middleware(
  State(state): State<Arc<AppState>>,
  request: Request,
  next: Next,
) -> Result<Response, ApiError> {
  let (parts, body) = request.into_parts();

  let body = axum::body::to_bytes(body, state.config.max_body_bytes)
    .await
    .map_err(|e| {
      let source = e.into_inner();
      if is_length_limit(source.as_ref()) {
        tracing::warn!(limit = state.config.max_body_bytes, "Slack request body too large");
        ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
      } else {
        tracing::warn!("Failed to read Slack request body: {}", source);
        ApiError::bad_request("Failed to read request body")
      }
    })?;

  let now = chrono::Utc::now().timestamp();
  if let Err(e) = authenticate(&state, &parts.headers, &body, now) {
    tracing::warn!(path = %parts.uri.path(), "Rejected Slack request: {}", e);
    return Err(e.into());
  }

  // Hand the exact bytes that were verified to the handler
  let request = Request::from_parts(parts, Body::from(body));
  Ok(next.run(request).await)
}

fn authenticate(
  state: &AppState,
  headers: &HeaderMap,
  body: &[u8],
  now: i64,
) -> Result<(), SignatureError> {
  let timestamp = header_str(headers, TIMESTAMP_HEADER).ok_or(SignatureError::MissingHeaders)?;
  let signature = header_str(headers, SIGNATURE_HEADER).ok_or(SignatureError::MissingHeaders)?;

  crypto::check_timestamp(timestamp, now, state.config.replay_window)?;
  crypto::verify_signature(
    state.config.signing_secret.as_bytes(),
    timestamp,
    body,
    signature,
  )
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
  headers.get(name).and_then(|v| v.to_str().ok())
}

fn is_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
  let mut current = Some(err);
  while let Some(e) = current {
    if e.is::<LengthLimitError>() {
      return true;
    }
    current = e.source();
  }
  false
}
