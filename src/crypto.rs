//! Slack request signing (v0 scheme).
//!
//! Protocol: https://api.slack.com/authentication/verifying-requests-from-slack
//!
//! The signed base string is `v0:<timestamp>:<raw body>` and the header value is
//! `v0=` followed by the lowercase hex HMAC-SHA256 of that string.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_VERSION: &str = "v0";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
  #[error("missing X-Slack-Request-Timestamp or X-Slack-Signature header")]
  MissingHeaders,
  #[error("invalid request timestamp: {0:?}")]
  InvalidTimestamp(String),
  #[error("request timestamp {timestamp} is outside the replay window (now: {now})")]
  StaleTimestamp { timestamp: i64, now: i64 },
  #[error("signature header is not a v0 hex digest")]
  Malformed,
  #[error("signature mismatch")]
  Mismatch,
  #[error("signing secret cannot be used as an HMAC key")]
  InvalidKey,
}

fn signing_mac(secret: &[u8], timestamp: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
  let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::InvalidKey)?;
  mac.update(SIGNATURE_VERSION.as_bytes());
  mac.update(b":");
  mac.update(timestamp.as_bytes());
  mac.update(b":");
  mac.update(body);
  Ok(mac)
}

/// Compute the `X-Slack-Signature` header value for a request.
pub fn compute_signature(
  secret: &[u8],
  timestamp: &str,
  body: &[u8],
) -> Result<String, SignatureError> {
  let mac = signing_mac(secret, timestamp, body)?;
  Ok(format!(
    "{}={}",
    SIGNATURE_VERSION,
    hex::encode(mac.finalize().into_bytes())
  ))
}

/// Verify a provided `X-Slack-Signature` value against the raw body.
///
/// The digest comparison is constant time.
pub fn verify_signature(
  secret: &[u8],
  timestamp: &str,
  body: &[u8],
  provided: &str,
) -> Result<(), SignatureError> {
  let digest = provided
    .strip_prefix(SIGNATURE_VERSION)
    .and_then(|rest| rest.strip_prefix('='))
    .ok_or(SignatureError::Malformed)?;
  let provided_bytes = hex::decode(digest).map_err(|_| SignatureError::Malformed)?;

  signing_mac(secret, timestamp, body)?
    .verify_slice(&provided_bytes)
    .map_err(|_| SignatureError::Mismatch)
}

/// Parse a request timestamp and reject it if it is further than `window`
/// from `now` in either direction.
pub fn check_timestamp(raw: &str, now: i64, window: Duration) -> Result<i64, SignatureError> {
  let timestamp: i64 = raw
    .parse()
    .map_err(|_| SignatureError::InvalidTimestamp(raw.to_string()))?;

  if now.abs_diff(timestamp) > window.as_secs() {
    return Err(SignatureError::StaleTimestamp { timestamp, now });
  }

  Ok(timestamp)
}
