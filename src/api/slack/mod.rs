mod handlers;
mod middleware;

pub use handlers::{handle_event, mention_reply};
pub use middleware::{verify_slack_request_middleware, SIGNATURE_HEADER, TIMESTAMP_HEADER};
