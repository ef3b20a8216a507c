pub mod common;
pub mod health;
pub mod slack;

pub use health::health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router.
///
/// Only `/slack/events` sits behind request signature verification.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/slack/events",
            post(slack::handle_event).route_layer(middleware::from_fn_with_state(
                state.clone(),
                slack::verify_slack_request_middleware,
            )),
        )
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
