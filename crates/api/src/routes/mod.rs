//! HTTP routes

pub mod webhooks;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Liveness probe for the hosting platform
async fn health() -> &'static str {
    "OK"
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(webhooks::paystack_webhook))
        .route("/health", get(health))
        .with_state(state)
}
