//! Paystack webhook endpoint
//!
//! Paystack treats slow responses as failed deliveries, so the request is
//! acknowledged immediately and verification plus the spreadsheet update run
//! on a detached task. The outcome is only logged.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use paymark_billing::PAYSTACK_SIGNATURE_HEADER;
use tracing::Instrument;
use uuid::Uuid;

use crate::state::AppState;

/// Fixed acknowledgment body
pub const ACK_BODY: &str = "Webhook Received";

/// Handle a Paystack webhook delivery
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let signature = headers
        .get(PAYSTACK_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let delivery_id = Uuid::new_v4();
    let span = tracing::info_span!("paystack_webhook", delivery_id = %delivery_id);
    let webhooks = state.webhooks.clone();

    tokio::spawn(
        async move {
            let outcome = webhooks.process(&body, signature.as_deref()).await;
            tracing::info!(
                outcome = outcome.as_str(),
                payload_len = body.len(),
                "Webhook delivery finished"
            );
        }
        .instrument(span),
    );

    (StatusCode::OK, ACK_BODY)
}
