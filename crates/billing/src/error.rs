//! Billing error types

use paymark_sheets::SheetsError;
use thiserror::Error;

/// Result type for webhook processing
pub type BillingResult<T> = Result<T, BillingError>;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Webhook signature invalid")]
    WebhookSignatureInvalid,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("charge.success event has no customer email")]
    MissingCustomerEmail,

    #[error("Record store error: {0}")]
    Store(#[from] SheetsError),
}
