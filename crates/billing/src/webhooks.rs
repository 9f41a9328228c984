//! Paystack webhook handling
//!
//! Verifies the signature of a delivery, and for `charge.success` events
//! marks the first record row whose email matches the customer as paid.
//! Every failure is logged and folded into a `WebhookOutcome`; nothing is
//! propagated to the HTTP layer, which has already acknowledged the request.

use std::sync::Arc;

use paymark_sheets::{CellUpdate, ColumnLayout, RecordStore};

use crate::error::{BillingError, BillingResult};
use crate::events::PaystackEvent;
use crate::signature::WebhookVerifier;

/// Status value written to a matched row
pub const STATUS_PAID: &str = "Paid";

/// Terminal result of processing one delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The status cell of this sheet row was set to `Paid`
    Updated { row: u32 },
    /// No row carries the customer's email
    NoMatch,
    /// The event is not `charge.success`
    WrongEvent,
    /// Signature missing or mismatched
    VerificationFailed,
    /// Parse, configuration or record store failure
    ProcessingError(String),
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Updated { .. } => "updated",
            Self::NoMatch => "no_match",
            Self::WrongEvent => "wrong_event",
            Self::VerificationFailed => "verification_failed",
            Self::ProcessingError(_) => "processing_error",
        }
    }
}

/// Webhook handler for Paystack events
pub struct WebhookHandler {
    verifier: WebhookVerifier,
    store: Arc<dyn RecordStore>,
    columns: ColumnLayout,
}

impl WebhookHandler {
    pub fn new(
        verifier: WebhookVerifier,
        store: Arc<dyn RecordStore>,
        columns: ColumnLayout,
    ) -> Self {
        Self {
            verifier,
            store,
            columns,
        }
    }

    /// Verify and process one delivery
    pub async fn process(&self, payload: &[u8], signature: Option<&str>) -> WebhookOutcome {
        match self.process_internal(payload, signature).await {
            Ok(outcome) => outcome,
            Err(BillingError::WebhookSignatureInvalid) => {
                tracing::error!(
                    payload_len = payload.len(),
                    signature_present = signature.is_some(),
                    "SECURITY FAILURE: Signature mismatch"
                );
                WebhookOutcome::VerificationFailed
            }
            Err(e) => {
                tracing::error!(error = %e, "Webhook processing error");
                WebhookOutcome::ProcessingError(e.to_string())
            }
        }
    }

    async fn process_internal(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> BillingResult<WebhookOutcome> {
        self.verifier.verify(payload, signature)?;

        let event = PaystackEvent::parse(payload)?;
        if !event.is_charge_success() {
            tracing::debug!(
                event_type = ?event.event_type(),
                "Ignoring Paystack event - only charge.success is handled"
            );
            return Ok(WebhookOutcome::WrongEvent);
        }

        let charge = event.charge();
        let email = charge.customer_email()?;

        tracing::info!(
            customer_email = %email,
            reference = charge.reference.as_deref().unwrap_or_default(),
            amount = charge.amount.as_deref().unwrap_or_default(),
            currency = charge.currency.as_deref().unwrap_or_default(),
            "Processing secure payment"
        );

        self.mark_paid(email).await
    }

    /// Set the status of the first row matching `email` to `Paid`
    ///
    /// Scanning stops at the first match, so duplicate rows further down are
    /// never touched. Only the status cell is written. Writing `Paid` over
    /// `Paid` is harmless, which keeps redelivered events idempotent.
    pub async fn mark_paid(&self, email: &str) -> BillingResult<WebhookOutcome> {
        let mut sheet = self.store.open().await?;
        let sheet_rows = sheet.rows().await?;
        let columns = self.columns.resolve(&sheet_rows.header)?;

        let Some(position) = sheet_rows.find_by_email(&columns, email) else {
            tracing::debug!(
                customer_email = %email,
                sheet = %sheet_rows.title,
                rows_scanned = sheet_rows.rows.len(),
                "No record row matches customer email"
            );
            return Ok(WebhookOutcome::NoMatch);
        };

        let row = &sheet_rows.rows[position];
        sheet
            .update_cell(&CellUpdate::new(row.number, columns.status, STATUS_PAID))
            .await?;

        tracing::info!(
            customer_email = %email,
            sheet = %sheet.title(),
            row = row.number,
            previous_status = row.status(&columns).unwrap_or_default(),
            "Status updated to Paid"
        );

        Ok(WebhookOutcome::Updated { row: row.number })
    }
}
