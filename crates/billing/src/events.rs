//! Paystack webhook event payloads
//!
//! Only `charge.success` is acted on. The event tag is read from the untyped
//! JSON first so that unrelated events with unfamiliar `data` shapes are
//! ignored rather than reported as parse errors.

use serde_json::Value;

use crate::error::{BillingError, BillingResult};

/// Event tag for a successful charge
pub const CHARGE_SUCCESS: &str = "charge.success";

/// A parsed (and already verified) webhook payload
#[derive(Debug, Clone)]
pub struct PaystackEvent {
    event: Option<String>,
    data: Value,
}

/// Fields of a `charge.success` event
///
/// Only the customer email drives processing. The other fields are read
/// loosely for logging, so an unexpected type never blocks a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeData {
    pub reference: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub email: Option<String>,
}

impl PaystackEvent {
    pub fn parse(payload: &[u8]) -> BillingResult<Self> {
        let mut value: Value = serde_json::from_slice(payload)?;

        let event = value
            .get("event")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let data = value
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null);

        Ok(Self { event, data })
    }

    pub fn event_type(&self) -> Option<&str> {
        self.event.as_deref()
    }

    pub fn is_charge_success(&self) -> bool {
        self.event_type() == Some(CHARGE_SUCCESS)
    }

    /// Read the charge fields out of `data`
    pub fn charge(&self) -> ChargeData {
        ChargeData {
            reference: self.data.get("reference").and_then(loose_string),
            amount: self.data.get("amount").and_then(loose_string),
            currency: self.data.get("currency").and_then(loose_string),
            email: self
                .data
                .pointer("/customer/email")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

/// Render any scalar as text; null and missing stay `None`
fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl ChargeData {
    /// Customer email exactly as sent by Paystack
    pub fn customer_email(&self) -> BillingResult<&str> {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty())
            .ok_or(BillingError::MissingCustomerEmail)
    }
}
