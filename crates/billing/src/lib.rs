// Billing crate clippy configuration
#![allow(clippy::result_large_err)] // BillingError wraps SheetsError
// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Paymark Billing Module
//!
//! Handles Paystack webhooks and marks paid customers in the record sheet.
//!
//! ## Features
//!
//! - **Signature Verification**: HMAC-SHA512 over the raw body, constant-time compare
//! - **Event Parsing**: `charge.success` detection without rejecting other event shapes
//! - **Payment Marking**: First case-insensitive email match gets status `Paid`
//! - **Outcomes**: Every delivery ends in exactly one `WebhookOutcome`

pub mod error;
pub mod events;
pub mod signature;
pub mod webhooks;

#[cfg(test)]
mod edge_case_tests;

// Error
pub use error::{BillingError, BillingResult};

// Events
pub use events::{ChargeData, PaystackEvent, CHARGE_SUCCESS};

// Signature
pub use signature::{WebhookVerifier, PAYSTACK_SIGNATURE_HEADER};

// Webhooks
pub use webhooks::{WebhookHandler, WebhookOutcome, STATUS_PAID};
