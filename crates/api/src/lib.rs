// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Paymark API Library
//!
//! HTTP surface for the Paystack payment marker: configuration, shared state
//! and the webhook router.

pub mod config;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use routes::create_router;
pub use state::AppState;
