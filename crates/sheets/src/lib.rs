// Sheets crate clippy configuration
#![allow(clippy::result_large_err)] // SheetsError::Api carries the upstream message
// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Paymark Sheets Module
//!
//! Spreadsheet-backed record store used to mark customer rows as paid.
//!
//! ## Features
//!
//! - **Service Account Auth**: RS256 JWT bearer exchange against Google OAuth2
//! - **Sheets API Client**: Metadata, value ranges, and single-cell updates
//! - **Record Store**: `RecordStore` / `RecordSheet` traits over the first tab
//! - **Column Mapping**: Fixed column letters or header-driven resolution
//! - **In-Memory Store**: Test double with save tracking and failure injection

pub mod auth;
pub mod client;
pub mod columns;
pub mod error;
pub mod memory;
pub mod records;
pub mod store;

// Auth
pub use auth::{
    ServiceAccountAuth, ServiceAccountKey, StaticToken, TokenProvider, GOOGLE_TOKEN_URI,
    SHEETS_SCOPE,
};

// Client
pub use client::{SheetProperties, SheetsClient, SpreadsheetInfo, SHEETS_API_BASE};

// Columns
pub use columns::{
    column_index, column_letter, ColumnLayout, ColumnMap, ColumnSpec, DEFAULT_EMAIL_COLUMN,
    DEFAULT_STATUS_COLUMN,
};

// Error
pub use error::{SheetsError, SheetsResult};

// Memory
pub use memory::InMemoryStore;

// Records
pub use records::{CellUpdate, RecordRow, SheetRows};

// Store
pub use store::{GoogleSheetsStore, RecordSheet, RecordStore};
