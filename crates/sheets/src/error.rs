//! Spreadsheet store error types

use thiserror::Error;

/// Result type for spreadsheet operations
pub type SheetsResult<T> = Result<T, SheetsError>;

/// Errors raised while talking to the spreadsheet service
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Service account token exchange failed: {0}")]
    TokenExchange(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid Sheets API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Spreadsheet has no sheets")]
    NoSheets,

    #[error("Invalid column reference: {0}")]
    InvalidColumn(String),

    #[error("Column header not found: {0}")]
    ColumnNotFound(String),

    #[error("Row {0} is outside the loaded sheet")]
    RowOutOfRange(u32),

    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}
