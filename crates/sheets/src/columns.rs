//! Column mapping for the record sheet
//!
//! Rows are addressed through a named `ColumnMap` (email, status) rather
//! than raw indices. The map is resolved once per store session, either from
//! fixed column letters or from the sheet's header row.

use crate::error::{SheetsError, SheetsResult};

/// Default email column (C)
pub const DEFAULT_EMAIL_COLUMN: usize = 2;

/// Default status column (H)
pub const DEFAULT_STATUS_COLUMN: usize = 7;

/// How a single column is located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    /// Fixed 0-based position
    Index(usize),
    /// Header text in row 1 (trimmed, case-insensitive)
    Header(String),
}

impl ColumnSpec {
    /// Parse a column letter reference such as `C` or `AA`
    pub fn letter(letters: &str) -> SheetsResult<Self> {
        column_index(letters).map(Self::Index)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::Header(name.into())
    }

    fn resolve(&self, header: &[String]) -> SheetsResult<usize> {
        match self {
            Self::Index(index) => Ok(*index),
            Self::Header(name) => {
                let wanted = name.trim().to_lowercase();
                header
                    .iter()
                    .position(|cell| cell.trim().to_lowercase() == wanted)
                    .ok_or_else(|| SheetsError::ColumnNotFound(name.clone()))
            }
        }
    }
}

/// Convert a spreadsheet column reference (`A`, `H`, `AA`) to a 0-based index
pub fn column_index(letters: &str) -> SheetsResult<usize> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(SheetsError::InvalidColumn(letters.to_string()));
    }

    let mut index = 0usize;
    for c in trimmed.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(SheetsError::InvalidColumn(letters.to_string()));
        }
        index = index * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }

    Ok(index - 1)
}

/// Convert a 0-based index back to its column reference (`0` is `A`)
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Configured location of the email and status columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub email: ColumnSpec,
    pub status: ColumnSpec,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            email: ColumnSpec::Index(DEFAULT_EMAIL_COLUMN),
            status: ColumnSpec::Index(DEFAULT_STATUS_COLUMN),
        }
    }
}

impl ColumnLayout {
    pub fn new(email: ColumnSpec, status: ColumnSpec) -> Self {
        Self { email, status }
    }

    /// Resolve against the sheet's header row
    pub fn resolve(&self, header: &[String]) -> SheetsResult<ColumnMap> {
        Ok(ColumnMap {
            email: self.email.resolve(header)?,
            status: self.status.resolve(header)?,
        })
    }
}

/// Resolved 0-based column positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub email: usize,
    pub status: usize,
}
