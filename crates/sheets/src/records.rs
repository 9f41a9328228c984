//! Record rows loaded from the first sheet

use crate::columns::ColumnMap;

/// Sheet row number of the first data row (row 1 holds the header)
const FIRST_DATA_ROW: u32 = 2;

/// One data row, addressed by its 1-based sheet row number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub number: u32,
    pub values: Vec<String>,
}

impl RecordRow {
    pub fn new(number: u32, values: Vec<String>) -> Self {
        Self { number, values }
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Write a cell, padding ragged rows with empty cells as needed
    pub fn set_cell(&mut self, column: usize, value: impl Into<String>) {
        if self.values.len() <= column {
            self.values.resize(column + 1, String::new());
        }
        self.values[column] = value.into();
    }

    pub fn email(&self, columns: &ColumnMap) -> Option<&str> {
        self.cell(columns.email)
    }

    pub fn status(&self, columns: &ColumnMap) -> Option<&str> {
        self.cell(columns.status)
    }
}

/// A single cell write, addressed by sheet row number and 0-based column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub row: u32,
    pub column: usize,
    pub value: String,
}

impl CellUpdate {
    pub fn new(row: u32, column: usize, value: impl Into<String>) -> Self {
        Self {
            row,
            column,
            value: value.into(),
        }
    }
}

/// Contents of a sheet: title, header row, and data rows in stored order
#[derive(Debug, Clone, Default)]
pub struct SheetRows {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<RecordRow>,
}

impl SheetRows {
    /// Split raw values into header and numbered data rows
    pub fn from_values(title: impl Into<String>, values: Vec<Vec<String>>) -> Self {
        let mut values = values.into_iter();
        let header = values.next().unwrap_or_default();
        let rows = values
            .zip(FIRST_DATA_ROW..)
            .map(|(values, number)| RecordRow::new(number, values))
            .collect();

        Self {
            title: title.into(),
            header,
            rows,
        }
    }

    /// Position of the first row whose email cell matches, ignoring case and
    /// surrounding whitespace in the sheet value
    pub fn find_by_email(&self, columns: &ColumnMap, email: &str) -> Option<usize> {
        let target = email.to_lowercase();
        self.rows.iter().position(|row| {
            row.email(columns)
                .is_some_and(|cell| cell.trim().to_lowercase() == target)
        })
    }
}
