//! Google Sheets API v4 client
//!
//! Thin wrapper over the three endpoints the record store needs: spreadsheet
//! metadata, reading a value range, and writing a value range.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::columns::column_letter;
use crate::error::{SheetsError, SheetsResult};

/// Public Sheets API host
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Spreadsheet metadata (`spreadsheets.get`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetInfo {
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

/// Properties of a single tab
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SheetProperties {
    #[serde(rename = "sheetId", default)]
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

impl SpreadsheetInfo {
    /// The tab with the lowest index
    pub fn first_sheet(&self) -> Option<&SheetProperties> {
        self.sheets
            .iter()
            .map(|entry| &entry.properties)
            .min_by_key(|props| props.index)
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Quote a sheet title for A1 notation
///
/// Always quoted, since a bare title such as `A1` or `R1C1` would be read as
/// a cell reference.
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// A1 reference to a single cell, e.g. `'Orders'!H3`
pub fn cell_range(title: &str, column: usize, row_number: u32) -> String {
    format!("{}!{}{}", quote_sheet_title(title), column_letter(column), row_number)
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Sheets API client bound to one spreadsheet document
#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    base_url: Url,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(http: Client, spreadsheet_id: impl Into<String>) -> SheetsResult<Self> {
        Self::with_base_url(http, SHEETS_API_BASE, spreadsheet_id)
    }

    pub fn with_base_url(
        http: Client,
        base_url: &str,
        spreadsheet_id: impl Into<String>,
    ) -> SheetsResult<Self> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn endpoint(&self, extra: &[&str]) -> SheetsResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SheetsError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(extra);
        Ok(url)
    }

    /// Load document metadata and the sheet list
    pub async fn get_info(&self, token: &str) -> SheetsResult<SpreadsheetInfo> {
        let mut url = self.endpoint(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "properties.title,sheets.properties");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let info = check(response).await?.json::<SpreadsheetInfo>().await?;

        tracing::debug!(
            spreadsheet_id = %self.spreadsheet_id,
            title = %info.properties.title,
            sheet_count = info.sheets.len(),
            "Loaded spreadsheet metadata"
        );

        Ok(info)
    }

    /// Read every populated row of a range as strings
    pub async fn get_values(&self, token: &str, range: &str) -> SheetsResult<Vec<Vec<String>>> {
        let url = self.endpoint(&["values", range])?;

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let range_values = check(response).await?.json::<ValueRange>().await?;

        Ok(range_values
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// Overwrite a range with raw (unparsed) values
    ///
    /// Cells outside `range` are left as they are.
    pub async fn update_values(
        &self,
        token: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> SheetsResult<()> {
        let mut url = self.endpoint(&["values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": values,
        });

        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        check(response).await?;

        Ok(())
    }
}

/// Map non-2xx responses to `SheetsError::Api`
async fn check(response: Response) -> SheetsResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<GoogleErrorEnvelope>(&body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{}: {}", code, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) if body.is_empty() => status.to_string(),
        Err(_) => body,
    };

    Err(SheetsError::Api {
        status: status.as_u16(),
        message,
    })
}
