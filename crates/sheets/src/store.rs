//! Record store abstraction
//!
//! A store session mirrors how the payment marker uses the spreadsheet:
//! authenticate and load metadata once (`open`), read the first tab's rows,
//! then write at most one cell.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::TokenProvider;
use crate::client::{cell_range, quote_sheet_title, SheetProperties, SheetsClient};
use crate::error::{SheetsError, SheetsResult};
use crate::records::{CellUpdate, SheetRows};

/// Entry point to the external tabular store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Authenticate, load document metadata and select the first sheet
    async fn open(&self) -> SheetsResult<Box<dyn RecordSheet>>;
}

/// An opened sheet, valid for the duration of one webhook delivery
#[async_trait]
pub trait RecordSheet: Send {
    fn title(&self) -> &str;

    /// Fetch the header and every data row in stored order
    async fn rows(&mut self) -> SheetsResult<SheetRows>;

    /// Write one cell; every other cell of the row is left untouched
    async fn update_cell(&mut self, update: &CellUpdate) -> SheetsResult<()>;
}

/// Google Sheets backed record store
pub struct GoogleSheetsStore {
    client: SheetsClient,
    auth: Arc<dyn TokenProvider>,
}

impl GoogleSheetsStore {
    pub fn new(client: SheetsClient, auth: Arc<dyn TokenProvider>) -> Self {
        Self { client, auth }
    }
}

#[async_trait]
impl RecordStore for GoogleSheetsStore {
    async fn open(&self) -> SheetsResult<Box<dyn RecordSheet>> {
        let token = self.auth.access_token(self.client.http()).await?;
        let info = self.client.get_info(&token).await?;
        let sheet = info.first_sheet().cloned().ok_or(SheetsError::NoSheets)?;

        tracing::debug!(
            spreadsheet_id = %self.client.spreadsheet_id(),
            sheet = %sheet.title,
            sheet_id = sheet.sheet_id,
            "Opened first sheet"
        );

        Ok(Box::new(GoogleSheet {
            client: self.client.clone(),
            token,
            sheet,
        }))
    }
}

struct GoogleSheet {
    client: SheetsClient,
    token: String,
    sheet: SheetProperties,
}

#[async_trait]
impl RecordSheet for GoogleSheet {
    fn title(&self) -> &str {
        &self.sheet.title
    }

    async fn rows(&mut self) -> SheetsResult<SheetRows> {
        let range = quote_sheet_title(&self.sheet.title);
        let values = self.client.get_values(&self.token, &range).await?;
        Ok(SheetRows::from_values(self.sheet.title.clone(), values))
    }

    async fn update_cell(&mut self, update: &CellUpdate) -> SheetsResult<()> {
        let range = cell_range(&self.sheet.title, update.column, update.row);
        self.client
            .update_values(&self.token, &range, &[vec![update.value.clone()]])
            .await?;

        tracing::debug!(sheet = %self.sheet.title, range = %range, "Updated cell");
        Ok(())
    }
}
