//! In-memory record store
//!
//! Used by the webhook and route tests. Tracks how often the store is opened
//! and every cell written, and can be told to fail or stall.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{SheetsError, SheetsResult};
use crate::records::{CellUpdate, RecordRow, SheetRows};
use crate::store::{RecordSheet, RecordStore};

#[derive(Debug, Default)]
struct MemoryState {
    title: String,
    values: Vec<Vec<String>>,
    open_count: usize,
    saves: Vec<CellUpdate>,
    fail_open: Option<String>,
    fail_save: Option<String>,
    open_delay: Option<Duration>,
}

/// Record store holding a single sheet in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    /// Create a store whose first sheet holds `values` (row 1 is the header)
    pub fn new(title: impl Into<String>, values: Vec<Vec<String>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                title: title.into(),
                values,
                ..MemoryState::default()
            })),
        }
    }

    /// Fail every `open` with `SheetsError::Unavailable`
    pub async fn fail_open(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_open = Some(reason.into());
    }

    /// Fail every `update_cell` with `SheetsError::Unavailable`
    pub async fn fail_save(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_save = Some(reason.into());
    }

    /// Delay every `open`, simulating a slow upstream
    pub async fn delay_open(&self, delay: Duration) {
        self.state.lock().await.open_delay = Some(delay);
    }

    pub async fn open_count(&self) -> usize {
        self.state.lock().await.open_count
    }

    /// Cells written so far, in order
    pub async fn saves(&self) -> Vec<CellUpdate> {
        self.state.lock().await.saves.clone()
    }

    /// Current values of a sheet row (1-based, row 1 is the header)
    pub async fn row(&self, number: u32) -> Option<Vec<String>> {
        let index = (number as usize).checked_sub(1)?;
        self.state.lock().await.values.get(index).cloned()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn open(&self) -> SheetsResult<Box<dyn RecordSheet>> {
        let (delay, title) = {
            let mut state = self.state.lock().await;
            state.open_count += 1;
            if let Some(reason) = &state.fail_open {
                return Err(SheetsError::Unavailable(reason.clone()));
            }
            (state.open_delay, state.title.clone())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(Box::new(MemorySheet {
            state: self.state.clone(),
            title,
        }))
    }
}

struct MemorySheet {
    state: Arc<Mutex<MemoryState>>,
    title: String,
}

#[async_trait]
impl RecordSheet for MemorySheet {
    fn title(&self) -> &str {
        &self.title
    }

    async fn rows(&mut self) -> SheetsResult<SheetRows> {
        let values = self.state.lock().await.values.clone();
        Ok(SheetRows::from_values(self.title.clone(), values))
    }

    async fn update_cell(&mut self, update: &CellUpdate) -> SheetsResult<()> {
        let mut state = self.state.lock().await;
        if let Some(reason) = &state.fail_save {
            return Err(SheetsError::Unavailable(reason.clone()));
        }

        let index = (update.row as usize)
            .checked_sub(1)
            .filter(|index| *index < state.values.len())
            .ok_or(SheetsError::RowOutOfRange(update.row))?;

        let mut row = RecordRow::new(update.row, std::mem::take(&mut state.values[index]));
        row.set_cell(update.column, update.value.clone());
        state.values[index] = row.values;
        state.saves.push(update.clone());
        Ok(())
    }
}
