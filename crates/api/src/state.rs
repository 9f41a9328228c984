//! Application state

use std::sync::Arc;

use paymark_billing::{WebhookHandler, WebhookVerifier};
use paymark_sheets::{
    GoogleSheetsStore, RecordStore, ServiceAccountAuth, SheetsClient, SheetsResult,
};
use reqwest::Client;

use crate::config::Config;

/// Shared application state
///
/// Holds only immutable collaborators; each delivery opens its own store
/// session.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub webhooks: Arc<WebhookHandler>,
}

impl AppState {
    /// Wire the Google Sheets record store from configuration
    pub fn new(config: Config) -> SheetsResult<Self> {
        let http_client = Client::new();

        let auth = ServiceAccountAuth::new(&config.service_account)?;
        tracing::info!(
            client_email = %auth.client_email(),
            "Service account credentials loaded"
        );

        let client = SheetsClient::new(http_client, config.spreadsheet_id.clone())?;
        let store = GoogleSheetsStore::new(client, Arc::new(auth));
        tracing::info!(
            spreadsheet_id = %config.spreadsheet_id,
            columns = ?config.columns,
            "Google Sheets record store initialized"
        );

        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build state around an explicit record store
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let verifier = WebhookVerifier::new(config.paystack_secret_key.clone());
        let webhooks = WebhookHandler::new(verifier, store, config.columns.clone());

        Self {
            config: Arc::new(config),
            webhooks: Arc::new(webhooks),
        }
    }
}
