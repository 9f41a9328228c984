//! Configuration loaded once at startup

use paymark_sheets::{ColumnLayout, ColumnSpec, ServiceAccountKey, SheetsError};
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Server configuration
#[derive(Clone)]
pub struct Config {
    /// Paystack secret key used to sign webhook bodies
    pub paystack_secret_key: String,
    pub spreadsheet_id: String,
    pub service_account: ServiceAccountKey,
    pub bind_address: String,
    pub columns: ColumnLayout,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let host = get("BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());

        let columns = ColumnLayout::new(
            column_spec(get("EMAIL_HEADER"), get("EMAIL_COLUMN"), "EMAIL_COLUMN", "C")?,
            column_spec(get("STATUS_HEADER"), get("STATUS_COLUMN"), "STATUS_COLUMN", "H")?,
        );

        Ok(Self {
            paystack_secret_key: require("PAYSTACK_SECRET_KEY")?,
            spreadsheet_id: require("SPREADSHEET_ID")?,
            service_account: ServiceAccountKey::new(
                require("CLIENT_EMAIL")?,
                unescape_private_key(&require("PRIVATE_KEY")?),
            ),
            bind_address: format!("{}:{}", host.trim(), port),
            columns,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("paystack_secret_key", &"[REDACTED]")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("service_account", &self.service_account)
            .field("bind_address", &self.bind_address)
            .field("columns", &self.columns)
            .finish()
    }
}

/// Header name wins over a column letter; the letter falls back to `default`
fn column_spec(
    header: Option<String>,
    letter: Option<String>,
    letter_var: &'static str,
    default: &str,
) -> Result<ColumnSpec, ConfigError> {
    if let Some(header) = header {
        return Ok(ColumnSpec::header(header.trim()));
    }

    let letter = letter.unwrap_or_else(|| default.to_string());
    ColumnSpec::letter(&letter).map_err(|e: SheetsError| ConfigError::Invalid {
        name: letter_var,
        reason: e.to_string(),
    })
}

/// Hosting dashboards store the PEM on one line with literal `\n` escapes
fn unescape_private_key(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .replace("\\r\\n", "\n")
        .replace("\\n", "\n")
}
