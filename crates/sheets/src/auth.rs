//! Google service-account authentication
//!
//! Exchanges an RS256-signed JWT assertion for a short-lived OAuth2 access
//! token (the "JWT bearer" grant). A token is requested for every store
//! session; nothing is cached between webhook deliveries.

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{SheetsError, SheetsResult};

/// OAuth2 scope granting read/write access to spreadsheets
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Google OAuth2 token endpoint
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime accepted by Google (maximum one hour)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Service account credentials (client email + PEM private key)
#[derive(Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
}

impl ServiceAccountKey {
    pub fn new(client_email: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client_email: client_email.into(),
            private_key: private_key.into(),
        }
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Source of bearer tokens for the Sheets API
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self, http: &reqwest::Client) -> SheetsResult<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// JWT bearer token provider for a Google service account
pub struct ServiceAccountAuth {
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
}

impl ServiceAccountAuth {
    /// Create a provider against the public Google token endpoint
    pub fn new(key: &ServiceAccountKey) -> SheetsResult<Self> {
        Self::with_token_uri(key, GOOGLE_TOKEN_URI)
    }

    /// Create a provider against an explicit token endpoint
    ///
    /// The private key is parsed here so a malformed key fails at startup
    /// rather than on the first webhook.
    pub fn with_token_uri(
        key: &ServiceAccountKey,
        token_uri: impl Into<String>,
    ) -> SheetsResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::InvalidKey(e.to_string()))?;

        Ok(Self {
            client_email: key.client_email.clone(),
            token_uri: token_uri.into(),
            encoding_key,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Build the signed assertion for the given issue time
    pub fn assertion(&self, issued_at: OffsetDateTime) -> SheetsResult<String> {
        let iat = issued_at.unix_timestamp();
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| SheetsError::InvalidKey(e.to_string()))
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountAuth {
    async fn access_token(&self, http: &reqwest::Client) -> SheetsResult<String> {
        let assertion = self.assertion(OffsetDateTime::now_utc())?;

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => format!("HTTP {}", status.as_u16()),
            };
            tracing::error!(
                status = status.as_u16(),
                client_email = %self.client_email,
                error = %message,
                "Service account token exchange rejected"
            );
            return Err(SheetsError::TokenExchange(message));
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(
            client_email = %self.client_email,
            expires_in = ?token.expires_in,
            "Obtained service account access token"
        );

        Ok(token.access_token)
    }
}

/// Pre-issued bearer token (local tooling, metadata-server tokens)
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self, _http: &reqwest::Client) -> SheetsResult<String> {
        Ok(self.0.clone())
    }
}
