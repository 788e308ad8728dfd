//! Google Sheets API v4 source.
//!
//! Reads `GET {api_base}/v4/spreadsheets/{id}/values/{sheet}` with formatted
//! values. Authentication is delegated to credentials provided by the environment:
//! either an OAuth access token or an API key.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::models::RawTable;
use crate::source::error::{ErrorContext, SourceError, SourceResult};
use crate::source::sheet::{SheetLocator, SheetSource};

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Credentials sent with each request.
#[derive(Clone)]
pub enum GoogleCredentials {
    /// OAuth 2.0 bearer token (e.g., minted for a service account).
    AccessToken(String),
    /// API key, for sheets shared by link.
    ApiKey(String),
}

impl std::fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoogleCredentials::AccessToken(_) => f.write_str("AccessToken(***)"),
            GoogleCredentials::ApiKey(_) => f.write_str("ApiKey(***)"),
        }
    }
}

/// Google Sheets connection settings.
#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    pub credentials: GoogleCredentials,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl GoogleSheetsConfig {
    pub fn new(credentials: GoogleCredentials) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 20,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `GOOGLE_ACCESS_TOKEN`: OAuth bearer token (preferred when both are set)
    /// - `GOOGLE_API_KEY`: API key
    /// - `GOOGLE_SHEETS_API_BASE` (optional): API root, default `https://sheets.googleapis.com`
    /// - `GOOGLE_SHEETS_TIMEOUT_SECS` (optional, default: 20)
    ///
    /// # Errors
    /// Returns an error if neither credential is set.
    pub fn from_env() -> Result<Self, String> {
        let credentials = match (env::var("GOOGLE_ACCESS_TOKEN"), env::var("GOOGLE_API_KEY")) {
            (Ok(token), _) if !token.is_empty() => GoogleCredentials::AccessToken(token),
            (_, Ok(key)) if !key.is_empty() => GoogleCredentials::ApiKey(key),
            _ => {
                return Err(
                    "GOOGLE_ACCESS_TOKEN or GOOGLE_API_KEY environment variable not set"
                        .to_string(),
                )
            }
        };
        let api_base =
            env::var("GOOGLE_SHEETS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let timeout_secs = env::var("GOOGLE_SHEETS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        Ok(Self {
            credentials,
            api_base,
            timeout_secs,
        })
    }
}

/// Body of a `values.get` response.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sheet source reading from the Google Sheets API.
pub struct GoogleSheetsSource {
    client: reqwest::Client,
    config: GoogleSheetsConfig,
}

impl GoogleSheetsSource {
    pub fn new(config: GoogleSheetsConfig) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// URL of the values endpoint for `locator`, with path segments escaped.
    pub fn values_url(&self, locator: &SheetLocator) -> SourceResult<Url> {
        let mut url = Url::parse(&self.config.api_base).map_err(|e| {
            SourceError::configuration(format!(
                "Invalid API base '{}': {}",
                self.config.api_base, e
            ))
        })?;
        url.path_segments_mut()
            .map_err(|_| SourceError::configuration("API base cannot be a base URL"))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                locator.spreadsheet_id(),
                "values",
                locator.sheet.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "FORMATTED_VALUE");
        if let GoogleCredentials::ApiKey(key) = &self.config.credentials {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

fn context(locator: &SheetLocator) -> ErrorContext {
    ErrorContext::new("fetch_sheet")
        .with_entity("sheet")
        .with_entity_id(locator)
}

/// Map a non-success status to the error taxonomy.
fn status_error(status: StatusCode, body: &str, locator: &SheetLocator) -> SourceError {
    let ctx = context(locator).with_details(body.trim().chars().take(300).collect::<String>());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SourceError::auth_with_context(
            format!("Google Sheets rejected the credentials ({})", status),
            ctx,
        ),
        StatusCode::NOT_FOUND => SourceError::not_found_with_context(
            format!("Spreadsheet or tab '{}' not found", locator.sheet),
            ctx,
        ),
        s if s.is_server_error() => SourceError::connection_with_context(
            format!("Google Sheets unavailable ({})", status),
            ctx,
        ),
        _ => SourceError::validation_with_context(
            format!("Google Sheets request failed ({})", status),
            ctx,
        ),
    }
}

/// Convert a `values.get` body into a table.
pub fn parse_value_range(body: &str) -> SourceResult<RawTable> {
    let range: ValueRange = serde_json::from_str(body)
        .map_err(|e| SourceError::validation(format!("Malformed values response: {}", e)))?;
    Ok(RawTable::from_grid(
        range
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect(),
    ))
}

#[async_trait]
impl SheetSource for GoogleSheetsSource {
    async fn fetch_sheet(&self, locator: &SheetLocator) -> SourceResult<RawTable> {
        let url = self.values_url(locator)?;
        debug!("Fetching sheet {}", locator);

        let mut request = self.client.get(url);
        if let GoogleCredentials::AccessToken(token) = &self.config.credentials {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            SourceError::connection_with_context(
                format!("Failed to reach Google Sheets: {}", e),
                context(locator),
            )
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SourceError::connection_with_context(
                format!("Failed to read Google Sheets response: {}", e),
                context(locator),
            )
        })?;

        if !status.is_success() {
            return Err(status_error(status, &body, locator));
        }

        let table = parse_value_range(&body).map_err(|e| e.with_operation("fetch_sheet"))?;
        info!("Fetched sheet {} ({} rows)", locator, table.len());
        Ok(table)
    }

    fn kind(&self) -> &'static str {
        "gsheets"
    }
}
