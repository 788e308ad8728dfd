//! Source factory for dependency injection.
//!
//! This module creates sheet source instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::config::DashboardConfig;
use super::error::{SourceError, SourceResult};
#[cfg(feature = "gsheets-source")]
use super::sources::{GoogleSheetsConfig, GoogleSheetsSource};
#[cfg(feature = "local-source")]
use super::sources::LocalSheetSource;
use super::sheet::SheetSource;

/// Sheet source type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Google Sheets API
    GoogleSheets,
    /// In-memory local source
    Local,
}

impl FromStr for SourceType {
    type Err = String;

    /// Parse source type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("gsheets", "google", "sheets", "local")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gsheets" | "google" | "sheets" => Ok(Self::GoogleSheets),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

impl SourceType {
    /// Get source type from environment variable.
    ///
    /// Reads `SOURCE_TYPE`. Defaults to Google Sheets when credentials are present,
    /// otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("SOURCE_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if ["GOOGLE_ACCESS_TOKEN", "GOOGLE_API_KEY"]
            .iter()
            .any(|k| std::env::var(k).map(|v| !v.is_empty()).unwrap_or(false))
        {
            Self::GoogleSheets
        } else {
            Self::Local
        }
    }
}

/// Factory for creating sheet source instances.
pub struct SourceFactory;

impl SourceFactory {
    /// Create the source selected by `config`.
    pub fn create(config: &DashboardConfig) -> SourceResult<Arc<dyn SheetSource>> {
        let source_type = config.source_type().map_err(SourceError::configuration)?;
        info!("Creating {:?} sheet source", source_type);
        match source_type {
            SourceType::GoogleSheets => Self::create_google(),
            SourceType::Local => Self::create_local(config),
        }
    }

    /// Local source, seeded from `source.local_path` when configured.
    #[cfg(feature = "local-source")]
    pub fn create_local(config: &DashboardConfig) -> SourceResult<Arc<dyn SheetSource>> {
        let source = match &config.source.local_path {
            Some(path) => LocalSheetSource::from_json_file(path, config.locator())?,
            None => LocalSheetSource::new(),
        };
        Ok(Arc::new(source))
    }

    #[cfg(not(feature = "local-source"))]
    pub fn create_local(_config: &DashboardConfig) -> SourceResult<Arc<dyn SheetSource>> {
        Err(SourceError::configuration("Local source feature not enabled"))
    }

    #[cfg(feature = "gsheets-source")]
    pub fn create_google() -> SourceResult<Arc<dyn SheetSource>> {
        let config = GoogleSheetsConfig::from_env().map_err(SourceError::configuration)?;
        Ok(Arc::new(GoogleSheetsSource::new(config)?))
    }

    #[cfg(not(feature = "gsheets-source"))]
    pub fn create_google() -> SourceResult<Arc<dyn SheetSource>> {
        Err(SourceError::configuration(
            "Google Sheets source feature not enabled",
        ))
    }
}
