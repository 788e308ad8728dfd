//! Dashboard configuration file support.
//!
//! This module reads the sheet locator, source type and cache settings from a
//! TOML file, falling back to built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::cache::DEFAULT_TTL_SECS;
use super::error::SourceError;
use super::factory::SourceType;
use super::sheet::SheetLocator;

/// Spreadsheet the dashboard reads from when no configuration overrides it.
pub const DEFAULT_SPREADSHEET: &str =
    "https://docs.google.com/spreadsheets/d/1PykSb5ZNTmtbv8oIrCAiJIGdBZ1PyYgwFU4U9p9YBU/edit?gid=0#gid=0";
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Dashboard configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Sheet source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// `gsheets` or `local`; when absent the type is taken from the environment.
    #[serde(rename = "type", default)]
    pub source_type: Option<String>,
    #[serde(default = "default_locator")]
    pub locator: String,
    #[serde(default = "default_sheet")]
    pub sheet: String,
    /// JSON grid file served by the local source.
    #[serde(default)]
    pub local_path: Option<PathBuf>,
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_locator() -> String {
    DEFAULT_SPREADSHEET.to_string()
}

fn default_sheet() -> String {
    DEFAULT_SHEET.to_string()
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: None,
            locator: default_locator(),
            sheet: default_sheet(),
            local_path: None,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl DashboardConfig {
    /// Load dashboard configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` if successful
    /// * `Err(SourceError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SourceError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            SourceError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        // Relative local paths are relative to the file that names them.
        let resolved = match (&config.source.local_path, path.as_ref().parent()) {
            (Some(local), Some(dir)) if local.is_relative() => Some(dir.join(local)),
            _ => None,
        };
        if resolved.is_some() {
            config.source.local_path = resolved;
        }
        Ok(config)
    }

    /// Load dashboard configuration from the default location.
    ///
    /// Searches for `dashboard.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, SourceError> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(SourceError::configuration(
            "No dashboard.toml found in standard locations",
        ))
    }

    /// Resolve configuration: `DASHBOARD_CONFIG` if set, else the default
    /// location, else built-in defaults.
    pub fn load() -> Result<Self, SourceError> {
        if let Ok(path) = std::env::var("DASHBOARD_CONFIG") {
            return Self::from_file(path);
        }
        match Self::from_default_location() {
            Ok(config) => Ok(config),
            Err(SourceError::ConfigurationError { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn locator(&self) -> SheetLocator {
        SheetLocator::new(self.source.locator.clone(), self.source.sheet.clone())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// Source type from the file, or from the environment when unset.
    pub fn source_type(&self) -> Result<SourceType, String> {
        match &self.source.source_type {
            Some(s) => SourceType::from_str(s),
            None => Ok(SourceType::from_env()),
        }
    }
}
