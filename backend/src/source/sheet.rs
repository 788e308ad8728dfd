//! The sheet source trait and sheet addressing.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::SourceResult;
use crate::models::RawTable;

/// Address of one tab within a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetLocator {
    /// Spreadsheet URL or bare spreadsheet id.
    pub spreadsheet: String,
    /// Tab name.
    pub sheet: String,
}

impl SheetLocator {
    pub fn new(spreadsheet: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            spreadsheet: spreadsheet.into(),
            sheet: sheet.into(),
        }
    }

    /// Spreadsheet id, taken from a `/spreadsheets/d/<id>/` URL or used verbatim.
    pub fn spreadsheet_id(&self) -> &str {
        let s = self.spreadsheet.trim();
        match s.find("/spreadsheets/d/") {
            Some(pos) => {
                let rest = &s[pos + "/spreadsheets/d/".len()..];
                rest.split(['/', '?', '#']).next().unwrap_or(rest)
            }
            None => s,
        }
    }
}

impl fmt::Display for SheetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.spreadsheet_id(), self.sheet)
    }
}

/// Read-only access to spreadsheet tabs.
///
/// Implementations return the tab as a header row plus data rows; cleanup of
/// empty rows and columns is left to ingestion.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch a tab.
    async fn fetch_sheet(&self, locator: &SheetLocator) -> SourceResult<RawTable>;

    /// Short backend name, reported by the health endpoint.
    fn kind(&self) -> &'static str;
}
