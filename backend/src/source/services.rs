//! High-level sheet loading used by the dashboard.
//!
//! Source failures never propagate from here: they become an empty table plus an
//! operator-facing message, so the dashboard keeps rendering.

use std::sync::Arc;

use log::warn;

use super::cache::{SheetCache, Snapshot};
use super::sheet::{SheetLocator, SheetSource};
use crate::models::RawTable;

/// Result of loading the configured sheet.
#[derive(Debug, Clone)]
pub struct SheetLoad {
    pub table: Arc<RawTable>,
    /// `None` when the fetch failed.
    pub snapshot: Option<Snapshot>,
    /// Message to show to the operator when the fetch failed.
    pub error: Option<String>,
}

impl SheetLoad {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Load `locator` through the cache, mapping failures to an empty table.
pub async fn load_sheet(
    source: &dyn SheetSource,
    cache: &SheetCache,
    locator: &SheetLocator,
) -> SheetLoad {
    match cache.get_or_fetch(source, locator).await {
        Ok(sheet) => SheetLoad {
            table: sheet.table,
            snapshot: Some(sheet.snapshot),
            error: None,
        },
        Err(e) => {
            warn!("Failed to load sheet {}: {}", locator, e);
            SheetLoad {
                table: Arc::new(RawTable::default()),
                snapshot: None,
                error: Some(format!(
                    "Error loading data from the spreadsheet: {}",
                    e.message()
                )),
            }
        }
    }
}
