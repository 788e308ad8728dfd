//! In-memory sheet source for tests and local development.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use serde_json::Value;

use crate::models::RawTable;
use crate::source::error::{ErrorContext, SourceError, SourceResult};
use crate::source::sheet::{SheetLocator, SheetSource};

/// Sheet source backed by a map of tables.
#[derive(Default)]
pub struct LocalSheetSource {
    sheets: RwLock<HashMap<SheetLocator, RawTable>>,
    fetches: AtomicUsize,
}

impl LocalSheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source holding a single tab.
    pub fn with_sheet(locator: SheetLocator, table: RawTable) -> Self {
        let source = Self::new();
        source.insert_sheet(locator, table);
        source
    }

    /// Load a tab from a JSON grid file: `[["header", ...], [cell, ...], ...]`.
    ///
    /// Numbers and booleans become their text form, `null` becomes an empty cell.
    pub fn from_json_file<P: AsRef<Path>>(path: P, locator: SheetLocator) -> SourceResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SourceError::configuration(format!(
                "Failed to read local sheet {}: {}",
                path.display(),
                e
            ))
        })?;
        let table = parse_json_grid(&content)?;
        debug!(
            "Loaded local sheet {} with {} rows from {}",
            locator,
            table.len(),
            path.display()
        );
        Ok(Self::with_sheet(locator, table))
    }

    pub fn insert_sheet(&self, locator: SheetLocator, table: RawTable) {
        self.sheets.write().insert(locator, table);
    }

    /// Number of fetches served or attempted.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a JSON grid into a table whose first row is the header.
pub fn parse_json_grid(content: &str) -> SourceResult<RawTable> {
    let grid: Vec<Vec<Value>> = serde_json::from_str(content).map_err(|e| {
        SourceError::validation_with_context(
            format!("Invalid sheet grid: {}", e),
            ErrorContext::new("parse_json_grid").with_entity("sheet"),
        )
    })?;
    Ok(RawTable::from_grid(
        grid.iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect(),
    ))
}

#[async_trait]
impl SheetSource for LocalSheetSource {
    async fn fetch_sheet(&self, locator: &SheetLocator) -> SourceResult<RawTable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.sheets.read().get(locator).cloned().ok_or_else(|| {
            SourceError::not_found_with_context(
                format!("Sheet '{}' not found", locator.sheet),
                ErrorContext::new("fetch_sheet")
                    .with_entity("sheet")
                    .with_entity_id(locator),
            )
        })
    }

    fn kind(&self) -> &'static str {
        "local"
    }
}
