//! Application state for the HTTP server.

use std::sync::Arc;

use crate::source::{SheetCache, SheetLocator, SheetSource};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source the sheet is fetched from
    pub source: Arc<dyn SheetSource>,
    /// Fetched copies shared by all requests
    pub cache: SheetCache,
    /// The sheet every endpoint reads
    pub locator: SheetLocator,
}

impl AppState {
    /// Create a new application state with the given source.
    pub fn new(source: Arc<dyn SheetSource>, cache: SheetCache, locator: SheetLocator) -> Self {
        Self {
            source,
            cache,
            locator,
        }
    }
}
