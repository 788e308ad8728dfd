//! Time-boxed in-memory cache of fetched sheets.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::checksum::table_checksum;
use super::error::SourceResult;
use super::sheet::{SheetLocator, SheetSource};
use crate::models::RawTable;

/// Default freshness window, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 600;

/// Provenance of the table a response was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub checksum: String,
    pub fetched_at: DateTime<Utc>,
    /// Served from the cache rather than fetched for this request.
    pub cached: bool,
}

#[derive(Debug, Clone)]
pub struct CachedSheet {
    pub table: Arc<RawTable>,
    pub snapshot: Snapshot,
}

struct Entry {
    stored_at: Instant,
    sheet: CachedSheet,
}

/// Sheet cache keyed by locator.
///
/// Failed fetches are never stored.
#[derive(Clone)]
pub struct SheetCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<SheetLocator, Entry>>>,
}

impl SheetCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached copy of `locator` if still within the freshness window.
    pub fn get_fresh(&self, locator: &SheetLocator) -> Option<CachedSheet> {
        let entries = self.entries.read();
        let entry = entries.get(locator)?;
        if entry.stored_at.elapsed() < self.ttl {
            let mut sheet = entry.sheet.clone();
            sheet.snapshot.cached = true;
            Some(sheet)
        } else {
            None
        }
    }

    pub fn insert(&self, locator: SheetLocator, table: RawTable) -> CachedSheet {
        let sheet = CachedSheet {
            snapshot: Snapshot {
                checksum: table_checksum(&table),
                fetched_at: Utc::now(),
                cached: false,
            },
            table: Arc::new(table),
        };
        self.entries.write().insert(
            locator,
            Entry {
                stored_at: Instant::now(),
                sheet: sheet.clone(),
            },
        );
        sheet
    }

    pub fn invalidate(&self, locator: &SheetLocator) {
        if self.entries.write().remove(locator).is_some() {
            info!("Invalidated cached sheet {}", locator);
        }
    }

    /// Serve `locator` from the cache, fetching from `source` on a miss.
    pub async fn get_or_fetch(
        &self,
        source: &dyn SheetSource,
        locator: &SheetLocator,
    ) -> SourceResult<CachedSheet> {
        if let Some(sheet) = self.get_fresh(locator) {
            debug!("Cache hit for sheet {}", locator);
            return Ok(sheet);
        }
        debug!("Cache miss for sheet {}", locator);
        let table = source.fetch_sheet(locator).await?;
        Ok(self.insert(locator.clone(), table))
    }
}

impl Default for SheetCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::sources::LocalSheetSource;

    fn locator() -> SheetLocator {
        SheetLocator::new("local", "Sheet1")
    }

    fn source() -> LocalSheetSource {
        LocalSheetSource::with_sheet(
            locator(),
            RawTable::new(vec!["a".to_string()], vec![vec!["1".to_string()]]),
        )
    }

    #[tokio::test]
    async fn test_serves_fresh_copy_without_refetch() {
        let src = source();
        let cache = SheetCache::new(Duration::from_secs(60));

        let first = cache.get_or_fetch(&src, &locator()).await.unwrap();
        let second = cache.get_or_fetch(&src, &locator()).await.unwrap();

        assert_eq!(src.fetch_count(), 1);
        assert!(!first.snapshot.cached);
        assert!(second.snapshot.cached);
        assert_eq!(first.snapshot.checksum, second.snapshot.checksum);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let src = source();
        let cache = SheetCache::new(Duration::ZERO);

        cache.get_or_fetch(&src, &locator()).await.unwrap();
        cache.get_or_fetch(&src, &locator()).await.unwrap();
        assert_eq!(src.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let src = LocalSheetSource::new();
        let cache = SheetCache::new(Duration::from_secs(60));

        assert!(cache.get_or_fetch(&src, &locator()).await.is_err());
        assert!(cache.get_fresh(&locator()).is_none());

        src.insert_sheet(locator(), RawTable::default());
        assert!(cache.get_or_fetch(&src, &locator()).await.is_ok());
        assert_eq!(src.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let src = source();
        let cache = SheetCache::default();
        cache.get_or_fetch(&src, &locator()).await.unwrap();
        cache.invalidate(&locator());
        cache.get_or_fetch(&src, &locator()).await.unwrap();
        assert_eq!(src.fetch_count(), 2);
    }
}
