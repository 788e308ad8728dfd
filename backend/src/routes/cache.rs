use serde::Serialize;

use crate::source::Snapshot;

/// Outcome of a forced refetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshResponse {
    /// Data rows in the refetched sheet.
    pub rows: usize,
    pub snapshot: Snapshot,
}
