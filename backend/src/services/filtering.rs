//! Row filter over lead records.
//!
//! A [`FilterCriteria`] is rebuilt from operator input on every request. Each
//! predicate is a no-op when its criterion is unset, and the predicates are
//! combined with logical AND.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{BatchId, LeadRecord};

/// Accepted batches.
///
/// An empty `Set` is treated like `All`: no batch selection means no batch filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BatchSelection {
    #[default]
    All,
    Set { ids: BTreeSet<BatchId> },
    Range { min: BatchId, max: BatchId },
}

impl BatchSelection {
    pub fn set<I: IntoIterator<Item = BatchId>>(ids: I) -> Self {
        BatchSelection::Set {
            ids: ids.into_iter().collect(),
        }
    }

    /// Inclusive range with both bounds snapped onto existing batch ids.
    ///
    /// The lower bound moves up to the smallest available id `>= min`, the upper bound
    /// down to the largest available id `<= max`. If no available id falls inside, the
    /// requested bounds are kept as given.
    pub fn snapped_range(min: BatchId, max: BatchId, available: &BTreeSet<BatchId>) -> Self {
        let lo = available.range(min..).next().copied();
        let hi = available.range(..=max).next_back().copied();
        match (lo, hi) {
            (Some(lo), Some(hi)) if lo <= hi => BatchSelection::Range { min: lo, max: hi },
            _ => BatchSelection::Range { min, max },
        }
    }

    fn is_noop(&self) -> bool {
        match self {
            BatchSelection::All => true,
            BatchSelection::Set { ids } => ids.is_empty(),
            BatchSelection::Range { .. } => false,
        }
    }

    fn accepts(&self, batch_id: Option<BatchId>) -> bool {
        if self.is_noop() {
            return true;
        }
        let Some(id) = batch_id else {
            return false;
        };
        match self {
            BatchSelection::All => true,
            BatchSelection::Set { ids } => ids.contains(&id),
            BatchSelection::Range { min, max } => *min <= id && id <= *max,
        }
    }
}

/// Closed interval of timezone offsets, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimezoneRange {
    pub min: f64,
    pub max: f64,
}

impl TimezoneRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Absent offsets are always inside.
    pub fn contains(&self, offset: Option<f64>) -> bool {
        match offset {
            Some(v) => self.min <= v && v <= self.max,
            None => true,
        }
    }
}

/// Operator-supplied filter constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub batches: BatchSelection,
    #[serde(default)]
    pub timezone: Option<TimezoneRange>,
    /// Case-insensitive substring matched against email or biography.
    #[serde(default)]
    pub query: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batches(mut self, batches: BatchSelection) -> Self {
        self.batches = batches;
        self
    }

    pub fn with_timezone(mut self, min: f64, max: f64) -> Self {
        self.timezone = Some(TimezoneRange::new(min, max));
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    fn normalized_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, record: &LeadRecord) -> bool {
        self.matches_with_query(record, self.normalized_query().as_deref())
    }

    fn matches_with_query(&self, record: &LeadRecord, query: Option<&str>) -> bool {
        if !self.batches.accepts(record.batch_id) {
            return false;
        }
        if let Some(range) = &self.timezone {
            if !range.contains(record.timezone_offset) {
                return false;
            }
        }
        if let Some(q) = query {
            return text_contains(record.email.as_deref(), q)
                || text_contains(record.biography.as_deref(), q);
        }
        true
    }
}

fn text_contains(field: Option<&str>, lowered_query: &str) -> bool {
    field.unwrap_or("").to_lowercase().contains(lowered_query)
}

/// Apply `criteria` to `records`, preserving input order.
pub fn apply(records: &[LeadRecord], criteria: &FilterCriteria) -> Vec<LeadRecord> {
    let query = criteria.normalized_query();
    records
        .iter()
        .filter(|r| criteria.matches_with_query(r, query.as_deref()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "filtering_tests.rs"]
mod filtering_tests;
