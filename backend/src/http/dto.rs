//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Response payloads are re-exported from the api module since they already
//! derive Serialize.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use crate::api::{DashboardData, FiltersResponse, RecordsResponse, RefreshResponse};
use crate::models::{BatchId, Granularity};
use crate::services::filtering::{BatchSelection, FilterCriteria};

/// Query parameters shared by the dashboard and records endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardQuery {
    /// Comma-separated batch ids, e.g. `1,2,3`
    #[serde(default)]
    pub batches: Option<String>,
    /// Lower batch bound (inclusive, snapped to an existing id)
    #[serde(default)]
    pub batch_min: Option<i64>,
    /// Upper batch bound (inclusive, snapped to an existing id)
    #[serde(default)]
    pub batch_max: Option<i64>,
    /// Minimum timezone offset in hours (inclusive)
    #[serde(default)]
    pub tz_min: Option<f64>,
    /// Maximum timezone offset in hours (inclusive)
    #[serde(default)]
    pub tz_max: Option<f64>,
    /// Text matched against email and biography
    #[serde(default)]
    pub q: Option<String>,
    /// `30min` (default) or `2h`
    #[serde(default)]
    pub granularity: Option<String>,
    /// Echo the filtered rows in the dashboard response
    #[serde(default)]
    pub include_records: Option<bool>,
}

impl DashboardQuery {
    pub fn granularity(&self) -> Result<Granularity, String> {
        match self.granularity.as_deref().map(str::trim) {
            None | Some("") => Ok(Granularity::default()),
            Some(s) => s.parse(),
        }
    }

    pub fn include_records(&self) -> bool {
        self.include_records.unwrap_or(false)
    }

    fn batch_selection(&self, available: &BTreeSet<BatchId>) -> Result<BatchSelection, String> {
        match (&self.batches, self.batch_min, self.batch_max) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(
                "Use either 'batches' or 'batch_min'/'batch_max', not both".to_string(),
            ),
            (Some(list), None, None) => {
                let ids = list
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        BatchId::parse_cell(s).ok_or_else(|| format!("Invalid batch id: '{}'", s))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(BatchSelection::set(ids))
            }
            (None, None, None) => Ok(BatchSelection::All),
            (None, min, max) => {
                let min = BatchId(min.unwrap_or(i64::MIN));
                let max = BatchId(max.unwrap_or(i64::MAX));
                if min > max {
                    return Err(format!("batch_min ({}) exceeds batch_max ({})", min, max));
                }
                Ok(BatchSelection::snapped_range(min, max, available))
            }
        }
    }

    /// Build the filter, snapping a batch range onto `available` ids.
    pub fn criteria(&self, available: &BTreeSet<BatchId>) -> Result<FilterCriteria, String> {
        let mut criteria = FilterCriteria::new().with_batches(self.batch_selection(available)?);

        if self.tz_min.is_some() || self.tz_max.is_some() {
            let min = self.tz_min.unwrap_or(f64::NEG_INFINITY);
            let max = self.tz_max.unwrap_or(f64::INFINITY);
            if min.is_nan() || max.is_nan() {
                return Err("Timezone bounds must be numbers".to_string());
            }
            if min > max {
                return Err(format!("tz_min ({}) exceeds tz_max ({})", min, max));
            }
            criteria = criteria.with_timezone(min, max);
        }

        if let Some(q) = &self.q {
            criteria = criteria.with_query(q.clone());
        }
        Ok(criteria)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Kind of sheet source in use
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filtering::TimezoneRange;

    fn available() -> BTreeSet<BatchId> {
        [1, 3, 5].into_iter().map(BatchId).collect()
    }

    #[test]
    fn test_defaults() {
        let query = DashboardQuery::default();
        assert_eq!(query.granularity().unwrap(), Granularity::ThirtyMinutes);
        assert!(!query.include_records());
        assert_eq!(query.criteria(&available()).unwrap(), FilterCriteria::new());
    }

    #[test]
    fn test_batch_list() {
        let query = DashboardQuery {
            batches: Some("1, 5,".to_string()),
            ..Default::default()
        };
        let criteria = query.criteria(&available()).unwrap();
        assert_eq!(criteria.batches, BatchSelection::set([BatchId(1), BatchId(5)]));
    }

    #[test]
    fn test_invalid_batch_list() {
        let query = DashboardQuery {
            batches: Some("1,x".to_string()),
            ..Default::default()
        };
        assert!(query.criteria(&available()).unwrap_err().contains("'x'"));
    }

    #[test]
    fn test_batch_range_snaps() {
        let query = DashboardQuery {
            batch_min: Some(2),
            batch_max: Some(4),
            ..Default::default()
        };
        let criteria = query.criteria(&available()).unwrap();
        assert_eq!(
            criteria.batches,
            BatchSelection::Range {
                min: BatchId(3),
                max: BatchId(3)
            }
        );
    }

    #[test]
    fn test_half_open_batch_range() {
        let query = DashboardQuery {
            batch_min: Some(2),
            ..Default::default()
        };
        let criteria = query.criteria(&available()).unwrap();
        assert_eq!(
            criteria.batches,
            BatchSelection::Range {
                min: BatchId(3),
                max: BatchId(5)
            }
        );
    }

    #[test]
    fn test_conflicting_batch_params() {
        let query = DashboardQuery {
            batches: Some("1".to_string()),
            batch_max: Some(3),
            ..Default::default()
        };
        assert!(query.criteria(&available()).is_err());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let batches = DashboardQuery {
            batch_min: Some(5),
            batch_max: Some(1),
            ..Default::default()
        };
        assert!(batches.criteria(&available()).is_err());

        let tz = DashboardQuery {
            tz_min: Some(2.0),
            tz_max: Some(-2.0),
            ..Default::default()
        };
        assert!(tz.criteria(&available()).is_err());
    }

    #[test]
    fn test_timezone_and_query() {
        let query = DashboardQuery {
            tz_max: Some(1.5),
            q: Some("acme".to_string()),
            ..Default::default()
        };
        let criteria = query.criteria(&available()).unwrap();
        assert_eq!(
            criteria.timezone,
            Some(TimezoneRange::new(f64::NEG_INFINITY, 1.5))
        );
        assert_eq!(criteria.query.as_deref(), Some("acme"));
    }

    #[test]
    fn test_granularity_parsing() {
        let query = DashboardQuery {
            granularity: Some("2 horas".to_string()),
            ..Default::default()
        };
        assert_eq!(query.granularity().unwrap(), Granularity::TwoHours);

        let bad = DashboardQuery {
            granularity: Some("weekly".to_string()),
            ..Default::default()
        };
        assert!(bad.granularity().is_err());
    }
}
