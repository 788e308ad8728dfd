//! Exploratory summary over the filtered records.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{CallStage, LeadRecord};

/// Headline metrics shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaMetrics {
    pub total_leads: usize,
    pub unique_batches: usize,
    /// Mean over present offsets, `None` when there are none.
    pub mean_timezone_offset: Option<f64>,
}

pub fn compute_metrics(records: &[LeadRecord]) -> EdaMetrics {
    let unique_batches = records
        .iter()
        .filter_map(|r| r.batch_id)
        .collect::<BTreeSet<_>>()
        .len();

    let offsets: Vec<f64> = records.iter().filter_map(|r| r.timezone_offset).collect();
    let mean_timezone_offset = if offsets.is_empty() {
        None
    } else {
        Some(offsets.iter().sum::<f64>() / offsets.len() as f64)
    };

    EdaMetrics {
        total_leads: records.len(),
        unique_batches,
        mean_timezone_offset,
    }
}

/// Count of each raw outcome label for a stage, most frequent first.
///
/// Ties are ordered by label. Empty labels are skipped.
pub fn status_counts(records: &[LeadRecord], stage: CallStage) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for label in records
        .iter()
        .filter_map(|r| r.outcome(stage))
        .filter(|l| !l.is_empty())
    {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut out: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
