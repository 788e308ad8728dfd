//! Pivot of time blocks against call outcomes.
//!
//! [`build_table`] counts raw outcome labels per time block, then derives totals,
//! the no-show / showed-up split, the two attendance percentages and each row's
//! weight in the table. A synthetic `Grand Total` row is appended whose
//! percentages are recomputed from its own sums.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{CallStage, Granularity, LeadRecord};

pub const GRAND_TOTAL: &str = "Grand Total";
pub const NO_SHOW: &str = "No Show";
pub const SHOWED_UP: &str = "Showed Up";
pub const SHOWED_UP_PCT: &str = "Showed Up %";
pub const NO_SHOW_PCT: &str = "No Show %";
pub const WEIGHT_PCT: &str = "Weight %";

/// Derived columns, in display order, following the raw outcome columns.
pub const DERIVED_COLUMNS: [&str; 6] = [
    GRAND_TOTAL,
    NO_SHOW,
    SHOWED_UP,
    SHOWED_UP_PCT,
    NO_SHOW_PCT,
    WEIGHT_PCT,
];

/// One pivot row. `counts` is aligned with [`AggregateTable::outcome_labels`].
///
/// Percentages are NaN when their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub label: String,
    pub counts: Vec<u64>,
    pub grand_total: u64,
    pub no_show: u64,
    pub showed_up: u64,
    pub showed_up_pct: f64,
    pub no_show_pct: f64,
    pub weight_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    pub block_column: String,
    pub outcome_column: String,
    pub outcome_labels: Vec<String>,
    pub rows: Vec<AggregateRow>,
    pub total: AggregateRow,
}

impl AggregateTable {
    /// No record contributed to the table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display names of the raw outcome columns.
    ///
    /// A label equal to a derived column name gets a ` (raw)` suffix.
    pub fn outcome_column_names(&self) -> Vec<String> {
        self.outcome_labels
            .iter()
            .map(|label| {
                if DERIVED_COLUMNS.contains(&label.as_str()) {
                    format!("{} (raw)", label)
                } else {
                    label.clone()
                }
            })
            .collect()
    }

    /// Raw outcome columns followed by the derived columns.
    pub fn column_names(&self) -> Vec<String> {
        self.outcome_column_names()
            .into_iter()
            .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }

    /// Data rows followed by the terminal `Grand Total` row.
    pub fn all_rows(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().chain(std::iter::once(&self.total))
    }
}

fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        100.0 * numerator as f64 / denominator as f64
    }
}

fn derive_row(label: String, counts: Vec<u64>, no_show: u64, table_total: u64) -> AggregateRow {
    let grand_total: u64 = counts.iter().sum();
    let showed_up = grand_total - no_show;
    AggregateRow {
        label,
        counts,
        grand_total,
        no_show,
        showed_up,
        showed_up_pct: percent(showed_up, grand_total),
        no_show_pct: percent(no_show, grand_total),
        weight_pct: percent(grand_total, table_total),
    }
}

/// Build the pivot of `block_column` against `outcome_column`.
///
/// Records with an absent or empty value in either column are dropped before
/// counting. Rows and outcome columns are sorted ascending.
pub fn build_table(
    records: &[LeadRecord],
    block_column: &str,
    outcome_column: &str,
    no_show_literals: &[&str],
) -> AggregateTable {
    let mut counts: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
    let mut labels: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        let (Some(block), Some(outcome)) =
            (record.field(block_column), record.field(outcome_column))
        else {
            continue;
        };
        labels.insert(outcome);
        *counts.entry(block).or_default().entry(outcome).or_insert(0) += 1;
    }

    let outcome_labels: Vec<&str> = labels.into_iter().collect();
    let is_no_show: Vec<bool> = outcome_labels
        .iter()
        .map(|l| no_show_literals.contains(l))
        .collect();
    let table_total: u64 = counts.values().flat_map(|m| m.values()).sum();

    let mut column_sums = vec![0u64; outcome_labels.len()];
    let mut no_show_sum = 0u64;
    let rows: Vec<AggregateRow> = counts
        .into_iter()
        .map(|(block, by_outcome)| {
            let row_counts: Vec<u64> = outcome_labels
                .iter()
                .map(|l| by_outcome.get(l).copied().unwrap_or(0))
                .collect();
            let no_show: u64 = row_counts
                .iter()
                .zip(&is_no_show)
                .filter(|(_, flag)| **flag)
                .map(|(c, _)| *c)
                .sum();
            for (sum, c) in column_sums.iter_mut().zip(&row_counts) {
                *sum += c;
            }
            no_show_sum += no_show;
            derive_row(block.to_string(), row_counts, no_show, table_total)
        })
        .collect();

    let total = derive_row(GRAND_TOTAL.to_string(), column_sums, no_show_sum, table_total);

    AggregateTable {
        block_column: block_column.to_string(),
        outcome_column: outcome_column.to_string(),
        outcome_labels: outcome_labels.into_iter().map(str::to_string).collect(),
        rows,
        total,
    }
}

/// Build the table for one call stage at the given granularity.
pub fn build_stage_table(
    records: &[LeadRecord],
    stage: CallStage,
    granularity: Granularity,
) -> AggregateTable {
    build_table(
        records,
        granularity.block_column(stage),
        stage.outcome_column(),
        stage.no_show_literals(),
    )
}

#[cfg(test)]
#[path = "aggregation_tests.rs"]
mod aggregation_tests;
