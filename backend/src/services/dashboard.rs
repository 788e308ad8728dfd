//! Dashboard controller: one full recompute from a dataset and operator input.
//!
//! Every request rebuilds the filter, the metrics, both status charts and both
//! attendance analyses from the in-memory dataset. Missing columns degrade the
//! affected part of the page into a notice instead of failing the whole render.

use serde::Serialize;

use crate::models::{columns, BatchId, CallStage, Granularity, LeadRecord};
use crate::source::Snapshot;

use super::aggregation::build_stage_table;
use super::eda::{compute_metrics, status_counts, EdaMetrics};
use super::filtering::{apply, FilterCriteria};
use super::ingest::Dataset;
use super::views::{bar_chart, records_view, table_view, BarChart, TableView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardStatus {
    Ok,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Message shown above the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Attendance pivot for one call stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageAnalysis {
    pub stage: CallStage,
    pub title: String,
    pub granularity: Granularity,
    /// `None` when the stage has no usable rows; `message` then says why.
    pub table: Option<TableView>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub status: DashboardStatus,
    pub message: String,
    pub notices: Vec<Notice>,
    pub metrics: EdaMetrics,
    pub charts: Vec<BarChart>,
    pub analyses: Vec<StageAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<TableView>,
    pub snapshot: Option<Snapshot>,
}

impl DashboardData {
    pub fn record_count(&self) -> usize {
        self.metrics.total_leads
    }

    pub fn with_snapshot(mut self, snapshot: Option<Snapshot>) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Put `notice` ahead of the dataset notices.
    pub fn with_leading_notice(mut self, notice: Notice) -> Self {
        self.notices.insert(0, notice);
        self
    }
}

/// Granularity choice offered to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GranularityOption {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimezoneBounds {
    pub min: f64,
    pub max: f64,
}

/// Choices for the filter controls, taken from the unfiltered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Every batch id present. All are selected by default.
    pub batches: Vec<BatchId>,
    pub timezone: Option<TimezoneBounds>,
    pub granularities: Vec<GranularityOption>,
    pub default_granularity: Granularity,
}

pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions {
        batches: dataset.batch_ids().into_iter().collect(),
        timezone: dataset
            .timezone_bounds()
            .map(|(min, max)| TimezoneBounds { min, max }),
        granularities: Granularity::ALL
            .iter()
            .map(|g| GranularityOption {
                key: g.key(),
                label: g.label(),
            })
            .collect(),
        default_granularity: Granularity::default(),
    }
}

/// Notices about the sheet layout that hold whatever the filters are.
fn dataset_notices(dataset: &Dataset) -> Vec<Notice> {
    let mut notices = Vec::new();
    if !dataset.has_column(columns::TIMEZONE_OFFSET) && !dataset.columns.is_empty() {
        notices.push(Notice::warning(format!(
            "Column '{}' not found; the timezone filter is disabled.",
            columns::TIMEZONE_OFFSET
        )));
    }
    for stage in CallStage::ALL {
        let column = stage.outcome_column();
        if !dataset.has_column(column) && !dataset.columns.is_empty() {
            notices.push(Notice::warning(format!(
                "Column '{}' not found; the {} analysis is unavailable.",
                column,
                stage.title()
            )));
        }
    }
    if dataset.invalid_timezone_cells > 0 {
        notices.push(Notice::warning(format!(
            "{} timezone values were not numeric and were treated as missing.",
            dataset.invalid_timezone_cells
        )));
    }
    notices
}

fn analysis(
    dataset: &Dataset,
    filtered: &[LeadRecord],
    stage: CallStage,
    granularity: Granularity,
    position: usize,
) -> StageAnalysis {
    let block_column = granularity.block_column(stage);
    let title = format!(
        "Analysis {}: {} blocks vs. status ({})",
        position,
        granularity.label(),
        stage.title()
    );

    let (table, message) = if !dataset.has_column(block_column) {
        (
            None,
            Some(format!(
                "Column '{}' not found in the sheet; Analysis {} cannot be computed.",
                block_column, position
            )),
        )
    } else {
        let table = build_stage_table(filtered, stage, granularity);
        if table.is_empty() {
            (
                None,
                Some(format!(
                    "Not enough data for Analysis {} with the current filters.",
                    position
                )),
            )
        } else {
            (Some(table_view(&table)), None)
        }
    };

    StageAnalysis {
        stage,
        title,
        granularity,
        table,
        message,
    }
}

/// Recompute the dashboard for `criteria` at `granularity`.
///
/// The timezone predicate is dropped when the sheet has no timezone column.
pub fn build_dashboard(
    dataset: &Dataset,
    criteria: &FilterCriteria,
    granularity: Granularity,
    include_records: bool,
) -> DashboardData {
    let mut criteria = criteria.clone();
    if !dataset.has_column(columns::TIMEZONE_OFFSET) {
        criteria.timezone = None;
    }

    let filtered = apply(&dataset.records, &criteria);
    let notices = dataset_notices(dataset);
    let metrics = compute_metrics(&filtered);

    let (status, message) = if filtered.is_empty() {
        (
            DashboardStatus::Empty,
            "No records match the selected filters.".to_string(),
        )
    } else {
        (
            DashboardStatus::Ok,
            format!(
                "Showing {} records after applying the filters.",
                filtered.len()
            ),
        )
    };

    let charts = CallStage::ALL
        .iter()
        .map(|stage| {
            bar_chart(
                format!("Status distribution ({})", stage.title()),
                &status_counts(&filtered, *stage),
            )
        })
        .collect();

    let analyses = CallStage::ALL
        .iter()
        .enumerate()
        .map(|(i, stage)| analysis(dataset, &filtered, *stage, granularity, i + 1))
        .collect();

    let records = include_records.then(|| records_view(&dataset.columns, &filtered));

    DashboardData {
        status,
        message,
        notices,
        metrics,
        charts,
        analyses,
        records,
        snapshot: None,
    }
}
