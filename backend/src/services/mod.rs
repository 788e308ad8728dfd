//! Service layer for business logic and orchestration.
//!
//! This module contains the pure computations behind the dashboard: ingestion,
//! outcome consolidation, filtering, aggregation and the render-ready views.
//! Nothing here performs I/O; the sheet is loaded by [`crate::source`].

pub mod aggregation;
pub mod consolidation;
pub mod dashboard;
pub mod eda;
pub mod filtering;
pub mod ingest;
pub mod views;

pub use aggregation::{build_stage_table, build_table, AggregateRow, AggregateTable};
pub use consolidation::{consolidate, consolidate_stage};
pub use dashboard::{
    build_dashboard, filter_options, DashboardData, DashboardStatus, FilterOptions, Notice,
    NoticeLevel, StageAnalysis,
};
pub use eda::{compute_metrics, status_counts, EdaMetrics};
pub use filtering::{apply, BatchSelection, FilterCriteria, TimezoneRange};
pub use ingest::{ingest, Dataset};
pub use views::{bar_chart, records_view, table_view, BarChart, Cell, TableView};
