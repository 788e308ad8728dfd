//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All response types derive Serialize for JSON serialization.

pub use crate::models::{BatchId, CallStage, Granularity, LeadRecord, OutcomeCategory, RawTable};
pub use crate::routes::cache::RefreshResponse;
pub use crate::routes::dashboard::FiltersResponse;
pub use crate::routes::records::RecordsResponse;
pub use crate::services::aggregation::{AggregateRow, AggregateTable};
pub use crate::services::dashboard::{
    DashboardData, DashboardStatus, FilterOptions, GranularityOption, Notice, NoticeLevel,
    StageAnalysis, TimezoneBounds,
};
pub use crate::services::eda::EdaMetrics;
pub use crate::services::filtering::{BatchSelection, FilterCriteria, TimezoneRange};
pub use crate::services::views::{
    Bar, BarChart, Cell, ColorScaleRule, ScaleAxis, TableRow, TableView,
};
pub use crate::source::Snapshot;
