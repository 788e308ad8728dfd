//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. The sheet is read through the shared cache
//! on every request, then ingested and recomputed from scratch.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::{info, warn};

use super::dto::{
    DashboardData, DashboardQuery, FiltersResponse, HealthResponse, RecordsResponse,
    RefreshResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::Granularity;
use crate::services::dashboard::{build_dashboard, filter_options, Notice};
use crate::services::filtering::{apply, FilterCriteria};
use crate::services::ingest::{ingest, Dataset};
use crate::source::{load_sheet, SheetLoad};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Load the configured sheet through the cache and ingest it.
async fn load_dataset(state: &AppState) -> (Dataset, SheetLoad) {
    let load = load_sheet(state.source.as_ref(), &state.cache, &state.locator).await;
    let dataset = ingest(load.table.as_ref().clone());
    (dataset, load)
}

fn source_notice(load: &SheetLoad) -> Option<Notice> {
    load.error.as_ref().map(Notice::error)
}

fn parse_query(
    query: Result<Query<DashboardQuery>, QueryRejection>,
    dataset: &Dataset,
) -> Result<(FilterCriteria, Granularity, bool), AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let criteria = query
        .criteria(&dataset.batch_ids())
        .map_err(AppError::BadRequest)?;
    let granularity = query.granularity().map_err(AppError::BadRequest)?;
    Ok((criteria, granularity, query.include_records()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.kind().to_string(),
    }))
}

// =============================================================================
// Dashboard Endpoints
// =============================================================================

/// GET /v1/filters
///
/// Batch ids, timezone bounds and granularity choices for the filter controls.
pub async fn get_filters(State(state): State<AppState>) -> HandlerResult<FiltersResponse> {
    let (dataset, load) = load_dataset(&state).await;

    Ok(Json(FiltersResponse {
        options: filter_options(&dataset),
        notices: source_notice(&load).into_iter().collect(),
        snapshot: load.snapshot,
    }))
}

/// GET /v1/dashboard
///
/// Metrics, status charts and both attendance analyses for the given filters.
pub async fn get_dashboard(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> HandlerResult<DashboardData> {
    let (dataset, load) = load_dataset(&state).await;
    let (criteria, granularity, include_records) = parse_query(query, &dataset)?;

    let mut data = build_dashboard(&dataset, &criteria, granularity, include_records)
        .with_snapshot(load.snapshot.clone());
    if let Some(notice) = source_notice(&load) {
        data = data.with_leading_notice(notice);
    }

    info!(
        "Dashboard computed: {} of {} records, granularity {}",
        data.record_count(),
        dataset.records.len(),
        granularity
    );
    Ok(Json(data))
}

/// GET /v1/records
///
/// Filtered lead rows.
pub async fn get_records(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> HandlerResult<RecordsResponse> {
    let (dataset, load) = load_dataset(&state).await;
    let (criteria, _, _) = parse_query(query, &dataset)?;

    let records = apply(&dataset.records, &criteria);
    Ok(Json(
        RecordsResponse::new(dataset.columns, records).with_notices(source_notice(&load)),
    ))
}

/// POST /v1/cache/refresh
///
/// Drop the cached copy of the sheet and fetch it again.
pub async fn refresh_cache(State(state): State<AppState>) -> HandlerResult<RefreshResponse> {
    state.cache.invalidate(&state.locator);

    let sheet = state
        .cache
        .get_or_fetch(state.source.as_ref(), &state.locator)
        .await
        .map_err(|e| {
            warn!("Cache refresh failed for {}: {}", state.locator, e);
            AppError::from(e)
        })?;

    info!(
        "Cache refreshed for {} (checksum {})",
        state.locator, sheet.snapshot.checksum
    );
    Ok(Json(RefreshResponse {
        rows: sheet.table.len(),
        snapshot: sheet.snapshot,
    }))
}

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("No such endpoint".to_string())
}
