//! # Attendance Dashboard Backend
//!
//! Lead attendance analysis over a shared spreadsheet.
//!
//! This crate loads the lead-tracking sheet, normalizes call outcomes into a
//! two-valued attendance category, filters leads by batch, timezone offset and
//! free text, and pivots time-of-day blocks against call outcomes with show-up
//! and no-show rates. The results are exposed as JSON via Axum.
//!
//! ## Features
//!
//! - **Sheet Loading**: Google Sheets API v4 or local JSON grids, behind a TTL cache
//! - **Ingestion**: Header cleanup, empty row and column removal, typed lead records
//! - **Filtering**: Batch set or range, closed timezone interval, email/biography search
//! - **Analysis**: Per-stage block vs. outcome tables with a `Grand Total` row
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`source`]: Sheet sources, configuration, caching and snapshots
//! - [`models`]: Lead records, call stages, granularity and the raw table
//! - [`services`]: Consolidation, filtering, aggregation and views
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types
//!

// SourceError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod models;
pub mod source;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
