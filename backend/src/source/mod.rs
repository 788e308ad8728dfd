//! Sheet source module: where lead rows come from.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Dashboard (services::dashboard, HTTP handlers)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Loading (services.rs) - failures become empty tables   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  SheetCache (cache.rs) - time-boxed copies per locator  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  SheetSource trait (sheet.rs)                           │
//! │  - GoogleSheetsSource (Sheets API v4)                   │
//! │  - LocalSheetSource (in-memory)                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from `dashboard.toml` (see [`config`]) and the
//! environment; [`factory`] turns it into a source instance.

#[cfg(not(any(feature = "gsheets-source", feature = "local-source")))]
compile_error!("Enable at least one sheet source feature.");

pub mod cache;
pub mod checksum;
pub mod config;
pub mod error;
pub mod factory;
pub mod services;
pub mod sheet;
pub mod sources;

pub use cache::{CachedSheet, SheetCache, Snapshot, DEFAULT_TTL_SECS};
pub use checksum::table_checksum;
pub use config::DashboardConfig;
pub use error::{ErrorContext, SourceError, SourceResult};
pub use factory::{SourceFactory, SourceType};
pub use services::{load_sheet, SheetLoad};
pub use sheet::{SheetLocator, SheetSource};
pub use sources::LocalSheetSource;
#[cfg(feature = "gsheets-source")]
pub use sources::{GoogleCredentials, GoogleSheetsConfig, GoogleSheetsSource};
