//! Sheet source implementations.
//!
//! - `local`: in-memory tables for tests and local development
//! - `google`: Google Sheets API v4 over HTTPS

#[cfg(feature = "gsheets-source")]
pub mod google;
pub mod local;

#[cfg(feature = "gsheets-source")]
pub use google::{GoogleCredentials, GoogleSheetsConfig, GoogleSheetsSource};
pub use local::LocalSheetSource;
