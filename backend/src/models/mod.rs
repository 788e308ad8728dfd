//! Domain models for lead attendance data.

pub mod columns;
pub mod granularity;
pub mod lead;
pub mod table;

pub use granularity::*;
pub use lead::*;
pub use table::*;
