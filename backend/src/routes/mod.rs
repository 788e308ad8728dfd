//! Response payloads, one module per endpoint group.

pub mod cache;
pub mod dashboard;
pub mod records;
