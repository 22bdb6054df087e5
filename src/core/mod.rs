//! Core types for alarm-analyzer.
//!
//! This module contains the canonical `Record` schema and the mapper that
//! derives it from raw extraction rows.

pub mod mapper;
pub mod schema;

// Re-export key types for convenience
pub use mapper::{map_record, map_records};
pub use schema::{AlarmClass, ExtractionOutput, RawRecord, Record, ResultSet};
