//! Storage layer for filtered views and extraction results.
//!
//! This module writes CSV exports of a filtered view in both layouts.

pub mod csv;

// Re-export key types
pub use csv::{CsvExporter, DISPLAY_HEADERS, ExportLayout, SignalLabels};
