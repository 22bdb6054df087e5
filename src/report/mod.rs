//! Summary statistics and terminal rendering for filtered views.
//!
//! This module provides:
//! - `Stats`: counts by enabled flag, interlock presence and alarm class
//! - Plain-text rendering of the counts and a bounded row preview

pub mod stats;
pub mod table;

// Re-export key types
pub use stats::{Stats, summarize};
pub use table::{render_rows, render_stats};
