//! Record filtering.
//!
//! `FilterCriteria` is an immutable value; `apply` is a stable, pure filter
//! over a record slice and can be recomputed on every criteria change.

pub mod criteria;
pub mod engine;

pub use criteria::{EnabledStatus, FilterCriteria, InterlockFilter};
pub use engine::{apply, matches};
