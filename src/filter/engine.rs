//! Stable, pure record filter.

use crate::core::Record;

use super::criteria::{EnabledStatus, FilterCriteria, InterlockFilter};

/// Retain the records that pass every criterion, preserving input order.
///
/// Alarm types are OR-ed within the selection; all other criteria are AND-ed.
pub fn apply(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    let needle = criteria.search.to_lowercase();
    records
        .iter()
        .filter(|r| passes(r, criteria, &needle))
        .cloned()
        .collect()
}

/// Evaluate one record against the criteria.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    passes(record, criteria, &criteria.search.to_lowercase())
}

fn passes(record: &Record, criteria: &FilterCriteria, needle: &str) -> bool {
    matches_search(record, needle)
        && matches_alarm_type(record, criteria)
        && matches_enabled(record, criteria.enabled_status)
        && matches_interlock(record, criteria.has_interlock)
}

fn matches_search(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &record.hierarchy,
        &record.chart,
        &record.block,
        &record.io_name,
        &record.interlock,
        &record.rung_name,
        &record.identification,
        &record.unit,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn matches_alarm_type(record: &Record, criteria: &FilterCriteria) -> bool {
    criteria.alarm_types.is_empty() || criteria.alarm_types.contains(&record.alarm_class())
}

fn matches_enabled(record: &Record, status: EnabledStatus) -> bool {
    match status {
        EnabledStatus::All => true,
        EnabledStatus::Enabled => record.signal == 1,
        EnabledStatus::Disabled => record.signal == 0,
    }
}

fn matches_interlock(record: &Record, filter: InterlockFilter) -> bool {
    match filter {
        InterlockFilter::All => true,
        InterlockFilter::Yes => record.has_interlock(),
        InterlockFilter::No => !record.has_interlock(),
    }
}
