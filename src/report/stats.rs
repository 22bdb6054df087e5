//! Summary counts over a filtered record set.

use serde::{Deserialize, Serialize};

use crate::core::{AlarmClass, Record};

/// Tallies over one filtered view.
///
/// `total == enabled + disabled` and `total` equals the sum of the five class
/// counts, because `signal` is binary and the classes partition `io_name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub enabled_count: usize,
    pub disabled_count: usize,
    pub with_interlock_count: usize,
    pub hh: usize,
    pub h: usize,
    pub l: usize,
    pub ll: usize,
    pub other: usize,
}

impl Stats {
    /// Single pass over the filtered records.
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Stats::default();
        for r in records {
            stats.total += 1;
            if r.is_enabled() {
                stats.enabled_count += 1;
            } else {
                stats.disabled_count += 1;
            }
            if r.has_interlock() {
                stats.with_interlock_count += 1;
            }
            *stats.class_count_mut(r.alarm_class()) += 1;
        }
        stats
    }

    pub fn class_count(&self, class: AlarmClass) -> usize {
        match class {
            AlarmClass::HighHigh => self.hh,
            AlarmClass::High => self.h,
            AlarmClass::Low => self.l,
            AlarmClass::LowLow => self.ll,
            AlarmClass::Other => self.other,
        }
    }

    fn class_count_mut(&mut self, class: AlarmClass) -> &mut usize {
        match class {
            AlarmClass::HighHigh => &mut self.hh,
            AlarmClass::High => &mut self.h,
            AlarmClass::Low => &mut self.l,
            AlarmClass::LowLow => &mut self.ll,
            AlarmClass::Other => &mut self.other,
        }
    }

    pub fn class_total(&self) -> usize {
        AlarmClass::ALL.iter().map(|c| self.class_count(*c)).sum()
    }
}

/// Summarize a filtered record sequence.
pub fn summarize(filtered: &[Record]) -> Stats {
    Stats::from_records(filtered)
}
