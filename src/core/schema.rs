//! Canonical alarm record schema and the retained raw extraction output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped row exactly as delivered by the extraction service.
///
/// Key order is preserved (serde_json `preserve_order`), so the first row can
/// stand in for the column order when the service omits it.
pub type RawRecord = Map<String, Value>;

/// Alarm class derived from a record's I/O name.
///
/// The four limit classes plus a single `Other` bucket partition every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlarmClass {
    #[serde(rename = "HHInAlarm")]
    HighHigh,
    #[serde(rename = "HInAlarm")]
    High,
    #[serde(rename = "LInAlarm")]
    Low,
    #[serde(rename = "LLInAlarm")]
    LowLow,
    #[serde(rename = "other")]
    Other,
}

impl AlarmClass {
    /// All classes in display order.
    pub const ALL: [AlarmClass; 5] = [
        AlarmClass::HighHigh,
        AlarmClass::High,
        AlarmClass::Low,
        AlarmClass::LowLow,
        AlarmClass::Other,
    ];

    /// Classify an I/O name. Matching is exact; anything unnamed is `Other`.
    pub fn from_io_name(io_name: &str) -> Self {
        match io_name {
            "HHInAlarm" => AlarmClass::HighHigh,
            "HInAlarm" => AlarmClass::High,
            "LInAlarm" => AlarmClass::Low,
            "LLInAlarm" => AlarmClass::LowLow,
            _ => AlarmClass::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmClass::HighHigh => "HHInAlarm",
            AlarmClass::High => "HInAlarm",
            AlarmClass::Low => "LInAlarm",
            AlarmClass::LowLow => "LLInAlarm",
            AlarmClass::Other => "other",
        }
    }

    /// Short label used in summaries.
    pub fn short_label(&self) -> &'static str {
        match self {
            AlarmClass::HighHigh => "HH",
            AlarmClass::High => "H",
            AlarmClass::Low => "L",
            AlarmClass::LowLow => "LL",
            AlarmClass::Other => "other",
        }
    }
}

impl fmt::Display for AlarmClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmClass {
    type Err = String;

    /// Accepts the canonical I/O names and the short forms, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hhinalarm" | "hh" => Ok(AlarmClass::HighHigh),
            "hinalarm" | "h" => Ok(AlarmClass::High),
            "linalarm" | "l" => Ok(AlarmClass::Low),
            "llinalarm" | "ll" => Ok(AlarmClass::LowLow),
            "other" => Ok(AlarmClass::Other),
            other => Err(format!(
                "unknown alarm type '{other}' (expected HHInAlarm, HInAlarm, LInAlarm, LLInAlarm or other)"
            )),
        }
    }
}

/// One normalized alarm/interlock row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// 1-based position in the raw collection
    pub id: usize,
    pub hierarchy: String,
    pub chart: String,
    pub block: String,
    pub io_name: String,
    pub block_type: String,
    pub value: f64,
    /// 1 = enabled, 0 = disabled; nothing else survives mapping
    pub signal: u8,
    pub interlock: String,
    pub rung_name: String,
    pub identification: String,
    pub unit: String,
}

impl Record {
    pub fn alarm_class(&self) -> AlarmClass {
        AlarmClass::from_io_name(&self.io_name)
    }

    pub fn is_enabled(&self) -> bool {
        self.signal == 1
    }

    pub fn has_interlock(&self) -> bool {
        !self.interlock.is_empty()
    }

    /// Position of the raw counterpart in the raw collection.
    pub fn raw_index(&self) -> usize {
        self.id.saturating_sub(1)
    }
}

/// Output of one successful extraction call, before mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub raw_records: Vec<RawRecord>,
    /// Authoritative column order for the original-schema export
    pub columns: Vec<String>,
}

/// Mapped records held together with the raw rows and column order they came
/// from. Replaced as one unit on every successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub records: Vec<Record>,
    pub raw_records: Vec<RawRecord>,
    pub columns: Vec<String>,
}

impl ResultSet {
    /// Map an extraction output into a result set.
    pub fn from_extraction(output: ExtractionOutput) -> Self {
        let records = super::mapper::map_records(&output.raw_records);
        ResultSet {
            records,
            raw_records: output.raw_records,
            columns: output.columns,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The raw counterpart of a mapped record, looked up by id.
    pub fn raw_for(&self, record: &Record) -> Option<&RawRecord> {
        self.raw_records.get(record.raw_index())
    }
}
