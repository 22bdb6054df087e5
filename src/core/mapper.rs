//! Raw extraction rows -> canonical [`Record`]s.
//!
//! Mapping is total: missing or null source values become the zero value of
//! the target field and unknown keys are ignored.

use serde_json::Value;

use super::schema::{RawRecord, Record};

/// Source column names consumed by the mapper.
pub mod keys {
    pub const HIERARCHY: &str = "Hierarc";
    pub const CHART: &str = "Chart";
    pub const BLOCK: &str = "Block";
    pub const IO_NAME: &str = "I/O name";
    pub const BLOCK_TYPE: &str = "Block type";
    pub const VALUE: &str = "Value";
    pub const SIGNAL: &str = "Signal";
    pub const INTERLOCK: &str = "Text 0";
    pub const RUNG_NAME: &str = "Rung Name";
    pub const IDENTIFICATION: &str = "Identification";
    pub const UNIT: &str = "Unit";
}

/// Map every raw row, assigning ids 1..=N in source order.
pub fn map_records(raw: &[RawRecord]) -> Vec<Record> {
    raw.iter()
        .enumerate()
        .map(|(idx, row)| map_record(idx + 1, row))
        .collect()
}

/// Map a single raw row under the given id.
pub fn map_record(id: usize, raw: &RawRecord) -> Record {
    Record {
        id,
        hierarchy: text(raw.get(keys::HIERARCHY)),
        chart: text(raw.get(keys::CHART)),
        block: text(raw.get(keys::BLOCK)),
        io_name: text(raw.get(keys::IO_NAME)),
        block_type: text(raw.get(keys::BLOCK_TYPE)),
        value: number(raw.get(keys::VALUE)),
        signal: signal(raw.get(keys::SIGNAL)),
        interlock: text(raw.get(keys::INTERLOCK)),
        rung_name: text(raw.get(keys::RUNG_NAME)),
        identification: text(raw.get(keys::IDENTIFICATION)),
        unit: text(raw.get(keys::UNIT)),
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed.filter(|v| v.is_finite()) {
        // -0.0 renders as "-0"; fold it into plain zero
        Some(v) if v != 0.0 => v,
        _ => 0.0,
    }
}

// Anything that is not unambiguously 1 normalizes to 0.
fn signal(value: Option<&Value>) -> u8 {
    let enabled = match value {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok() == Some(1.0),
        Some(Value::Bool(b)) => *b,
        _ => false,
    };
    u8::from(enabled)
}
