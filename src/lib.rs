//! Alarm Analyzer - review PLC alarm/interlock records
//!
//! An external extraction service merges a PLC-configuration export with a
//! base equipment CSV and returns one raw row per alarm/control point. This
//! crate maps those rows into [`Record`]s, filters them, counts them, and
//! re-exports the filtered set either verbatim (original column order) or in
//! a fixed display layout.
//!
//! # Quick Start
//!
//! ```no_run
//! use alarm_analyzer::{AlarmClass, FilterCriteria, apply_filters, compute_stats, extract_and_map};
//! use alarm_analyzer::client::{HttpExtractionClient, SourceFiles};
//! use alarm_analyzer::config::ServiceConfig;
//!
//! let client = HttpExtractionClient::new(&ServiceConfig::default())?;
//! let set = extract_and_map(&client, &SourceFiles::new("CLP01.L5K", "CLP01.csv"))?;
//!
//! let criteria = FilterCriteria::new().with_alarm_types([AlarmClass::HighHigh]);
//! let filtered = apply_filters(&set.records, &criteria);
//! println!("{} HH alarms", compute_stats(&filtered).total);
//! # Ok::<(), alarm_analyzer::AnalyzerError>(())
//! ```
//!
//! # Modules
//!
//! - [`core`]: record schema and raw-row mapping
//! - [`filter`]: filter criteria and the stable filter
//! - [`report`]: summary counts and terminal rendering
//! - [`storage`]: CSV exports in the original and display layouts
//! - [`client`]: extraction service trait, HTTP client and mock
//! - [`session`]: current result set with the single in-flight interlock

pub mod analyze_cmd;
pub mod client;
pub mod config;
pub mod core;
pub mod filter;
pub mod health_cmd;
pub mod report;
pub mod session;
pub mod storage;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::client::{ExtractionError, ExtractionService, SourceFiles};
pub use crate::core::{AlarmClass, ExtractionOutput, RawRecord, Record, ResultSet};
pub use crate::filter::{EnabledStatus, FilterCriteria, InterlockFilter};
pub use crate::report::Stats;
pub use crate::session::{FilteredView, RefreshError, Session};
pub use crate::storage::{CsvExporter, SignalLabels};

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Submit both files and map the response into a result set.
pub fn extract_and_map(service: &dyn ExtractionService, files: &SourceFiles) -> Result<ResultSet, ExtractionError> {
    service.extract(files).map(ResultSet::from_extraction)
}

/// Stable filter; see [`filter::apply`].
pub fn apply_filters(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    filter::apply(records, criteria)
}

/// Summary counts; see [`report::summarize`].
pub fn compute_stats(filtered: &[Record]) -> Stats {
    report::summarize(filtered)
}

/// Original-schema CSV for the filtered ids, `None` when nothing is selected.
pub fn serialize_original(
    raw_records: &[RawRecord],
    column_order: &[String],
    filtered_ids: &[usize],
) -> AnalyzerResult<Option<String>> {
    CsvExporter::new().render_original(raw_records, column_order, filtered_ids)
}

/// Display-schema CSV with the default signal labels, `None` when empty.
pub fn serialize_display(filtered: &[Record]) -> AnalyzerResult<Option<String>> {
    CsvExporter::new().render_display(filtered)
}

/// The service call a result set came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub plc_export: PathBuf,
    pub base_csv: PathBuf,
    pub plc_sha256: Option<String>,
    pub base_sha256: Option<String>,
}

impl SourceInfo {
    /// Describe an upload of `files` to `url`, fingerprinting whatever is readable.
    pub fn for_upload(url: &str, files: &SourceFiles) -> Self {
        SourceInfo {
            url: url.to_string(),
            plc_export: files.plc_export.clone().unwrap_or_default(),
            base_csv: files.base_csv.clone().unwrap_or_default(),
            plc_sha256: files.plc_export.as_deref().and_then(file_sha256),
            base_sha256: files.base_csv.as_deref().and_then(file_sha256),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInfo {
    pub layout: String,
    pub path: PathBuf,
}

/// Machine-readable summary of one `analyze` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp: String,
    pub source: SourceInfo,
    pub total_records: usize,
    pub criteria: FilterCriteria,
    pub stats: Stats,
    pub exports: Vec<ExportInfo>,
}

// Shared helpers
pub fn now_string() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

/// SHA-256 of a file's content, `None` if it cannot be read.
pub fn file_sha256(path: &Path) -> Option<String> {
    std::fs::read(path).ok().map(|bytes| sha256_hex(&bytes))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha256::digest;
    digest(bytes)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> AnalyzerResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| AnalyzerError::Message(e.to_string()))?;
        }
    }
    let json = serde_json::to_vec_pretty(value).map_err(|e| AnalyzerError::Message(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| AnalyzerError::Message(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockConfig, MockExtractionService};
    use serde_json::json;

    #[test]
    fn test_public_facade_end_to_end() {
        let rows: Vec<RawRecord> = [
            json!({"Block": "TE1611001_ALM", "I/O name": "HHInAlarm", "Signal": 1, "Text 0": "M1"}),
            json!({"Block": "TE1611001_ALM", "I/O name": "LInAlarm", "Signal": 0, "Text 0": ""}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
        let service = MockExtractionService::new(MockConfig::from_rows(rows));

        let set = extract_and_map(&service, &SourceFiles::default()).unwrap();
        let filtered = apply_filters(&set.records, &FilterCriteria::new().with_interlock(InterlockFilter::No));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);

        let stats = compute_stats(&filtered);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.l, 1);

        let ids: Vec<usize> = filtered.iter().map(|r| r.id).collect();
        let original = serialize_original(&set.raw_records, &set.columns, &ids).unwrap().unwrap();
        assert_eq!(original.lines().nth(1), Some("TE1611001_ALM;LInAlarm;0;"));

        let display = serialize_display(&filtered).unwrap().unwrap();
        assert!(display.lines().nth(1).unwrap().contains(";Disabled;"));
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_source_info_fingerprints_readable_files() {
        let dir = tempfile::tempdir().unwrap();
        let plc = dir.path().join("CLP01.L5K");
        std::fs::write(&plc, b"abc").unwrap();
        let files = SourceFiles::new(&plc, dir.path().join("absent.csv"));

        let source = SourceInfo::for_upload("http://localhost:5000", &files);
        assert_eq!(
            source.plc_sha256.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(source.base_sha256, None);
        assert_eq!(source.base_csv, dir.path().join("absent.csv"));
    }
}
