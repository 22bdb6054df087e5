//! `analyze` runs against the mock extraction service.

use std::path::Path;

use alarm_analyzer::analyze_cmd::{AnalyzeOptions, run_with_service};
use alarm_analyzer::client::{MockConfig, MockExtractionService};
use alarm_analyzer::config::AnalyzerConfig;
use alarm_analyzer::{AlarmClass, AnalyzerError, FilterCriteria, RawRecord, SourceFiles};
use serde_json::{Value, json};
use tempfile::tempdir;

fn rows() -> Vec<RawRecord> {
    [
        json!({"Hierarc": "AREA1", "Chart": "TK101", "Block": "LT101_ALM", "I/O name": "HHInAlarm", "Signal": 1, "Text 0": "P101"}),
        json!({"Hierarc": "AREA1", "Chart": "TK101", "Block": "LT101_ALM", "I/O name": "LLInAlarm", "Signal": 0, "Text 0": ""}),
        json!({"Hierarc": "AREA2", "Chart": "P201", "Block": "PT201_ALM", "I/O name": "HHInAlarm", "Signal": 0, "Text 0": ""}),
    ]
    .into_iter()
    .filter_map(|v| v.as_object().cloned())
    .collect()
}

fn source_files(dir: &Path) -> SourceFiles {
    let plc = dir.join("CLP01.L5K");
    let base = dir.join("CLP01.csv");
    std::fs::write(&plc, "CONTROLLER CLP01").unwrap();
    std::fs::write(&base, "Tag;Desc\n").unwrap();
    SourceFiles::new(plc, base)
}

#[test]
fn test_run_writes_exports_and_report() {
    let dir = tempdir().unwrap();
    let service = MockExtractionService::new(MockConfig::from_rows(rows()).validating());

    let mut options = AnalyzeOptions::new(source_files(dir.path()));
    options.criteria = FilterCriteria::new().with_alarm_types([AlarmClass::HighHigh]);
    options.export_original = Some(dir.path().join("exports/original.csv"));
    options.export_display = Some(dir.path().join("exports/display.csv"));
    options.json = Some(dir.path().join("report.json"));
    options.limit = 0;

    let report = run_with_service(&service, &AnalyzerConfig::default(), &options).unwrap();
    assert_eq!(service.calls(), 1);
    assert_eq!(report.total_records, 3);
    assert_eq!(report.stats.total, 2);
    assert_eq!(report.stats.hh, 2);
    assert_eq!(report.exports.len(), 2);

    let original = std::fs::read_to_string(dir.path().join("exports/original.csv")).unwrap();
    let lines: Vec<&str> = original.lines().collect();
    assert_eq!(lines[0], "Hierarc;Chart;Block;I/O name;Signal;Text 0");
    assert_eq!(lines[1], "AREA1;TK101;LT101_ALM;HHInAlarm;1;P101");
    assert_eq!(lines[2], "AREA2;P201;PT201_ALM;HHInAlarm;0;");

    let json: Value = serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap()).unwrap();
    assert_eq!(json["stats"]["enabledCount"], 1);
    assert_eq!(json["criteria"]["alarmTypes"], json!(["HHInAlarm"]));
    assert_eq!(
        json["source"]["plc_sha256"].as_str().map(str::len),
        Some(64),
        "fingerprint missing: {json}"
    );
}

#[test]
fn test_empty_filter_result_skips_exports() {
    let dir = tempdir().unwrap();
    let service = MockExtractionService::new(MockConfig::from_rows(rows()));

    let mut options = AnalyzeOptions::new(source_files(dir.path()));
    options.criteria = FilterCriteria::new().with_search("no such tag");
    options.export_display = Some(dir.path().join("display.csv"));

    let report = run_with_service(&service, &AnalyzerConfig::default(), &options).unwrap();
    assert_eq!(report.stats.total, 0);
    assert!(report.exports.is_empty());
    assert!(!dir.path().join("display.csv").exists());
}

#[test]
fn test_only_one_file_is_rejected_before_the_service() {
    let dir = tempdir().unwrap();
    let files = source_files(dir.path());
    let service = MockExtractionService::new(MockConfig::from_rows(rows()).validating());

    let options = AnalyzeOptions::new(SourceFiles {
        plc_export: files.plc_export,
        base_csv: None,
    });
    let err = run_with_service(&service, &AnalyzerConfig::default(), &options).unwrap_err();
    assert!(matches!(err, AnalyzerError::Refresh(_)));
    assert_eq!(service.calls(), 0);
}
