//! Extraction service trait and its input/output types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::ExtractionOutput;

use super::error::ExtractionError;

/// The two source files of one extraction call.
///
/// Either may be absent; `validate` rejects that before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFiles {
    /// PLC-configuration export (e.g. an `.L5K` file)
    pub plc_export: Option<PathBuf>,
    /// Base equipment CSV
    pub base_csv: Option<PathBuf>,
}

impl SourceFiles {
    pub fn new(plc_export: impl Into<PathBuf>, base_csv: impl Into<PathBuf>) -> Self {
        SourceFiles {
            plc_export: Some(plc_export.into()),
            base_csv: Some(base_csv.into()),
        }
    }

    /// Check both files are given and exist; returns them on success.
    pub fn validate(&self) -> Result<(&Path, &Path), ExtractionError> {
        let (plc, base) = match (&self.plc_export, &self.base_csv) {
            (Some(plc), Some(base)) => (plc.as_path(), base.as_path()),
            (None, None) => {
                return Err(ExtractionError::Validation(
                    "both the PLC export and the base CSV are required".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(ExtractionError::Validation("the PLC export file is required".to_string()));
            }
            (Some(_), None) => {
                return Err(ExtractionError::Validation("the base CSV file is required".to_string()));
            }
        };
        for path in [plc, base] {
            if !path.is_file() {
                return Err(ExtractionError::Validation(format!(
                    "file not found: {}",
                    path.display()
                )));
            }
        }
        Ok((plc, base))
    }
}

/// Health payload of the extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Remote collaborator that turns the two source files into raw records.
///
/// One call is one request/response exchange; implementations hold no
/// per-call state.
pub trait ExtractionService {
    /// Identifier for logs (e.g. the base URL).
    fn name(&self) -> &str;

    /// Submit both files and return the raw rows plus their column order.
    fn extract(&self, files: &SourceFiles) -> Result<ExtractionOutput, ExtractionError>;

    /// Query the service's health endpoint.
    fn health(&self) -> Result<HealthStatus, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_missing_side() {
        let files = SourceFiles {
            plc_export: None,
            base_csv: Some(PathBuf::from("base.csv")),
        };
        let err = files.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("PLC export"));

        let err = SourceFiles::default().validate().unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_validate_checks_existence() {
        let dir = tempfile::tempdir().unwrap();
        let plc = dir.path().join("plant.L5K");
        std::fs::write(&plc, "CONTROLLER").unwrap();
        let files = SourceFiles::new(&plc, dir.path().join("missing.csv"));
        let err = files.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("missing.csv"));

        let base = dir.path().join("base.csv");
        std::fs::write(&base, "Block;I/O name\n").unwrap();
        let files = SourceFiles::new(&plc, &base);
        assert!(files.validate().is_ok());
    }

    #[test]
    fn test_health_status_ok() {
        let h: HealthStatus = serde_json::from_str(r#"{"status":"ok","message":"running"}"#).unwrap();
        assert!(h.is_ok());
        let h: HealthStatus = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!h.is_ok());
        assert_eq!(h.message, "");
    }
}
