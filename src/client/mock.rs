//! Mock extraction service for testing.

use std::cell::Cell;

use crate::core::{ExtractionOutput, RawRecord};

use super::error::ExtractionError;
use super::traits::{ExtractionService, HealthStatus, SourceFiles};

/// Configuration for mock service responses.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Name to report
    pub name: String,
    /// Output returned by `extract`
    pub output: ExtractionOutput,
    /// Error returned by `extract` instead of the output
    pub extract_error: Option<ExtractionError>,
    /// Health returned by `health`
    pub health: HealthStatus,
    /// Whether `extract` validates the source files first
    pub validate_files: bool,
}

impl MockConfig {
    /// Create a new mock config returning `output`.
    pub fn new(output: ExtractionOutput) -> Self {
        MockConfig {
            name: "mock".to_string(),
            output,
            extract_error: None,
            health: HealthStatus {
                status: "ok".to_string(),
                message: "mock extraction service".to_string(),
            },
            validate_files: false,
        }
    }

    /// Build the output from rows, taking column order from the first row.
    pub fn from_rows(rows: Vec<RawRecord>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self::new(ExtractionOutput { raw_records: rows, columns })
    }

    /// Make extract fail with the given error.
    pub fn fails_with(mut self, err: ExtractionError) -> Self {
        self.extract_error = Some(err);
        self
    }

    /// Validate the source files like a real client would.
    pub fn validating(mut self) -> Self {
        self.validate_files = true;
        self
    }
}

/// Mock extraction service for unit testing.
///
/// Returns configurable results without any network traffic and counts how
/// many extraction calls reached it.
pub struct MockExtractionService {
    config: MockConfig,
    calls: Cell<usize>,
}

impl MockExtractionService {
    pub fn new(config: MockConfig) -> Self {
        MockExtractionService {
            config,
            calls: Cell::new(0),
        }
    }

    /// Number of `extract` calls that got past validation.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ExtractionService for MockExtractionService {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn extract(&self, files: &SourceFiles) -> Result<ExtractionOutput, ExtractionError> {
        if self.config.validate_files {
            files.validate()?;
        }
        self.calls.set(self.calls.get() + 1);
        match &self.config.extract_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.config.output.clone()),
        }
    }

    fn health(&self) -> Result<HealthStatus, ExtractionError> {
        Ok(self.config.health.clone())
    }
}
