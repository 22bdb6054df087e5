//! CSV export of a filtered view, in the original or the display layout.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::core::{RawRecord, Record};
use crate::{AnalyzerError, AnalyzerResult};

/// Display-layout column headers in deterministic order.
pub const DISPLAY_HEADERS: &[&str] = &[
    "Hierarchy",
    "Chart",
    "Block",
    "I/O Name",
    "Value",
    "Signal",
    "Interlock",
    "Rung Name",
    "Identification",
    "Unit",
];

pub const DELIMITER: u8 = b';';

/// Labels rendered in place of `signal` in the display layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalLabels {
    pub enabled: String,
    pub disabled: String,
}

impl Default for SignalLabels {
    fn default() -> Self {
        SignalLabels {
            enabled: "Enabled".to_string(),
            disabled: "Disabled".to_string(),
        }
    }
}

impl SignalLabels {
    pub fn for_signal(&self, signal: u8) -> &str {
        if signal == 1 { &self.enabled } else { &self.disabled }
    }
}

/// Which schema an export uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLayout {
    /// Raw rows, verbatim, in the column order captured at extraction time
    Original,
    /// Mapped records with a fixed header and a human signal label
    Display,
}

/// CSV exporter for filtered views.
///
/// Both layouts are `;`-delimited UTF-8 with one line per record after the
/// header. An empty selection produces nothing: the `render_*` methods return
/// `None` and the `export_*` methods do not create a file.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    labels: SignalLabels,
}

impl CsvExporter {
    /// Create a new CsvExporter with the default signal labels.
    pub fn new() -> Self {
        CsvExporter::default()
    }

    /// Use custom signal labels for the display layout.
    pub fn with_labels(mut self, labels: SignalLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn labels(&self) -> &SignalLabels {
        &self.labels
    }

    /// Write the original-schema export to any writer.
    ///
    /// Rows are the raw records at positions `id - 1` for each filtered id,
    /// emitted in raw order. Ids without a raw counterpart are skipped.
    /// Returns the number of data rows written.
    pub fn write_original<W: Write>(
        &self,
        raw: &[RawRecord],
        columns: &[String],
        filtered_ids: &[usize],
        writer: W,
    ) -> AnalyzerResult<usize> {
        let rows = select_raw(raw, filtered_ids);
        let mut csv_writer = csv_writer(writer);

        csv_writer
            .write_record(columns)
            .map_err(|e| AnalyzerError::Message(format!("failed to write CSV headers: {e}")))?;

        for row in &rows {
            let cells: Vec<String> = columns.iter().map(|c| raw_cell(row.get(c))).collect();
            csv_writer
                .write_record(&cells)
                .map_err(|e| AnalyzerError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| AnalyzerError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(rows.len())
    }

    /// Write the display-schema export to any writer.
    ///
    /// Returns the number of data rows written.
    pub fn write_display<W: Write>(&self, records: &[Record], writer: W) -> AnalyzerResult<usize> {
        let mut csv_writer = csv_writer(writer);

        csv_writer
            .write_record(DISPLAY_HEADERS)
            .map_err(|e| AnalyzerError::Message(format!("failed to write CSV headers: {e}")))?;

        for record in records {
            let row = self.record_to_row(record);
            csv_writer
                .write_record(&row)
                .map_err(|e| AnalyzerError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| AnalyzerError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(records.len())
    }

    /// Render the original-schema export as text, `None` when nothing is selected.
    pub fn render_original(
        &self,
        raw: &[RawRecord],
        columns: &[String],
        filtered_ids: &[usize],
    ) -> AnalyzerResult<Option<String>> {
        if !has_original_rows(raw, columns, filtered_ids) {
            return Ok(None);
        }
        let mut buffer = Vec::new();
        self.write_original(raw, columns, filtered_ids, &mut buffer)?;
        into_text(buffer).map(Some)
    }

    /// Render the display-schema export as text, `None` when `records` is empty.
    pub fn render_display(&self, records: &[Record]) -> AnalyzerResult<Option<String>> {
        if records.is_empty() {
            return Ok(None);
        }
        let mut buffer = Vec::new();
        self.write_display(records, &mut buffer)?;
        into_text(buffer).map(Some)
    }

    /// Export the original-schema rows to a file.
    ///
    /// Returns the written path, or `None` when the selection is empty and no
    /// file was created.
    pub fn export_original(
        &self,
        raw: &[RawRecord],
        columns: &[String],
        filtered_ids: &[usize],
        output: &Path,
    ) -> AnalyzerResult<Option<PathBuf>> {
        if !has_original_rows(raw, columns, filtered_ids) {
            info!(path = %output.display(), "nothing to export (original layout)");
            return Ok(None);
        }
        let file = create_file(output)?;
        let rows = self.write_original(raw, columns, filtered_ids, file)?;
        info!(path = %output.display(), rows, "wrote original-layout export");
        Ok(Some(output.to_path_buf()))
    }

    /// Export the display-schema rows to a file; `None` when `records` is empty.
    pub fn export_display(&self, records: &[Record], output: &Path) -> AnalyzerResult<Option<PathBuf>> {
        if records.is_empty() {
            info!(path = %output.display(), "nothing to export (display layout)");
            return Ok(None);
        }
        let file = create_file(output)?;
        let rows = self.write_display(records, file)?;
        info!(path = %output.display(), rows, "wrote display-layout export");
        Ok(Some(output.to_path_buf()))
    }

    /// Convert a Record to a row of display-layout values.
    fn record_to_row(&self, record: &Record) -> Vec<String> {
        vec![
            record.hierarchy.clone(),
            record.chart.clone(),
            record.block.clone(),
            record.io_name.clone(),
            record.value.to_string(),
            self.labels.for_signal(record.signal).to_string(),
            record.interlock.clone(),
            record.rung_name.clone(),
            record.identification.clone(),
            record.unit.clone(),
        ]
    }
}

/// Raw rows whose position matches a filtered id, in raw order.
fn select_raw<'a>(raw: &'a [RawRecord], filtered_ids: &[usize]) -> Vec<&'a RawRecord> {
    let positions: BTreeSet<usize> = filtered_ids
        .iter()
        .filter(|id| **id >= 1)
        .map(|id| id - 1)
        .collect();
    let selected: Vec<&RawRecord> = positions.iter().filter_map(|pos| raw.get(*pos)).collect();
    if selected.len() < positions.len() {
        debug!(
            requested = positions.len(),
            found = selected.len(),
            "some filtered ids have no raw counterpart"
        );
    }
    selected
}

/// Without columns there is no cell to write, so the export is treated as empty.
fn has_original_rows(raw: &[RawRecord], columns: &[String], filtered_ids: &[usize]) -> bool {
    !columns.is_empty() && !select_raw(raw, filtered_ids).is_empty()
}

/// Render one raw cell verbatim; null and missing are empty.
fn raw_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
            }
        }
        Some(other) => other.to_string(),
    }
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer)
}

fn into_text(buffer: Vec<u8>) -> AnalyzerResult<String> {
    String::from_utf8(buffer).map_err(|e| AnalyzerError::Message(format!("export is not valid UTF-8: {e}")))
}

fn create_file(output: &Path) -> AnalyzerResult<std::fs::File> {
    // Ensure parent directory exists
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AnalyzerError::Message(format!("failed to create directory: {e}")))?;
        }
    }

    std::fs::File::create(output).map_err(|e| AnalyzerError::Message(format!("failed to create file: {e}")))
}
