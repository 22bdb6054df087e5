use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::client::{ExtractionService, HttpExtractionClient, SourceFiles};
use crate::config::AnalyzerConfig;
use crate::core::ResultSet;
use crate::filter::FilterCriteria;
use crate::report::{render_rows, render_stats};
use crate::session::{FilteredView, Session};
use crate::storage::{CsvExporter, ExportLayout};
use crate::{AnalyzerResult, ExportInfo, RunReport, SourceInfo, now_string, write_json};

pub const DEFAULT_PREVIEW_LIMIT: usize = 20;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub files: SourceFiles,
    pub criteria: FilterCriteria,
    pub export_original: Option<PathBuf>,
    pub export_display: Option<PathBuf>,
    pub json: Option<PathBuf>,
    /// Rows printed to stdout; 0 prints only the counts
    pub limit: usize,
}

impl AnalyzeOptions {
    pub fn new(files: SourceFiles) -> Self {
        AnalyzeOptions {
            files,
            criteria: FilterCriteria::default(),
            export_original: None,
            export_display: None,
            json: None,
            limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

pub fn run(config: &AnalyzerConfig, options: &AnalyzeOptions) -> AnalyzerResult<RunReport> {
    // Missing files are reported before a client is even built
    options.files.validate()?;
    let client = HttpExtractionClient::new(&config.service)?;
    run_with_service(&client, config, options)
}

/// Like [`run`], but against an explicit extraction service.
pub fn run_with_service(
    service: &dyn ExtractionService,
    config: &AnalyzerConfig,
    options: &AnalyzeOptions,
) -> AnalyzerResult<RunReport> {
    let session = Session::new();
    info!(service = service.name(), "requesting extraction");
    let set = session.refresh(service, &options.files)?;

    let source = SourceInfo::for_upload(service.name(), &options.files);
    finish(set, source, config, options)
}

fn finish(
    set: Arc<ResultSet>,
    source: SourceInfo,
    config: &AnalyzerConfig,
    options: &AnalyzeOptions,
) -> AnalyzerResult<RunReport> {
    let total_records = set.len();
    let view = FilteredView::new(set, &options.criteria);
    info!(total = total_records, retained = view.records.len(), "filter applied");

    let labels = config.export.signal_labels();
    println!("{}", render_stats(&view.stats));
    if options.limit > 0 && !view.records.is_empty() {
        println!("{}", render_rows(&view.records, options.limit, &labels.enabled, &labels.disabled));
    }

    let exporter = CsvExporter::new().with_labels(labels);
    let mut exports = Vec::new();
    for (layout, target) in [
        (ExportLayout::Original, &options.export_original),
        (ExportLayout::Display, &options.export_display),
    ] {
        let Some(path) = target else { continue };
        let written = match layout {
            ExportLayout::Original => view.export_original(&exporter, path)?,
            ExportLayout::Display => view.export_display(&exporter, path)?,
        };
        match written {
            Some(path) => exports.push(ExportInfo {
                layout: layout_name(layout).to_string(),
                path,
            }),
            None => eprintln!("Nothing to export: the filtered set is empty ({})", layout_name(layout)),
        }
    }

    let report = RunReport {
        timestamp: now_string(),
        source,
        total_records,
        criteria: view.criteria.clone(),
        stats: view.stats,
        exports,
    };

    if let Some(path) = &options.json {
        write_json(path, &report)?;
        info!(path = %path.display(), "wrote run report");
    }

    Ok(report)
}

fn layout_name(layout: ExportLayout) -> &'static str {
    match layout {
        ExportLayout::Original => "original",
        ExportLayout::Display => "display",
    }
}
