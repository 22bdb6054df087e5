//! Holder of the current result set.
//!
//! A successful extraction replaces the raw rows, the column order and the
//! mapped records as one unit. A failed one leaves the installed set alone.
//! At most one extraction is in flight per session.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tracing::{info, warn};

use crate::AnalyzerResult;
use crate::client::{ExtractionError, ExtractionService, SourceFiles};
use crate::core::{ExtractionOutput, Record, ResultSet};
use crate::filter::{FilterCriteria, apply};
use crate::report::{Stats, summarize};
use crate::storage::CsvExporter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("an extraction request is already in flight")]
    InFlight,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Current result set plus the in-flight interlock.
#[derive(Debug, Default)]
pub struct Session {
    current: RwLock<Option<Arc<ResultSet>>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped, whatever the outcome.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an extraction request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The installed result set, if any.
    pub fn current(&self) -> Option<Arc<ResultSet>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Map and install an extraction output, replacing any prior set.
    pub fn install(&self, output: ExtractionOutput) -> Arc<ResultSet> {
        let set = Arc::new(ResultSet::from_extraction(output));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&set));
        info!(records = set.len(), columns = set.columns.len(), "installed result set");
        set
    }

    /// Run one extraction and install its result.
    ///
    /// # Errors
    /// `InFlight` if another refresh is pending; otherwise the extraction
    /// error. In both cases the previously installed set is kept.
    pub fn refresh(
        &self,
        service: &dyn ExtractionService,
        files: &SourceFiles,
    ) -> Result<Arc<ResultSet>, RefreshError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("refresh rejected: extraction already in flight");
            return Err(RefreshError::InFlight);
        };

        match service.extract(files) {
            Ok(output) => Ok(self.install(output)),
            Err(err) => {
                warn!(
                    service = service.name(),
                    kind = err.kind(),
                    kept = self.current().map(|s| s.len()).unwrap_or(0),
                    "extraction failed; keeping current result set"
                );
                Err(err.into())
            }
        }
    }

    /// Filter the installed set; `None` when nothing is installed.
    pub fn view(&self, criteria: &FilterCriteria) -> Option<FilteredView> {
        self.current().map(|set| FilteredView::new(set, criteria))
    }
}

/// One filtered view over a result set, with its counts.
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub set: Arc<ResultSet>,
    pub criteria: FilterCriteria,
    pub records: Vec<Record>,
    pub stats: Stats,
}

impl FilteredView {
    pub fn new(set: Arc<ResultSet>, criteria: &FilterCriteria) -> Self {
        let records = apply(&set.records, criteria);
        let stats = summarize(&records);
        FilteredView {
            set,
            criteria: criteria.clone(),
            records,
            stats,
        }
    }

    /// Ids of the retained records, in order.
    pub fn ids(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn render_original(&self, exporter: &CsvExporter) -> AnalyzerResult<Option<String>> {
        exporter.render_original(&self.set.raw_records, &self.set.columns, &self.ids())
    }

    pub fn render_display(&self, exporter: &CsvExporter) -> AnalyzerResult<Option<String>> {
        exporter.render_display(&self.records)
    }

    pub fn export_original(&self, exporter: &CsvExporter, output: &Path) -> AnalyzerResult<Option<PathBuf>> {
        exporter.export_original(&self.set.raw_records, &self.set.columns, &self.ids(), output)
    }

    pub fn export_display(&self, exporter: &CsvExporter, output: &Path) -> AnalyzerResult<Option<PathBuf>> {
        exporter.export_display(&self.records, output)
    }
}
