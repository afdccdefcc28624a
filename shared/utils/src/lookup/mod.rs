//! Order Forecast Lookup
//!
//! Scans the five machine tabs of the order spreadsheet for an order number and
//! renders the production forecast of every matching row.
//!
//! The spreadsheet is opened fresh on every call. All failures are turned into
//! a [`LookupReport`]; nothing escapes to the caller.

pub mod formatter;
pub mod matcher;
pub mod source;

use chrono::{Local, NaiveDate};
use prazos_models::{LookupMatch, LookupOutcome, LookupReport, WorksheetTab};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ForecastConfig;
use crate::error::{PrazosError, PrazosResult};
use crate::log_error;

pub use formatter::render_matches;
pub use matcher::normalize_query;
pub use source::{OrderSource, SpreadsheetSource};

/// Collect the matches of an already-normalized query across all tabs, in tab
/// order then row order.
pub fn find_matches<S: OrderSource>(source: &mut S, normalized_query: &str) -> PrazosResult<Vec<LookupMatch>> {
    let mut matches = Vec::new();

    for tab in WorksheetTab::ALL {
        let records = source.read_tab(tab)?;
        for record in records.iter().filter(|record| record.matches(normalized_query)) {
            debug!(tab = %tab, row = record.row_number, query = %normalized_query, "Matched order row");
            matches.push(LookupMatch::from_record(record));
        }
    }

    Ok(matches)
}

/// Lookup bound to one spreadsheet path.
#[derive(Debug, Clone)]
pub struct OrderLookup {
    source_path: PathBuf,
    forecast: ForecastConfig,
}

impl OrderLookup {
    pub fn new(source_path: impl Into<PathBuf>, forecast: ForecastConfig) -> Self {
        Self {
            source_path: source_path.into(),
            forecast,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Run a lookup against today's local date.
    pub fn run(&self, query: &str) -> LookupReport {
        self.run_at(query, Local::now().date_naive())
    }

    /// Run a lookup with an explicit "today", used by the today-as-range variant.
    pub fn run_at(&self, query: &str, today: NaiveDate) -> LookupReport {
        if query.trim().is_empty() {
            return Self::empty_query_report();
        }

        let normalized = normalize_query(query);
        let result = SpreadsheetSource::open(&self.source_path)
            .and_then(|mut source| find_matches(&mut source, &normalized));

        self.report(query, &normalized, result, today)
    }

    /// Same as [`run_at`](Self::run_at) but against any [`OrderSource`].
    pub fn run_with<S: OrderSource>(&self, source: &mut S, query: &str, today: NaiveDate) -> LookupReport {
        if query.trim().is_empty() {
            return Self::empty_query_report();
        }

        let normalized = normalize_query(query);
        let result = find_matches(source, &normalized);
        self.report(query, &normalized, result, today)
    }

    fn empty_query_report() -> LookupReport {
        warn!("Rejected blank order query");
        LookupReport {
            outcome: LookupOutcome::EmptyQuery,
            query: String::new(),
            matches: Vec::new(),
            message: formatter::EMPTY_QUERY_MESSAGE.to_string(),
            technical_detail: None,
        }
    }

    fn report(
        &self,
        query: &str,
        normalized: &str,
        result: PrazosResult<Vec<LookupMatch>>,
        today: NaiveDate,
    ) -> LookupReport {
        let trimmed = query.trim().to_string();

        match result {
            Ok(matches) => {
                info!(
                    query = %normalized,
                    matches = matches.len(),
                    "Order lookup completed"
                );
                LookupReport {
                    outcome: LookupOutcome::from_match_count(matches.len()),
                    query: trimmed,
                    message: render_matches(query, &matches, &self.forecast, today),
                    matches,
                    technical_detail: None,
                }
            }
            Err(err @ PrazosError::SourceNotFound { .. }) => {
                log_error!(err, "Order spreadsheet not found", path = %self.source_path.display());
                LookupReport {
                    outcome: LookupOutcome::SourceNotFound,
                    query: trimmed,
                    matches: Vec::new(),
                    message: formatter::source_not_found_message(&self.source_path),
                    technical_detail: Some(err.to_string()),
                }
            }
            Err(err) => {
                log_error!(err, "Failed to read order spreadsheet", path = %self.source_path.display());
                LookupReport {
                    outcome: LookupOutcome::ProcessingError,
                    query: trimmed,
                    matches: Vec::new(),
                    message: formatter::PROCESSING_ERROR_MESSAGE.to_string(),
                    technical_detail: Some(err.to_string()),
                }
            }
        }
    }
}

/// Look up `order_query` in the spreadsheet at `source` and return the rendered text.
pub fn lookup(order_query: &str, source: &Path) -> String {
    OrderLookup::new(source, ForecastConfig::default())
        .run(order_query)
        .message
}
