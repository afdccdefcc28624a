//! Lookup result models.

use serde::{Deserialize, Serialize};

use crate::order::{ForecastValue, OrderRecord, WorksheetTab};

/// A selected row, reduced to the fields shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupMatch {
    pub tab: WorksheetTab,
    pub product: String,
    pub quantity: f64,
    pub forecast: ForecastValue,
}

impl LookupMatch {
    pub const MISSING_PRODUCT: &'static str = "N/A";

    pub fn from_record(record: &OrderRecord) -> Self {
        let product = record
            .product
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(Self::MISSING_PRODUCT)
            .to_string();

        Self {
            tab: record.tab,
            product,
            quantity: record.quantity.unwrap_or(0.0),
            forecast: record.forecast.clone(),
        }
    }
}

/// Kind of a lookup result, independent of how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The query was blank; the source was not read.
    EmptyQuery,
    NotFound,
    Single,
    Multiple,
    SourceNotFound,
    ProcessingError,
}

impl LookupOutcome {
    pub fn from_match_count(count: usize) -> Self {
        match count {
            0 => Self::NotFound,
            1 => Self::Single,
            _ => Self::Multiple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::NotFound => "not_found",
            Self::Single => "single",
            Self::Multiple => "multiple",
            Self::SourceNotFound => "source_not_found",
            Self::ProcessingError => "processing_error",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::SourceNotFound | Self::ProcessingError)
    }
}

/// Everything produced by one lookup call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupReport {
    pub outcome: LookupOutcome,
    /// The query as typed, trimmed.
    pub query: String,
    pub matches: Vec<LookupMatch>,
    /// Rendered light markup shown to the user.
    pub message: String,
    /// Operator-facing error text. Never part of `message`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_detail: Option<String>,
}
