//! Order domain models for the production-forecast lookup.
//!
//! This module defines the worksheet tabs known to the order spreadsheet and the
//! typed row read from each of them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named tab of the order spreadsheet, one per machine or process.
///
/// The set is closed: the spreadsheet is expected to carry exactly these five
/// sheets and they are always scanned in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorksheetTab {
    Fagor,
    Esquadros,
    Marafon,
    DivimecSlitter,
    DivimecRebaixamento,
}

impl WorksheetTab {
    /// All tabs in scan order.
    pub const ALL: [WorksheetTab; 5] = [
        WorksheetTab::Fagor,
        WorksheetTab::Esquadros,
        WorksheetTab::Marafon,
        WorksheetTab::DivimecSlitter,
        WorksheetTab::DivimecRebaixamento,
    ];

    /// Sheet name as it appears in the workbook.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fagor => "Fagor",
            Self::Esquadros => "Esquadros",
            Self::Marafon => "Marafon",
            Self::DivimecSlitter => "Divimec (Slitter)",
            Self::DivimecRebaixamento => "Divimec (Rebaixamento)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.label() == label)
    }
}

impl fmt::Display for WorksheetTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicted production date of a line item as read from the `Prazo` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ForecastValue {
    /// The cell held a date, or text that parses as one.
    Date(NaiveDate),
    /// The cell held something that is not a date; shown verbatim.
    Raw(String),
    /// Empty cell, or the sheet has no forecast column.
    Missing,
}

/// One row of a worksheet tab.
///
/// Order numbers are stored already coerced to integer text so that matching is
/// a plain string comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub tab: WorksheetTab,
    /// 1-based spreadsheet row, header included.
    pub row_number: usize,
    pub order_number: String,
    /// `None` when the tab has no `Número do Pedido SF` column.
    pub sf_order_number: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<f64>,
    pub forecast: ForecastValue,
}

impl OrderRecord {
    /// True when either order-number column equals the normalized query.
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.order_number == normalized_query
            || self
                .sf_order_number
                .as_deref()
                .is_some_and(|sf| sf == normalized_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(order: &str, sf: Option<&str>) -> OrderRecord {
        OrderRecord {
            tab: WorksheetTab::Fagor,
            row_number: 2,
            order_number: order.to_string(),
            sf_order_number: sf.map(str::to_string),
            product: Some("Chapa A".to_string()),
            quantity: Some(3.5),
            forecast: ForecastValue::Missing,
        }
    }

    #[test]
    fn test_tab_labels_round_trip() {
        for tab in WorksheetTab::ALL {
            assert_eq!(WorksheetTab::from_label(tab.label()), Some(tab));
        }
        assert_eq!(WorksheetTab::DivimecSlitter.to_string(), "Divimec (Slitter)");
        assert_eq!(WorksheetTab::from_label("fagor"), None);
    }

    #[test]
    fn test_matches_primary_or_secondary() {
        assert!(record("42", None).matches("42"));
        assert!(record("0", Some("42")).matches("42"));
        assert!(!record("41", Some("43")).matches("42"));
        assert!(!record("0", None).matches(""));
    }
}
