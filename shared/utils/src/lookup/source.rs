//! Order spreadsheet reader.
//!
//! Opens the workbook with calamine and turns each known tab into typed
//! [`OrderRecord`]s. The header row decides which optional columns exist.

use calamine::{open_workbook_auto, Data, OdsError, Range, Reader, Sheets, XlsError, XlsbError, XlsxError};
use prazos_models::{OrderRecord, WorksheetTab};
use std::fs::File;
use std::io::{self, BufReader, ErrorKind};
use std::path::Path;
use tracing::debug;

use super::matcher::{cell_forecast, cell_quantity, cell_text, coerce_order_number};
use crate::error::{PrazosError, PrazosResult};

pub const ORDER_NUMBER_COLUMN: &str = "Número do Pedido";
pub const SF_ORDER_NUMBER_COLUMN: &str = "Número do Pedido SF";
pub const PRODUCT_COLUMN: &str = "Produto";
pub const QUANTITY_COLUMN: &str = "Quantidade";
pub const FORECAST_COLUMN: &str = "Prazo";

/// Anything that can hand out the rows of a tab.
pub trait OrderSource {
    fn read_tab(&mut self, tab: WorksheetTab) -> PrazosResult<Vec<OrderRecord>>;
}

/// A workbook opened from disk for the duration of one lookup.
pub struct SpreadsheetSource {
    workbook: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl SpreadsheetSource {
    /// Open the workbook. A missing or unreadable file is `SourceNotFound`;
    /// a file that is there but cannot be decoded is a workbook error.
    pub fn open(path: &Path) -> PrazosResult<Self> {
        let display = path.display().to_string();

        if !std::fs::metadata(path).is_ok_and(|meta| meta.is_file()) {
            return Err(PrazosError::source_not_found(display));
        }

        // The file can still vanish before calamine opens it.
        let workbook = open_workbook_auto(path).map_err(|err| {
            if is_missing_file(&err) {
                PrazosError::source_not_found(display.clone())
            } else {
                PrazosError::from(err)
            }
        })?;
        let sheet_names = workbook.sheet_names();

        let extra: Vec<&str> = sheet_names
            .iter()
            .map(String::as_str)
            .filter(|name| WorksheetTab::from_label(name).is_none())
            .collect();
        debug!(path = %path.display(), sheets = sheet_names.len(), ignored = ?extra, "Opened order spreadsheet");
        Ok(Self {
            workbook,
            sheet_names,
        })
    }
}

/// The I/O failure behind a calamine error, whichever format reader raised it.
fn io_error(err: &calamine::Error) -> Option<&io::Error> {
    match err {
        calamine::Error::Io(e)
        | calamine::Error::Xlsx(XlsxError::Io(e))
        | calamine::Error::Xls(XlsError::Io(e))
        | calamine::Error::Xlsb(XlsbError::Io(e))
        | calamine::Error::Ods(OdsError::Io(e)) => Some(e),
        _ => None,
    }
}

fn is_missing_file(err: &calamine::Error) -> bool {
    io_error(err).is_some_and(|e| matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied))
}

impl OrderSource for SpreadsheetSource {
    fn read_tab(&mut self, tab: WorksheetTab) -> PrazosResult<Vec<OrderRecord>> {
        let label = tab.label();
        if !self.sheet_names.iter().any(|name| name == label) {
            return Err(PrazosError::sheet_not_found(label));
        }

        let range = self.workbook.worksheet_range(label)?;
        records_from_range(tab, &range)
    }
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    order_number: usize,
    sf_order_number: Option<usize>,
    product: Option<usize>,
    quantity: Option<usize>,
    forecast: Option<usize>,
}

impl ColumnMap {
    fn from_header(tab: WorksheetTab, header: &[Data]) -> PrazosResult<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.trim() == name))
        };

        let order_number = find(ORDER_NUMBER_COLUMN)
            .ok_or_else(|| PrazosError::missing_column(tab.label(), ORDER_NUMBER_COLUMN))?;

        Ok(Self {
            order_number,
            sf_order_number: find(SF_ORDER_NUMBER_COLUMN),
            product: find(PRODUCT_COLUMN),
            quantity: find(QUANTITY_COLUMN),
            forecast: find(FORECAST_COLUMN),
        })
    }
}

/// Convert a worksheet range into records. The first row is the header.
pub fn records_from_range(tab: WorksheetTab, range: &Range<Data>) -> PrazosResult<Vec<OrderRecord>> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| PrazosError::missing_column(tab.label(), ORDER_NUMBER_COLUMN))?;
    let columns = ColumnMap::from_header(tab, header)?;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let empty = Data::Empty;

    let records = rows
        .enumerate()
        .map(|(idx, row)| {
            let cell = |col: Option<usize>| col.and_then(|c| row.get(c)).unwrap_or(&empty);

            OrderRecord {
                tab,
                // header is row first_row + 1, data starts one below it
                row_number: first_row + idx + 2,
                order_number: coerce_order_number(cell(Some(columns.order_number))),
                sf_order_number: columns
                    .sf_order_number
                    .map(|c| coerce_order_number(cell(Some(c)))),
                product: cell_text(cell(columns.product)),
                quantity: cell_quantity(cell(columns.quantity)),
                forecast: cell_forecast(cell(columns.forecast)),
            }
        })
        .collect();

    Ok(records)
}
