//! Spreadsheet export encoder.
//!
//! Renders the record collection into a single-sheet workbook via
//! `rust_xlsxwriter`, with the same column-header contract as the CSV
//! encoder.

use super::{cell_text, check_columns, header_columns};
use crate::models::Row;
use crate::{Error, Result};
use rust_xlsxwriter::{Format, Workbook};

/// Worksheet name for the single tabular sheet.
const SHEET_NAME: &str = "Sheet1";

/// Encodes rows as a single-sheet XLSX workbook.
///
/// # Errors
///
/// - [`Error::EmptyInput`] on zero rows.
/// - [`Error::Format`] if a record's column set differs from the header.
/// - [`Error::OperationFailed`] if the workbook writer fails.
pub fn encode(rows: &[Row]) -> Result<Vec<u8>> {
    let headers = header_columns(rows)?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(SHEET_NAME)
        .map_err(|e| Error::operation("name_worksheet", e))?;

    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        let col = column_index(col)?;
        sheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| Error::operation("write_xlsx_header", e))?;
    }

    for (i, row) in rows.iter().enumerate() {
        check_columns(&headers, row, i)?;
        let row_index = u32::try_from(i + 1)
            .map_err(|_| Error::InvalidInput("too many rows for a worksheet".to_string()))?;
        for (col, header) in headers.iter().enumerate() {
            let col = column_index(col)?;
            let cell = row.get(*header).map(cell_text).unwrap_or_default();
            sheet
                .write_string(row_index, col, cell)
                .map_err(|e| Error::operation("write_xlsx_cell", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::operation("save_xlsx", e))
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col)
        .map_err(|_| Error::InvalidInput("too many columns for a worksheet".to_string()))
}
