//! Format encoders for export.
//!
//! Each format module exposes an `encode` function that is a pure function
//! of its inputs and produces a complete byte stream.

pub mod csv;
pub mod pdf;
pub mod xlsx;

use crate::models::Row;
use crate::{Error, Result};
use std::path::Path;
use std::str::FromStr;

/// Supported export formats.
///
/// A closed enumeration: format dispatch is compile-time checked, adding
/// or removing a format is an exhaustiveness concern, not a string match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// Single-sheet spreadsheet workbook.
    Xlsx,
    /// Paginated PDF table.
    Pdf,
}

impl ExportFormat {
    /// Returns all export formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Xlsx, Self::Pdf]
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// Returns the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            },
            Self::Pdf => "application/pdf",
        }
    }

    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the extension is not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            Some("pdf") => Ok(Self::Pdf),
            Some(ext) => Err(Error::InvalidInput(format!(
                "unsupported file extension: .{ext}"
            ))),
            None => Err(Error::InvalidInput(
                "cannot determine format: file has no extension".to_string(),
            )),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" | "spreadsheet" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(Error::InvalidInput(format!("unknown export format: {s}"))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Returns the column set of the first row, in insertion order.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] on zero rows.
pub(crate) fn header_columns(rows: &[Row]) -> Result<Vec<&str>> {
    let first = rows.first().ok_or(Error::EmptyInput)?;
    Ok(first.keys().map(String::as_str).collect())
}

/// Verifies that a row carries exactly the header's column set.
///
/// Callers must guarantee column-homogeneous input; a mismatch is a
/// [`Error::Format`] naming the offending record.
pub(crate) fn check_columns(headers: &[&str], row: &Row, index: usize) -> Result<()> {
    let missing: Vec<&str> = headers
        .iter()
        .filter(|h| !row.contains_key(**h))
        .copied()
        .collect();
    let extra: Vec<&str> = row
        .keys()
        .map(String::as_str)
        .filter(|k| !headers.contains(k))
        .collect();

    if missing.is_empty() && extra.is_empty() {
        return Ok(());
    }

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing columns [{}]", missing.join(", ")));
    }
    if !extra.is_empty() {
        parts.push(format!("unexpected columns [{}]", extra.join(", ")));
    }
    Err(Error::Format {
        row: index + 1,
        detail: parts.join("; "),
    })
}

/// Renders a row value as a cell string.
///
/// Strings pass through untouched; other JSON values use their compact
/// rendering, null becomes the empty cell.
pub(crate) fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn row(keys: &[&str]) -> Row {
        let mut row = Row::new();
        for k in keys {
            row.insert((*k).to_string(), Value::String("x".to_string()));
        }
        row
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!(
            "spreadsheet".parse::<ExportFormat>().unwrap(),
            ExportFormat::Xlsx
        );
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("roster.csv")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("roster.PDF")).unwrap(),
            ExportFormat::Pdf
        );
        assert!(ExportFormat::from_path(Path::new("roster.txt")).is_err());
        assert!(ExportFormat::from_path(Path::new("roster")).is_err());
    }

    #[test]
    fn test_header_columns_empty_input() {
        assert!(matches!(header_columns(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_check_columns_reports_missing_and_extra() {
        let headers = ["name", "email"];
        let bad = row(&["name", "phone"]);

        let err = check_columns(&headers, &bad, 2).unwrap_err();
        match err {
            Error::Format { row, detail } => {
                assert_eq!(row, 3);
                assert!(detail.contains("missing columns [email]"));
                assert!(detail.contains("unexpected columns [phone]"));
            },
            other => panic!("expected Format error, got {other}"),
        }
    }

    #[test]
    fn test_cell_text_renders_non_strings() {
        assert_eq!(cell_text(&Value::String("a,b".to_string())), "a,b");
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&serde_json::json!(42)), "42");
        assert_eq!(cell_text(&serde_json::json!(true)), "true");
    }
}
