//! CSV roster import.
//!
//! Parses an externally supplied delimited-text file into validated
//! records. Structural failures (unreadable file, unusable header row)
//! abort the whole import; malformed individual rows only exclude
//! themselves and are reported in the result.

use crate::io::validation::{validate_row, RowCandidate, RowError, RowOutcome};
use crate::models::Record;
use crate::{Error, Result};
use std::path::Path;

/// Maps CSV column indices to record fields.
///
/// Header matching is alias-tolerant: legacy roster exports use Spanish
/// column names and `createdAt` casing.
#[derive(Debug, Default)]
struct ColumnMap {
    name: Option<usize>,
    email: Option<usize>,
    role: Option<usize>,
    created_at: Option<usize>,
}

impl ColumnMap {
    /// Creates a column map from CSV headers.
    ///
    /// `name` and `email` columns are required; a header row without both
    /// is structural, since no row could ever validate.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut map = Self::default();

        for (i, header) in headers.iter().enumerate() {
            match header.to_lowercase().as_str() {
                "name" | "nombre" => map.name = Some(i),
                "email" | "correo" | "mail" => map.email = Some(i),
                "role" | "rol" => map.role = Some(i),
                "created_at" | "createdat" | "created" | "fecha" => map.created_at = Some(i),
                _ => {}, // Ignore unknown columns
            }
        }

        if map.name.is_none() || map.email.is_none() {
            return Err(Error::Parse(
                "header row must have 'name' and 'email' columns".to_string(),
            ));
        }

        Ok(map)
    }

    /// Builds a candidate row using the header-to-value mapping.
    fn candidate(&self, record: &csv::StringRecord) -> RowCandidate {
        let get_field = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        RowCandidate {
            name: get_field(self.name),
            email: get_field(self.email),
            role: get_field(self.role),
            created_at: get_field(self.created_at),
        }
    }
}

/// Result of an import: the valid subset plus everything excluded.
///
/// Invariant: `records.len() + errors.len() == total_rows`, so no row is
/// dropped without being counted.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Validated records, in file order.
    pub records: Vec<Record>,
    /// Per-row failures, non-fatal.
    pub errors: Vec<RowError>,
    /// Defaulting notices (missing role or timestamp).
    pub warnings: Vec<String>,
    /// Total data rows in the file.
    pub total_rows: usize,
}

impl ImportReport {
    /// Returns whether any rows were excluded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns whether any records were accepted.
    #[must_use]
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Parses CSV bytes into validated records.
///
/// The first row is the header. Missing `role` defaults to student and
/// missing `created_at` to the parse-time timestamp, both reported as
/// warnings. Rows without a `name` or `email` (after trimming) are
/// excluded and recorded in `errors`.
///
/// # Errors
///
/// Returns [`Error::Parse`] on structural failure: an empty file, an
/// unreadable header, or a header without the required columns. Row-level
/// problems never produce an `Err`.
pub fn import_csv(bytes: &[u8]) -> Result<ImportReport> {
    if bytes.is_empty() {
        return Err(Error::Parse("file is empty".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow varying number of fields per row
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| Error::Parse(format!("could not read header row: {e}")))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let fallback_created_at = crate::current_timestamp();
    let mut report = ImportReport::default();

    for (i, row) in reader.records().enumerate() {
        let row_number = i + 1;
        report.total_rows += 1;

        let record = match row {
            Ok(record) => record,
            Err(e) => {
                report.errors.push(RowError::new(
                    row_number,
                    "row",
                    format!("unreadable row: {e}"),
                ));
                continue;
            },
        };

        match validate_row(row_number, columns.candidate(&record), &fallback_created_at) {
            RowOutcome::Valid { record, warnings } => {
                report.records.push(record);
                report.warnings.extend(warnings);
            },
            RowOutcome::Invalid(err) => report.errors.push(err),
        }
    }

    debug_assert_eq!(
        report.records.len() + report.errors.len(),
        report.total_rows
    );
    tracing::info!(
        accepted = report.records.len(),
        excluded = report.errors.len(),
        "roster import complete"
    );

    Ok(report)
}

/// Reads and imports a CSV file from disk.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the file cannot be read, plus
/// everything [`import_csv`] can return.
pub fn import_csv_file(path: &Path) -> Result<ImportReport> {
    let bytes =
        std::fs::read(path).map_err(|e| Error::operation("read_import_file", e))?;
    import_csv(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_import_basic_csv() {
        let input = b"name,email,role,created_at\n\
            Maria,maria@inst.example,student,2024-01-01T00:00:00Z\n\
            Juan,juan@inst.example,teacher,2024-02-01T00:00:00Z\n";

        let report = import_csv(input).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.records.len(), 2);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.records[1].role, Role::Teacher);
    }

    #[test]
    fn test_import_legacy_spanish_headers() {
        let input = b"nombre,email,rol,createdAt\n\
            Maria,maria@inst.example,estudiante,2024-01-01T00:00:00Z\n";

        let report = import_csv(input).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "Maria");
        assert_eq!(report.records[0].role, Role::Student);
    }

    #[test]
    fn test_row_with_empty_email_is_excluded_not_fatal() {
        let input = b"name,email\n\
            A,a@inst.example\n\
            B,b@inst.example\n\
            C,   \n\
            D,d@inst.example\n\
            E,e@inst.example\n";

        let report = import_csv(input).unwrap();
        assert_eq!(report.total_rows, 5);
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 3);
        assert_eq!(report.errors[0].field, "email");
    }

    #[test]
    fn test_defaults_are_reported_as_warnings() {
        let input = b"name,email\nA,a@inst.example\n";

        let report = import_csv(input).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].role, Role::Student);
        assert!(!report.records[0].created_at.is_empty());
        // One warning for the defaulted role, one for the timestamp.
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_missing_required_columns_is_structural() {
        let input = b"name,phone\nA,555-0100\n";
        assert!(matches!(import_csv(input), Err(Error::Parse(_))));
    }

    #[test]
    fn test_empty_file_is_structural() {
        assert!(matches!(import_csv(b""), Err(Error::Parse(_))));
    }

    #[test]
    fn test_counts_always_reconcile() {
        let input = b"name,email\nA,a@x.example\n,missing@x.example\nB,\n";
        let report = import_csv(input).unwrap();
        assert_eq!(
            report.records.len() + report.errors.len(),
            report.total_rows
        );
    }
}
