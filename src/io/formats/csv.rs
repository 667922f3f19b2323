//! CSV export encoder.
//!
//! Delegates quoting to the `csv` crate: values containing the delimiter,
//! quote character, or newlines are quoted with internal quotes doubled,
//! so the output round-trips through any compliant CSV parser.

use super::{cell_text, check_columns, header_columns};
use crate::models::Row;
use crate::{Error, Result};

/// Encodes rows as CSV bytes.
///
/// The header row is the column set of the first record in insertion
/// order; every subsequent record supplies values in the same column
/// order.
///
/// # Errors
///
/// - [`Error::EmptyInput`] on zero rows.
/// - [`Error::Format`] if a record's column set differs from the header.
pub fn encode(rows: &[Row]) -> Result<Vec<u8>> {
    let headers = header_columns(rows)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&headers)
        .map_err(|e| Error::operation("write_csv_header", e))?;

    for (i, row) in rows.iter().enumerate() {
        check_columns(&headers, row, i)?;
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(cell_text).unwrap_or_default())
            .collect();
        writer
            .write_record(&cells)
            .map_err(|e| Error::operation("write_csv_row", e))?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::operation("flush_csv", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, Role};

    fn rows() -> Vec<Row> {
        vec![
            Record::new("María", "maria@inst.example", Role::Student)
                .with_created_at("2024-01-01T00:00:00Z")
                .to_row(),
            Record::new("Juan", "juan@inst.example", Role::Teacher)
                .with_created_at("2024-02-01T00:00:00Z")
                .to_row(),
        ]
    }

    #[test]
    fn test_header_comes_from_first_record() {
        let bytes = encode(&rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("name,email,role,created_at"));
        assert!(text.contains("juan@inst.example"));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(encode(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_heterogeneous_rows_are_a_format_error() {
        let mut rows = rows();
        rows[1].remove("email");

        match encode(&rows).unwrap_err() {
            Error::Format { row, .. } => assert_eq!(row, 2),
            other => panic!("expected Format error, got {other}"),
        }
    }

    #[test]
    fn test_embedded_delimiters_are_quoted() {
        let record = Record::new("García, María \"Mari\"", "m@inst.example", Role::Student)
            .with_created_at("2024-01-01T00:00:00Z");
        let bytes = encode(&[record.to_row()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"García, María \"\"Mari\"\"\""));
    }

    #[test]
    fn test_output_parses_back() {
        let bytes = encode(&rows()).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let parsed: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(&parsed[0][0], "María");
        assert_eq!(&parsed[1][2], "teacher");
    }
}
