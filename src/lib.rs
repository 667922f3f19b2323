//! # Aula
//!
//! Tabular data core for a school administration dashboard.
//!
//! Aula implements the pieces of the "Instituto / Bellas Artes" admin panel
//! that are independent of the backing document store: export of roster
//! records to CSV, XLSX, and PDF byte streams, import of delimited-text
//! files with per-row validation, and deterministic pagination over a
//! filtered record collection.
//!
//! Authentication, persistence, and chart rendering remain external
//! collaborators; this crate only receives and returns plain record
//! sequences at its boundary.
//!
//! ## Example
//!
//! ```rust
//! use aula::{paginate, Record, Role};
//!
//! let roster: Vec<Record> = (0..14)
//!     .map(|i| Record::new(format!("User {i}"), format!("u{i}@inst.example"), Role::Student))
//!     .collect();
//!
//! let page = paginate(&roster, 6, 3).unwrap();
//! assert_eq!(page.total_pages, 3);
//! assert_eq!(page.items.len(), 2);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod page;
pub mod stats;

// Re-exports for convenience
pub use config::AulaConfig;
pub use io::export::{export_filename, export_records, DirectorySink, DownloadSink, ExportArtifact};
pub use io::formats::ExportFormat;
pub use io::import::{import_csv, ImportReport};
pub use io::validation::RowError;
pub use models::{Record, Role, RosterFilter, Row};
pub use page::{paginate, Page, Pager};
pub use stats::RosterStats;

/// Error type for aula operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `EmptyInput` | Exporting a collection with zero records |
/// | `Format` | A record's column set differs from the export header |
/// | `Parse` | An import file is structurally unreadable (bad header, empty file) |
/// | `InvalidInput` | Unknown format names, zero page size, bad configuration |
/// | `OperationFailed` | I/O errors, encoder failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The export input contained no records.
    ///
    /// Raised instead of producing a blank file so the caller can tell the
    /// user there was nothing to export.
    #[error("nothing to export: the record collection is empty")]
    EmptyInput,

    /// A record did not match the export header.
    ///
    /// Export encoders derive the column set from the first record; every
    /// subsequent record must carry exactly the same columns.
    #[error("record {row} does not match the export header: {detail}")]
    Format {
        /// 1-indexed position of the offending record.
        row: usize,
        /// Description of the column mismatch.
        detail: String,
    },

    /// An import file could not be parsed at all.
    ///
    /// Structural failures (unreadable file, missing header row) abort the
    /// whole import, since no rows can be trusted. Distinct from row-level
    /// validation failures, which are collected as [`io::validation::RowError`].
    #[error("could not parse import file: {0}")]
    Parse(String),

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A format string is not one of `csv`, `xlsx`, `pdf`
    /// - A page size of zero is requested
    /// - Configuration values are malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when filesystem I/O or a format encoder fails.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Shorthand for [`Error::OperationFailed`].
    pub(crate) fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for aula operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current UTC timestamp as an RFC 3339 string.
///
/// Centralized so the import defaulting path and the export filename helper
/// agree on one timestamp format.
///
/// # Examples
///
/// ```rust
/// let ts = aula::current_timestamp();
/// assert!(ts.ends_with('Z'));
/// ```
#[must_use]
pub fn current_timestamp() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyInput;
        assert_eq!(
            err.to_string(),
            "nothing to export: the record collection is empty"
        );

        let err = Error::Format {
            row: 3,
            detail: "missing column 'email'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "record 3 does not match the export header: missing column 'email'"
        );

        let err = Error::operation("write_csv", "disk full");
        assert_eq!(err.to_string(), "operation 'write_csv' failed: disk full");
    }

    #[test]
    fn test_current_timestamp_is_rfc3339() {
        let ts = current_timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
