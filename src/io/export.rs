//! Roster export orchestration.
//!
//! Dispatches a record collection to one of the format encoders and pairs
//! the resulting byte stream with a timestamped filename and MIME type.
//! Encoding is pure; presenting the bytes to the user is the separate
//! [`DownloadSink`] side effect, so it can be stubbed in tests.

use crate::io::formats::{self, ExportFormat};
use crate::models::{Record, Row};
use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

/// A fully encoded export, ready to hand to a [`DownloadSink`].
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Suggested filename, `<base>_<timestamp>.<ext>`.
    pub filename: String,
    /// MIME type for the download.
    pub mime_type: &'static str,
}

/// Builds the export filename for a base name and format.
///
/// Pure function of its inputs: `<base>_<ISO-8601 timestamp>.<ext>`, with
/// colons replaced so the name stays valid on every filesystem.
#[must_use]
pub fn export_filename(base: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    let timestamp = at
        .to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace(':', "-");
    format!("{base}_{timestamp}.{}", format.extension())
}

/// Encodes pre-shaped rows in the given format.
///
/// For PDF the column order is taken from the first row's key order; use
/// [`formats::pdf::encode`] directly to supply an explicit header order.
///
/// # Errors
///
/// Propagates the encoder errors: [`Error::EmptyInput`] on zero rows,
/// [`Error::Format`] on column-heterogeneous input.
pub fn encode_rows(rows: &[Row], format: ExportFormat, title: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => formats::csv::encode(rows),
        ExportFormat::Xlsx => formats::xlsx::encode(rows),
        ExportFormat::Pdf => {
            let headers: Vec<String> = rows
                .first()
                .ok_or(Error::EmptyInput)?
                .keys()
                .cloned()
                .collect();
            formats::pdf::encode(rows, title, &headers)
        },
    }
}

/// Exports a record collection, producing bytes plus download metadata.
///
/// The collection is only read, never mutated; duplicates pass through
/// unchanged.
///
/// # Errors
///
/// - [`Error::EmptyInput`] on an empty collection.
/// - Encoder failures, see [`encode_rows`].
pub fn export_records(
    records: &[Record],
    format: ExportFormat,
    base_name: &str,
) -> Result<ExportArtifact> {
    let rows: Vec<Row> = records.iter().map(Record::to_row).collect();
    let bytes = encode_rows(&rows, format, base_name)?;

    tracing::debug!(
        records = records.len(),
        %format,
        size = bytes.len(),
        "roster export encoded"
    );

    Ok(ExportArtifact {
        bytes,
        filename: export_filename(base_name, format, Utc::now()),
        mime_type: format.mime_type(),
    })
}

/// Presents a named byte stream to the user as a file download.
///
/// The dashboard shell implements this against the browser; tests and the
/// CLI use [`DirectorySink`].
pub trait DownloadSink {
    /// Delivers the bytes under the given filename.
    ///
    /// # Errors
    ///
    /// Returns an error if the download cannot be presented.
    fn deliver(&mut self, bytes: &[u8], filename: &str, mime_type: &str) -> Result<()>;
}

/// A [`DownloadSink`] that writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path a filename would be written to.
    #[must_use]
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, bytes: &[u8], filename: &str, _mime_type: &str) -> Result<()> {
        let path = self.path_for(filename);
        write_file(&path, bytes)?;
        tracing::info!(path = %path.display(), size = bytes.len(), "export written");
        Ok(())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| Error::operation("write_export_file", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::TimeZone;

    fn roster() -> Vec<Record> {
        vec![
            Record::new("María", "maria@inst.example", Role::Student)
                .with_created_at("2024-01-01T00:00:00Z"),
            Record::new("Juan", "juan@inst.example", Role::Teacher)
                .with_created_at("2024-02-01T00:00:00Z"),
        ]
    }

    #[test]
    fn test_export_filename_pattern() {
        let at = Utc.with_ymd_and_hms(2024, 5, 4, 12, 30, 15).unwrap();
        assert_eq!(
            export_filename("usuarios", ExportFormat::Csv, at),
            "usuarios_2024-05-04T12-30-15Z.csv"
        );
        assert_eq!(
            export_filename("usuarios", ExportFormat::Pdf, at),
            "usuarios_2024-05-04T12-30-15Z.pdf"
        );
    }

    #[test]
    fn test_export_records_sets_download_metadata() {
        let artifact = export_records(&roster(), ExportFormat::Csv, "usuarios").unwrap();
        assert!(artifact.filename.starts_with("usuarios_"));
        assert!(artifact.filename.ends_with(".csv"));
        assert_eq!(artifact.mime_type, "text/csv");
        assert!(!artifact.bytes.is_empty());
    }

    #[test]
    fn test_export_empty_collection_fails() {
        for format in ExportFormat::all() {
            assert!(matches!(
                export_records(&[], *format, "usuarios"),
                Err(Error::EmptyInput)
            ));
        }
    }

    #[test]
    fn test_directory_sink_writes_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());

        let artifact = export_records(&roster(), ExportFormat::Csv, "usuarios").unwrap();
        sink.deliver(&artifact.bytes, &artifact.filename, artifact.mime_type)
            .unwrap();

        let written = std::fs::read(dir.path().join(&artifact.filename)).unwrap();
        assert_eq!(written, artifact.bytes);
    }

    /// A sink that records calls instead of performing them.
    #[derive(Default)]
    struct RecordingSink {
        deliveries: Vec<(String, String)>,
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&mut self, _bytes: &[u8], filename: &str, mime_type: &str) -> Result<()> {
            self.deliveries
                .push((filename.to_string(), mime_type.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_download_is_a_separately_invokable_side_effect() {
        let artifact = export_records(&roster(), ExportFormat::Xlsx, "usuarios").unwrap();

        let mut sink = RecordingSink::default();
        sink.deliver(&artifact.bytes, &artifact.filename, artifact.mime_type)
            .unwrap();

        assert_eq!(sink.deliveries.len(), 1);
        assert!(sink.deliveries[0].0.ends_with(".xlsx"));
        assert!(sink.deliveries[0].1.contains("spreadsheetml"));
    }
}
