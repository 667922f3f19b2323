//! CLI command implementations.
//!
//! Each command reads a roster CSV (the hand-off format from the
//! dashboard's document store) and performs one core operation on it.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `export` | Encode the roster as CSV, XLSX, or PDF and write it out |
//! | `import` | Validate a roster file and report accepted/excluded rows |
//! | `list` | Show one page of the (optionally filtered) roster |
//! | `stats` | Show role totals and registrations per month |

#![allow(clippy::print_stdout)]

use crate::config::AulaConfig;
use crate::io::export::{export_records, DirectorySink, DownloadSink};
use crate::io::formats::ExportFormat;
use crate::io::import::import_csv_file;
use crate::models::RosterFilter;
use crate::page::paginate;
use crate::stats::RosterStats;
use crate::Result;
use std::path::Path;

/// Exports a roster file in the given format.
///
/// Rows that fail validation while reading the input are logged and
/// excluded; the export covers the valid subset.
pub fn export(
    config: &AulaConfig,
    input: &Path,
    format: ExportFormat,
    output: Option<&Path>,
    name: Option<&str>,
) -> Result<()> {
    let report = import_csv_file(input)?;
    for error in &report.errors {
        tracing::warn!(%error, "skipping invalid roster row");
    }

    let base = name.unwrap_or(&config.export_base);
    let artifact = export_records(&report.records, format, base)?;

    let dir = output.unwrap_or(&config.export_dir);
    let mut sink = DirectorySink::new(dir);
    sink.deliver(&artifact.bytes, &artifact.filename, artifact.mime_type)?;

    println!(
        "exported {} records to {}",
        report.records.len(),
        sink.path_for(&artifact.filename).display()
    );
    Ok(())
}

/// Validates a roster file and prints the import report.
pub fn import(input: &Path) -> Result<()> {
    let report = import_csv_file(input)?;

    println!(
        "{} of {} rows accepted",
        report.records.len(),
        report.total_rows
    );
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for error in &report.errors {
        println!("excluded: {error}");
    }
    Ok(())
}

/// Prints one page of the filtered roster.
pub fn list(
    config: &AulaConfig,
    input: &Path,
    requested_page: usize,
    page_size: Option<usize>,
    filter: &RosterFilter,
) -> Result<()> {
    let report = import_csv_file(input)?;
    let filtered = filter.apply(&report.records);

    let page_size = page_size.unwrap_or(config.page_size);
    let page = paginate(&filtered, page_size, requested_page)?;

    for record in page.items {
        println!(
            "{:<24} {:<32} {:<8} {}",
            record.name, record.email, record.role, record.created_at
        );
    }
    println!(
        "page {} of {} ({} of {} users)",
        page.page_number,
        page.total_pages,
        page.items.len(),
        filtered.len()
    );
    Ok(())
}

/// Prints roster statistics.
pub fn stats(input: &Path) -> Result<()> {
    let report = import_csv_file(input)?;
    let stats = RosterStats::from_records(&report.records);

    println!("total:    {}", stats.total);
    println!("students: {}", stats.students);
    println!("teachers: {}", stats.teachers);
    println!("admins:   {}", stats.admins);
    if !stats.registrations_by_month.is_empty() {
        println!("registrations by month:");
        for (month, count) in &stats.registrations_by_month {
            println!("  {month}  {count}");
        }
    }
    Ok(())
}
