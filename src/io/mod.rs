//! Import and export of roster data.
//!
//! Export encoders turn an in-memory record collection into CSV, XLSX, or
//! PDF byte streams; the importer parses delimited-text files into
//! validated records, degrading to per-row filtering on bad rows.

pub mod export;
pub mod formats;
pub mod import;
pub mod validation;
