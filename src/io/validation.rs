//! Per-row import validation.
//!
//! Validation is an explicit function from a raw row candidate to a typed
//! outcome: a valid [`Record`] (with any defaulting noted as warnings) or
//! a [`RowError`]. Row failures are collected by the importer, never
//! thrown; a bad row can only exclude itself.

use crate::models::{Record, Role};

/// A non-fatal, per-row import failure.
///
/// Collected alongside the valid subset so the caller can decide whether
/// a partial import is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-indexed data row (the header row is not counted).
    pub row: usize,
    /// The field that failed validation.
    pub field: &'static str,
    /// Description of the failure.
    pub message: String,
}

impl RowError {
    /// Creates a row error.
    #[must_use]
    pub fn new(row: usize, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            row,
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.field, self.message)
    }
}

/// Raw field values for one data row, after header mapping.
///
/// Fields are `None` when the column is absent or the cell is empty after
/// trimming.
#[derive(Debug, Clone, Default)]
pub struct RowCandidate {
    /// Candidate name.
    pub name: Option<String>,
    /// Candidate email.
    pub email: Option<String>,
    /// Candidate role string, not yet parsed.
    pub role: Option<String>,
    /// Candidate creation timestamp.
    pub created_at: Option<String>,
}

/// Outcome of validating one candidate row.
#[derive(Debug, Clone)]
pub enum RowOutcome {
    /// The row produced a record; `warnings` notes any applied defaults.
    Valid {
        /// The validated record.
        record: Record,
        /// Defaults applied while building the record.
        warnings: Vec<String>,
    },
    /// The row is excluded from the import.
    Invalid(RowError),
}

/// Validates a candidate row.
///
/// A candidate is valid iff `name` and `email` are both present (the
/// importer already trims and drops empty cells). A missing role defaults
/// to [`Role::Student`] and a missing timestamp to `fallback_created_at`;
/// each applied default is reported as a warning rather than silently
/// absorbed, so callers can surface them.
#[must_use]
pub fn validate_row(row: usize, candidate: RowCandidate, fallback_created_at: &str) -> RowOutcome {
    let Some(name) = candidate.name else {
        return RowOutcome::Invalid(RowError::new(row, "name", "name is required"));
    };
    let Some(email) = candidate.email else {
        return RowOutcome::Invalid(RowError::new(row, "email", "email is required"));
    };

    let mut warnings = Vec::new();

    let role = match candidate.role {
        Some(ref raw) => Role::parse(raw).unwrap_or_else(|| {
            warnings.push(format!("row {row}: unknown role '{raw}', defaulted to student"));
            Role::Student
        }),
        None => {
            warnings.push(format!("row {row}: role missing, defaulted to student"));
            Role::Student
        },
    };

    let created_at = candidate.created_at.unwrap_or_else(|| {
        warnings.push(format!("row {row}: created_at missing, defaulted to import time"));
        fallback_created_at.to_string()
    });

    RowOutcome::Valid {
        record: Record {
            name,
            email,
            role,
            created_at,
        },
        warnings,
    }
}
