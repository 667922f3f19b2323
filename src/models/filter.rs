//! Roster filtering.
//!
//! The dashboard derives a filtered subset of the roster from a search box
//! and a role selector; that derivation is expressed here as an explicit
//! value type so the filtered collection handed to [`crate::paginate`] is
//! reproducible from inputs alone.

use super::record::{Record, Role};

/// Filter criteria over a roster collection.
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    /// Case-insensitive substring matched against name and email.
    pub search: Option<String>,
    /// Restrict to a single role.
    pub role: Option<Role>,
}

impl RosterFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restricts the filter to a role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Returns whether the filter has no criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.role.is_none()
    }

    /// Returns whether a record matches the filter.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(role) = self.role {
            if record.role != role {
                return false;
            }
        }

        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            if term.is_empty() {
                return true;
            }
            return record.name.to_lowercase().contains(&term)
                || record.email.to_lowercase().contains(&term);
        }

        true
    }

    /// Applies the filter, producing a new collection.
    ///
    /// The input is never mutated; record order is preserved.
    #[must_use]
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}
