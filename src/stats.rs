//! Roster aggregation for the dashboard's summary cards and charts.
//!
//! Only the data shaping lives here; rendering belongs to the dashboard's
//! charting layer.

use crate::models::{Record, Role};
use chrono::DateTime;
use std::collections::BTreeMap;

/// Aggregated counts over a roster collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterStats {
    /// Total records.
    pub total: usize,
    /// Records with the student role.
    pub students: usize,
    /// Records with the teacher role.
    pub teachers: usize,
    /// Records with the admin role.
    pub admins: usize,
    /// Registrations per month (`YYYY-MM`, count), in chronological order.
    ///
    /// Records whose `created_at` is not a parseable RFC 3339 timestamp are
    /// counted in the totals but excluded from the monthly series.
    pub registrations_by_month: Vec<(String, usize)>,
}

impl RosterStats {
    /// Computes statistics over a record collection.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            match record.role {
                Role::Student => stats.students += 1,
                Role::Teacher => stats.teachers += 1,
                Role::Admin => stats.admins += 1,
            }

            match DateTime::parse_from_rfc3339(&record.created_at) {
                Ok(ts) => {
                    *by_month.entry(ts.format("%Y-%m").to_string()).or_insert(0) += 1;
                },
                Err(_) => {
                    tracing::debug!(
                        created_at = %record.created_at,
                        "skipping record with unparseable timestamp in monthly series"
                    );
                },
            }
        }

        stats.registrations_by_month = by_month.into_iter().collect();
        stats
    }
}
