//! Deterministic windowing over a filtered collection.
//!
//! The dashboard used to keep collection, filter, and page as independent
//! pieces of interface state; here pagination is a pure function of
//! `(filtered, page_size, requested_page)`, so the window always reflects
//! the caller's latest filter. The only state worth holding is the current
//! page number, captured by [`Pager`].

use crate::{Error, Result};

/// A read-only window over a filtered collection.
///
/// Invariants: `items.len() <= page_size`, `page_number` is clamped to
/// `[1, max(total_pages, 1)]`, and `total_pages = ceil(len / page_size)`.
/// A `Page` holds no identity across recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// The visible slice of the filtered collection.
    pub items: &'a [T],
    /// Current page number (1-indexed, clamped).
    pub page_number: usize,
    /// Total number of pages; zero for an empty collection.
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Returns whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Returns whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// Computes the total page count for a collection length.
///
/// Zero when the collection is empty.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

/// Computes the visible window over a filtered collection.
///
/// Pure function of its inputs: the collection is supplied fresh on each
/// call and never cached. An out-of-range `requested_page` (including 0)
/// is clamped, never an error; the window can therefore never reference
/// an out-of-range slice.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `page_size` is zero.
pub fn paginate<T>(filtered: &[T], page_size: usize, requested_page: usize) -> Result<Page<'_, T>> {
    if page_size == 0 {
        return Err(Error::InvalidInput(
            "page size must be at least 1".to_string(),
        ));
    }

    let total = total_pages(filtered.len(), page_size);
    let page_number = requested_page.clamp(1, total.max(1));

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(filtered.len());
    let items = if start >= filtered.len() {
        &[]
    } else {
        &filtered[start..end]
    };

    Ok(Page {
        items,
        page_number,
        total_pages: total,
    })
}

/// The single piece of pagination state: the current page number.
///
/// Transitions clamp to `[1, total_pages]`; requesting "next" on the last
/// page or "previous" on the first is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
}

impl Pager {
    /// Creates a pager positioned on the first page.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: 1 }
    }

    /// Returns the current page number.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Moves to the next page, clamped to `total_pages`.
    pub fn next(&mut self, total_pages: usize) {
        if self.current < total_pages {
            self.current += 1;
        }
    }

    /// Moves to the previous page, clamped to the first page.
    pub fn previous(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Re-clamps the current page after the filtered collection shrank.
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.current = self.current.clamp(1, total_pages.max(1));
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}
