//! Filter and paginate derivation.
//!
//! Everything here is a pure function of the collection, the search term and
//! the page number. The table state re-runs it whenever it needs the visible
//! rows, so there is no cached view to keep in sync.

use std::ops::{Range, RangeInclusive};

use super::record::{Record, RecordId};

/// Number of rows shown per page.
pub const ITEMS_PER_PAGE: usize = 10;

/// A row of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    /// Position in the unfiltered collection.
    pub absolute_index: usize,
    /// Identity of the record shown.
    pub id: RecordId,
}

/// The derived view for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// The page that was sliced (1-based).
    pub page: usize,
    /// Total pages for the filtered set.
    pub total_pages: usize,
    /// Number of records passing the filter.
    pub filtered_count: usize,
    /// Rows on this page in display order.
    pub rows: Vec<VisibleRow>,
}

impl PageView {
    /// Page numbers for the pagination control.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Absolute indices of records matching `term`, in collection order.
pub fn filter_indices(records: &[Record], term: &str) -> Vec<usize> {
    let needle = term.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.matches(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// Pages needed for `count` items.
pub fn total_pages(count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}

/// Slice bounds of `page` within a sequence of `len` items.
///
/// Pages past the end produce an empty range rather than panicking.
pub fn page_bounds(page: usize, per_page: usize, len: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(per_page).min(len);
    let end = page.saturating_mul(per_page).min(len);
    start..end
}

/// Clamp a page number into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Derive the rows visible on `page` after filtering by `term`.
pub fn derive(records: &[Record], term: &str, page: usize, per_page: usize) -> PageView {
    let filtered = filter_indices(records, term);
    let bounds = page_bounds(page, per_page, filtered.len());
    let rows = filtered[bounds]
        .iter()
        .map(|&absolute_index| VisibleRow {
            absolute_index,
            id: records[absolute_index].id(),
        })
        .collect();

    PageView {
        page,
        total_pages: total_pages(filtered.len(), per_page),
        filtered_count: filtered.len(),
        rows,
    }
}
