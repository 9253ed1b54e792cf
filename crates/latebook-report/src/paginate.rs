//! Fixed-capacity pagination with continued row numbering.

/// Rows per printed page. Tuned for one physical A4 page of the report
/// table, independent of content.
pub const PAGE_ROWS: usize = 22;

/// One fixed-capacity slice of report rows plus layout metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows on this page, in order.
    pub rows: Vec<T>,
    /// Zero-based page index.
    pub index: usize,
    /// Sum of all prior pages' lengths; row numbering continues from here
    /// instead of restarting per page.
    pub starting_row_number: usize,
    /// True exactly for the final page.
    pub is_last: bool,
}

/// Split rows into consecutive chunks of at most `page_size`.
///
/// Zero rows produce zero pages (the caller shows an empty state, not an
/// empty page). `page_size` is expected to be positive; zero is clamped
/// to one rather than panicking.
#[must_use]
pub fn paginate<T>(rows: Vec<T>, page_size: usize) -> Vec<Page<T>> {
    let page_size = page_size.max(1);
    if rows.is_empty() {
        return Vec::new();
    }

    let total = rows.len();
    let page_count = total.div_ceil(page_size);
    let mut pages = Vec::with_capacity(page_count);
    let mut start = 0usize;
    let mut rows = rows.into_iter();

    for index in 0..page_count {
        let chunk: Vec<T> = rows.by_ref().take(page_size).collect();
        let len = chunk.len();
        pages.push(Page {
            rows: chunk,
            index,
            starting_row_number: start,
            is_last: index + 1 == page_count,
        });
        start += len;
    }

    pages
}
