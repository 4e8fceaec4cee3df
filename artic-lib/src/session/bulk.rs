//! "Select first N" planning.

use crate::api::fetch_pages;
use crate::api::PageSource;
use crate::api::PageWindow;
use crate::error::Error;

use super::Ticket;

/// Interprets the text of the bulk-count input.
///
/// Empty text or a lone `-` clears the request. Text that is not an integer
/// leaves `previous` in place.
///
/// # Example
///
/// ```
/// use artic_lib::session::parse_bulk_input;
///
/// assert_eq!(parse_bulk_input("20", None), Some(20));
/// assert_eq!(parse_bulk_input("", Some(20)), None);
/// assert_eq!(parse_bulk_input("2x", Some(20)), Some(20));
/// ```
pub fn parse_bulk_input(text: &str, previous: Option<i64>) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() || text == "-" {
        return None;
    }
    text.parse::<i64>().ok().or(previous)
}

/// Number of pages of `rows` records needed to cover `count` records.
pub fn pages_needed(count: u64, rows: u32) -> u64 {
    count.div_ceil(u64::from(rows.max(1)))
}

/// Pages to fetch for `count` records from `first_page` on.
///
/// With a known `total`, pages past the last one are never requested; at
/// least one page is fetched so an out-of-range start still completes.
pub fn pages_to_fetch(count: u64, rows: u32, first_page: u32, total: Option<u64>) -> u64 {
    let needed = pages_needed(count, rows);
    match total {
        Some(total) => {
            let skipped = u64::from(first_page.saturating_sub(1));
            let remaining = pages_needed(total, rows).saturating_sub(skipped);
            needed.min(remaining.max(1))
        }
        None => needed,
    }
}

/// A bulk selection that has been started and is waiting for its pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkPlan {
    pub(super) ticket: Ticket,
    count: usize,
    first_page: u32,
    pages: u32,
    rows: u32,
}

impl BulkPlan {
    pub(super) fn new(ticket: Ticket, count: usize, first_page: u32, pages: u32, rows: u32) -> Self {
        Self {
            ticket,
            count,
            first_page,
            pages,
            rows,
        }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Number of records requested.
    pub fn count(&self) -> usize {
        self.count
    }

    /// First page to fetch (1-based).
    pub fn first_page(&self) -> u32 {
        self.first_page
    }

    /// How many consecutive pages will be fetched.
    pub fn page_count(&self) -> u32 {
        self.pages
    }

    /// Page size used for every fetch.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Fetches every page of the plan concurrently, all-or-nothing.
    pub async fn fetch<S: PageSource + ?Sized>(&self, source: &S) -> Result<Vec<PageWindow>, Error> {
        fetch_pages(source, self.first_page, self.pages, self.rows).await
    }
}
