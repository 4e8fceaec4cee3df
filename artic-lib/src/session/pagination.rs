//! Pagination state and page-change events.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// Rows per page before the user picks anything else.
pub const DEFAULT_ROWS: u32 = 12;

/// Where the table currently is: row offset, page size and 1-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Offset of the first visible row.
    pub offset: u64,
    /// Page size.
    pub rows: u32,
    /// 1-based page number.
    pub page: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            offset: 0,
            rows: DEFAULT_ROWS,
            page: 1,
        }
    }
}

impl PageState {
    /// First page at the given page size.
    pub fn with_rows(rows: u32) -> Result<Self, Error> {
        Self::from_event(PageChangeEvent::new(0, rows, Some(0)))
    }

    /// Converts a page-change event into a state.
    ///
    /// The event carries a zero-based page; a missing page means the first.
    pub fn from_event(event: PageChangeEvent) -> Result<Self, Error> {
        if event.rows == 0 {
            return Err(Error::InvalidRequest("page size must be at least 1".to_string()));
        }
        let page = event
            .page
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| Error::InvalidRequest("page number out of range".to_string()))?;
        Ok(Self {
            offset: event.first,
            rows: event.rows,
            page,
        })
    }

    /// Number of pages needed to show `total` records at this page size.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.rows))
    }
}

/// Page change reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChangeEvent {
    /// Offset of the first row of the new page.
    pub first: u64,
    /// New page size.
    pub rows: u32,
    /// Zero-based page index.
    pub page: Option<u32>,
}

impl PageChangeEvent {
    pub fn new(first: u64, rows: u32, page: Option<u32>) -> Self {
        Self { first, rows, page }
    }

    /// Event for the zero-based `page` at `rows` per page, with the matching offset.
    pub fn to_page(page: u32, rows: u32) -> Self {
        Self {
            first: u64::from(page) * u64::from(rows),
            rows,
            page: Some(page),
        }
    }
}
