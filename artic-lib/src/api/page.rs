//! Page window returned by one fetch.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Artwork;

/// Pagination block of the collection API envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Total record count known to the server.
    pub total: u64,
    /// Page size the server applied.
    pub limit: u32,
    /// Row offset of the first record in this page.
    pub offset: u64,
    /// Number of pages at this page size.
    pub total_pages: u64,
    /// 1-based page number that produced this window.
    pub current_page: u32,
}

/// A page of artworks with the pagination information it came with.
///
/// Page windows are replaced wholesale by every successful fetch; they never
/// accumulate records across fetches.
///
/// # Example
///
/// ```
/// use artic_lib::api::PageWindow;
/// use artic_lib::model::Artwork;
///
/// let page = PageWindow::new(vec![Artwork::new(1), Artwork::new(2)])
///     .with_total(40)
///     .with_page(1, 12);
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.total(), 40);
/// assert!(page.contains(1u64.into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pagination: PaginationInfo,
    #[serde(rename = "data")]
    records: Vec<Artwork>,
}

impl PageWindow {
    /// Creates a page from records alone, with empty pagination info.
    pub fn new(records: Vec<Artwork>) -> Self {
        Self {
            pagination: PaginationInfo::default(),
            records,
        }
    }

    /// Sets the total record count.
    pub fn with_total(mut self, total: u64) -> Self {
        self.pagination.total = total;
        self
    }

    /// Sets the page number and size, deriving the offset.
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.pagination.current_page = page;
        self.pagination.limit = limit;
        self.pagination.offset = u64::from(page.saturating_sub(1)) * u64::from(limit);
        if limit > 0 {
            self.pagination.total_pages = self.pagination.total.div_ceil(u64::from(limit));
        }
        self
    }

    /// Returns the records in page order.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Artwork> {
        self.records
    }

    /// Returns the pagination metadata.
    pub fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    /// Returns the total record count known to the server.
    pub fn total(&self) -> u64 {
        self.pagination.total
    }

    /// Returns the 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.pagination.current_page
    }

    /// Returns the page size the server applied.
    pub fn limit(&self) -> u32 {
        self.pagination.limit
    }

    /// Returns `true` if the page holds a record with this id.
    pub fn contains(&self, id: crate::model::ArtworkId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
