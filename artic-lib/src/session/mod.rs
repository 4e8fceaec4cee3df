//! Browsing session: the state a front end renders from.
//!
//! A [`Session`] owns the pagination state, the page window currently on
//! screen, the cross-page [`SelectionSet`] and the pending bulk request.
//! Operations that hit the network are split in two halves:
//!
//! - `begin_*` validates, transitions state and hands back a ticketed request
//! - `complete_*` applies the fetched result for that ticket
//!
//! Only one fetching operation may be in flight; the other `begin_*` calls fail
//! with [`Error::Busy`] until it completes. Front ends that await inline can
//! use [`Session::load_page`] and [`Session::select_first`] instead.
//!
//! # Example
//!
//! ```ignore
//! let client = ArticClient::builder().build()?;
//! let mut session = Session::new();
//!
//! session.load_initial(&client).await?;
//! let ticked = session.window().records()[..2].to_vec();
//! session.apply_selection_change(&ticked)?;
//! session.load_page(&client, PageChangeEvent::to_page(1, 12)).await?;
//!
//! assert_eq!(session.total_selected(), 2);
//! ```

mod bulk;
mod pagination;
mod selection;

use std::collections::HashSet;
use std::fmt;

pub use bulk::*;
pub use pagination::*;
pub use selection::*;

use crate::api::PageSource;
use crate::api::PageWindow;
use crate::error::Error;
use crate::model::Artwork;
use crate::model::ArtworkId;

/// Kind of fetching operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Loading the page to display.
    PageLoad,
    /// Fetching pages for "select first N".
    BulkSelect,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageLoad => write!(f, "page load"),
            Self::BulkSelect => write!(f, "bulk selection"),
        }
    }
}

/// Identifies one started operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// What happened when a fetched result was handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied.
    Applied,
    /// The fetch failed; the error was logged and state left consistent.
    Failed,
    /// The ticket did not match the in-flight operation; nothing changed.
    Stale,
    /// Nothing needed fetching (bulk selection of zero or no records).
    Skipped,
}

/// A page load that has been started and is waiting for its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    ticket: Ticket,
    page: u32,
    rows: u32,
}

impl PageRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// 1-based page to fetch.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Fetches the requested page.
    pub async fn fetch<S: PageSource + ?Sized>(&self, source: &S) -> Result<PageWindow, Error> {
        source.fetch_page(self.page, self.rows).await
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: Ticket,
    operation: Operation,
    /// Page state to go back to if a page change fails.
    rollback: Option<PageState>,
}

/// Everything the presentation layer needs to draw the table.
#[derive(Debug)]
pub struct TableView<'a> {
    pub records: &'a [Artwork],
    pub loading: bool,
    pub total_records: u64,
    pub page_state: PageState,
    /// Records of the visible page that are selected, in page order.
    pub current_selection: Vec<&'a Artwork>,
    pub total_selected: usize,
    pub bulk_panel_open: bool,
    pub bulk_input: Option<i64>,
}

/// Session-level browsing state.
#[derive(Debug)]
pub struct Session {
    page_state: PageState,
    window: PageWindow,
    /// Set by the first successful page fetch.
    total_records: Option<u64>,
    selection: SelectionSet,
    bulk_input: Option<i64>,
    bulk_panel_open: bool,
    loading: bool,
    has_completed_first_fetch: bool,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_page_state(PageState::default())
    }
}

impl Session {
    /// Creates a session on page 1 with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session starting at `page_state`.
    pub fn with_page_state(page_state: PageState) -> Self {
        Self {
            page_state,
            window: PageWindow::default(),
            total_records: None,
            selection: SelectionSet::new(),
            bulk_input: None,
            bulk_panel_open: false,
            loading: true,
            has_completed_first_fetch: false,
            in_flight: None,
            next_ticket: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn page_state(&self) -> PageState {
        self.page_state
    }

    /// The page window currently displayed.
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    /// Total record count reported by the last successful fetch.
    pub fn total_records(&self) -> u64 {
        self.total_records.unwrap_or(0)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Number of selected records across all pages.
    pub fn total_selected(&self) -> usize {
        self.selection.len()
    }

    /// Whether the loading indicator should be shown.
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn has_completed_first_fetch(&self) -> bool {
        self.has_completed_first_fetch
    }

    /// The operation currently waiting on the network, if any.
    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight.map(|f| f.operation)
    }

    pub fn bulk_input(&self) -> Option<i64> {
        self.bulk_input
    }

    pub fn is_bulk_panel_open(&self) -> bool {
        self.bulk_panel_open
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            records: self.window.records(),
            loading: self.loading,
            total_records: self.total_records(),
            page_state: self.page_state,
            current_selection: self.selection.selected_on(self.window.records()),
            total_selected: self.selection.len(),
            bulk_panel_open: self.bulk_panel_open,
            bulk_input: self.bulk_input,
        }
    }

    // =========================================================================
    // Page loading
    // =========================================================================

    /// Starts loading the page described by the current page state.
    pub fn begin_initial_load(&mut self) -> Result<PageRequest, Error> {
        self.ensure_idle()?;
        Ok(self.start_page_load(None))
    }

    /// Starts loading the page a page-change event points to.
    ///
    /// Pagination state is replaced atomically; the displayed window stays
    /// until the fetch completes. If the fetch fails the previous state comes
    /// back, so state and window always describe the same page.
    pub fn begin_page_change(&mut self, event: PageChangeEvent) -> Result<PageRequest, Error> {
        self.ensure_idle()?;
        let previous = self.page_state;
        self.page_state = PageState::from_event(event)?;
        log::debug!(
            "Page change to page {} ({} rows, offset {})",
            self.page_state.page,
            self.page_state.rows,
            self.page_state.offset
        );
        Ok(self.start_page_load(Some(previous)))
    }

    /// Applies the result of a page load.
    ///
    /// A failure is logged, the previous window kept and a page change
    /// undone. Either way the first completed fetch turns the loading
    /// indicator off for good.
    pub fn complete_page_fetch(
        &mut self,
        request: PageRequest,
        result: Result<PageWindow, Error>,
    ) -> Completion {
        let Some(finished) = self.finish(request.ticket) else {
            log::warn!("Ignoring stale result for page {}", request.page);
            return Completion::Stale;
        };

        let completion = match result {
            Ok(window) => {
                self.total_records = Some(window.total());
                self.window = window;
                Completion::Applied
            }
            Err(e) => {
                log::error!("Failed to fetch artworks for page {}: {}", request.page, e);
                if let Some(previous) = finished.rollback {
                    log::debug!("Back to page {}", previous.page);
                    self.page_state = previous;
                }
                Completion::Failed
            }
        };

        if !self.has_completed_first_fetch {
            self.has_completed_first_fetch = true;
            self.loading = false;
        }
        completion
    }

    /// Loads the current page, awaiting the fetch inline.
    pub async fn load_initial<S: PageSource + ?Sized>(&mut self, source: &S) -> Result<Completion, Error> {
        let request = self.begin_initial_load()?;
        let result = request.fetch(source).await;
        Ok(self.complete_page_fetch(request, result))
    }

    /// Handles a page-change event, awaiting the fetch inline.
    pub async fn load_page<S: PageSource + ?Sized>(
        &mut self,
        source: &S,
        event: PageChangeEvent,
    ) -> Result<Completion, Error> {
        let request = self.begin_page_change(event)?;
        let result = request.fetch(source).await;
        Ok(self.complete_page_fetch(request, result))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Reconciles the selection reported for the visible page.
    ///
    /// `selected` is every record the table now shows as ticked on the current
    /// page. Selections on other pages are kept. Rejected while a bulk
    /// selection is pending, since its completion replaces the whole set.
    pub fn apply_selection_change(&mut self, selected: &[Artwork]) -> Result<(), Error> {
        if let Some(InFlight {
            operation: Operation::BulkSelect,
            ..
        }) = self.in_flight
        {
            return Err(Error::Busy(Operation::BulkSelect));
        }

        let ids: HashSet<ArtworkId> = selected.iter().map(|r| r.id).collect();
        self.selection.apply_page_diff(self.window.records(), &ids);
        log::debug!("Selection changed, {} selected", self.selection.len());
        Ok(())
    }

    // =========================================================================
    // Bulk selection
    // =========================================================================

    /// Sets the pending "select first N" count.
    pub fn set_bulk_input(&mut self, count: Option<i64>) {
        self.bulk_input = count;
    }

    /// Updates the pending count from the text of the input control.
    pub fn set_bulk_input_text(&mut self, text: &str) {
        self.bulk_input = parse_bulk_input(text, self.bulk_input);
    }

    /// Shows or hides the bulk-count panel.
    pub fn toggle_bulk_panel(&mut self) -> bool {
        self.bulk_panel_open = !self.bulk_panel_open;
        self.bulk_panel_open
    }

    /// Submits the pending bulk request.
    ///
    /// The selection set is cleared and the request consumed. Returns `None`
    /// when the count is missing or not positive: there is nothing to fetch
    /// and the selection stays empty. Otherwise returns the pages to fetch,
    /// starting at the current page with the current page size and stopping
    /// at the last page the server reported.
    pub fn begin_bulk_select(&mut self) -> Result<Option<BulkPlan>, Error> {
        self.ensure_idle()?;

        let requested = self.bulk_input.take();
        self.selection.clear();

        let count = match requested {
            Some(n) if n > 0 => n,
            _ => {
                log::debug!("Bulk selection aborted: no positive count");
                self.bulk_panel_open = false;
                return Ok(None);
            }
        };

        let rows = self.page_state.rows;
        let first_page = self.page_state.page;
        let needed = pages_to_fetch(count.unsigned_abs(), rows, first_page, self.total_records);
        let pages = u32::try_from(needed).map_err(|_| {
            self.bulk_panel_open = false;
            Error::InvalidRequest(format!("cannot select {} records", count))
        })?;
        let count = usize::try_from(count).unwrap_or(usize::MAX);

        let ticket = self.start(Operation::BulkSelect, None);
        self.loading = true;
        log::debug!(
            "Bulk selection of {} records: pages {}..{} at {} rows",
            count,
            first_page,
            first_page.saturating_add(pages),
            rows
        );
        Ok(Some(BulkPlan::new(ticket, count, first_page, pages, rows)))
    }

    /// Applies the pages fetched for a bulk selection.
    ///
    /// Pages are concatenated in page order and the first `count` records
    /// become the selection. On failure the selection stays empty.
    pub fn complete_bulk_select(
        &mut self,
        plan: BulkPlan,
        result: Result<Vec<PageWindow>, Error>,
    ) -> Completion {
        if self.finish(plan.ticket).is_none() {
            log::warn!("Ignoring stale bulk selection result");
            return Completion::Stale;
        }

        self.loading = !self.has_completed_first_fetch;
        self.bulk_panel_open = false;

        match result {
            Ok(pages) => {
                let records = pages
                    .into_iter()
                    .flat_map(PageWindow::into_records)
                    .take(plan.count());
                self.selection.replace_with(records);
                log::info!(
                    "Bulk selection done: {} of {} requested",
                    self.selection.len(),
                    plan.count()
                );
                Completion::Applied
            }
            Err(e) => {
                log::error!("Failed to fetch artworks for bulk selection: {}", e);
                self.selection.clear();
                Completion::Failed
            }
        }
    }

    /// Selects the first `count` records from the current page onward,
    /// awaiting the fetches inline.
    pub async fn select_first<S: PageSource + ?Sized>(
        &mut self,
        source: &S,
        count: Option<i64>,
    ) -> Result<Completion, Error> {
        self.ensure_idle()?;
        self.set_bulk_input(count);
        let Some(plan) = self.begin_bulk_select()? else {
            return Ok(Completion::Skipped);
        };
        let result = plan.fetch(source).await;
        Ok(self.complete_bulk_select(plan, result))
    }

    // =========================================================================
    // In-flight bookkeeping
    // =========================================================================

    fn ensure_idle(&self) -> Result<(), Error> {
        match self.in_flight {
            Some(in_flight) => Err(Error::Busy(in_flight.operation)),
            None => Ok(()),
        }
    }

    fn start(&mut self, operation: Operation, rollback: Option<PageState>) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(InFlight {
            ticket,
            operation,
            rollback,
        });
        ticket
    }

    fn start_page_load(&mut self, rollback: Option<PageState>) -> PageRequest {
        let ticket = self.start(Operation::PageLoad, rollback);
        PageRequest {
            ticket,
            page: self.page_state.page,
            rows: self.page_state.rows,
        }
    }

    /// Clears the in-flight slot if `ticket` owns it.
    fn finish(&mut self, ticket: Ticket) -> Option<InFlight> {
        match self.in_flight {
            Some(in_flight) if in_flight.ticket == ticket => self.in_flight.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn window(page: u32, rows: u32, ids: std::ops::Range<u64>) -> PageWindow {
        PageWindow::new(ids.map(Artwork::new).collect())
            .with_total(100)
            .with_page(page, rows)
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = Session::new();
        assert!(session.loading());
        assert!(!session.has_completed_first_fetch());
        assert_eq!(session.page_state(), PageState::default());
        assert_eq!(session.total_selected(), 0);
    }

    #[test]
    fn test_begin_page_change_while_busy() {
        let mut session = Session::new();
        let _request = session.begin_initial_load().unwrap();

        let err = session
            .begin_page_change(PageChangeEvent::to_page(1, 12))
            .unwrap_err();
        assert!(matches!(err, Error::Busy(Operation::PageLoad)));
        assert_eq!(session.page_state().page, 1);
    }

    #[test]
    fn test_invalid_page_change_keeps_state() {
        let mut session = Session::new();
        let err = session
            .begin_page_change(PageChangeEvent::new(0, 0, Some(3)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert_eq!(session.page_state(), PageState::default());
        assert_eq!(session.in_flight(), None);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut session = Session::new();
        let first = session.begin_initial_load().unwrap();
        assert_eq!(
            session.complete_page_fetch(first, Ok(window(1, 12, 0..12))),
            Completion::Applied
        );

        let second = session.begin_page_change(PageChangeEvent::to_page(1, 12)).unwrap();
        assert_eq!(
            session.complete_page_fetch(first, Ok(window(9, 12, 500..512))),
            Completion::Stale
        );
        assert_eq!(session.in_flight(), Some(Operation::PageLoad));
        assert_eq!(session.window().page_number(), 1);

        assert_eq!(
            session.complete_page_fetch(second, Ok(window(2, 12, 12..24))),
            Completion::Applied
        );
        assert_eq!(session.window().page_number(), 2);
    }

    #[test]
    fn test_failed_first_fetch_resolves_loading() {
        let mut session = Session::new();
        let request = session.begin_initial_load().unwrap();
        let completion =
            session.complete_page_fetch(request, Err(ApiError::http(500, "boom").into()));

        assert_eq!(completion, Completion::Failed);
        assert!(!session.loading());
        assert!(session.has_completed_first_fetch());
        assert!(session.window().is_empty());
    }

    #[test]
    fn test_failed_page_change_restores_page_state() {
        let mut session = Session::new();
        let request = session.begin_initial_load().unwrap();
        session.complete_page_fetch(request, Ok(window(1, 12, 0..12)));

        let request = session.begin_page_change(PageChangeEvent::to_page(2, 12)).unwrap();
        assert_eq!(session.page_state().page, 3);
        let completion =
            session.complete_page_fetch(request, Err(ApiError::http(503, "unavailable").into()));

        assert_eq!(completion, Completion::Failed);
        assert_eq!(session.page_state(), PageState::default());
        assert_eq!(session.window().page_number(), 1);
    }

    #[test]
    fn test_failed_first_load_keeps_starting_page() {
        let start = PageState { offset: 24, rows: 12, page: 3 };
        let mut session = Session::with_page_state(start);
        let request = session.begin_initial_load().unwrap();
        session.complete_page_fetch(request, Err(ApiError::http(500, "boom").into()));

        assert_eq!(session.page_state(), start);
        assert_eq!(session.total_records(), 0);
    }

    #[test]
    fn test_bulk_plan_stops_at_last_page() {
        let mut session = Session::new();
        let request = session.begin_initial_load().unwrap();
        session.complete_page_fetch(request, Ok(window(1, 12, 0..12)));

        session.set_bulk_input(Some(4_000_000_000));
        let plan = session.begin_bulk_select().unwrap().unwrap();

        // 100 records at 12 rows
        assert_eq!(plan.first_page(), 1);
        assert_eq!(plan.page_count(), 9);
    }

    #[test]
    fn test_selection_change_rejected_during_bulk() {
        let mut session = Session::new();
        let request = session.begin_initial_load().unwrap();
        session.complete_page_fetch(request, Ok(window(1, 12, 0..12)));

        session.set_bulk_input(Some(5));
        let plan = session.begin_bulk_select().unwrap().unwrap();
        assert!(session.loading());

        let picked = session.window().records()[..1].to_vec();
        let err = session.apply_selection_change(&picked).unwrap_err();
        assert!(err.is_busy());

        session.complete_bulk_select(plan, Ok(vec![window(1, 12, 0..12)]));
        assert!(!session.loading());
        assert_eq!(session.total_selected(), 5);
    }

    #[test]
    fn test_selection_change_allowed_during_page_load() {
        let mut session = Session::new();
        let request = session.begin_initial_load().unwrap();
        session.complete_page_fetch(request, Ok(window(1, 12, 0..12)));

        let _pending = session.begin_page_change(PageChangeEvent::to_page(1, 12)).unwrap();
        let picked = session.window().records()[..3].to_vec();
        session.apply_selection_change(&picked).unwrap();
        assert_eq!(session.total_selected(), 3);
    }

    #[test]
    fn test_bulk_panel_closes_on_submit() {
        let mut session = Session::new();
        assert!(session.toggle_bulk_panel());
        session.set_bulk_input_text("-");
        assert_eq!(session.begin_bulk_select().unwrap(), None);
        assert!(!session.is_bulk_panel_open());
        assert_eq!(session.bulk_input(), None);
    }

    #[test]
    fn test_view_reports_current_selection() {
        let mut session = Session::new();
        let request = session.begin_initial_load().unwrap();
        session.complete_page_fetch(request, Ok(window(1, 12, 0..12)));
        let picked = vec![session.window().records()[4].clone()];
        session.apply_selection_change(&picked).unwrap();

        let view = session.view();
        assert!(!view.loading);
        assert_eq!(view.total_records, 100);
        assert_eq!(view.records.len(), 12);
        assert_eq!(view.current_selection.len(), 1);
        assert_eq!(view.current_selection[0].id, ArtworkId(4));
        assert_eq!(view.total_selected, 1);
    }
}
