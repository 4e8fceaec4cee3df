//! Interactive browser loop.
//!
//! Commands are read from stdin while fetches run as spawned tasks; results
//! come back over a channel and are handed to the session for its ticket.

use std::collections::HashSet;

use artic_lib::api::PageWindow;
use artic_lib::model::{Artwork, ArtworkId};
use artic_lib::session::{BulkPlan, Completion, PageChangeEvent, PageRequest, PageState, Session};
use artic_lib::{ArticClient, Error};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::command::{Command, HELP};
use crate::render;

/// A finished fetch on its way back to the session.
enum Fetched {
    Page(PageRequest, Result<PageWindow, Error>),
    Bulk(BulkPlan, Result<Vec<PageWindow>, Error>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Where a navigation command wants to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Next,
    Prev,
    First,
    Last,
    /// 1-based page number.
    Page(u32),
}

/// Zero-based page `nav` moves to from the 1-based `current` page, or the
/// reason it stays put.
///
/// An unknown `page_count` (zero) only blocks `next`.
fn target_page(nav: Nav, current: u32, page_count: u64) -> Result<u32, String> {
    match nav {
        Nav::Next if u64::from(current) >= page_count => {
            Err("already on the last page".to_string())
        }
        Nav::Next => Ok(current),
        Nav::Prev if current <= 1 => Err("already on the first page".to_string()),
        Nav::Prev => Ok(current - 2),
        Nav::First => Ok(0),
        Nav::Last => Ok(u32::try_from(page_count.saturating_sub(1)).unwrap_or(u32::MAX)),
        Nav::Page(page) if page_count > 0 && u64::from(page) > page_count => {
            Err(format!("there are only {} pages", page_count))
        }
        Nav::Page(page) => Ok(page.saturating_sub(1)),
    }
}

/// Records of the page that stay ticked after flipping the 1-based `rows`.
///
/// Returns the offending row if one is not on the page. A row named twice
/// flips back.
fn toggled_selection(
    records: &[Artwork],
    ticked: &[&Artwork],
    rows: &[usize],
) -> Result<Vec<Artwork>, usize> {
    if let Some(&bad) = rows.iter().find(|&&r| r == 0 || r > records.len()) {
        return Err(bad);
    }
    let mut ids: HashSet<ArtworkId> = ticked.iter().map(|r| r.id).collect();
    for &row in rows {
        let id = records[row - 1].id;
        if !ids.remove(&id) {
            ids.insert(id);
        }
    }
    Ok(records.iter().filter(|r| ids.contains(&r.id)).cloned().collect())
}

pub struct App {
    session: Session,
    client: ArticClient,
    tx: mpsc::UnboundedSender<Fetched>,
    rx: mpsc::UnboundedReceiver<Fetched>,
}

impl App {
    pub fn new(client: ArticClient, session: Session) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            client,
            tx,
            rx,
        }
    }

    /// Runs until `quit` or end of input.
    pub async fn run(mut self) -> Result<(), Error> {
        println!("Art Institute of Chicago Collection");
        println!("Browse artworks with server-side pagination. Type 'help' for commands.");

        let request = self.session.begin_initial_load()?;
        self.spawn_page(request);
        self.show();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match line {
                        Ok(Some(line)) => line,
                        Ok(None) => break,
                        Err(e) => {
                            log::error!("Failed to read input: {}", e);
                            break;
                        }
                    };
                    if self.handle_line(&line) == Flow::Quit {
                        return Ok(());
                    }
                }
                Some(fetched) = self.rx.recv() => {
                    self.complete(fetched);
                }
            }
        }

        // End of input: let anything in flight land before exiting.
        while self.session.in_flight().is_some() {
            match self.rx.recv().await {
                Some(fetched) => self.complete(fetched),
                None => break,
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                return Flow::Continue;
            }
        };
        log::debug!("Command: {:?}", command);

        match self.execute(command) {
            Ok(flow) => flow,
            Err(e) => {
                log::warn!("Command rejected: {}", e);
                if e.is_busy() {
                    println!("busy: {}, try again when it finishes", e);
                } else {
                    println!("{}", e);
                }
                Flow::Continue
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow, Error> {
        let state = self.session.page_state();
        let page_count = state.page_count(self.session.total_records());

        match command {
            Command::Next => self.navigate(Nav::Next, state, page_count)?,
            Command::Prev => self.navigate(Nav::Prev, state, page_count)?,
            Command::First => self.navigate(Nav::First, state, page_count)?,
            Command::Last => self.navigate(Nav::Last, state, page_count)?,
            Command::Page(page) => self.navigate(Nav::Page(page), state, page_count)?,
            Command::Rows(rows) => self.change_page(PageChangeEvent::new(0, rows, Some(0)))?,
            Command::Toggle(rows) => {
                let view = self.session.view();
                let selected = match toggled_selection(view.records, &view.current_selection, &rows) {
                    Ok(selected) => selected,
                    Err(bad) => {
                        println!("no row {} on this page", bad);
                        return Ok(Flow::Continue);
                    }
                };
                self.session.apply_selection_change(&selected)?;
                self.show();
            }
            Command::All => {
                let selected = self.session.window().records().to_vec();
                self.session.apply_selection_change(&selected)?;
                self.show();
            }
            Command::None => {
                self.session.apply_selection_change(&[])?;
                self.show();
            }
            Command::Panel => {
                if self.session.toggle_bulk_panel() {
                    println!("{}", render::bulk_panel(&self.session.view()));
                }
            }
            Command::Count(text) => {
                self.session.set_bulk_input_text(&text);
                println!("{}", render::bulk_panel(&self.session.view()));
            }
            Command::Submit => self.submit_bulk()?,
            Command::Select(text) => {
                self.session.set_bulk_input_text(&text);
                self.submit_bulk()?;
            }
            Command::Selected => println!("{}", render::selection_list(self.session.selection())),
            Command::Show => self.show(),
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn navigate(&mut self, nav: Nav, state: PageState, page_count: u64) -> Result<(), Error> {
        match target_page(nav, state.page, page_count) {
            Ok(page) => self.change_page(PageChangeEvent::to_page(page, state.rows)),
            Err(reason) => {
                println!("{}", reason);
                Ok(())
            }
        }
    }

    fn change_page(&mut self, event: PageChangeEvent) -> Result<(), Error> {
        let request = self.session.begin_page_change(event)?;
        self.spawn_page(request);
        Ok(())
    }

    fn submit_bulk(&mut self) -> Result<(), Error> {
        match self.session.begin_bulk_select()? {
            Some(plan) => {
                println!(
                    "selecting the first {} artworks from page {}...",
                    plan.count(),
                    plan.first_page()
                );
                self.spawn_bulk(plan);
            }
            None => println!("selection cleared. Total Selected: 0"),
        }
        Ok(())
    }

    fn spawn_page(&self, request: PageRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = request.fetch(&client).await;
            let _ = tx.send(Fetched::Page(request, result));
        });
    }

    fn spawn_bulk(&self, plan: BulkPlan) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = plan.fetch(&client).await;
            let _ = tx.send(Fetched::Bulk(plan, result));
        });
    }

    fn complete(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Page(request, result) => {
                if self.session.complete_page_fetch(request, result) == Completion::Failed {
                    println!("could not load page {}, still showing the previous one", request.page());
                }
                self.show();
            }
            Fetched::Bulk(plan, result) => {
                match self.session.complete_bulk_select(plan, result) {
                    Completion::Applied => {
                        println!("Total Selected: {}", self.session.total_selected())
                    }
                    Completion::Failed => println!("bulk selection failed. Total Selected: 0"),
                    Completion::Stale | Completion::Skipped => {}
                }
                self.show();
            }
        }
    }

    fn show(&self) {
        print!("{}", render::table(&self.session.view()));
    }
}
