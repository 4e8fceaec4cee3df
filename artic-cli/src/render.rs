//! Text rendering of the session view.

use std::collections::HashSet;
use std::fmt::Write;

use artic_lib::model::{Artwork, ArtworkId};
use artic_lib::session::{SelectionSet, TableView};

/// Column headers and widths, checkbox and row number first.
const COLUMNS: [(&str, usize); 8] = [
    ("", 3),
    ("#", 3),
    ("Title", 28),
    ("Artist", 24),
    ("Origin", 14),
    ("Start", 6),
    ("End", 6),
    ("Inscriptions", 24),
];

/// Renders the visible page as a table, with the paginator report below it.
pub fn table(view: &TableView<'_>) -> String {
    let mut out = String::new();

    if view.loading {
        let _ = writeln!(out, "Loading...");
        return out;
    }

    let header: Vec<String> = COLUMNS.iter().map(|(name, width)| fit(name, *width)).collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());

    let ticked: HashSet<ArtworkId> = view.current_selection.iter().map(|r| r.id).collect();
    for (i, artwork) in view.records.iter().enumerate() {
        let _ = writeln!(out, "{}", row(i + 1, artwork, ticked.contains(&artwork.id)));
    }
    if view.records.is_empty() {
        let _ = writeln!(out, "(no artworks)");
    }

    let _ = writeln!(out, "{}", report(view));
    out
}

fn row(number: usize, artwork: &Artwork, ticked: bool) -> String {
    let cells = [
        if ticked { "[x]".to_string() } else { "[ ]".to_string() },
        number.to_string(),
        artwork.display_title().to_string(),
        artwork.display_artist().to_string(),
        artwork.display_place_of_origin().to_string(),
        artwork.display_date_start(),
        artwork.display_date_end(),
        artwork.display_inscriptions().to_string(),
    ];
    let cells: Vec<String> = cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| fit(cell, *width))
        .collect();
    cells.join(" ").trim_end().to_string()
}

/// `Showing {first} to {last} of {total} artworks (Total Selected: N)`.
pub fn report(view: &TableView<'_>) -> String {
    let total = view.total_records;
    let offset = view.page_state.offset;
    let first = if total == 0 { 0 } else { offset + 1 };
    let last = (offset + u64::from(view.page_state.rows)).min(total);
    format!(
        "Showing {} to {} of {} artworks (Total Selected: {})  page {}/{}",
        first,
        last,
        total,
        view.total_selected,
        view.page_state.page,
        view.page_state.page_count(total).max(1)
    )
}

/// The bulk selection panel: pending count and running total.
pub fn bulk_panel(view: &TableView<'_>) -> String {
    let count = view
        .bulk_input
        .map(|n| n.to_string())
        .unwrap_or_else(|| "Select rows...".to_string());
    format!(
        "+-- select first N --------------\n\
         | count: {}\n\
         | 'submit' to apply\n\
         | Total Selected: {}\n\
         +--------------------------------",
        count, view.total_selected
    )
}

/// Every selected artwork, sorted by id.
pub fn selection_list(selection: &SelectionSet) -> String {
    if selection.is_empty() {
        return "Total Selected: 0".to_string();
    }
    let mut out = String::new();
    for artwork in selection.sorted() {
        let _ = writeln!(
            out,
            "{:>8}  {}",
            artwork.id.0,
            fit(artwork.display_title(), 60).trim_end()
        );
    }
    let _ = write!(out, "Total Selected: {}", selection.len());
    out
}

/// Pads or truncates `text` to exactly `width` characters, flattening newlines.
fn fit(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let count = flat.chars().count();
    if count <= width {
        format!("{}{}", flat, " ".repeat(width - count))
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = flat.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}

#[cfg(test)]
mod tests {
    use artic_lib::api::PageWindow;
    use artic_lib::session::{PageChangeEvent, Session};

    use super::*;

    fn loaded(total: u64, records: Vec<Artwork>) -> Session {
        let mut session = Session::new();
        let request = session.begin_initial_load().unwrap();
        session.complete_page_fetch(
            request,
            Ok(PageWindow::new(records).with_total(total).with_page(1, 12)),
        );
        session
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc~");
        assert_eq!(fit("Claude Monet\nFrench", 19), "Claude Monet French");
    }

    #[test]
    fn test_loading() {
        let session = Session::new();
        assert_eq!(table(&session.view()), "Loading...\n");
    }

    #[test]
    fn test_rows_show_ticks_and_placeholders() {
        let mut session = loaded(
            2,
            vec![
                Artwork::new(1).with_title("Nighthawks").with_dates(1942, 1942),
                Artwork::new(2),
            ],
        );
        let first = session.window().records()[0].clone();
        session.apply_selection_change(&[first]).unwrap();

        let out = table(&session.view());
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("[x] 1   Nighthawks"));
        assert!(lines[1].contains("1942"));
        assert!(lines[2].starts_with("[ ] 2   N/A"));
        assert_eq!(
            lines[3],
            "Showing 1 to 2 of 2 artworks (Total Selected: 1)  page 1/1"
        );
    }

    #[test]
    fn test_report_on_later_page() {
        let mut session = loaded(100, vec![Artwork::new(1)]);
        let request = session.begin_page_change(PageChangeEvent::to_page(8, 12)).unwrap();
        session.complete_page_fetch(
            request,
            Ok(PageWindow::new(vec![Artwork::new(99)]).with_total(100).with_page(9, 12)),
        );
        assert_eq!(
            report(&session.view()),
            "Showing 97 to 100 of 100 artworks (Total Selected: 0)  page 9/9"
        );
    }

    #[test]
    fn test_bulk_panel() {
        let mut session = Session::new();
        assert!(bulk_panel(&session.view()).contains("count: Select rows..."));
        session.set_bulk_input(Some(20));
        assert!(bulk_panel(&session.view()).contains("count: 20"));
    }

    #[test]
    fn test_selection_list() {
        let mut session = loaded(2, vec![Artwork::new(5).with_title("B"), Artwork::new(3).with_title("A")]);
        let picked = session.window().records().to_vec();
        session.apply_selection_change(&picked).unwrap();
        assert_eq!(
            selection_list(session.selection()),
            "       3  A\n       5  B\nTotal Selected: 2"
        );
    }
}
