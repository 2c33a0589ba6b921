//! Rendering of history state for the terminal.

use std::fmt::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use navkit_history::{ChangeKind, HistoryChange, HistorySnapshot, NormalizedUrl};

/// Placeholder for an absent location.
const NONE: &str = "-";

/// Render a snapshot as aligned `key: value` lines.
pub fn render_plain(snapshot: &HistorySnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "current:  {}", location(snapshot.url()));
    let _ = writeln!(out, "back:     {}", stack(snapshot.back_stack()));
    let _ = writeln!(out, "forward:  {}", stack(snapshot.forward_stack()));
    let _ = writeln!(out, "mode:     {}", snapshot.mode());
    let _ = writeln!(out, "loading:  {}", snapshot.is_loading());
    let _ = writeln!(out, "disabled: {}", snapshot.is_disabled());
    let _ = write!(out, "revision: {}", snapshot.revision());
    out
}

/// Render a snapshot as a table, one row per stack entry.
pub fn render_table(snapshot: &HistorySnapshot) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Position"), header_cell("Location")]);
    apply_table_style(&mut table);

    for (offset, url) in snapshot.back_stack().iter().enumerate() {
        let distance = snapshot.back_stack().len() - offset;
        table.add_row(vec![dim_cell(format!("-{distance}")), Cell::new(url)]);
    }
    table.add_row(vec![
        Cell::new("current")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(location(snapshot.url())).add_attribute(Attribute::Bold),
    ]);
    for (offset, url) in snapshot.forward_stack().iter().rev().enumerate() {
        table.add_row(vec![dim_cell(format!("+{}", offset + 1)), Cell::new(url)]);
    }
    table
}

/// Render a snapshot as pretty JSON.
pub fn render_json(snapshot: &HistorySnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// Render one published change as a single line.
pub fn render_event(change: &HistoryChange) -> String {
    let snapshot = &change.snapshot;
    let detail = match change.kind {
        ChangeKind::ModeChanged => snapshot.mode().to_string(),
        ChangeKind::FlagsChanged => format!(
            "loading={} disabled={}",
            snapshot.is_loading(),
            snapshot.is_disabled()
        ),
        ChangeKind::Navigated | ChangeKind::Back | ChangeKind::Forward => {
            location(snapshot.url()).to_string()
        }
    };
    format!("#{} {} {}", snapshot.revision(), change.kind, detail)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn location(url: Option<&NormalizedUrl>) -> &str {
    url.map_or(NONE, NormalizedUrl::as_str)
}

fn stack(entries: &[NormalizedUrl]) -> String {
    let items: Vec<&str> = entries.iter().map(NormalizedUrl::as_str).collect();
    format!("[{}]", items.join(", "))
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
