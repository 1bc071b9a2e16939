use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use aam_model::{HitKind, LogEntry, SearchHit, SessionLog};

pub fn print_session_log(log: &SessionLog) {
    for entry in log.entries() {
        println!("{}", format_log_entry(entry));
    }
}

/// Session log on stderr, for commands whose stdout carries data.
pub fn eprint_session_log(log: &SessionLog) {
    for entry in log.entries() {
        eprintln!("{}", format_log_entry(entry));
    }
}

pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:<7} {}",
        entry.timestamp,
        entry.class.as_str(),
        entry.message
    )
}

pub fn print_search_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        return;
    }
    println!("{}", search_hits_table(hits));
}

pub fn search_hits_table(hits: &[SearchHit]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Kind"),
        header_cell("Name"),
        header_cell("Description"),
    ]);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for hit in hits {
        table.add_row(vec![
            Cell::new(hit.id),
            kind_cell(hit.kind),
            Cell::new(&hit.name),
            Cell::new(hit_description(hit)),
        ]);
    }
    table
}

/// The free-text field stored with the hit, if any.
fn hit_description(hit: &SearchHit) -> &str {
    let value = match hit.kind {
        HitKind::Analysis => hit.data.get("analysisNotes"),
        HitKind::Experiment => hit
            .data
            .get("experimentData")
            .and_then(|data| data.get("experimentDescription")),
    };
    value.and_then(|value| value.as_str()).unwrap_or_default()
}

fn kind_cell(kind: HitKind) -> Cell {
    let color = match kind {
        HitKind::Analysis => Color::Magenta,
        HitKind::Experiment => Color::Green,
    };
    Cell::new(kind.as_str()).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Exit status for a finished session: failure when any error was logged.
pub fn exit_code(log: &SessionLog) -> i32 {
    if log.has_errors() { 1 } else { 0 }
}
