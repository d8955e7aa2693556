//! Terminal output for todo items
//!
//! Tables use comfy_table; done titles are struck through with colored.
//! JSON output goes through serde_json so scripts get stable field names.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use todo_app::{format_tags, priority_label, TodoItem};

use crate::cli::DATE_FORMAT;

/// Shown instead of an empty table
pub const EMPTY_LIST_MESSAGE: &str = "No TODOs match the current filters.";

/// Create a table pre-configured for terminal-width-aware output.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Title as displayed; done items are struck through
pub fn display_title(item: &TodoItem) -> String {
    if item.is_done() {
        item.title.strikethrough().to_string()
    } else {
        item.title.clone()
    }
}

/// "Due: … | Priority: … | Tags: …", built only from fields that are set
pub fn caption(item: &TodoItem) -> String {
    let mut parts = Vec::new();
    if let Some(due) = item.due_date {
        parts.push(format!("Due: {}", due.format(DATE_FORMAT)));
    }
    if item.priority.is_some() {
        parts.push(format!("Priority: {}", priority_label(item.priority)));
    }
    if !item.tags.is_empty() {
        parts.push(format!("Tags: {}", format_tags(&item.tags)));
    }
    parts.join(" | ")
}

fn id_cell(item: &TodoItem) -> String {
    item.id.map(|id| id.to_string()).unwrap_or_default()
}

fn done_cell(item: &TodoItem) -> &'static str {
    if item.is_done() {
        "[x]"
    } else {
        "[ ]"
    }
}

/// One row per item, or [`EMPTY_LIST_MESSAGE`]
pub fn render_list(items: &[TodoItem]) -> String {
    if items.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Done", "Title", "Details"]);
    for item in items {
        table.add_row(vec![
            id_cell(item),
            done_cell(item).to_string(),
            display_title(item),
            caption(item),
        ]);
    }
    table.to_string()
}

/// Every field of a single item
pub fn render_detail(item: &TodoItem) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["ID".to_string(), id_cell(item)]);
    table.add_row(vec!["Title".to_string(), display_title(item)]);
    table.add_row(vec!["Status".to_string(), item.status.label().to_string()]);
    if let Some(description) = &item.description {
        table.add_row(vec!["Description".to_string(), description.clone()]);
    }
    let caption = caption(item);
    if !caption.is_empty() {
        table.add_row(vec!["Details".to_string(), caption]);
    }
    table.add_row(vec!["Created".to_string(), item.created_at.to_string()]);
    table.add_row(vec!["Updated".to_string(), item.updated_at.to_string()]);
    table.to_string()
}

pub fn render_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
