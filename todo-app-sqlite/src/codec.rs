//! Mapping between table rows and [`TodoItem`]

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Row;
use todo_app::{Priority, Result, Status, TodoError, TodoId, TodoItem};

/// Columns in the order [`StoredRow::from_row`] reads them
pub(crate) const SELECT_COLUMNS: &str =
    "id, title, description, status, created_at, updated_at, due_date, priority, tags";

/// A row as SQLite returns it, before domain validation
#[derive(Debug)]
pub(crate) struct StoredRow {
    id: i64,
    title: String,
    description: Option<String>,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    due_date: Option<NaiveDate>,
    priority: Option<String>,
    tags: Option<String>,
}

impl StoredRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
            due_date: row.get(6)?,
            priority: row.get(7)?,
            tags: row.get(8)?,
        })
    }

    /// Validate the enum columns and decode tags
    pub(crate) fn into_item(self) -> Result<TodoItem> {
        let id = self.id;
        let corrupt = |reason: String| TodoError::CorruptRecord { id, reason };

        let status = self
            .status
            .parse::<Status>()
            .map_err(|e| corrupt(e.to_string()))?;

        let priority = match self.priority.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(name) => Some(name.parse::<Priority>().map_err(|e| corrupt(e.to_string()))?),
        };

        let tags = decode_tags(self.tags.as_deref());

        Ok(TodoItem {
            id: Some(TodoId::new(self.id)),
            title: self.title,
            description: self.description,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            due_date: self.due_date,
            priority,
            tags,
        })
    }
}

/// JSON array, or `None` for an empty list
pub(crate) fn encode_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    serde_json::to_string(tags).ok()
}

/// Read a JSON array, falling back to the comma-joined legacy format
///
/// Legacy values may themselves start with `[` (a tag such as `[draft]`), so
/// anything that does not parse as a JSON string array is split on commas.
pub(crate) fn decode_tags(raw: Option<&str>) -> Vec<String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Vec::new(),
        Some(raw) => raw,
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tags) => clean_tags(tags.iter().map(String::as_str)),
        Err(_) => clean_tags(raw.split(',')),
    }
}

fn clean_tags<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<String> {
    tags.map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
