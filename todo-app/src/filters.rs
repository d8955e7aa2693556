//! In-memory filtering and sorting
//!
//! Pure functions over slices of items. Nothing here touches a repository.

use crate::model::{Status, TodoItem};
use std::cmp::Ordering;

/// Conjunctive filter; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Exact status match
    pub status: Option<Status>,
    /// Case-insensitive substring of title or description
    pub text_query: Option<String>,
    /// Exact membership in `tags`
    pub tag: Option<String>,
}

impl TodoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_text_query(mut self, query: impl Into<String>) -> Self {
        self.text_query = Some(query.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// True when `item` satisfies every supplied criterion
    pub fn matches(&self, item: &TodoItem) -> bool {
        if self.status.is_some_and(|status| item.status != status) {
            return false;
        }

        if let Some(query) = self.normalized_query() {
            let in_title = item.title.to_lowercase().contains(&query);
            let in_description = item
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));
            if !in_title && !in_description {
                return false;
            }
        }

        if let Some(tag) = self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            if !item.tags.iter().any(|t| t == tag) {
                return false;
            }
        }

        true
    }

    /// Lowercased query, or `None` when blank
    fn normalized_query(&self) -> Option<String> {
        self.text_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// Items matching `filter`, in their original order
pub fn apply_filters(items: &[TodoItem], filter: &TodoFilter) -> Vec<TodoItem> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Which sort keys to apply
///
/// When both are set the due date is the primary key and priority breaks ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    /// Earliest due date first; undated items last
    pub by_due_date: bool,
    /// High, Medium, Low, then items without priority
    pub by_priority: bool,
}

impl SortOrder {
    pub fn is_unsorted(&self) -> bool {
        !self.by_due_date && !self.by_priority
    }

    fn compare(&self, a: &TodoItem, b: &TodoItem) -> Ordering {
        let mut ordering = Ordering::Equal;
        if self.by_due_date {
            ordering = compare_due_dates(a, b);
        }
        if self.by_priority {
            ordering = ordering.then_with(|| compare_priorities(a, b));
        }
        ordering
    }
}

/// New sequence ordered by `order`; equal items keep their input order
pub fn sort_items(items: &[TodoItem], order: SortOrder) -> Vec<TodoItem> {
    let mut sorted = items.to_vec();
    if !order.is_unsorted() {
        // `sort_by` is stable, which is what keeps ties in input order.
        sorted.sort_by(|a, b| order.compare(a, b));
    }
    sorted
}

fn compare_due_dates(a: &TodoItem, b: &TodoItem) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_priorities(a: &TodoItem, b: &TodoItem) -> Ordering {
    let rank = |item: &TodoItem| item.priority.map_or(u8::MAX, |p| p.rank());
    rank(a).cmp(&rank(b))
}
