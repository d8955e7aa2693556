//! Conversions between domain values and user-facing text

use crate::model::Priority;

/// Label for an optional priority; `"None"` when absent
pub fn priority_label(priority: Option<Priority>) -> &'static str {
    priority.map_or("None", Priority::label)
}

/// Split comma-separated tag text into trimmed, non-empty tags
///
/// ```rust
/// use todo_app::parse_tags;
///
/// assert_eq!(parse_tags(" work , ,urgent "), vec!["work", "urgent"]);
/// ```
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags for display or for pre-filling an edit field
pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}
