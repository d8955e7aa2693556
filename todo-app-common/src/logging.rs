//! Logging helpers

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing values in logs as YAML
///
/// ```ignore
/// use todo_app_common::Pretty;
/// use tracing::debug;
///
/// debug!("Loaded configuration: {}", Pretty(&config));
/// ```
///
/// The YAML is preceded by a newline. `Debug` output is used when the value
/// cannot be serialized.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> Pretty<T> {
    fn render(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(f)
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct Settings {
        database_path: String,
        log_level: String,
    }

    #[test]
    fn test_pretty_renders_yaml_with_leading_newline() {
        let settings = Settings {
            database_path: "todo.db".to_string(),
            log_level: "warn".to_string(),
        };
        let rendered = format!("{}", Pretty(&settings));
        assert!(rendered.starts_with('\n'));
        assert!(rendered.contains("database_path: todo.db"));
        assert!(rendered.contains("log_level: warn"));
    }

    #[test]
    fn test_pretty_debug_matches_display() {
        let value = serde_json::json!({"tags": ["work", "urgent"]});
        assert_eq!(format!("{:?}", Pretty(&value)), format!("{}", Pretty(&value)));
    }
}
