//! CLI definition for the todo command-line interface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use todo_app::{Priority, Status};

/// Accepted format for dates on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// todo - personal TODO tracker
///
/// Items are stored in a local SQLite database.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(version)]
#[command(about = "Personal TODO tracker")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Database file, overriding configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Extra configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Status filter values
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Done,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Status::Pending,
            StatusArg::Done => Status::Done,
        }
    }
}

/// New value for an optional field on `edit`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldChange<T> {
    Set(T),
    Clear,
}

impl<T> FieldChange<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            FieldChange::Set(value) => Some(value),
            FieldChange::Clear => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new TODO
    Add {
        /// What needs doing
        title: String,
        /// Longer notes
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
        /// Low, Medium or High
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// List TODOs, newest first
    List {
        /// Only items with this status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Only items with this priority
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        /// Only items due today or earlier
        #[arg(long)]
        due_today_or_overdue: bool,
        /// Date treated as today by --due-today-or-overdue (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, requires = "due_today_or_overdue")]
        as_of: Option<NaiveDate>,
        /// Case-insensitive text search in title and description
        #[arg(long)]
        query: Option<String>,
        /// Only items carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Sort by due date, undated last
        #[arg(long)]
        sort_due: bool,
        /// Sort by priority, High first
        #[arg(long)]
        sort_priority: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single TODO
    Show {
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip a TODO between pending and done
    Toggle { id: i64 },
    /// Edit a TODO; omitted options keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        /// New description; an empty string clears it
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD) or "none"
        #[arg(long, value_parser = parse_due_change)]
        due: Option<FieldChange<NaiveDate>>,
        /// Low, Medium, High or None
        #[arg(long, value_parser = parse_priority_change)]
        priority: Option<FieldChange<Priority>>,
        /// Comma-separated tags replacing the current ones
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a TODO
    Delete { id: i64 },
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Parse a priority from its label ("High") or stored name ("HIGH")
pub fn parse_priority(s: &str) -> Result<Priority, String> {
    let s = s.trim();
    Priority::from_label(s)
        .map(Ok)
        .unwrap_or_else(|| s.parse::<Priority>())
        .map_err(|_| format!("invalid priority '{s}', expected Low, Medium or High"))
}

fn parse_due_change(s: &str) -> Result<FieldChange<NaiveDate>, String> {
    if s.trim().eq_ignore_ascii_case("none") {
        return Ok(FieldChange::Clear);
    }
    parse_date(s).map(FieldChange::Set)
}

fn parse_priority_change(s: &str) -> Result<FieldChange<Priority>, String> {
    if s.trim().eq_ignore_ascii_case("none") {
        return Ok(FieldChange::Clear);
    }
    parse_priority(s).map(FieldChange::Set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("High", Priority::High)]
    #[case("medium", Priority::Medium)]
    #[case("LOW", Priority::Low)]
    fn test_parse_priority(#[case] input: &str, #[case] expected: Priority) {
        assert_eq!(parse_priority(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_priority_rejects_none() {
        assert!(parse_priority("None").is_err());
        assert_eq!(parse_priority_change("None").unwrap(), FieldChange::Clear);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert!(parse_date("10/01/2025").is_err());
        assert_eq!(parse_due_change("none").unwrap(), FieldChange::Clear);
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "todo",
            "list",
            "--status",
            "done",
            "--due-today-or-overdue",
            "--as-of",
            "2025-01-10",
            "--sort-priority",
        ])
        .unwrap();

        match cli.command {
            Commands::List {
                status,
                due_today_or_overdue,
                as_of,
                sort_priority,
                sort_due,
                ..
            } => {
                assert_eq!(status, Some(StatusArg::Done));
                assert!(due_today_or_overdue);
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2025, 1, 10));
                assert!(sort_priority);
                assert!(!sort_due);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_as_of_requires_due_flag() {
        assert!(Cli::try_parse_from(["todo", "list", "--as-of", "2025-01-10"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["todo", "toggle", "3", "--db", "x.db", "--debug"]).unwrap();
        assert!(cli.debug);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
    }
}
