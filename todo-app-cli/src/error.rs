//! Error handling for the todo CLI
//!
//! Every failure is funneled into [`CliError`], which keeps the original error
//! as its source and carries the exit code the process should end with.

use std::error::Error;
use std::fmt;

use todo_app::{TodoError, TodoId};
use todo_app_common::{ErrorSeverity, Severity};

use crate::config::ConfigError;
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// The addressed item does not exist
    pub fn not_found(id: TodoId) -> Self {
        Self::new(
            format!("TODO {id} not found. It may have been deleted."),
            EXIT_WARNING,
        )
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Exit code for an error of the given severity
pub fn exit_code_for(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => EXIT_WARNING,
        ErrorSeverity::Error | ErrorSeverity::Critical => EXIT_ERROR,
    }
}

impl From<TodoError> for CliError {
    fn from(error: TodoError) -> Self {
        let exit_code = exit_code_for(error.severity());
        match error {
            // The adapter error becomes the first "Caused by" line.
            TodoError::Storage(inner) => Self {
                message: "Storage error".to_string(),
                exit_code,
                source: Some(inner),
            },
            other => Self::new(other.to_string(), exit_code),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self {
            message: "Failed to load configuration".to_string(),
            exit_code: exit_code_for(error.severity()),
            source: Some(Box::new(error)),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self {
            message: "Failed to serialize output".to_string(),
            exit_code: EXIT_ERROR,
            source: Some(Box::new(error)),
        }
    }
}

/// Convert a CliResult to an exit code, printing the full error chain if needed
pub fn handle_cli_result<T>(result: CliResult<T>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed with exit code {}", e.exit_code);
            tracing::error!("Error: {}", e.full_chain());
            e.exit_code
        }
    }
}
