//! Command-line front end for the todo app
//!
//! The `todo` binary parses arguments with clap, resolves configuration with
//! figment, opens the SQLite store and hands each subcommand to the domain
//! services.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Rejected input or unknown id
//! - 2: Configuration or storage failure

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod render;

pub use cli::{Cli, Commands};
pub use config::{ConfigError, TodoConfig};
pub use error::{handle_cli_result, CliError, CliResult};

use std::sync::Arc;
use todo_app::{SystemClock, TodoService};
use todo_app_common::Pretty;
use todo_app_sqlite::SqliteTodoRepository;
use tracing::debug;

/// Load configuration, set up logging, open the store and run the command
///
/// Returns the text to print on success.
pub fn run(cli: Cli) -> CliResult<String> {
    let config = TodoConfig::load(cli.config.as_deref(), cli.db.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.log_level.as_str())
        .unwrap_or("warn");
    logging::init_logging(cli.debug, level);
    let config = config?;
    debug!("Configuration: {}", Pretty(&config));

    let clock = Arc::new(SystemClock);
    let repo = SqliteTodoRepository::open(&config.database_path, clock.clone())?;
    let service = TodoService::with_clock(Box::new(repo), clock);

    commands::run_command(&service, cli.command, &config)
}
