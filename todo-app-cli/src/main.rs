//! todo - personal TODO tracker
//!
//! Commands:
//! - `todo add <title>`: Create a TODO
//! - `todo list`: List TODOs, newest first, with optional filters and sorting
//! - `todo show <id>`: Show one TODO
//! - `todo toggle <id>`: Flip between pending and done
//! - `todo edit <id>`: Change fields of a TODO
//! - `todo delete <id>`: Delete a TODO

use clap::Parser;
use todo_app_cli::{handle_cli_result, run, Cli};

fn main() {
    let cli = Cli::parse();

    let result = run(cli).map(|output| {
        if !output.is_empty() {
            println!("{output}");
        }
    });
    std::process::exit(handle_cli_result(result));
}
