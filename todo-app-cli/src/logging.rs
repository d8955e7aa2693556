//! Tracing subscriber setup
//!
//! Libraries only emit events; the binary decides where they go. Everything is
//! written to stderr so stdout stays clean for tables and JSON.

use tracing_subscriber::EnvFilter;

/// Filter used by `--debug`
pub const DEBUG_FILTER: &str = "todo_app=debug,todo_app_sqlite=debug,todo_app_cli=debug";

/// `--debug` wins, then `RUST_LOG`, then the configured level
pub fn build_filter(debug: bool, configured_level: &str) -> EnvFilter {
    if debug {
        return EnvFilter::new(DEBUG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
}

/// Install the global subscriber; later calls are ignored
pub fn init_logging(debug: bool, configured_level: &str) {
    let filter = build_filter(debug, configured_level);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
}
