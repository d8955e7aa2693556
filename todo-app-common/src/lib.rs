//! # Todo App Common
//!
//! Foundational pieces shared by every crate in the todo app workspace.
//!
//! ## Modules
//!
//! - [`error`] - Severity classification implemented by each crate's error type
//! - [`logging`] - Helpers for rendering structured values in tracing output

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::Pretty;
