//! Error severity classification
//!
//! Every error type in the workspace implements [`Severity`] so that the
//! command-line front end can choose log levels and exit codes without
//! knowing the concrete error variants.

/// Severity levels for error classification
///
/// - **Warning**: the request was rejected but nothing is wrong with the system,
///   e.g. an empty title or an unknown id.
/// - **Error**: the operation failed and the caller has to act, e.g. an update
///   aimed at an item that no longer exists.
/// - **Critical**: the store itself is unusable, e.g. the database file cannot
///   be opened or a stored record cannot be decoded.
///
/// # Examples
///
/// ```rust
/// use todo_app_common::ErrorSeverity;
///
/// assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Input was rejected; the system is fine
    Warning,

    /// Operation failed but other operations can proceed
    Error,

    /// The storage layer is broken and needs attention
    Critical,
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use todo_app_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum LoadError {
///     Corrupted,
///     Missing,
/// }
///
/// impl Severity for LoadError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             LoadError::Corrupted => ErrorSeverity::Critical,
///             LoadError::Missing => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(LoadError::Missing.severity(), ErrorSeverity::Warning);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}
