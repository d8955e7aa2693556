//! Process exit codes

/// Command completed
pub const EXIT_SUCCESS: i32 = 0;

/// Input was rejected or the addressed item does not exist
pub const EXIT_WARNING: i32 = 1;

/// Configuration, storage or other hard failure
pub const EXIT_ERROR: i32 = 2;
