//! SQLite storage adapter for todo items
//!
//! [`SqliteTodoRepository`] implements [`todo_app::TodoRepository`] over a
//! single database file. The schema is created on open, and older databases
//! are brought forward by adding the columns they lack.
//!
//! # Schema
//!
//! - `todos`: one row per item; `status` and `priority` hold the stored enum
//!   names, `tags` holds a JSON array of strings
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use todo_app::{CreateTodoRequest, SystemClock, TodoService};
//! use todo_app_sqlite::SqliteTodoRepository;
//!
//! # fn example() -> todo_app::Result<()> {
//! let repo = SqliteTodoRepository::open_in_memory(Arc::new(SystemClock))?;
//! let service = TodoService::new(Box::new(repo));
//! let item = service.create(CreateTodoRequest::new("Water plants"))?;
//! assert!(item.id.is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod codec;
mod repository;
pub mod schema;

pub use repository::SqliteTodoRepository;

/// Database file used when nothing else is configured
pub const DEFAULT_DB_FILENAME: &str = "todo.db";
