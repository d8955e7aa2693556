//! Personal TODO tracking: domain model, repository contract and services
//!
//! The crate is organized in layers, leaves first:
//!
//! - [`model`]: the [`TodoItem`] entity with its [`Status`] and [`Priority`] fields
//! - [`repository`]: the [`TodoRepository`] contract every storage adapter satisfies
//! - [`memory`]: an in-memory adapter, used by tests and as a reference implementation
//! - [`filters`]: pure in-memory filtering and sorting
//! - [`services`]: [`TodoService`], the only place holding business rules
//! - [`labels`]: conversions between domain values and the text users type
//!
//! ## Basic Usage
//!
//! ```rust
//! use todo_app::{CreateTodoRequest, InMemoryTodoRepository, Priority, TodoService};
//!
//! # fn example() -> todo_app::Result<()> {
//! let service = TodoService::new(Box::new(InMemoryTodoRepository::new()));
//!
//! let item = service.create(
//!     CreateTodoRequest::new(" Write report ")
//!         .with_priority(Priority::High)
//!         .with_tags(["work", " ", "urgent"]),
//! )?;
//! assert_eq!(item.title, "Write report");
//! assert_eq!(item.tags, vec!["work", "urgent"]);
//!
//! let toggled = service.toggle(item.id.unwrap())?.unwrap();
//! assert!(toggled.is_done());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod clock;
pub mod error;
pub mod filters;
pub mod labels;
pub mod memory;
pub mod model;
pub mod repository;
pub mod services;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, TodoError};
pub use filters::{apply_filters, sort_items, SortOrder, TodoFilter};
pub use labels::{format_tags, parse_tags, priority_label};
pub use memory::InMemoryTodoRepository;
pub use model::{Priority, Status, TodoId, TodoItem};
pub use repository::TodoRepository;
pub use services::{CreateTodoRequest, ListTodosRequest, TodoService, UpdateTodoRequest};
