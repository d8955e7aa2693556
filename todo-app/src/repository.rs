//! Storage contract consumed by the services
//!
//! Adapters implement [`TodoRepository`] over one logical store. Each call is
//! a self-contained unit of work: it either commits one logical change or
//! fails without partial effects.

use crate::error::Result;
use crate::model::{Status, TodoId, TodoItem};
use std::sync::Arc;

/// Storage abstraction for todo items
pub trait TodoRepository: Send + Sync {
    /// Persist a new item and return it with its assigned id
    ///
    /// Fails with [`crate::TodoError::IdAlreadyAssigned`] if the item already has an id.
    fn add(&self, item: TodoItem) -> Result<TodoItem>;

    /// Every stored item, newest `created_at` first (ties: higher id first)
    fn list_all(&self) -> Result<Vec<TodoItem>>;

    /// The item with the given id, or `None`
    fn get(&self, id: TodoId) -> Result<Option<TodoItem>>;

    /// Replace the stored item that has the same id
    ///
    /// Fails with [`crate::TodoError::MissingId`] for unpersisted items and with
    /// [`crate::TodoError::Conflict`] when no stored item has that id. `id` and
    /// `created_at` are never overwritten.
    fn update(&self, item: TodoItem) -> Result<TodoItem>;

    /// Remove the item; unknown ids are ignored
    fn delete(&self, id: TodoId) -> Result<()>;

    /// Set the status and refresh `updated_at`; `None` for unknown ids
    fn set_status(&self, id: TodoId, status: Status) -> Result<Option<TodoItem>>;
}

impl<R: TodoRepository + ?Sized> TodoRepository for Arc<R> {
    fn add(&self, item: TodoItem) -> Result<TodoItem> {
        (**self).add(item)
    }

    fn list_all(&self) -> Result<Vec<TodoItem>> {
        (**self).list_all()
    }

    fn get(&self, id: TodoId) -> Result<Option<TodoItem>> {
        (**self).get(id)
    }

    fn update(&self, item: TodoItem) -> Result<TodoItem> {
        (**self).update(item)
    }

    fn delete(&self, id: TodoId) -> Result<()> {
        (**self).delete(id)
    }

    fn set_status(&self, id: TodoId, status: Status) -> Result<Option<TodoItem>> {
        (**self).set_status(id, status)
    }
}

impl<R: TodoRepository + ?Sized> TodoRepository for Box<R> {
    fn add(&self, item: TodoItem) -> Result<TodoItem> {
        (**self).add(item)
    }

    fn list_all(&self) -> Result<Vec<TodoItem>> {
        (**self).list_all()
    }

    fn get(&self, id: TodoId) -> Result<Option<TodoItem>> {
        (**self).get(id)
    }

    fn update(&self, item: TodoItem) -> Result<TodoItem> {
        (**self).update(item)
    }

    fn delete(&self, id: TodoId) -> Result<()> {
        (**self).delete(id)
    }

    fn set_status(&self, id: TodoId, status: Status) -> Result<Option<TodoItem>> {
        (**self).set_status(id, status)
    }
}

/// Order items the way `list_all` must return them
///
/// Adapters without native ordering call this before returning.
pub fn sort_newest_first(items: &mut [TodoItem]) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
