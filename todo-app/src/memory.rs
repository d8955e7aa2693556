//! In-memory repository
//!
//! Holds items in a mutex-guarded vector. Nothing survives the process, which
//! makes it the adapter of choice for tests of the service layer.

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TodoError};
use crate::model::{Status, TodoId, TodoItem};
use crate::repository::{sort_newest_first, TodoRepository};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

#[derive(Debug)]
struct State {
    items: Vec<TodoItem>,
    next_id: i64,
}

/// Repository that keeps every item in process memory
pub struct InMemoryTodoRepository {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTodoRepository {
    /// Empty repository stamping status changes with the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Empty repository stamping status changes with `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State {
                items: Vec::new(),
                next_id: 1,
            }),
            clock,
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock cannot leave State half-written.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn add(&self, mut item: TodoItem) -> Result<TodoItem> {
        if let Some(id) = item.id {
            return Err(TodoError::IdAlreadyAssigned(id));
        }

        let mut state = self.state();
        let id = TodoId::new(state.next_id);
        state.next_id += 1;

        item.id = Some(id);
        state.items.push(item.clone());
        trace!("Stored todo item {} in memory", id);
        Ok(item)
    }

    fn list_all(&self) -> Result<Vec<TodoItem>> {
        let mut items = self.state().items.clone();
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn get(&self, id: TodoId) -> Result<Option<TodoItem>> {
        Ok(self
            .state()
            .items
            .iter()
            .find(|item| item.id == Some(id))
            .cloned())
    }

    fn update(&self, item: TodoItem) -> Result<TodoItem> {
        let id = item.id.ok_or(TodoError::MissingId)?;
        let mut state = self.state();
        let stored = state
            .items
            .iter_mut()
            .find(|stored| stored.id == Some(id))
            .ok_or(TodoError::Conflict { id })?;

        let created_at = stored.created_at;
        *stored = TodoItem { created_at, ..item };
        let updated_at = stored.updated_at;
        stored.touch(updated_at);
        Ok(stored.clone())
    }

    fn delete(&self, id: TodoId) -> Result<()> {
        self.state().items.retain(|item| item.id != Some(id));
        Ok(())
    }

    fn set_status(&self, id: TodoId, status: Status) -> Result<Option<TodoItem>> {
        let now = self.clock.now();
        let mut state = self.state();
        let Some(stored) = state.items.iter_mut().find(|item| item.id == Some(id)) else {
            return Ok(None);
        };

        stored.status = status;
        stored.touch(now);
        Ok(Some(stored.clone()))
    }
}
