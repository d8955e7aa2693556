//! [`TodoRepository`] over a SQLite connection

use crate::codec::{encode_tags, StoredRow, SELECT_COLUMNS};
use crate::schema;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use todo_app::{Clock, Result, Status, TodoError, TodoId, TodoItem, TodoRepository};
use tracing::{debug, trace};

/// How long a write waits on another process holding the database lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed repository
///
/// The connection sits behind a mutex so the repository is `Send + Sync`.
/// Every operation runs in its own transaction and commits before returning.
pub struct SqliteTodoRepository {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl SqliteTodoRepository {
    /// Open or create the database file at `path`, creating parent directories
    pub fn open(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(TodoError::storage)?;
        }

        debug!("Opening todo database at {}", path.display());
        let conn = Connection::open(path).map_err(TodoError::storage)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(TodoError::storage)?;
        // journal_mode answers with the mode now in effect
        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(TodoError::storage)?;
        conn.execute("PRAGMA synchronous = NORMAL", [])
            .map_err(TodoError::storage)?;
        trace!("Journal mode: {}", journal_mode);

        Self::with_connection(conn, clock)
    }

    /// Private database that disappears with the repository
    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(TodoError::storage)?;
        Self::with_connection(conn, clock)
    }

    fn with_connection(mut conn: Connection, clock: Arc<dyn Clock>) -> Result<Self> {
        schema::initialize(&mut conn).map_err(TodoError::storage)?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // rusqlite rolls back an unfinished transaction on drop.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `work` in one transaction, committing only when it succeeds
    fn unit_of_work<T>(
        &self,
        work: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let mut conn = self.conn();
        let tx = conn.transaction().map_err(TodoError::storage)?;
        let value = work(&tx).map_err(TodoError::storage)?;
        tx.commit().map_err(TodoError::storage)?;
        Ok(value)
    }
}

fn select_row(tx: &Transaction<'_>, id: i64) -> rusqlite::Result<Option<StoredRow>> {
    tx.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM todos WHERE id = ?1"),
        [id],
        StoredRow::from_row,
    )
    .optional()
}

fn select_created_at(tx: &Transaction<'_>, id: i64) -> rusqlite::Result<Option<NaiveDateTime>> {
    tx.query_row("SELECT created_at FROM todos WHERE id = ?1", [id], |row| {
        row.get(0)
    })
    .optional()
}

impl TodoRepository for SqliteTodoRepository {
    fn add(&self, mut item: TodoItem) -> Result<TodoItem> {
        if let Some(id) = item.id {
            return Err(TodoError::IdAlreadyAssigned(id));
        }

        let id = self.unit_of_work(|tx| {
            tx.execute(
                "INSERT INTO todos (title, description, status, created_at, updated_at, due_date, priority, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    item.title,
                    item.description,
                    item.status.as_str(),
                    item.created_at,
                    item.updated_at,
                    item.due_date,
                    item.priority.map(|p| p.as_str()),
                    encode_tags(&item.tags),
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        item.id = Some(TodoId::new(id));
        trace!("Inserted todo row {}", id);
        Ok(item)
    }

    fn list_all(&self) -> Result<Vec<TodoItem>> {
        let rows = self.unit_of_work(|tx| {
            let mut stmt = tx.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt
                .query_map([], StoredRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;

        trace!("Read {} todo rows", rows.len());
        rows.into_iter().map(StoredRow::into_item).collect()
    }

    fn get(&self, id: TodoId) -> Result<Option<TodoItem>> {
        self.unit_of_work(|tx| select_row(tx, id.get()))?
            .map(StoredRow::into_item)
            .transpose()
    }

    fn update(&self, item: TodoItem) -> Result<TodoItem> {
        let id = item.id.ok_or(TodoError::MissingId)?;

        let row = self.unit_of_work(|tx| {
            let Some(created_at) = select_created_at(tx, id.get())? else {
                return Ok(None);
            };

            tx.execute(
                "UPDATE todos
                 SET title = ?1, description = ?2, status = ?3, updated_at = ?4,
                     due_date = ?5, priority = ?6, tags = ?7
                 WHERE id = ?8",
                params![
                    item.title,
                    item.description,
                    item.status.as_str(),
                    item.updated_at.max(created_at),
                    item.due_date,
                    item.priority.map(|p| p.as_str()),
                    encode_tags(&item.tags),
                    id.get(),
                ],
            )?;
            select_row(tx, id.get())
        })?;

        row.ok_or(TodoError::Conflict { id })?.into_item()
    }

    fn delete(&self, id: TodoId) -> Result<()> {
        let removed =
            self.unit_of_work(|tx| tx.execute("DELETE FROM todos WHERE id = ?1", [id.get()]))?;
        trace!("Deleted {} todo rows for id {}", removed, id);
        Ok(())
    }

    fn set_status(&self, id: TodoId, status: Status) -> Result<Option<TodoItem>> {
        let now = self.clock.now();

        self.unit_of_work(|tx| {
            let Some(created_at) = select_created_at(tx, id.get())? else {
                return Ok(None);
            };

            tx.execute(
                "UPDATE todos SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.as_str(), now.max(created_at), id.get()],
            )?;
            select_row(tx, id.get())
        })?
        .map(StoredRow::into_item)
        .transpose()
    }
}
