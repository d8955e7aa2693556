//! Table creation and additive migrations
//!
//! Migrations only ever add nullable columns, so rows written by an older
//! version stay valid.

use rusqlite::{Connection, Result as SqliteResult};
use tracing::{debug, info};

/// Name of the single table
pub const TABLE: &str = "todos";

/// Columns added after the first release, with their declared types
pub const ADDITIVE_COLUMNS: [(&str, &str); 3] = [
    ("due_date", "DATE"),
    ("priority", "VARCHAR(20)"),
    ("tags", "VARCHAR(255)"),
];

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(255) NOT NULL,
        description VARCHAR(2000),
        status VARCHAR(20) NOT NULL DEFAULT 'PENDING',
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL,
        due_date DATE,
        priority VARCHAR(20),
        tags VARCHAR(255)
    );

    CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
"#;

/// Bring the schema up to date in one transaction
///
/// Returns the names of the columns that had to be added.
pub fn initialize(conn: &mut Connection) -> SqliteResult<Vec<&'static str>> {
    let tx = conn.transaction()?;
    let added = migrate(&tx)?;
    tx.execute_batch(CREATE_TABLE)?;
    tx.commit()?;

    if !added.is_empty() {
        info!("Migrated {} table, added columns: {:?}", TABLE, added);
    }
    Ok(added)
}

/// Add missing columns to an existing table; no-op when the table is absent
fn migrate(conn: &Connection) -> SqliteResult<Vec<&'static str>> {
    if !table_exists(conn)? {
        debug!("No {} table yet, nothing to migrate", TABLE);
        return Ok(Vec::new());
    }

    let existing = column_names(conn)?;
    let mut added = Vec::new();
    for (column, sql_type) in ADDITIVE_COLUMNS {
        if existing.iter().any(|name| name == column) {
            continue;
        }
        conn.execute_batch(&format!("ALTER TABLE {TABLE} ADD COLUMN {column} {sql_type}"))?;
        added.push(column);
    }
    Ok(added)
}

fn table_exists(conn: &Connection) -> SqliteResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Column names of the todos table, in declaration order
pub fn column_names(conn: &Connection) -> SqliteResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({TABLE})"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(names)
}
