//! Opening databases written by earlier releases

use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::Arc;
use tempfile::TempDir;
use todo_app::{Status, SystemClock, TodoId, TodoRepository};
use todo_app_sqlite::{schema, SqliteTodoRepository};

const FIRST_RELEASE_SCHEMA: &str = r#"
    CREATE TABLE todos (
        id INTEGER NOT NULL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description VARCHAR(2000),
        status VARCHAR(20) NOT NULL,
        created_at DATETIME NOT NULL,
        updated_at DATETIME NOT NULL
    );
    INSERT INTO todos (title, description, status, created_at, updated_at)
    VALUES ('Old task', NULL, 'DONE', '2024-12-01 10:00:00.000000', '2024-12-02 11:30:00.000000');
"#;

fn legacy_database() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(FIRST_RELEASE_SCHEMA).unwrap();
    (dir, path)
}

#[test]
fn legacy_rows_survive_migration() {
    let (_dir, path) = legacy_database();
    let repo = SqliteTodoRepository::open(&path, Arc::new(SystemClock)).unwrap();

    let items = repo.list_all().unwrap();
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.title, "Old task");
    assert_eq!(item.status, Status::Done);
    assert_eq!(item.due_date, None);
    assert_eq!(item.priority, None);
    assert!(item.tags.is_empty());
    assert_eq!(
        item.created_at,
        NaiveDate::from_ymd_opt(2024, 12, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    );
}

#[test]
fn migration_adds_nullable_columns() {
    let (_dir, path) = legacy_database();
    drop(SqliteTodoRepository::open(&path, Arc::new(SystemClock)).unwrap());

    let conn = Connection::open(&path).unwrap();
    let columns = schema::column_names(&conn).unwrap();
    for (column, _) in schema::ADDITIVE_COLUMNS {
        assert!(columns.iter().any(|c| c == column), "missing {column}");
    }
}

#[test]
fn comma_joined_tags_are_still_read() {
    let (_dir, path) = legacy_database();
    let repo = SqliteTodoRepository::open(&path, Arc::new(SystemClock)).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "UPDATE todos SET tags = 'work, urgent', priority = 'HIGH' WHERE id = 1",
        [],
    )
    .unwrap();
    drop(conn);

    let item = repo.get(TodoId::new(1)).unwrap().unwrap();
    assert_eq!(item.tags, vec!["work", "urgent"]);
    assert_eq!(item.priority, Some(todo_app::Priority::High));
}

#[test]
fn bracketed_legacy_tag_does_not_break_listing() {
    let (_dir, path) = legacy_database();
    let repo = SqliteTodoRepository::open(&path, Arc::new(SystemClock)).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute("UPDATE todos SET tags = '[draft],work' WHERE id = 1", [])
        .unwrap();
    conn.execute(
        "INSERT INTO todos (title, status, created_at, updated_at, tags)
         VALUES ('Groceries', 'PENDING', '2024-12-03 09:00:00.000000', '2024-12-03 09:00:00.000000', 'home')",
        [],
    )
    .unwrap();
    drop(conn);

    let items = repo.list_all().unwrap();
    let tags: Vec<_> = items.iter().map(|item| item.tags.clone()).collect();
    assert_eq!(tags, vec![vec!["home"], vec!["[draft]", "work"]]);
}
