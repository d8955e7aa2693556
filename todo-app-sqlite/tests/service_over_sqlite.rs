//! Domain services running against the SQLite adapter

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tempfile::TempDir;
use todo_app::{
    parse_tags, CreateTodoRequest, FixedClock, ListTodosRequest, Priority, Status, TodoService,
    UpdateTodoRequest,
};
use todo_app_sqlite::SqliteTodoRepository;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 10)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

fn setup() -> (TempDir, Arc<FixedClock>, TodoService) {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(FixedClock::new(start()));
    let repo = SqliteTodoRepository::open(dir.path().join("todo.db"), clock.clone()).unwrap();
    let service = TodoService::with_clock(Box::new(repo), clock.clone());
    (dir, clock, service)
}

#[test]
fn create_and_fetch_round_trip() {
    let (_dir, _clock, service) = setup();
    let created = service
        .create(
            CreateTodoRequest::new(" My Task ")
                .with_priority(Priority::High)
                .with_due_date(date(10))
                .with_tags(parse_tags(" work , ,urgent ")),
        )
        .unwrap();

    let fetched = service.get(created.id.unwrap()).unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "My Task");
    assert_eq!(fetched.tags, vec!["work", "urgent"]);
}

#[test]
fn list_orders_and_filters() {
    let (_dir, clock, service) = setup();
    for (title, due) in [("A", Some(9)), ("B", Some(11)), ("C", Some(10)), ("D", None)] {
        let mut request = CreateTodoRequest::new(title);
        request.due_date = due.map(date);
        service.create(request).unwrap();
        clock.advance(Duration::seconds(1));
    }

    let titles = |request| -> Vec<String> {
        service
            .list(request)
            .unwrap()
            .into_iter()
            .map(|item| item.title)
            .collect()
    };

    assert_eq!(titles(ListTodosRequest::default()), vec!["D", "C", "B", "A"]);
    assert_eq!(
        titles(ListTodosRequest {
            due_today_or_overdue: true,
            reference_date: Some(date(10)),
            ..Default::default()
        }),
        vec!["C", "A"]
    );
}

#[test]
fn toggle_and_update_persist() {
    let (_dir, clock, service) = setup();
    let item = service.create(CreateTodoRequest::new("Draft")).unwrap();
    let id = item.id.unwrap();

    clock.advance(Duration::minutes(1));
    let done = service.toggle(id).unwrap().unwrap();
    assert_eq!(done.status, Status::Done);

    clock.advance(Duration::minutes(1));
    let mut request = UpdateTodoRequest::from_item(id, &done);
    request.title = "Final".to_string();
    request.description = Some("  reviewed ".to_string());
    let updated = service.update(request).unwrap().unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.description.as_deref(), Some("reviewed"));
    assert_eq!(updated.status, Status::Done);
    assert_eq!(updated.created_at, start());
    assert_eq!(updated.updated_at, start() + Duration::minutes(2));
}

#[test]
fn update_after_delete_is_absent() {
    let (_dir, _clock, service) = setup();
    let item = service.create(CreateTodoRequest::new("Temporary")).unwrap();
    let id = item.id.unwrap();

    service.delete(id).unwrap();
    assert!(service
        .update(UpdateTodoRequest::new(id, "Too late"))
        .unwrap()
        .is_none());
    assert!(service.toggle(id).unwrap().is_none());
}
