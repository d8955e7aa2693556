//! Domain services
//!
//! [`TodoService`] holds every business rule: title validation, text
//! normalization, timestamp stamping and the list filters. It depends only on
//! the [`TodoRepository`] contract and re-reads the store on every call.

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TodoError};
use crate::model::{Priority, Status, TodoId, TodoItem};
use crate::repository::TodoRepository;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// Input for [`TodoService::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

impl CreateTodoRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Input for [`TodoService::update`]
///
/// Every field replaces the stored value wholesale; `None` or an empty vector
/// clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

impl UpdateTodoRequest {
    /// Request that clears every optional field
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            tags: Vec::new(),
        }
    }

    /// Request that rewrites `item` with its current values
    ///
    /// Useful as a starting point when only some fields should change.
    pub fn from_item(id: TodoId, item: &TodoItem) -> Self {
        Self {
            id,
            title: item.title.clone(),
            description: item.description.clone(),
            due_date: item.due_date,
            priority: item.priority,
            tags: item.tags.clone(),
        }
    }
}

/// Input for [`TodoService::list`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListTodosRequest {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Keep only items due on or before the reference date
    pub due_today_or_overdue: bool,
    /// Defaults to the clock's today; ignored unless `due_today_or_overdue`
    pub reference_date: Option<NaiveDate>,
}

/// Business operations over a [`TodoRepository`]
pub struct TodoService {
    repo: Box<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
}

impl TodoService {
    /// Service stamping timestamps with the system clock
    pub fn new(repo: Box<dyn TodoRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Box<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// The underlying repository
    pub fn repository(&self) -> &dyn TodoRepository {
        self.repo.as_ref()
    }

    /// Validate, normalize and persist a new pending item
    pub fn create(&self, request: CreateTodoRequest) -> Result<TodoItem> {
        debug!("Creating todo item with title: {:?}", request.title);
        let title = normalize_title(&request.title)?;

        let mut item = TodoItem::new(title, self.clock.now());
        item.description = normalize_description(request.description);
        item.due_date = request.due_date;
        item.priority = request.priority;
        item.tags = normalize_tags(request.tags);

        let item = self.repo.add(item)?;
        if let Some(id) = item.id {
            info!("Created todo item {}: {}", id, item.title);
        }
        Ok(item)
    }

    /// Items in repository order, narrowed by status, then priority, then due date
    pub fn list(&self, request: ListTodosRequest) -> Result<Vec<TodoItem>> {
        debug!("Listing todo items: {:?}", request);
        let mut items = self.repo.list_all()?;

        if let Some(status) = request.status {
            items.retain(|item| item.status == status);
        }
        if let Some(priority) = request.priority {
            items.retain(|item| item.priority == Some(priority));
        }
        if request.due_today_or_overdue {
            let reference = request
                .reference_date
                .unwrap_or_else(|| self.clock.today());
            items.retain(|item| item.is_due_by(reference));
        }

        debug!("Listed {} todo items", items.len());
        Ok(items)
    }

    pub fn get(&self, id: TodoId) -> Result<Option<TodoItem>> {
        debug!("Getting todo item {}", id);
        self.repo.get(id)
    }

    /// Flip PENDING and DONE; `None` when the id is unknown
    pub fn toggle(&self, id: TodoId) -> Result<Option<TodoItem>> {
        debug!("Toggling todo item {}", id);
        let Some(item) = self.repo.get(id)? else {
            debug!("Todo item {} not found, nothing to toggle", id);
            return Ok(None);
        };

        let toggled = self.repo.set_status(id, item.status.toggled())?;
        if let Some(toggled) = &toggled {
            info!("Todo item {} is now {}", id, toggled.status);
        }
        Ok(toggled)
    }

    /// Replace every mutable field; `None` when the id is unknown
    ///
    /// If the item disappears between the lookup and the write, the
    /// repository's [`TodoError::Conflict`] propagates.
    pub fn update(&self, request: UpdateTodoRequest) -> Result<Option<TodoItem>> {
        debug!("Updating todo item {}", request.id);
        let title = normalize_title(&request.title)?;

        let Some(mut item) = self.repo.get(request.id)? else {
            debug!("Todo item {} not found, nothing to update", request.id);
            return Ok(None);
        };

        item.title = title;
        item.description = normalize_description(request.description);
        item.due_date = request.due_date;
        item.priority = request.priority;
        item.tags = normalize_tags(request.tags);
        item.touch(self.clock.now());

        let updated = self.repo.update(item)?;
        info!("Updated todo item {}", request.id);
        Ok(Some(updated))
    }

    /// Remove an item; unknown ids are ignored
    pub fn delete(&self, id: TodoId) -> Result<()> {
        debug!("Removed todo item {} if it existed", id);
        debug!("Delete requested for todo item {}", id);
        Ok(())
    }
}

/// Trimmed title, or [`TodoError::EmptyTitle`]
pub fn normalize_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Trimmed description; blank becomes `None`
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Trimmed tags with blanks dropped, order and duplicates kept
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::memory::InMemoryTodoRepository;
    use chrono::{Duration, NaiveDateTime};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn setup() -> (Arc<FixedClock>, TodoService) {
        let clock = Arc::new(FixedClock::new(start()));
        let repo = InMemoryTodoRepository::with_clock(clock.clone());
        let service = TodoService::with_clock(Box::new(repo), clock.clone());
        (clock, service)
    }

    #[test_log::test]
    fn test_create_normalizes_fields() {
        let (_clock, service) = setup();
        let item = service
            .create(
                CreateTodoRequest::new("  Write report ")
                    .with_description("   ")
                    .with_tags([" work ", "", "urgent"]),
            )
            .unwrap();

        assert!(item.is_persisted());
        assert_eq!(item.title, "Write report");
        assert_eq!(item.description, None);
        assert_eq!(item.tags, vec!["work", "urgent"]);
        assert_eq!(item.status, Status::Pending);
        assert_eq!(item.created_at, start());
        assert_eq!(item.updated_at, start());
    }

    #[test]
    fn test_create_rejects_blank_title_before_touching_store() {
        let (_clock, service) = setup();
        let result = service.create(CreateTodoRequest::new(" \t "));

        assert!(matches!(result, Err(TodoError::EmptyTitle)));
        assert!(service.repository().list_all().unwrap().is_empty());
    }

    #[test_log::test]
    fn test_list_filters_in_sequence() {
        let (clock, service) = setup();
        let today = clock.today();

        let high_due = service
            .create(
                CreateTodoRequest::new("high due")
                    .with_priority(Priority::High)
                    .with_due_date(today),
            )
            .unwrap();
        service
            .create(CreateTodoRequest::new("high undated").with_priority(Priority::High))
            .unwrap();
        let low_due = service
            .create(
                CreateTodoRequest::new("low due")
                    .with_priority(Priority::Low)
                    .with_due_date(today - Duration::days(1)),
            )
            .unwrap();
        service.toggle(low_due.id.unwrap()).unwrap();

        let request = ListTodosRequest {
            status: Some(Status::Pending),
            priority: Some(Priority::High),
            due_today_or_overdue: true,
            reference_date: None,
        };
        let items = service.list(request).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, high_due.id);

        let done = service
            .list(ListTodosRequest {
                status: Some(Status::Done),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "low due");
    }

    #[test]
    fn test_reference_date_is_ignored_without_flag() {
        let (_clock, service) = setup();
        service.create(CreateTodoRequest::new("undated")).unwrap();

        let items = service
            .list(ListTodosRequest {
                reference_date: NaiveDate::from_ymd_opt(2000, 1, 1),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_toggle_unknown_id_is_none() {
        let (_clock, service) = setup();
        assert!(service.toggle(TodoId::new(404)).unwrap().is_none());
    }

    #[test]
    fn test_toggle_stamps_updated_at() {
        let (clock, service) = setup();
        let item = service.create(CreateTodoRequest::new("Finish")).unwrap();
        clock.advance(Duration::minutes(10));

        let done = service.toggle(item.id.unwrap()).unwrap().unwrap();
        assert!(done.is_done());
        assert_eq!(done.created_at, start());
        assert_eq!(done.updated_at, start() + Duration::minutes(10));
    }

    #[test_log::test]
    fn test_update_replaces_fields_wholesale() {
        let (clock, service) = setup();
        let item = service
            .create(
                CreateTodoRequest::new("Draft")
                    .with_description("first pass")
                    .with_priority(Priority::Low)
                    .with_due_date(clock.today())
                    .with_tags(["work"]),
            )
            .unwrap();
        let id = item.id.unwrap();
        clock.advance(Duration::hours(2));

        let mut request = UpdateTodoRequest::new(id, " Final ");
        request.tags = vec![" review ".to_string(), " ".to_string()];
        let updated = service.update(request).unwrap().unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.description, None);
        assert_eq!(updated.priority, None);
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.tags, vec!["review"]);
        assert_eq!(updated.status, Status::Pending);
        assert_eq!(updated.created_at, start());
        assert_eq!(updated.updated_at, start() + Duration::hours(2));
    }

    #[test]
    fn test_update_from_item_keeps_values() {
        let (_clock, service) = setup();
        let item = service
            .create(
                CreateTodoRequest::new("Keep me")
                    .with_priority(Priority::Medium)
                    .with_tags(["home"]),
            )
            .unwrap();
        let id = item.id.unwrap();

        let mut request = UpdateTodoRequest::from_item(id, &item);
        request.title = "Renamed".to_string();
        let updated = service.update(request).unwrap().unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.priority, Some(Priority::Medium));
        assert_eq!(updated.tags, vec!["home"]);
    }

    #[test]
    fn test_update_unknown_id_is_none() {
        let (_clock, service) = setup();
        let result = service
            .update(UpdateTodoRequest::new(TodoId::new(12), "Nobody"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_validates_title_first() {
        let (_clock, service) = setup();
        let result = service.update(UpdateTodoRequest::new(TodoId::new(12), "  "));
        assert!(matches!(result, Err(TodoError::EmptyTitle)));
    }

    #[test_log::test]
    fn test_delete_then_get_is_none() {
        let (_clock, service) = setup();
        let item = service.create(CreateTodoRequest::new("Gone soon")).unwrap();
        let id = item.id.unwrap();

        service.delete(id).unwrap();
        assert!(service.get(id).unwrap().is_none());
        service.delete(id).unwrap();
        service.delete(TodoId::new(404)).unwrap();
        assert!(service.list(ListTodosRequest::default()).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_helpers() {
        assert_eq!(normalize_title(" x ").unwrap(), "x");
        assert_eq!(
            normalize_description(Some("  note ".to_string())),
            Some("note".to_string())
        );
        assert_eq!(normalize_description(None), None);
        assert_eq!(
            normalize_tags(vec!["a".into(), "  ".into(), " a ".into()]),
            vec!["a", "a"]
        );
    }
}
