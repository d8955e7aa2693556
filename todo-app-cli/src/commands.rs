//! Command handlers
//!
//! Each handler runs one domain-service call and returns the text to print.

use todo_app::{
    apply_filters, parse_tags, sort_items, CreateTodoRequest, ListTodosRequest, SortOrder,
    TodoFilter, TodoId, TodoService, UpdateTodoRequest,
};
use tracing::debug;

use crate::cli::Commands;
use crate::config::TodoConfig;
use crate::error::{CliError, CliResult};
use crate::render::{render_detail, render_json, render_list};

/// Dispatch a parsed subcommand
pub fn run_command(
    service: &TodoService,
    command: Commands,
    config: &TodoConfig,
) -> CliResult<String> {
    match command {
        Commands::Add {
            title,
            description,
            due,
            priority,
            tags,
        } => {
            let mut request = CreateTodoRequest::new(title);
            request.description = description;
            request.due_date = due;
            request.priority = priority;
            request.tags = tags.as_deref().map(parse_tags).unwrap_or_default();

            let item = service.create(request)?;
            Ok(format!("Added TODO {}: {}", id_text(item.id), item.title))
        }
        Commands::List {
            status,
            priority,
            due_today_or_overdue,
            as_of,
            query,
            tag,
            sort_due,
            sort_priority,
            json,
        } => {
            let request = ListTodosRequest {
                status: status.map(Into::into),
                priority,
                due_today_or_overdue,
                reference_date: as_of,
            };
            let filter = TodoFilter {
                status: None,
                text_query: query,
                tag,
            };
            let order = SortOrder {
                by_due_date: sort_due || config.sort_by_due_date,
                by_priority: sort_priority || config.sort_by_priority,
            };

            let items = service.list(request)?;
            let items = sort_items(&apply_filters(&items, &filter), order);
            debug!("Rendering {} items", items.len());

            if json {
                Ok(render_json(&items)?)
            } else {
                Ok(render_list(&items))
            }
        }
        Commands::Show { id, json } => {
            let id = TodoId::new(id);
            let item = service.get(id)?.ok_or_else(|| CliError::not_found(id))?;
            if json {
                Ok(render_json(&item)?)
            } else {
                Ok(render_detail(&item))
            }
        }
        Commands::Toggle { id } => {
            let id = TodoId::new(id);
            let item = service.toggle(id)?.ok_or_else(|| CliError::not_found(id))?;
            Ok(format!("TODO {} is now {}", id, item.status.label()))
        }
        Commands::Edit {
            id,
            title,
            description,
            due,
            priority,
            tags,
        } => {
            let id = TodoId::new(id);
            let current = service.get(id)?.ok_or_else(|| CliError::not_found(id))?;

            let mut request = UpdateTodoRequest::from_item(id, &current);
            if let Some(title) = title {
                request.title = title;
            }
            if let Some(description) = description {
                request.description = Some(description);
            }
            if let Some(due) = due {
                request.due_date = due.into_option();
            }
            if let Some(priority) = priority {
                request.priority = priority.into_option();
            }
            if let Some(tags) = tags {
                request.tags = parse_tags(&tags);
            }

            service
                .update(request)?
                .ok_or_else(|| CliError::not_found(id))?;
            Ok("TODO updated.".to_string())
        }
        Commands::Delete { id } => {
            let id = TodoId::new(id);
            service.delete(id)?;
            Ok(format!("Deleted TODO {id}"))
        }
    }
}

fn id_text(id: Option<TodoId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}
