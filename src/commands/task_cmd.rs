//! Task Commands
//!
//! Team agenda: tasks per day, the day notepad and the month grid.

use crate::domain::{DomainError, Task, TaskDraft, TaskPatch, TaskType};
use crate::views::MonthCalendar;
use crate::AppState;

use super::{parse_date, parse_field};

/// List all tasks
pub async fn list_tasks(state: &AppState) -> Result<Vec<Task>, String> {
    let store = state.tasks.lock().await;
    Ok(store.list().to_vec())
}

pub async fn tasks_for_date(state: &AppState, date: String) -> Result<Vec<Task>, String> {
    let date = parse_date(&date)?;
    let store = state.tasks.lock().await;
    Ok(store.for_date(date).into_iter().cloned().collect())
}

/// Create a task on `date`; the title is required
pub async fn create_task(
    state: &AppState,
    date: String,
    title: String,
    task_type: Option<String>,
) -> Result<Task, String> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(DomainError::MissingField("title").to_string());
    }
    let draft = TaskDraft {
        title,
        date: parse_date(&date)?,
        task_type: match task_type {
            Some(raw) => parse_field::<TaskType>(&raw)?,
            None => TaskType::default(),
        },
    };

    let mut store = state.tasks.lock().await;
    let id = store.create(draft).map_err(|e| e.to_string())?;
    store
        .get(&id)
        .cloned()
        .ok_or_else(|| format!("Task {} not found", id))
}

/// Edit title/type; `None` for an unknown id
pub async fn update_task(
    state: &AppState,
    id: String,
    title: Option<String>,
    task_type: Option<String>,
) -> Result<Option<Task>, String> {
    let title = title.map(|t| t.trim().to_string());
    if title.as_deref() == Some("") {
        return Err(DomainError::MissingField("title").to_string());
    }
    let patch = TaskPatch {
        title,
        task_type: task_type.map(|raw| parse_field::<TaskType>(&raw)).transpose()?,
        owner: None,
    };

    let mut store = state.tasks.lock().await;
    store.update(&id, patch).map_err(|e| e.to_string())?;
    Ok(store.get(&id).cloned())
}

/// Toggle completion; returns the new state
pub async fn toggle_task(state: &AppState, id: String) -> Result<Option<bool>, String> {
    let mut store = state.tasks.lock().await;
    store.toggle(&id).map_err(|e| e.to_string())
}

/// Delete once the user confirmed; an unconfirmed request does nothing
pub async fn delete_task(state: &AppState, id: String, confirmed: bool) -> Result<bool, String> {
    if !confirmed {
        log::debug!("Delete of task {} not confirmed", id);
        return Ok(false);
    }
    let mut store = state.tasks.lock().await;
    store.delete(&id).map_err(|e| e.to_string())
}

pub async fn get_note(state: &AppState, date: String) -> Result<String, String> {
    let date = parse_date(&date)?;
    let store = state.tasks.lock().await;
    Ok(store.notes.get(date).to_string())
}

/// Overwrite the notepad of `date`
pub async fn set_note(state: &AppState, date: String, content: String) -> Result<(), String> {
    let date = parse_date(&date)?;
    let mut store = state.tasks.lock().await;
    store.notes.set(date, content).map_err(|e| e.to_string())
}

/// Month grid containing `anchor` (default: this month)
pub async fn get_month_calendar(state: &AppState, anchor: Option<String>) -> Result<MonthCalendar, String> {
    let anchor = match anchor {
        Some(raw) => parse_date(&raw)?,
        None => state.today(),
    };
    let store = state.tasks.lock().await;
    Ok(MonthCalendar::build(store.list(), &store.notes, anchor, state.today()))
}
