//! Command implementations for the tiller CLI.
//!
//! This module contains the business logic for each CLI command. Every
//! mutating command follows the same shape: load the task list from the
//! store, apply the list operation, save the result, report. The list
//! operations themselves are total; hard errors (exit 1) are reserved for
//! surface-level failures such as an unknown or ambiguous id prefix.

use serde::Serialize;

use crate::models::list;
use crate::models::{Filter, Task};
use crate::storage::{Store, TASKS_SLOT};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Shorten an id for human-readable output.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Format the remaining-count summary ("3 items left").
pub fn items_left(remaining: usize) -> String {
    if remaining == 1 {
        "1 item left".to_string()
    } else {
        format!("{remaining} items left")
    }
}

/// Resolve a user-supplied id or unique id prefix to a stored task.
///
/// Prefix matching is surface sugar; the list operations only ever see the
/// exact resolved id.
fn resolve_id<'a>(tasks: &'a [Task], prefix: &str) -> Result<&'a Task> {
    let mut matches = tasks.iter().filter(|t| t.id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task),
        (Some(_), Some(_)) => Err(Error::AmbiguousId(prefix.to_string())),
        (None, _) => Err(Error::NotFound(prefix.to_string())),
    }
}

/// Result of `tl add`.
#[derive(Debug, Serialize)]
pub struct AddResult {
    /// False when the text trimmed to empty and nothing was added
    pub added: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub remaining: usize,
}

impl Output for AddResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        match (&self.id, &self.text) {
            (Some(id), Some(text)) => format!("Added \"{}\" ({})", text, short_id(id)),
            _ => "Nothing to add: empty text".to_string(),
        }
    }
}

/// Result of `tl toggle`.
#[derive(Debug, Serialize)]
pub struct ToggleResult {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub remaining: usize,
}

impl Output for ToggleResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let state = if self.completed { "done" } else { "active" };
        format!("Marked \"{}\" {}", self.text, state)
    }
}

/// Result of `tl edit`.
#[derive(Debug, Serialize)]
pub struct EditResult {
    pub id: String,

    /// False when the commit was suppressed at the surface
    pub updated: bool,

    /// Why the commit was suppressed ("empty" or "unchanged")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<&'static str>,

    /// The text now stored for this task
    pub text: String,
}

impl Output for EditResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        match self.skipped {
            Some("empty") => "Edit skipped: empty text".to_string(),
            Some(_) => "Edit skipped: text unchanged".to_string(),
            None => format!("Updated {}: \"{}\"", short_id(&self.id), self.text),
        }
    }
}

/// Result of `tl delete`.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub id: String,
    pub text: String,
    pub remaining: usize,
}

impl Output for DeleteResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Deleted \"{}\" ({})", self.text, short_id(&self.id))
    }
}

/// Result of `tl clear`.
#[derive(Debug, Serialize)]
pub struct ClearResult {
    /// Number of completed tasks removed
    pub cleared: usize,
    pub remaining: usize,
}

impl Output for ClearResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let noun = if self.cleared == 1 { "task" } else { "tasks" };
        format!("Cleared {} completed {}", self.cleared, noun)
    }
}

/// Result of `tl list`.
#[derive(Debug, Serialize)]
pub struct ListResult {
    pub filter: &'static str,

    /// Number of visible tasks under the filter
    pub count: usize,

    /// Number of active tasks in the whole list
    pub remaining: usize,

    pub tasks: Vec<Task>,
}

impl Output for ListResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut out = String::new();
        if self.tasks.is_empty() {
            out.push_str("No tasks.\n");
        } else {
            for task in &self.tasks {
                let mark = if task.completed { "x" } else { " " };
                out.push_str(&format!("[{}] {} {}\n", mark, short_id(&task.id), task.text));
            }
        }
        out.push('\n');
        out.push_str(&items_left(self.remaining));
        out
    }
}

/// Add a new task with the given text.
///
/// Text that trims to empty is reported as a no-op, not an error.
pub fn add(store: &Store, text: &str) -> Result<AddResult> {
    let tasks: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
    let before = tasks.len();

    let tasks = list::add(tasks, text);
    if tasks.len() == before {
        return Ok(AddResult {
            added: false,
            id: None,
            text: None,
            remaining: list::remaining_count(&tasks),
        });
    }

    store.save(TASKS_SLOT, &tasks);

    let task = &tasks[0];
    Ok(AddResult {
        added: true,
        id: Some(task.id.clone()),
        text: Some(task.text.clone()),
        remaining: list::remaining_count(&tasks),
    })
}

/// Toggle the completion status of the task matching `id` (or a unique
/// prefix of it).
pub fn toggle(store: &Store, id: &str) -> Result<ToggleResult> {
    let tasks: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
    let target = resolve_id(&tasks, id)?.id.clone();

    let tasks = list::toggle(tasks, &target);
    store.save(TASKS_SLOT, &tasks);

    // The target came from this list, so the lookup cannot miss.
    let task = tasks
        .iter()
        .find(|t| t.id == target)
        .ok_or_else(|| Error::NotFound(target.clone()))?;

    Ok(ToggleResult {
        id: task.id.clone(),
        text: task.text.clone(),
        completed: task.completed,
        remaining: list::remaining_count(&tasks),
    })
}

/// Replace the text of the task matching `id` (or a unique prefix of it).
///
/// Surface-side contract: the new text is trimmed, and a commit that would
/// be empty or leave the text unchanged never reaches the list operation.
pub fn edit(store: &Store, id: &str, text: &str) -> Result<EditResult> {
    let tasks: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
    let task = resolve_id(&tasks, id)?;
    let target = task.id.clone();
    let current = task.text.clone();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(EditResult {
            id: target,
            updated: false,
            skipped: Some("empty"),
            text: current,
        });
    }
    if trimmed == current {
        return Ok(EditResult {
            id: target,
            updated: false,
            skipped: Some("unchanged"),
            text: current,
        });
    }

    let tasks = list::edit(tasks, &target, trimmed);
    store.save(TASKS_SLOT, &tasks);

    Ok(EditResult {
        id: target,
        updated: true,
        skipped: None,
        text: trimmed.to_string(),
    })
}

/// Delete the task matching `id` (or a unique prefix of it).
pub fn delete(store: &Store, id: &str) -> Result<DeleteResult> {
    let tasks: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
    let task = resolve_id(&tasks, id)?;
    let target = task.id.clone();
    let text = task.text.clone();

    let tasks = list::delete(tasks, &target);
    store.save(TASKS_SLOT, &tasks);

    Ok(DeleteResult {
        id: target,
        text,
        remaining: list::remaining_count(&tasks),
    })
}

/// Remove every completed task.
pub fn clear(store: &Store) -> Result<ClearResult> {
    let tasks: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
    let before = tasks.len();

    let tasks = list::clear_completed(tasks);
    store.save(TASKS_SLOT, &tasks);

    Ok(ClearResult {
        cleared: before - tasks.len(),
        remaining: list::remaining_count(&tasks),
    })
}

/// List the tasks visible under `filter`.
pub fn list(store: &Store, filter: Filter) -> Result<ListResult> {
    let tasks: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
    let visible: Vec<Task> = list::visible(&tasks, filter).into_iter().cloned().collect();

    Ok(ListResult {
        filter: filter.as_str(),
        count: visible.len(),
        remaining: list::remaining_count(&tasks),
        tasks: visible,
    })
}
