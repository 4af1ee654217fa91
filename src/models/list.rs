//! Pure operations over the task list.
//!
//! Every mutation is a function from (previous list, parameters) to
//! (new list). All operations are total: they never fail, and an unknown id
//! or blank input leaves the list unchanged. Persistence is the caller's
//! concern; nothing here touches the store.

use super::{Filter, Task};

/// Add a new task with the given text, prepended (newest first).
///
/// The text is trimmed before commit; if it trims to empty, the list is
/// returned unchanged.
pub fn add(mut tasks: Vec<Task>, text: &str) -> Vec<Task> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return tasks;
    }
    tasks.insert(0, Task::new(trimmed.to_string()));
    tasks
}

/// Flip the completion status of the task matching `id`.
///
/// No-op when no task matches.
pub fn toggle(mut tasks: Vec<Task>, id: &str) -> Vec<Task> {
    if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
        task.completed = !task.completed;
    }
    tasks
}

/// Replace the text of the task matching `id`, verbatim.
///
/// The surface layer is responsible for trimming and for suppressing the
/// call when the new text is empty or unchanged. No-op when no task matches.
pub fn edit(mut tasks: Vec<Task>, id: &str, text: &str) -> Vec<Task> {
    if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
        task.text = text.to_string();
    }
    tasks
}

/// Remove the task matching `id`, preserving the order of the rest.
///
/// No-op when no task matches.
pub fn delete(mut tasks: Vec<Task>, id: &str) -> Vec<Task> {
    tasks.retain(|t| t.id != id);
    tasks
}

/// Remove every completed task, preserving the order of the rest.
pub fn clear_completed(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.retain(|t| !t.completed);
    tasks
}

/// Project the subset of tasks visible under `filter`, in list order.
pub fn visible(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| match filter {
            Filter::All => true,
            Filter::Active => !t.completed,
            Filter::Completed => t.completed,
        })
        .collect()
}

/// Count the tasks not yet completed.
pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}
