//! Data models for tiller entities.
//!
//! This module defines the core data structures:
//! - `Task` - A single to-do entry with identity, text, and completion status
//! - `Filter` - The view-only selector restricting which tasks are displayed
//!
//! The list operations over these types live in the `list` submodule.

pub mod list;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single to-do entry.
///
/// Serialized as `{"id", "text", "completed"}` in the store slot; anything
/// else on disk is treated as unreadable and replaced at the next save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable for the task's lifetime
    pub id: String,

    /// Task text (never stored empty or whitespace-only)
    pub text: String,

    /// Completion status
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new task with a freshly generated id.
    ///
    /// The caller is responsible for trimming `text` before commit; the add
    /// operation in `list` does this.
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
        }
    }
}

/// View-only selector restricting which tasks are displayed.
///
/// Never persisted and never affects the underlying list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Parse a filter from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" | "open" => Some(Self::Active),
            "completed" | "done" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
