//! Tiller - a keyboard-driven to-do list for the terminal.
//!
//! This library provides the core functionality for the `tl` CLI tool:
//! the task-list engine, the filter projection, and the persistent store
//! adapter that mirrors the list to a single JSON slot.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod models;
pub mod storage;
pub mod tui;


/// Library-level error type for tiller operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No task matches id: {0}")]
    NotFound(String),

    #[error("Ambiguous id prefix: {0}")]
    AmbiguousId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for tiller operations.
pub type Result<T> = std::result::Result<T, Error>;
