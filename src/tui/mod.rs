//! Terminal user interface for tiller.
//!
//! A keyboard-driven single-page view of the task list with a new-task
//! input line, in-place editing, filter pills, and a remaining-count footer.

#[cfg(feature = "tui")]
mod app;

#[cfg(feature = "tui")]
pub use app::run_tui;
