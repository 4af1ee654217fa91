//! Tiller CLI - a keyboard-driven to-do list for the terminal.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tiller::action_log;
use tiller::cli::{Cli, Commands};
use tiller::commands::{self, Output};
use tiller::models::Filter;
use tiller::storage::Store;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    // Resolve the store: --data-dir flag > TL_DATA_DIR env > platform data dir
    let store = match resolve_store(cli.data_dir) {
        Ok(store) => store,
        Err(e) => {
            report_error(&e, human);
            process::exit(1);
        }
    };

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    // Start timing
    let start = Instant::now();

    // Execute command
    let result = run_command(cli.command, &store, human);

    // Calculate duration
    let duration = start.elapsed().as_millis() as u64;

    // Determine success/error
    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Log the action (silently fails if logging encounters errors)
    let _ = action_log::log_action(store.root(), &cmd_name, args_json, success, error, duration);

    // Handle result
    if let Err(e) = result {
        report_error(&e, human);
        process::exit(1);
    }
}

/// Build the store handle from an explicit path or the default resolution.
fn resolve_store(explicit_path: Option<PathBuf>) -> tiller::Result<Store> {
    match explicit_path {
        Some(path) => Ok(Store::with_data_dir(&path)),
        None => Store::open(),
    }
}

/// Serialize the command name and arguments for action logging.
fn serialize_command(command: &Option<Commands>) -> (String, serde_json::Value) {
    match command {
        None => ("list".to_string(), serde_json::json!({})),
        Some(Commands::Add { text }) => ("add".to_string(), serde_json::json!({ "text": text })),
        Some(Commands::Toggle { id }) => ("toggle".to_string(), serde_json::json!({ "id": id })),
        Some(Commands::Edit { id, text }) => (
            "edit".to_string(),
            serde_json::json!({ "id": id, "text": text }),
        ),
        Some(Commands::Delete { id }) => ("delete".to_string(), serde_json::json!({ "id": id })),
        Some(Commands::Clear) => ("clear".to_string(), serde_json::json!({})),
        Some(Commands::List { filter }) => {
            ("list".to_string(), serde_json::json!({ "filter": filter }))
        }
        #[cfg(feature = "tui")]
        Some(Commands::Tui) => ("tui".to_string(), serde_json::json!({})),
    }
}

fn run_command(
    command: Option<Commands>,
    store: &Store,
    human: bool,
) -> Result<(), tiller::Error> {
    match command {
        Some(Commands::Add { text }) => {
            let result = commands::add(store, &text)?;
            output(&result, human);
        }

        Some(Commands::Toggle { id }) => {
            let result = commands::toggle(store, &id)?;
            output(&result, human);
        }

        Some(Commands::Edit { id, text }) => {
            let result = commands::edit(store, &id, &text)?;
            output(&result, human);
        }

        Some(Commands::Delete { id }) => {
            let result = commands::delete(store, &id)?;
            output(&result, human);
        }

        Some(Commands::Clear) => {
            let result = commands::clear(store)?;
            output(&result, human);
        }

        Some(Commands::List { filter }) => {
            let filter = parse_filter(&filter)?;
            let result = commands::list(store, filter)?;
            output(&result, human);
        }

        #[cfg(feature = "tui")]
        Some(Commands::Tui) => {
            tiller::tui::run_tui(store)?;
        }

        // Bare `tl` lists everything.
        None => {
            let result = commands::list(store, Filter::All)?;
            output(&result, human);
        }
    }

    Ok(())
}

/// Parse a filter argument, rejecting unknown values at the surface.
fn parse_filter(s: &str) -> Result<Filter, tiller::Error> {
    Filter::from_str(s).ok_or_else(|| {
        tiller::Error::InvalidInput(format!(
            "Invalid filter: {s} (expected all, active, or completed)"
        ))
    })
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Print an error in JSON or human-readable format.
fn report_error(e: &tiller::Error, human: bool) {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!(r#"{{"error": "{}"}}"#, e);
    }
}
