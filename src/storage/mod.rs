//! Storage layer for tiller data.
//!
//! The store is a single named slot of JSON data under the user data
//! directory. Persistence is best-effort by design: an unreadable slot falls
//! back to a caller-supplied default, and write failures are discarded. The
//! in-memory list stays correct for the session either way; durability is a
//! convenience, not a guarantee.

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Slot key for the task list.
pub const TASKS_SLOT: &str = "todos-v1";

/// Store handle for a single data directory.
///
/// Constructed once at startup and passed down explicitly, so commands and
/// the TUI stay testable in isolation.
pub struct Store {
    /// Root directory for slot files
    root: PathBuf,
}

impl Store {
    /// Open the store at the default data directory.
    ///
    /// Resolution order: `TL_DATA_DIR` env var, then the platform data
    /// directory (`~/.local/share/tiller` on Linux).
    pub fn open() -> Result<Self> {
        Ok(Self {
            root: resolve_data_dir()?,
        })
    }

    /// Open a store rooted at an explicit directory.
    ///
    /// Used by the `--data-dir` flag and by tests that want pure dependency
    /// injection.
    pub fn with_data_dir(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Load the value stored under `key`, falling back to `default`.
    ///
    /// A missing slot, an unreadable file, and unparseable or wrong-shaped
    /// content all return `default`; read failures never reach the caller.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            _ => default,
        }
    }

    /// Save `value` under `key`, best-effort.
    ///
    /// Serialization and write failures are discarded: no retry, no
    /// propagation, no user notification.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let _ = self.try_save(key, value);
    }

    /// Get the store root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string(value)?;
        fs::write(self.slot_path(key), json)?;
        Ok(())
    }
}

/// Resolve the default data directory for slot files.
fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("TL_DATA_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Other("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("tiller"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::test_utils::TestEnv;
    use std::fs;

    #[test]
    fn test_round_trip() {
        let env = TestEnv::new();
        let store = env.store();

        let tasks = vec![
            Task::new("Walk dog".to_string()),
            Task {
                id: "fixed-id".to_string(),
                text: "Buy milk".to_string(),
                completed: true,
            },
        ];

        store.save(TASKS_SLOT, &tasks);
        let loaded: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_load_missing_slot_returns_default() {
        let env = TestEnv::new();
        let store = env.store();

        let loaded: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_corrupt_slot_returns_default() {
        let env = TestEnv::new();
        let store = env.store();

        fs::write(env.data_path().join("todos-v1.json"), "not json {").unwrap();
        let loaded: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_returns_default() {
        let env = TestEnv::new();
        let store = env.store();

        // Valid JSON, but not an array of task records.
        fs::write(
            env.data_path().join("todos-v1.json"),
            r#"{"version": 2, "items": []}"#,
        )
        .unwrap();
        let loaded: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_replaces_incompatible_slot() {
        let env = TestEnv::new();
        let store = env.store();

        fs::write(env.data_path().join("todos-v1.json"), "garbage").unwrap();
        let tasks = vec![Task::new("fresh start".to_string())];
        store.save(TASKS_SLOT, &tasks);

        let loaded: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let env = TestEnv::new();

        // Root points at a regular file, so create_dir_all fails.
        let blocked = env.data_path().join("blocked");
        fs::write(&blocked, "").unwrap();
        let store = Store::with_data_dir(&blocked);

        let tasks = vec![Task::new("doomed".to_string())];
        store.save(TASKS_SLOT, &tasks);

        let loaded: Vec<Task> = store.load(TASKS_SLOT, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_slot_file_location() {
        let env = TestEnv::new();
        let store = env.store();

        store.save(TASKS_SLOT, &Vec::<Task>::new());
        assert!(env.data_path().join("todos-v1.json").exists());
        assert_eq!(store.root(), env.data_path());
    }
}
