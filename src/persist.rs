// Persistence adapters for the task list

use crate::models::Task;
use eyre::{Context, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Fixed key the task collection is stored under
const TASKS_KEY: &str = "tasks";

/// Durable key-value storage consumed by the task store
///
/// `load` is called once at store construction; `save` synchronously after
/// every mutation, overwriting the whole collection (no incremental diffing).
pub trait Persistence {
    /// Previously saved tasks, or `None` if nothing was saved yet or the
    /// stored value is malformed. Malformed data must not fail the caller.
    fn load(&self) -> Option<Vec<Task>>;

    /// Overwrite the persisted collection with the current full list
    fn save(&mut self, tasks: &[Task]) -> Result<()>;
}

/// File-backed persistence
///
/// The whole list is stored as one JSON array in a single file under the
/// store directory. No versioning, no schema migration.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a file store at the given path
    ///
    /// The store will be created in a `.todostore` subdirectory of the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().join(".todostore");

        // Create directory if it doesn't exist
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;

        Ok(Self { base_path })
    }

    /// Get the base path of this store
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn tasks_path(&self) -> PathBuf {
        self.base_path.join(format!("{TASKS_KEY}.json"))
    }

    fn read_tasks(&self) -> Result<Option<Vec<Task>>> {
        let path = self.tasks_path();
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).context("Failed to read tasks file")?;
        // Typed deserialization doubles as shape validation: anything that is
        // not an array of {id, text, completed} records errors out here.
        let tasks: Vec<Task> = serde_json::from_str(&json).context("Failed to parse tasks file")?;
        Ok(Some(tasks))
    }
}

impl Persistence for FileStore {
    fn load(&self) -> Option<Vec<Task>> {
        match self.read_tasks() {
            Ok(tasks) => {
                debug!(
                    file = ?self.tasks_path(),
                    count = tasks.as_ref().map_or(0, Vec::len),
                    "Loaded persisted tasks"
                );
                tasks
            }
            Err(e) => {
                warn!(
                    file = ?self.tasks_path(),
                    error = ?e,
                    "Stored tasks are unreadable, treating as absent"
                );
                None
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let path = self.tasks_path();

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .context("Failed to open tasks file for writing")?;

        // Acquire exclusive lock before writing
        file.lock_exclusive().context("Failed to acquire file lock")?;

        let json = serde_json::to_string(tasks)?;
        writeln!(file, "{}", json)?;
        file.sync_all()?;

        // Lock is automatically released when file is dropped
        Ok(())
    }
}

/// In-memory persistence for tests and throwaway consumers
///
/// Records the last saved snapshot and counts `save` calls, so tests can
/// assert the write-through contract (one write per mutation, none for
/// drafts or filter changes).
#[derive(Debug, Default)]
pub struct MemStore {
    saved: Option<Vec<Task>>,
    save_count: usize,
}

impl MemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store as if `tasks` had been saved by a previous session
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            saved: Some(tasks),
            save_count: 0,
        }
    }

    /// Number of `save` calls observed
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// The last saved snapshot, if any
    pub fn saved(&self) -> Option<&[Task]> {
        self.saved.as_deref()
    }
}

impl Persistence for MemStore {
    fn load(&self) -> Option<Vec<Task>> {
        self.saved.clone()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<()> {
        self.saved = Some(tasks.to_vec());
        self.save_count += 1;
        Ok(())
    }
}
