// Task list state machine with write-through persistence

use crate::filter::FilterMode;
use crate::models::{EditSession, Task, now_ms};
use crate::persist::Persistence;
use tracing::{debug, warn};

/// The canonical task list plus transient view and edit state
///
/// Sole source of truth for consumers. Constructed from a persistence
/// adapter, loaded once, written through synchronously after every mutation.
/// Invalid input (empty text, unknown ids, draft operations without an
/// active session) is silently ignored; nothing here is fatal.
pub struct TaskStore<P: Persistence> {
    tasks: Vec<Task>,
    filter: FilterMode,
    editing: Option<EditSession>,
    last_id: i64,
    persistence: P,
}

impl<P: Persistence> TaskStore<P> {
    /// Build a store from previously persisted state
    ///
    /// Missing or malformed persisted data degrades to an empty list.
    pub fn new(persistence: P) -> Self {
        let tasks = persistence.load().unwrap_or_default();
        // Seed the id watermark from loaded tasks so ids stay monotonic
        // across sessions.
        let last_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);

        debug!(count = tasks.len(), "Task store initialized");

        Self {
            tasks,
            filter: FilterMode::default(),
            editing: None,
            last_id,
            persistence,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new task
    ///
    /// Whitespace-only text is silently ignored and nothing is written. The
    /// stored text is the argument as given, not its trimmed form.
    pub fn add_task(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
        };
        self.tasks.push(task);
        self.persist();
    }

    /// Remove the task with the given id; unknown ids are ignored
    pub fn delete_task(&mut self, id: i64) {
        self.tasks.retain(|task| task.id != id);
        self.persist();
    }

    /// Flip a task between active and completed; unknown ids are ignored
    pub fn toggle_complete(&mut self, id: i64) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.completed = !task.completed;
        }
        self.persist();
    }

    /// Begin editing a task, seeding the draft with its current text
    ///
    /// Replaces any prior session; the discarded draft is never saved.
    /// No-op if the task does not exist.
    pub fn start_edit(&mut self, id: i64) {
        let Some(task) = self.tasks.iter().find(|task| task.id == id) else {
            return;
        };

        self.editing = Some(EditSession {
            task_id: id,
            draft_text: task.text.clone(),
        });
    }

    /// Replace the draft text of the active session; no-op without one
    pub fn update_draft(&mut self, text: &str) {
        if let Some(session) = self.editing.as_mut() {
            session.draft_text = text.to_string();
        }
    }

    /// Write the active draft into its task and end the session
    ///
    /// The draft is written verbatim, even when empty: creation validates
    /// text, edits do not. If the target task was deleted meanwhile, the
    /// session is simply dropped.
    pub fn commit_edit(&mut self) {
        let Some(session) = self.editing.take() else {
            return;
        };

        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == session.task_id) {
            task.text = session.draft_text;
        }
        self.persist();
    }

    /// Discard the active session without touching any task
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Remove every completed task
    pub fn clear_completed(&mut self) {
        self.tasks.retain(|task| !task.completed);
        self.persist();
    }

    /// Set the view filter; transient UI state, never persisted
    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Tasks visible under the current filter, insertion order preserved
    ///
    /// Recomputed lazily on every call, never cached.
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| self.filter.matches(task))
    }

    /// Count of tasks not yet completed
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    /// Whether any task is completed
    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The current view filter
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// The in-progress edit, if any
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// The underlying persistence adapter
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Next task id: creation time in milliseconds, clamped to stay strictly
    /// above the last issued id so same-tick creations remain unique
    fn next_id(&mut self) -> i64 {
        self.last_id = now_ms().max(self.last_id + 1);
        self.last_id
    }

    /// Write-through after a mutation
    ///
    /// A failed save is logged and swallowed; the in-memory list stays
    /// authoritative and the triggering operation still succeeds.
    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.tasks) {
            warn!(error = ?e, "Failed to persist tasks");
        }
    }
}
