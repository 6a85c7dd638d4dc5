// Data models for TodoStore

use serde::{Deserialize, Serialize};

/// A single to-do item
///
/// The id doubles as the creation timestamp in milliseconds; ids are unique
/// and monotonically increasing for the lifetime of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// An in-progress edit of one task's text
///
/// At most one session exists at a time. It is destroyed on commit or cancel;
/// starting a new edit discards any prior draft without saving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub task_id: i64,
    pub draft_text: String,
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}
