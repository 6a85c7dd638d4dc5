// TodoStore - Local task list with write-through persistence

pub mod filter;
pub mod models;
pub mod persist;
pub mod store;

// Re-export main types for convenience
pub use filter::FilterMode;
pub use models::{EditSession, Task, now_ms};
pub use persist::{FileStore, MemStore, Persistence};
pub use store::TaskStore;
