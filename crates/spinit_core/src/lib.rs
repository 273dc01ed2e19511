//! Core domain logic for SpinIt: task inbox, to-do list, calendar, notes,
//! focus timer and analytics series over a local key-value store.

pub mod app;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod store;
pub mod timer;
pub mod view;

pub use app::{App, AppError, AppResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{parse_tags, Note, NoteDraft, NoteId};
pub use model::stats::{SessionMap, Stats};
pub use model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use repo::note_repo::NoteRepository;
pub use repo::session_repo::SessionTracker;
pub use repo::task_repo::TaskRepository;
pub use search::filter::TaskFilter;
pub use store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use timer::{resolve_custom_minutes, TickOutcome, TimerController, TimerState};
pub use view::{ViewSink, ViewSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
