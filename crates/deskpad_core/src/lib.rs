//! Core domain logic for the deskpad widget suite.
//! This crate is the single source of truth for widget state invariants.

pub mod db;
pub mod input;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod translate;

pub use input::drag::{DragReorderController, ReorderSink};
pub use input::edit_session::{commit_requested, EditSession};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NotePosition};
pub use model::task::{Task, TaskId, TaskLane};
pub use repo::state_repo::{
    MemoryStateStore, RepoError, RepoResult, SqliteStateStore, StateStore,
};
pub use service::note_service::NoteService;
pub use service::task_service::TaskService;
pub use service::{ServiceError, ServiceResult};
pub use translate::{Direction, TranslateError, Translator, TranslatorConfig};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
