//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by the active and completed lanes.
//!
//! # Invariants
//! - `id` is stable for the task's lifetime and never reused.
//! - `completed` mirrors the lane holding the task; the service normalizes
//!   the flag on load so the two cannot diverge.
//! - Empty `content` is a transient state that only exists while the task
//!   is being edited; committed content is non-blank.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// The v7 variant is time-ordered, so ids double as creation-time tokens.
pub type TaskId = Uuid;

/// The two ordered lanes a task can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskLane {
    /// Tasks still waiting to be done, in user-arranged order.
    Active,
    /// Tasks checked off, newest completion first.
    Completed,
}

/// One row of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used for editing, reordering and completion toggles.
    pub id: TaskId,
    /// User-entered text. Blank until the first committed edit.
    pub content: String,
    /// Lane discriminant mirrored into the persisted record.
    pub completed: bool,
}

impl Task {
    /// Creates a fresh, not-yet-filled-in task.
    pub fn new() -> Self {
        Self::with_id(Uuid::now_v7())
    }

    /// Creates a task with a caller-provided id, for decode and test paths.
    pub fn with_id(id: TaskId) -> Self {
        Self {
            id,
            content: String::new(),
            completed: false,
        }
    }

    /// Returns whether the task carries committed (non-blank) content.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}
