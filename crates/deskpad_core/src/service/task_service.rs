//! Task list service: two ordered lanes with write-through persistence.
//!
//! # Responsibility
//! - Own the active and completed lanes and every mutation on them.
//! - Round-trip both lanes through the record store, defensively on load.
//!
//! # Invariants
//! - A task id appears in exactly one lane at all times; `lane_of` is the
//!   single membership authority and the `completed` flag is normalized to
//!   the holding lane on load.
//! - Lane order is user-meaningful and survives persistence exactly.
//! - Committing blank content never mutates a task.
//!
//! # See also
//! - docs/architecture/state-model.md

use crate::model::task::{Task, TaskId, TaskLane};
use crate::repo::state_repo::StateStore;
use crate::service::ServiceResult;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Record key holding the active lane.
pub const ACTIVE_TASKS_KEY: &str = "todos";
/// Record key holding the completed lane.
pub const COMPLETED_TASKS_KEY: &str = "completedTodos";

/// Ordered task collection behind the task list widget.
pub struct TaskService<S: StateStore> {
    store: S,
    active: Vec<Task>,
    completed: Vec<Task>,
}

impl<S: StateStore> TaskService<S> {
    /// Loads both lane records from the store.
    ///
    /// Absent or malformed records degrade to empty lanes. A duplicate id
    /// in the completed record is dropped in favor of the active one, so
    /// the one-lane-per-task invariant holds even over corrupt state.
    pub fn open(store: S) -> ServiceResult<Self> {
        let active = decode_lane(store.read_record(ACTIVE_TASKS_KEY)?, ACTIVE_TASKS_KEY, false);
        let mut completed = decode_lane(
            store.read_record(COMPLETED_TASKS_KEY)?,
            COMPLETED_TASKS_KEY,
            true,
        );

        let mut seen: HashSet<TaskId> = active.iter().map(|task| task.id).collect();
        let before = completed.len();
        completed.retain(|task| seen.insert(task.id));
        if completed.len() != before {
            warn!(
                "event=state_load module=tasks status=recovered dropped_duplicates={}",
                before - completed.len()
            );
        }

        info!(
            "event=state_load module=tasks status=ok active={} completed={}",
            active.len(),
            completed.len()
        );

        Ok(Self {
            store,
            active,
            completed,
        })
    }

    /// Creates a blank task at the head of the active lane and returns its
    /// id, so the caller can immediately open an edit session on it.
    pub fn add_task(&mut self) -> ServiceResult<TaskId> {
        let task = Task::new();
        let id = task.id;
        self.active.insert(0, task);
        self.persist()?;

        info!("event=task_add module=tasks status=ok id={id}");
        Ok(id)
    }

    /// Removes the task from whichever lane holds it. Unknown ids are a
    /// silent no-op.
    pub fn delete_task(&mut self, id: TaskId) -> ServiceResult<()> {
        let Some(lane) = self.lane_of(id) else {
            debug!("event=task_delete module=tasks status=noop reason=unknown_id id={id}");
            return Ok(());
        };

        self.lane_rows_mut(lane).retain(|task| task.id != id);
        self.persist()?;

        info!("event=task_delete module=tasks status=ok id={id}");
        Ok(())
    }

    /// Replaces the task's content in place, keeping lane and position.
    ///
    /// Blank content is discarded without mutating anything, so a task that
    /// was never filled in keeps prompting for input instead of acquiring
    /// empty text. Unknown ids are a silent no-op.
    pub fn commit_edit(&mut self, id: TaskId, content: &str) -> ServiceResult<()> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            debug!("event=edit_commit module=tasks status=rejected reason=blank id={id}");
            return Ok(());
        }

        let Some(task) = self.find_task_mut(id) else {
            debug!("event=edit_commit module=tasks status=noop reason=unknown_id id={id}");
            return Ok(());
        };

        task.content = trimmed.to_string();
        self.persist()?;

        info!("event=edit_commit module=tasks status=ok id={id}");
        Ok(())
    }

    /// Moves the task to the head of the other lane and flips its flag.
    ///
    /// Asking for the state the task is already in, or an unknown id, is a
    /// silent no-op. Completion is the only movement between lanes.
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> ServiceResult<()> {
        let (source, target) = if completed {
            (TaskLane::Active, TaskLane::Completed)
        } else {
            (TaskLane::Completed, TaskLane::Active)
        };

        let Some(index) = self.position_in_lane(source, id) else {
            debug!(
                "event=task_toggle module=tasks status=noop id={id} requested_completed={completed}"
            );
            return Ok(());
        };

        let mut task = self.lane_rows_mut(source).remove(index);
        task.completed = completed;
        self.lane_rows_mut(target).insert(0, task);
        self.persist()?;

        info!("event=task_toggle module=tasks status=ok id={id} completed={completed}");
        Ok(())
    }

    /// Moves the row at `from` to `to` within one lane, shifting the rows
    /// between. Out-of-range indices are a silent no-op.
    pub fn reorder(&mut self, lane: TaskLane, from: usize, to: usize) -> ServiceResult<()> {
        let rows = self.lane_rows_mut(lane);
        if from >= rows.len() || to >= rows.len() {
            debug!(
                "event=task_reorder module=tasks status=noop reason=out_of_range from={from} to={to} len={}",
                rows.len()
            );
            return Ok(());
        }
        if from == to {
            return Ok(());
        }

        let task = rows.remove(from);
        rows.insert(to, task);
        self.persist()?;

        info!("event=task_reorder module=tasks status=ok lane={lane:?} from={from} to={to}");
        Ok(())
    }

    /// Read-only snapshot of the active lane, head first.
    pub fn active_tasks(&self) -> &[Task] {
        &self.active
    }

    /// Read-only snapshot of the completed lane, newest completion first.
    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed
    }

    /// Read-only snapshot of one lane.
    pub fn lane_rows(&self, lane: TaskLane) -> &[Task] {
        match lane {
            TaskLane::Active => &self.active,
            TaskLane::Completed => &self.completed,
        }
    }

    /// The lane currently holding `id`. Single source of truth for
    /// membership; everything else derives from it.
    pub fn lane_of(&self, id: TaskId) -> Option<TaskLane> {
        if self.active.iter().any(|task| task.id == id) {
            Some(TaskLane::Active)
        } else if self.completed.iter().any(|task| task.id == id) {
            Some(TaskLane::Completed)
        } else {
            None
        }
    }

    /// Looks a task up by id across both lanes.
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.active
            .iter()
            .chain(self.completed.iter())
            .find(|task| task.id == id)
    }

    /// Index of `id` within `lane`, if it lives there.
    pub fn position_in_lane(&self, lane: TaskLane, id: TaskId) -> Option<usize> {
        self.lane_rows(lane).iter().position(|task| task.id == id)
    }

    fn lane_rows_mut(&mut self, lane: TaskLane) -> &mut Vec<Task> {
        match lane {
            TaskLane::Active => &mut self.active,
            TaskLane::Completed => &mut self.completed,
        }
    }

    fn find_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.active
            .iter_mut()
            .chain(self.completed.iter_mut())
            .find(|task| task.id == id)
    }

    // Both records are written together; the pair is the durable unit.
    fn persist(&mut self) -> ServiceResult<()> {
        let active = serde_json::to_string(&self.active)?;
        let completed = serde_json::to_string(&self.completed)?;
        self.store.write_record(ACTIVE_TASKS_KEY, &active)?;
        self.store.write_record(COMPLETED_TASKS_KEY, &completed)?;
        Ok(())
    }
}

fn decode_lane(raw: Option<String>, key: &str, completed: bool) -> Vec<Task> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(mut tasks) => {
            // The lane a record came from is authoritative for the flag.
            for task in &mut tasks {
                task.completed = completed;
            }
            tasks
        }
        Err(err) => {
            warn!("event=state_decode module=tasks status=recovered key={key} error={err}");
            Vec::new()
        }
    }
}
