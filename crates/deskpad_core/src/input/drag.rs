//! Drag-to-reorder gesture handling.
//!
//! # Responsibility
//! - Track the lifted row across a drag gesture.
//! - Forward the final `(source, target)` pair to a reorder capability.
//!
//! # Invariants
//! - Only the final drop is applied; mid-drag positions are never
//!   persisted.
//! - A release without a target, onto the source itself, or without a
//!   preceding lift is a silent no-op.
//! - Rows never change lane through dragging; completion is the only
//!   cross-lane movement.

use crate::model::task::TaskId;
use crate::repo::state_repo::StateStore;
use crate::service::task_service::TaskService;
use crate::service::ServiceResult;
use log::debug;

/// Capability accepting a reorder of one row onto another's position.
///
/// Keeps gesture recognition decoupled from list ownership: the controller
/// knows nothing about lanes or indices, the sink nothing about gestures.
pub trait ReorderSink {
    /// Moves `source` to the position currently held by `target`.
    fn on_reorder_requested(&mut self, source: TaskId, target: TaskId) -> ServiceResult<()>;
}

impl<S: StateStore> ReorderSink for TaskService<S> {
    /// Resolves both ids to lane positions at release time and reorders
    /// within that lane. Unknown ids or ids in different lanes are a
    /// silent no-op.
    fn on_reorder_requested(&mut self, source: TaskId, target: TaskId) -> ServiceResult<()> {
        let (Some(source_lane), Some(target_lane)) = (self.lane_of(source), self.lane_of(target))
        else {
            debug!("event=drag_drop module=input status=noop reason=unknown_id");
            return Ok(());
        };
        if source_lane != target_lane {
            debug!("event=drag_drop module=input status=noop reason=cross_lane");
            return Ok(());
        }

        // Membership was just checked; both positions resolve.
        let (Some(from), Some(to)) = (
            self.position_in_lane(source_lane, source),
            self.position_in_lane(source_lane, target),
        ) else {
            return Ok(());
        };

        self.reorder(source_lane, from, to)
    }
}

/// Tracks one vertical drag gesture over a task lane.
#[derive(Debug, Default)]
pub struct DragReorderController {
    lifted: Option<TaskId>,
}

impl DragReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the row being lifted. A second lift replaces the first.
    pub fn drag_start(&mut self, source: TaskId) {
        self.lifted = Some(source);
    }

    /// The row currently held, if a gesture is in flight.
    pub fn dragging(&self) -> Option<TaskId> {
        self.lifted
    }

    /// Finishes the gesture. Forwards to the sink only when a row was
    /// lifted, a target exists, and the target differs from the source;
    /// everything else ends the gesture silently.
    pub fn drag_end<K: ReorderSink>(
        &mut self,
        sink: &mut K,
        target: Option<TaskId>,
    ) -> ServiceResult<()> {
        let Some(source) = self.lifted.take() else {
            debug!("event=drag_drop module=input status=noop reason=no_gesture");
            return Ok(());
        };

        match target {
            None => {
                debug!("event=drag_drop module=input status=noop reason=no_target source={source}");
                Ok(())
            }
            Some(target) if target == source => {
                debug!("event=drag_drop module=input status=noop reason=self_target source={source}");
                Ok(())
            }
            Some(target) => sink.on_reorder_requested(source, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragReorderController, ReorderSink};
    use crate::model::task::TaskId;
    use crate::service::ServiceResult;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingSink {
        requests: Vec<(TaskId, TaskId)>,
    }

    impl ReorderSink for RecordingSink {
        fn on_reorder_requested(&mut self, source: TaskId, target: TaskId) -> ServiceResult<()> {
            self.requests.push((source, target));
            Ok(())
        }
    }

    #[test]
    fn forwards_final_pair_once() {
        let source = Uuid::now_v7();
        let target = Uuid::now_v7();
        let mut sink = RecordingSink::default();
        let mut controller = DragReorderController::new();

        controller.drag_start(source);
        assert_eq!(controller.dragging(), Some(source));
        controller.drag_end(&mut sink, Some(target)).unwrap();

        assert_eq!(sink.requests, vec![(source, target)]);
        assert_eq!(controller.dragging(), None);
    }

    #[test]
    fn release_without_target_is_silent() {
        let mut sink = RecordingSink::default();
        let mut controller = DragReorderController::new();

        controller.drag_start(Uuid::now_v7());
        controller.drag_end(&mut sink, None).unwrap();

        assert!(sink.requests.is_empty());
    }

    #[test]
    fn release_on_self_is_silent() {
        let source = Uuid::now_v7();
        let mut sink = RecordingSink::default();
        let mut controller = DragReorderController::new();

        controller.drag_start(source);
        controller.drag_end(&mut sink, Some(source)).unwrap();

        assert!(sink.requests.is_empty());
    }

    #[test]
    fn release_without_lift_is_silent() {
        let mut sink = RecordingSink::default();
        let mut controller = DragReorderController::new();

        controller.drag_end(&mut sink, Some(Uuid::now_v7())).unwrap();

        assert!(sink.requests.is_empty());
    }
}
