//! Inline edit session state machine.
//!
//! # Responsibility
//! - Buffer the draft text of the one task being edited.
//! - Keep composed (IME) input out of the draft until composition ends.
//!
//! # Invariants
//! - At most one session is live; starting a new one abandons the previous
//!   draft without committing it.
//! - While composing, intermediate text input never reaches the draft, so
//!   partial character fragments cannot be committed.
//! - The reported caret sits at the end of the draft after every update.
//! - Committing always returns to idle, whether or not the store accepted
//!   the content.

use crate::model::task::{Task, TaskId};
use crate::repo::state_repo::StateStore;
use crate::service::task_service::TaskService;
use crate::service::ServiceResult;
use log::debug;

/// Returns whether a key event should commit the draft: an unshifted
/// line-break key. Shift+Enter stays a literal line break for the host.
pub fn commit_requested(key: &str, shift_held: bool) -> bool {
    key == "Enter" && !shift_held
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum SessionState {
    #[default]
    Idle,
    Editing {
        target: TaskId,
        draft: String,
        composing: bool,
    },
}

/// Transient editing state for the task list widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditSession {
    state: SessionState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an edit session on `task`, seeding the draft from its current
    /// content. A session already targeting another task is abandoned
    /// without committing; its draft is simply dropped.
    pub fn start(&mut self, task: &Task) {
        if let SessionState::Editing { target, .. } = &self.state {
            debug!("event=edit_start module=input status=abandoned previous={target}");
        }
        self.state = SessionState::Editing {
            target: task.id,
            draft: task.content.clone(),
            composing: false,
        };
    }

    /// Whether a session is live.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing { .. })
    }

    /// Id of the task being edited, if any.
    pub fn target(&self) -> Option<TaskId> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Editing { target, .. } => Some(*target),
        }
    }

    /// Current draft text, if a session is live.
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Editing { draft, .. } => Some(draft),
        }
    }

    /// Caret position the host should show: pinned to the end of the draft
    /// after every update, measured in characters. This intentionally
    /// overrides wherever the user's caret actually was.
    pub fn caret(&self) -> Option<usize> {
        self.draft().map(|draft| draft.chars().count())
    }

    /// Whether the session is inside a composition.
    pub fn is_composing(&self) -> bool {
        matches!(
            self.state,
            SessionState::Editing {
                composing: true,
                ..
            }
        )
    }

    /// Replaces the draft with the input field's current text. Ignored
    /// while composing and while idle.
    pub fn text_input(&mut self, text: &str) {
        if let SessionState::Editing {
            draft,
            composing: false,
            ..
        } = &mut self.state
        {
            *draft = text.to_string();
        }
    }

    /// Enters the composition sub-state. Idle sessions ignore this.
    pub fn composition_start(&mut self) {
        if let SessionState::Editing { composing, .. } = &mut self.state {
            *composing = true;
        }
    }

    /// Leaves the composition sub-state, taking the composed result as the
    /// new draft. Ignored while idle.
    pub fn composition_end(&mut self, composed: &str) {
        if let SessionState::Editing {
            draft, composing, ..
        } = &mut self.state
        {
            *draft = composed.to_string();
            *composing = false;
        }
    }

    /// Hands the draft to the task service and returns to idle.
    ///
    /// A blank draft is rejected inside `commit_edit` and the task keeps
    /// its prior content; the session ends either way. Idle sessions are a
    /// no-op.
    pub fn commit<S: StateStore>(&mut self, tasks: &mut TaskService<S>) -> ServiceResult<()> {
        match std::mem::take(&mut self.state) {
            SessionState::Idle => Ok(()),
            SessionState::Editing { target, draft, .. } => tasks.commit_edit(target, &draft),
        }
    }
}
