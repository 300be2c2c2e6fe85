//! Input protocols translating host gestures into service calls.
//!
//! # Responsibility
//! - Model inline text editing (including composed input) as an explicit
//!   state machine.
//! - Turn drag gestures into reorder requests through a capability seam.
//!
//! # Invariants
//! - Input protocols never hold task data of their own beyond the current
//!   draft; the services stay the single source of truth.

pub mod drag;
pub mod edit_session;
