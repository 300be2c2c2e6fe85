//! Domain records for the widget suite.
//!
//! # Responsibility
//! - Define the canonical task and note shapes persisted by the services.
//!
//! # Invariants
//! - Every record is identified by a stable uuid that is never reused.
//!
//! # See also
//! - docs/architecture/state-model.md

pub mod note;
pub mod task;
