//! Widget use-case services.
//!
//! # Responsibility
//! - Own the in-memory collections behind each widget and their record
//!   encoding policy.
//! - Write affected records after every effective mutation, so the durable
//!   copy is never more than one mutation behind memory.
//!
//! # Invariants
//! - Services are the only writers of their collections; callers see
//!   read-only snapshots.

use crate::repo::state_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_service;
pub mod task_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Shared failure type for widget service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Record persistence failed.
    Repo(RepoError),
    /// A collection could not be encoded to its record format.
    Encode(serde_json::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode widget record: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
