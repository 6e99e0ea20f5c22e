//! Domain record managers for the bookstore catalog.
//!
//! # Responsibility
//! - Validate preconditions and relationship invariants before persistence.
//! - Orchestrate repository calls into per-kind create/read/update/delete
//!   APIs.
//!
//! # Invariants
//! - Every operation is synchronous and atomic relative to the store.
//! - Errors carry enough context for a transport layer to map them:
//!   `NotFound` -> 404, `InvalidRelation`/`Validation` -> 400, `Repo` -> 5xx.

use crate::model::{RecordId, RecordKind, ValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_service;
pub mod book_service;
pub mod editorial_service;
pub mod organization_service;
pub mod prize_service;
pub mod publisher_service;
pub mod review_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error surfaced by domain record managers.
#[derive(Debug)]
pub enum ServiceError {
    /// Requested record (or scoped sub-record) does not exist.
    NotFound { kind: RecordKind, id: RecordId },
    /// A relationship invariant blocks the operation.
    InvalidRelation(String),
    /// Model-level validation failed.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn not_found(kind: RecordKind, id: RecordId) -> Self {
        Self::NotFound { kind, id }
    }

    pub(crate) fn invalid_relation(reason: impl Into<String>) -> Self {
        Self::InvalidRelation(reason.into())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidRelation(reason) => write!(f, "{reason}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}
