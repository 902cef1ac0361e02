//! Domain error types.

use model::{NoteId, TransitionError, ValidationError};
use note_store::StoreError;
use thiserror::Error;

/// Errors that can occur during delivery note operations.
///
/// Every variant means the operation made no durable change.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The input failed shape, length or range constraints.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No note has the requested identifier.
    #[error("Delivery note not found: {0}")]
    NotFound(NoteId),

    /// Another note already uses this code.
    #[error("Delivery note code already exists: {0}")]
    DuplicateCode(String),

    /// The lifecycle does not allow the requested transition.
    #[error(transparent)]
    InvalidStateTransition(#[from] TransitionError),

    /// The store was unreachable or the transaction failed.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl DomainError {
    /// Returns true for errors caused by conflicting with existing state.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateCode(_) | DomainError::InvalidStateTransition(_)
        )
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode(code) => DomainError::DuplicateCode(code),
            other => DomainError::Store(other),
        }
    }
}
