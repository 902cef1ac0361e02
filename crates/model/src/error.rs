//! Model error types.

use thiserror::Error;

use crate::DeliveryState;

/// Input that violates the shape or range constraints of the aggregate.
///
/// `field` names the offending input field; item fields are prefixed with
/// their position, e.g. `items[2].description`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} must have at most 2 decimal places")]
    TooPrecise { field: String },

    #[error("{field} must be less than 100000000")]
    OutOfRange { field: String },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::TooPrecise { field }
            | ValidationError::OutOfRange { field } => field,
        }
    }
}

/// A lifecycle transition that is not allowed from the note's current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid state transition: cannot {action} from {current} state")]
pub struct TransitionError {
    pub current: DeliveryState,
    pub action: &'static str,
}
