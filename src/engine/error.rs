//! Error types for validating and committing compensation drafts.

use thiserror::Error;

use crate::Amount;
use crate::model::{ComponentKey, EmployeeId};
use crate::persist::PersistError;

/// Top-level error returned by [`Engine::commit`](super::Engine::commit).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("employee {0}: no draft to commit")]
    NoDraft(EmployeeId),

    #[error("employee {employee}: invalid compensation: {source}")]
    Invalid {
        employee: EmployeeId,
        source: ValidationError,
    },

    #[error("employee {employee}: {source}")]
    Persist {
        employee: EmployeeId,
        source: PersistError,
    },
}

/// Input the engine tolerates but that must never be committed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("gross amount must be positive, got {0}")]
    NonPositiveGross(Amount),

    #[error("working hours per month must be positive, got {0}")]
    NonPositiveWorkingHours(f64),

    #[error("component {0} has a negative share")]
    NegativeComponent(ComponentKey),
}
