use thiserror::Error;

use crate::domain::{AccidentId, AccidentStatus};

/// Failures reported synchronously by store operations. A rejected
/// operation leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("no accident with id {0}")]
    NotFound(AccidentId),
    #[error("cannot move accident from '{from}' to '{to}'")]
    InvalidTransition {
        from: AccidentStatus,
        to: AccidentStatus,
    },
}

/// Rejected seed data at store construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeedError {
    #[error("duplicate accident id {0} in seed data")]
    DuplicateId(AccidentId),
    #[error("accident {id} has negative speed {speed}")]
    NegativeSpeed { id: AccidentId, speed: f64 },
}
