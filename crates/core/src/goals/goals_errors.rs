//! Goal business-rule violations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("Completed goals cannot be edited")]
    CompletedImmutable,

    #[error("Only in-progress goals can receive deposits")]
    NotInProgress,
}
