//! Budget business-rule violations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("Budget already exists for this category and period")]
    AlreadyExists,
}
